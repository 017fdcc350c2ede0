//! Site configuration loader.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Site-wide configuration, loaded from a TOML file.
///
/// Every section and field is optional; missing values fall back to the
/// defaults below so an empty file (or no file at all) is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub storage: StorageSection,
    pub image_service: ImageServiceSection,
    pub game: GameSection,
}

/// Where persisted snapshots live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Data directory for the JSON file store. When unset, a per-user
    /// application directory is used.
    pub data_dir: Option<PathBuf>,
}

/// The local proxy that fronts the AI image generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageServiceSection {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ImageServiceSection {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Minigame tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSection {
    /// Fixed base seed for all random draws; unset means fresh entropy at
    /// startup.
    pub seed: Option<u64>,
    /// External catalog file; unset means the built-in hundred legends.
    pub catalog: Option<PathBuf>,
}

/// Loader for [`SiteConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> LoadResult<SiteConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a TOML configuration document.
    pub fn parse(content: &str) -> LoadResult<SiteConfig> {
        toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse site config TOML: {}", e))
    }
}
