//! Sticker catalog loader.

use std::path::Path;

use game_core::{Catalog, Legend};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickerCatalog {
    pub legends: Vec<Legend>,
}

/// Loader for the sticker catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the sticker catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a RON catalog document.
    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let file: StickerCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse sticker catalog RON: {}", e))?;
        Catalog::new(file.legends)
            .map_err(|e| anyhow::anyhow!("Invalid sticker catalog: {}", e))
    }
}

/// The album shipped with the site: one hundred legends of the game.
pub fn builtin_catalog() -> Catalog {
    CatalogLoader::parse(include_str!("../../data/legends.ron"))
        .unwrap_or_else(|e| panic!("built-in catalog is malformed: {e}"))
}
