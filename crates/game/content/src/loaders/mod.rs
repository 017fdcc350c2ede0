//! Content loaders for reading club data from files.

pub mod catalog;
pub mod config;

pub use catalog::{CatalogLoader, builtin_catalog};
pub use config::{ConfigLoader, SiteConfig};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
