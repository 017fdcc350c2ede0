//! Static club content and data-file loaders.
//!
//! This crate houses the sticker catalog (the hundred legends the album
//! collects) and loaders for the RON/TOML data files:
//! - Sticker catalog (data-driven via RON)
//! - Site configuration (data-driven via TOML)
//!
//! Content is consumed once at startup and never appears in game state.
//! All loaders deserialize straight into `game-core` types with serde.
pub mod loaders;

pub use loaders::{CatalogLoader, ConfigLoader, SiteConfig, builtin_catalog};
