//! External collaborator for sticker image generation.
//!
//! The daily reveal calls the image service once per drawn legend. Any
//! failure aborts the whole pack before anything is committed, so the
//! player keeps the day's allowance when the backend is down.

mod http;
mod placeholder;

pub use http::HttpImageService;
pub use placeholder::{PlaceholderImageService, placeholder_url};

use async_trait::async_trait;
use thiserror::Error;

use game_core::Legend;

/// Errors from the image-generation collaborator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("image service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("image service answered with status {0}")]
    Status(u16),
}

/// Trait for producing one sticker image per revealed legend.
///
/// Different implementations can handle:
/// - The local AI proxy (production)
/// - Deterministic placeholder URLs (offline mode, rival bootstrap, tests)
#[async_trait]
pub trait CardImageService: Send + Sync {
    /// Generate the image for `legend`, returning its URL.
    async fn generate(&self, legend: &Legend) -> Result<String, GenerationError>;
}
