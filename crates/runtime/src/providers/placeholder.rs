//! Deterministic placeholder images for offline use.

use async_trait::async_trait;

use game_core::{Legend, LegendId};

use super::{CardImageService, GenerationError};

/// Seeded placeholder image for a legend; stable across runs so prefilled
/// rival albums look the same every session.
pub fn placeholder_url(id: LegendId) -> String {
    format!("https://picsum.photos/seed/panini{}/300/400", id.0)
}

/// [`CardImageService`] that never leaves the machine: every legend maps to
/// its [`placeholder_url`]. Used when no AI proxy is running, and by tests.
pub struct PlaceholderImageService;

#[async_trait]
impl CardImageService for PlaceholderImageService {
    async fn generate(&self, legend: &Legend) -> Result<String, GenerationError> {
        Ok(placeholder_url(legend.id))
    }
}
