//! Sticker cards produced at reveal time.

use serde::{Deserialize, Serialize};

use crate::catalog::{Legend, LegendId};

/// A revealed sticker: a catalog legend plus the image generated for it.
///
/// Card identity is the legend id — two cards with the same id are
/// duplicates of the same sticker, whatever their image URLs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub legend: Legend,
    pub image_url: String,
}

impl Card {
    pub fn new(legend: Legend, image_url: impl Into<String>) -> Self {
        Self {
            legend,
            image_url: image_url.into(),
        }
    }

    /// The identity of this card.
    pub fn id(&self) -> LegendId {
        self.legend.id
    }
}
