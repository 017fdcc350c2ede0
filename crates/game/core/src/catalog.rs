//! The fixed sticker catalog.
//!
//! One [`Legend`] per collectible sticker. The catalog is loaded once at
//! startup (see `game-content`) and never mutated; every album derives its
//! slot layout from the catalog order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a catalog legend. Unique, assigned `1..=N` in catalog order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LegendId(pub u32);

impl core::fmt::Display for LegendId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One collectible entity: a legendary player the album has a slot for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    pub id: LegendId,
    pub name: String,
    pub country: String,
    pub description: String,
}

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog contains no legends")]
    Empty,

    #[error("duplicate legend id {0}")]
    DuplicateId(LegendId),
}

/// Ordered, read-only list of every collectible legend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    legends: Vec<Legend>,
}

impl Catalog {
    /// Build a catalog, rejecting empty input and duplicate ids.
    pub fn new(legends: Vec<Legend>) -> Result<Self, CatalogError> {
        if legends.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, legend) in legends.iter().enumerate() {
            if legends[..i].iter().any(|other| other.id == legend.id) {
                return Err(CatalogError::DuplicateId(legend.id));
            }
        }
        Ok(Self { legends })
    }

    /// All legends in catalog order.
    pub fn legends(&self) -> &[Legend] {
        &self.legends
    }

    /// Number of collectible legends (album size).
    pub fn len(&self) -> usize {
        self.legends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legends.is_empty()
    }

    /// Look up a legend by id.
    pub fn legend(&self, id: LegendId) -> Option<&Legend> {
        self.legends.iter().find(|l| l.id == id)
    }
}
