//! Client-facing operations over the engines and repositories.

mod collection;
mod penalty;

pub use collection::{CollectionService, DEFAULT_OWNER, RevealOutcome};
pub use penalty::PenaltyService;
