//! Unified error types surfaced by the runtime services.
//!
//! Wraps failures from storage, the image-generation collaborator, and the
//! engine operations so clients can bubble them up with consistent context.

use thiserror::Error;

use game_core::{LegendId, OwnerId, PenaltyError, TeamError, TradeError};

use crate::providers::GenerationError;
use crate::storage::StorageError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The image backend is unreachable or refused; the reveal was aborted
    /// with no state committed.
    #[error("image generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("trade rejected: {0}")]
    Trade(#[from] TradeError),

    #[error(transparent)]
    Penalty(#[from] PenaltyError),

    #[error(transparent)]
    Team(#[from] TeamError),

    #[error("a pack is already being opened for {0}")]
    RevealInProgress(OwnerId),

    #[error("{owner} holds no copy of {id}")]
    CardNotInInventory { owner: OwnerId, id: LegendId },

    #[error("owner {0} has no collection")]
    UnknownOwner(OwnerId),
}
