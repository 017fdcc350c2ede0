//! Deterministic minigame logic shared across clients.
//!
//! `game-core` defines the canonical rules of the club's two minigames: the
//! Panini sticker album (daily pack reveals, duplicate inventory, trading)
//! and the penalty shootout. All APIs are pure: randomness comes from an
//! injected [`rng::RngOracle`] and "today" is always an explicit argument,
//! so the runtime and offline tools can drive the same code deterministically.
pub mod card;
pub mod catalog;
pub mod collection;
pub mod penalty;
pub mod reveal;
pub mod rng;
pub mod team;
pub mod trade;

pub use card::Card;
pub use catalog::{Catalog, CatalogError, Legend, LegendId};
pub use collection::{
    AlbumSlot, AllCollections, CardCount, OwnerId, PlayerCollection,
};
pub use penalty::{
    LEADERBOARD_CAP, PenaltyError, PenaltyGame, PenaltyPhase, PenaltyRecords, ScoreEntry,
    ShotOutcome, ShotReport, TargetZone,
};
pub use reveal::{DAILY_PACK_SIZE, draw_pack};
pub use rng::{PcgRng, RngOracle, mix_seed};
pub use team::{TeamError, TeamSheet, TeamSlot};
pub use trade::{TradeError, TradeReceipt};
