//! Runtime orchestration for the club minigames.
//!
//! This crate wires the pure engines from `game-core` to the outside
//! world: a namespaced key-value store for snapshots, the AI image
//! service behind the daily reveal, and the local calendar. Consumers
//! embed the services to drive the album and the penalty game; all game
//! rules stay in `game-core`.
//!
//! Modules are organized by responsibility:
//! - [`storage`] is the opaque key-value store and its backends
//! - [`repository`] layers versioned JSON snapshots on top of it
//! - [`providers`] hosts the image-generation collaborator
//! - [`clock`] abstracts "today" for the reveal gate
//! - [`services`] exposes the operations clients call
pub mod clock;
pub mod error;
pub mod providers;
pub mod repository;
pub mod services;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, RuntimeError};
pub use providers::{
    CardImageService, GenerationError, HttpImageService, PlaceholderImageService,
};
pub use repository::{
    COLLECTIONS_KEY, CollectionsRepository, PENALTY_KEY, PenaltyRepository, TeamRepository,
    team_key,
};
pub use services::{CollectionService, PenaltyService, RevealOutcome};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
