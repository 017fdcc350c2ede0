//! Versioned JSON snapshots layered over the key-value store.
//!
//! Every persisted value is an `Envelope { version, data }`. A malformed
//! document or an unknown version reads as absent — the caller falls back
//! to a default and the incident is logged, never surfaced to the user.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use game_core::{AllCollections, OwnerId, PenaltyRecords, TeamSheet};

use crate::storage::{KeyValueStore, StorageError};

/// Snapshot schema version written by this build.
const SCHEMA_VERSION: u32 = 1;

/// Key holding the [`AllCollections`] snapshot.
pub const COLLECTIONS_KEY: &str = "panini/collections";

/// Key holding the persisted penalty records.
pub const PENALTY_KEY: &str = "penalty/records";

/// Key holding `owner`'s team sheet.
pub fn team_key(owner: &OwnerId) -> String {
    format!("panini/team/{owner}")
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) if envelope.version == SCHEMA_VERSION => Ok(Some(envelope.data)),
        Ok(envelope) => {
            warn!(key, version = envelope.version, "unknown snapshot version, using defaults");
            Ok(None)
        }
        Err(e) => {
            warn!(key, error = %e, "malformed snapshot, using defaults");
            Ok(None)
        }
    }
}

fn save<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    data: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(&Envelope {
        version: SCHEMA_VERSION,
        data,
    })?;
    store.put(key, raw)?;
    debug!(key, "snapshot persisted");
    Ok(())
}

/// Repository for the single [`AllCollections`] snapshot.
///
/// Keeping every owner in one record makes a trade's two-sided update
/// naturally atomic: both collections change in memory, then one `save`
/// makes both visible together.
pub struct CollectionsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl CollectionsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the snapshot; `None` when nothing (valid) is stored yet.
    pub fn load(&self) -> Result<Option<AllCollections>, StorageError> {
        load(self.store.as_ref(), COLLECTIONS_KEY)
    }

    pub fn save(&self, collections: &AllCollections) -> Result<(), StorageError> {
        save(self.store.as_ref(), COLLECTIONS_KEY, collections)
    }
}

/// Repository for per-owner team sheets.
pub struct TeamRepository {
    store: Arc<dyn KeyValueStore>,
}

impl TeamRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self, owner: &OwnerId) -> Result<Option<TeamSheet>, StorageError> {
        load(self.store.as_ref(), &team_key(owner))
    }

    pub fn save(&self, owner: &OwnerId, sheet: &TeamSheet) -> Result<(), StorageError> {
        save(self.store.as_ref(), &team_key(owner), sheet)
    }
}

/// Repository for the penalty high score, leaderboard, and player name.
pub struct PenaltyRepository {
    store: Arc<dyn KeyValueStore>,
}

impl PenaltyRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Option<PenaltyRecords>, StorageError> {
        load(self.store.as_ref(), PENALTY_KEY)
    }

    pub fn save(&self, records: &PenaltyRecords) -> Result<(), StorageError> {
        save(self.store.as_ref(), PENALTY_KEY, records)
    }
}
