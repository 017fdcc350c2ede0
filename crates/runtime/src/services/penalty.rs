//! Penalty shootout sessions and record keeping.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use game_core::{
    PenaltyGame, PenaltyRecords, RngOracle, ShotOutcome, ShotReport, TargetZone, mix_seed,
};

use crate::error::Result;
use crate::repository::PenaltyRepository;
use crate::storage::KeyValueStore;

/// Draw context separating penalty sessions from album packs.
const SESSION_CONTEXT: u32 = 2;

/// Service running penalty games and persisting their records.
pub struct PenaltyService {
    records: PenaltyRepository,
    rng: Arc<dyn RngOracle>,
    base_seed: u64,
    /// Games handed out so far; keeps successive sessions on distinct seeds.
    sessions: AtomicU64,
}

impl PenaltyService {
    pub fn new(store: Arc<dyn KeyValueStore>, rng: Arc<dyn RngOracle>, base_seed: u64) -> Self {
        Self {
            records: PenaltyRepository::new(store),
            rng,
            base_seed,
            sessions: AtomicU64::new(0),
        }
    }

    /// Persisted high score, leaderboard, and player name.
    pub fn records(&self) -> Result<PenaltyRecords> {
        Ok(self.records.load()?.unwrap_or_default())
    }

    /// Rename the player shown on future leaderboard entries.
    pub fn set_player_name(&self, name: &str) -> Result<PenaltyRecords> {
        let mut records = self.records()?;
        records.player_name = name.to_string();
        self.records.save(&records)?;
        Ok(records)
    }

    /// A fresh game in the `Start` phase, on its own seed.
    pub fn new_game(&self) -> PenaltyGame {
        let session = self.sessions.fetch_add(1, Ordering::Relaxed);
        PenaltyGame::new(mix_seed(self.base_seed, session, SESSION_CONTEXT))
    }

    /// Take one shot: lock in the target, reveal the keeper, settle the
    /// outcome. A save ends the run and folds it into the persisted
    /// records before returning.
    pub fn shoot(&self, game: &mut PenaltyGame, target: TargetZone) -> Result<ShotReport> {
        game.shoot(target)?;
        let report = game.resolve(self.rng.as_ref())?;

        if report.outcome == ShotOutcome::Saved {
            let mut records = self.records()?;
            records.record_run(report.streak);
            self.records.save(&records)?;
            info!(score = report.streak, "penalty run finalized");
        }
        Ok(report)
    }
}
