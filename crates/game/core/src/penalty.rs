//! Penalty shootout state machine and persisted records.
//!
//! A run is a sequence of shots: aim at one of five goal zones, the keeper
//! independently dives to one of the same five, and any exact match is a
//! save (4/5 goal odds per shot, deliberately generous). Goals extend the
//! streak; the first save ends the run and writes it to the leaderboard.
//!
//! The shot/keeper reveal delay in the original game is presentation
//! timing only, so the engine keeps the two steps as separate transitions
//! (`shoot` records the target, `resolve` samples the keeper) but resolves
//! synchronously.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::rng::{RngOracle, mix_seed};

/// Leaderboard entries kept after each finalized run.
pub const LEADERBOARD_CAP: usize = 10;

/// Draw context separating keeper dives from other consumers of the seed.
const KEEPER_CONTEXT: u32 = 1;

/// The five spots a shot (or a dive) can go.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TargetZone {
    TopLeft,
    MidLeft,
    Center,
    MidRight,
    TopRight,
}

impl TargetZone {
    pub const ALL: [TargetZone; 5] = [
        TargetZone::TopLeft,
        TargetZone::MidLeft,
        TargetZone::Center,
        TargetZone::MidRight,
        TargetZone::TopRight,
    ];
}

/// What happened to a resolved shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ShotOutcome {
    Goal,
    Saved,
}

/// Where the game loop currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PenaltyPhase {
    /// Name entry and leaderboard display; nothing committed yet.
    Start,
    /// Waiting for the shooter to pick a zone.
    Aiming,
    /// Target locked in, keeper not yet revealed.
    ShotInFlight { target: TargetZone },
    /// Shot resolved; offers "next shot" after a goal, "play again" after
    /// a save.
    Result {
        target: TargetZone,
        keeper: TargetZone,
        outcome: ShotOutcome,
    },
}

impl PenaltyPhase {
    /// Short label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            PenaltyPhase::Start => "start",
            PenaltyPhase::Aiming => "aiming",
            PenaltyPhase::ShotInFlight { .. } => "shot-in-flight",
            PenaltyPhase::Result { .. } => "result",
        }
    }
}

/// A transition attempted from the wrong phase. The game state is unchanged.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PenaltyError {
    #[error("cannot {op} during the {phase} phase")]
    WrongPhase {
        op: &'static str,
        phase: &'static str,
    },
}

/// Everything a caller needs to display one resolved shot, in the visible
/// order: chosen target, then keeper dive, then outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShotReport {
    pub target: TargetZone,
    pub keeper: TargetZone,
    pub outcome: ShotOutcome,
    /// Streak after this shot; on a save, the final score of the run.
    pub streak: u32,
}

/// Single-session penalty run. Transient: only [`PenaltyRecords`] persists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PenaltyGame {
    phase: PenaltyPhase,
    streak: u32,
    /// Shots resolved so far; nonce for the keeper draw.
    shots: u64,
    seed: u64,
}

impl PenaltyGame {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: PenaltyPhase::Start,
            streak: 0,
            shots: 0,
            seed,
        }
    }

    pub fn phase(&self) -> PenaltyPhase {
        self.phase
    }

    /// Consecutive goals in the current run.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Start a fresh game: `Start` → `Aiming` with a zero streak.
    pub fn begin(&mut self) -> Result<(), PenaltyError> {
        match self.phase {
            PenaltyPhase::Start => {
                self.streak = 0;
                self.phase = PenaltyPhase::Aiming;
                Ok(())
            }
            phase => Err(PenaltyError::WrongPhase {
                op: "begin",
                phase: phase.label(),
            }),
        }
    }

    /// Lock in the shooter's target: `Aiming` → `ShotInFlight`.
    pub fn shoot(&mut self, target: TargetZone) -> Result<(), PenaltyError> {
        match self.phase {
            PenaltyPhase::Aiming => {
                self.phase = PenaltyPhase::ShotInFlight { target };
                Ok(())
            }
            phase => Err(PenaltyError::WrongPhase {
                op: "shoot",
                phase: phase.label(),
            }),
        }
    }

    /// Sample the keeper's dive and settle the shot: `ShotInFlight` →
    /// `Result`.
    ///
    /// The keeper picks uniformly among the five zones, independently of
    /// the shooter. Goal iff the zones differ; a goal extends the streak,
    /// a save freezes it as the run's final score.
    pub fn resolve(&mut self, rng: &dyn RngOracle) -> Result<ShotReport, PenaltyError> {
        let PenaltyPhase::ShotInFlight { target } = self.phase else {
            return Err(PenaltyError::WrongPhase {
                op: "resolve",
                phase: self.phase.label(),
            });
        };

        let dive = rng.pick(mix_seed(self.seed, self.shots, KEEPER_CONTEXT), 5);
        let keeper = TargetZone::ALL[dive as usize];
        self.shots += 1;

        let outcome = if target != keeper {
            ShotOutcome::Goal
        } else {
            ShotOutcome::Saved
        };
        if outcome == ShotOutcome::Goal {
            self.streak += 1;
        }

        self.phase = PenaltyPhase::Result {
            target,
            keeper,
            outcome,
        };
        Ok(ShotReport {
            target,
            keeper,
            outcome,
            streak: self.streak,
        })
    }

    /// After a goal, line up the next shot keeping the streak.
    pub fn next_round(&mut self) -> Result<(), PenaltyError> {
        match self.phase {
            PenaltyPhase::Result {
                outcome: ShotOutcome::Goal,
                ..
            } => {
                self.phase = PenaltyPhase::Aiming;
                Ok(())
            }
            phase => Err(PenaltyError::WrongPhase {
                op: "start the next round",
                phase: phase.label(),
            }),
        }
    }

    /// After a save, restart with a zero streak.
    pub fn play_again(&mut self) -> Result<(), PenaltyError> {
        match self.phase {
            PenaltyPhase::Result {
                outcome: ShotOutcome::Saved,
                ..
            } => {
                self.streak = 0;
                self.phase = PenaltyPhase::Aiming;
                Ok(())
            }
            phase => Err(PenaltyError::WrongPhase {
                op: "play again",
                phase: phase.label(),
            }),
        }
    }
}

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Persisted penalty state: personal best, all-time leaderboard, and the
/// editable player name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyRecords {
    pub high_score: u32,
    /// Sorted by score descending, capped at [`LEADERBOARD_CAP`].
    pub leaderboard: Vec<ScoreEntry>,
    pub player_name: String,
}

impl Default for PenaltyRecords {
    fn default() -> Self {
        Self {
            high_score: 0,
            leaderboard: Vec::new(),
            player_name: "Joueur 1".to_string(),
        }
    }
}

impl PenaltyRecords {
    /// Fold a finished run into the records: raise the personal best if
    /// beaten, append `{player_name, score}`, re-sort descending (stable,
    /// so earlier runs rank above later equals) and cap the board.
    pub fn record_run(&mut self, score: u32) {
        if score > self.high_score {
            self.high_score = score;
        }
        self.leaderboard.push(ScoreEntry {
            name: self.player_name.clone(),
            score,
        });
        self.leaderboard.sort_by(|a, b| b.score.cmp(&a.score));
        self.leaderboard.truncate(LEADERBOARD_CAP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;

    /// Oracle that always yields the same raw value; `pick(_, 5)` lands on
    /// `ALL[value % 5]`.
    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn aiming_game() -> PenaltyGame {
        let mut game = PenaltyGame::new(0);
        game.begin().unwrap();
        game
    }

    #[test]
    fn exact_match_is_always_saved_and_miss_is_always_goal() {
        for (t, target) in TargetZone::ALL.into_iter().enumerate() {
            for (k, _keeper) in TargetZone::ALL.into_iter().enumerate() {
                let mut game = aiming_game();
                game.shoot(target).unwrap();
                let report = game.resolve(&FixedRng(k as u32)).unwrap();

                assert_eq!(report.target, target);
                assert_eq!(report.keeper, TargetZone::ALL[k]);
                if t == k {
                    assert_eq!(report.outcome, ShotOutcome::Saved);
                } else {
                    assert_eq!(report.outcome, ShotOutcome::Goal);
                }
            }
        }
    }

    #[test]
    fn goals_extend_the_streak_and_saves_freeze_it() {
        let mut game = aiming_game();

        // Keeper always dives center; shoot wide twice, then into the dive.
        for expected in [1, 2] {
            game.shoot(TargetZone::TopLeft).unwrap();
            let report = game.resolve(&FixedRng(2)).unwrap();
            assert_eq!(report.outcome, ShotOutcome::Goal);
            assert_eq!(report.streak, expected);
            game.next_round().unwrap();
        }

        game.shoot(TargetZone::Center).unwrap();
        let report = game.resolve(&FixedRng(2)).unwrap();
        assert_eq!(report.outcome, ShotOutcome::Saved);
        assert_eq!(report.streak, 2);
        assert_eq!(game.streak(), 2);
    }

    #[test]
    fn play_again_resets_the_streak() {
        let mut game = aiming_game();
        game.shoot(TargetZone::TopLeft).unwrap();
        game.resolve(&FixedRng(2)).unwrap();
        game.next_round().unwrap();
        game.shoot(TargetZone::Center).unwrap();
        game.resolve(&FixedRng(2)).unwrap();

        game.play_again().unwrap();
        assert_eq!(game.streak(), 0);
        assert_eq!(game.phase(), PenaltyPhase::Aiming);
    }

    #[test]
    fn transitions_from_the_wrong_phase_are_rejected() {
        let mut game = PenaltyGame::new(0);
        assert!(game.shoot(TargetZone::Center).is_err());
        assert!(game.resolve(&PcgRng).is_err());
        assert!(game.next_round().is_err());
        assert!(game.play_again().is_err());

        game.begin().unwrap();
        assert!(game.begin().is_err());
        assert!(game.resolve(&PcgRng).is_err());

        game.shoot(TargetZone::Center).unwrap();
        assert!(game.shoot(TargetZone::Center).is_err());

        // A goal's result phase offers next_round but not play_again.
        game.resolve(&FixedRng(0)).unwrap();
        match game.phase() {
            PenaltyPhase::Result {
                outcome: ShotOutcome::Goal,
                ..
            } => assert!(game.play_again().is_err()),
            PenaltyPhase::Result {
                outcome: ShotOutcome::Saved,
                ..
            } => assert!(game.next_round().is_err()),
            phase => panic!("unexpected phase {phase:?}"),
        }
    }

    #[test]
    fn failed_transition_leaves_state_unchanged() {
        let mut game = aiming_game();
        let before = game.clone();
        assert!(game.begin().is_err());
        assert!(game.resolve(&PcgRng).is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn goal_rate_is_statistically_four_in_five() {
        let rng = PcgRng;
        let mut goals = 0u32;
        let shots = 10_000u64;

        let mut game = PenaltyGame::new(0xc1b0);
        game.begin().unwrap();
        for shot in 0..shots {
            // Uniform random target, drawn independently of the keeper.
            let zone = TargetZone::ALL
                [rng.pick(mix_seed(0x5eed, shot, 7), 5) as usize];
            game.shoot(zone).unwrap();
            let report = game.resolve(&rng).unwrap();
            match report.outcome {
                ShotOutcome::Goal => {
                    goals += 1;
                    game.next_round().unwrap();
                }
                ShotOutcome::Saved => game.play_again().unwrap(),
            }
        }

        // Expected 80%; five standard deviations is ±2 points on 10k shots.
        let rate = goals as f64 / shots as f64;
        assert!((0.78..=0.82).contains(&rate), "goal rate {rate}");
    }

    #[test]
    fn record_run_updates_high_score_and_board() {
        let mut records = PenaltyRecords {
            player_name: "Capitaine".to_string(),
            ..Default::default()
        };

        records.record_run(5);
        assert_eq!(records.high_score, 5);
        assert_eq!(records.leaderboard.len(), 1);
        assert_eq!(records.leaderboard[0].name, "Capitaine");
        assert_eq!(records.leaderboard[0].score, 5);

        // A lower run joins the board without touching the best.
        records.record_run(2);
        assert_eq!(records.high_score, 5);
        assert_eq!(records.leaderboard.len(), 2);
        assert_eq!(records.leaderboard[1].score, 2);
    }

    #[test]
    fn leaderboard_sorts_descending_and_caps_at_ten() {
        let mut records = PenaltyRecords::default();
        for score in [3, 9, 1, 7, 5, 0, 8, 2, 6, 4, 10, 11] {
            records.record_run(score);
        }

        assert_eq!(records.leaderboard.len(), LEADERBOARD_CAP);
        let scores: Vec<u32> = records.leaderboard.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![11, 10, 9, 8, 7, 6, 5, 4, 3, 2]);
        assert_eq!(records.high_score, 11);
    }

    #[test]
    fn equal_scores_keep_earlier_runs_on_top() {
        let mut records = PenaltyRecords::default();
        records.player_name = "Premier".to_string();
        records.record_run(4);
        records.player_name = "Second".to_string();
        records.record_run(4);

        assert_eq!(records.leaderboard[0].name, "Premier");
        assert_eq!(records.leaderboard[1].name, "Second");
    }
}
