//! Per-owner dream-team sheet built from collected cards.
//!
//! Independent of album invariants: slots hold any card the owner has in
//! their inventory (the runtime enforces ownership), and clearing a slot
//! never touches the collection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::Card;

/// One position on the pitch or the bench.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSlot {
    /// Stable slot key, e.g. `gk`, `lcb`, `sub3`.
    pub id: String,
    /// Display label, e.g. "Gardien".
    pub label: String,
    /// Placement hint for pitch rendering; empty for bench slots.
    pub position_hint: String,
    pub card: Option<Card>,
}

impl TeamSlot {
    fn pitch(id: &str, label: &str, position_hint: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            position_hint: position_hint.to_string(),
            card: None,
        }
    }

    fn bench(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: "REM".to_string(),
            position_hint: String::new(),
            card: None,
        }
    }

    pub fn is_bench(&self) -> bool {
        self.position_hint.is_empty()
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TeamError {
    #[error("no team slot named {0:?}")]
    UnknownSlot(String),
}

/// The owner's eleven plus five substitutes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub slots: Vec<TeamSlot>,
}

impl Default for TeamSheet {
    /// The 4-4-2 the club lines up by default.
    fn default() -> Self {
        Self {
            slots: vec![
                TeamSlot::pitch("gk", "Gardien", "17 / 5 / span 3 / span 2"),
                TeamSlot::pitch("lb", "Déf. Gauche", "13 / 2 / span 3 / span 2"),
                TeamSlot::pitch("lcb", "Déf. Central", "13 / 4 / span 3 / span 2"),
                TeamSlot::pitch("rcb", "Déf. Central", "13 / 6 / span 3 / span 2"),
                TeamSlot::pitch("rb", "Déf. Droit", "13 / 8 / span 3 / span 2"),
                TeamSlot::pitch("lm", "Mil. Gauche", "8 / 2 / span 3 / span 2"),
                TeamSlot::pitch("lcm", "Mil. Central", "8 / 4 / span 3 / span 2"),
                TeamSlot::pitch("rcm", "Mil. Central", "8 / 6 / span 3 / span 2"),
                TeamSlot::pitch("rm", "Mil. Droit", "8 / 8 / span 3 / span 2"),
                TeamSlot::pitch("lst", "Attaquant", "3 / 4 / span 3 / span 2"),
                TeamSlot::pitch("rst", "Attaquant", "3 / 6 / span 3 / span 2"),
                TeamSlot::bench("sub1"),
                TeamSlot::bench("sub2"),
                TeamSlot::bench("sub3"),
                TeamSlot::bench("sub4"),
                TeamSlot::bench("sub5"),
            ],
        }
    }
}

impl TeamSheet {
    pub fn slot(&self, id: &str) -> Option<&TeamSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Put `card` on the slot, replacing whatever was there.
    pub fn assign(&mut self, slot_id: &str, card: Card) -> Result<(), TeamError> {
        let slot = self.slot_mut(slot_id)?;
        slot.card = Some(card);
        Ok(())
    }

    /// Empty the slot.
    pub fn clear(&mut self, slot_id: &str) -> Result<(), TeamError> {
        let slot = self.slot_mut(slot_id)?;
        slot.card = None;
        Ok(())
    }

    fn slot_mut(&mut self, id: &str) -> Result<&mut TeamSlot, TeamError> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| TeamError::UnknownSlot(id.to_string()))
    }
}
