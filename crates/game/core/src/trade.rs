//! Duplicate-for-missing card trades between two owners.
//!
//! A trade swaps exactly one card each way: the requester gives up one copy
//! of a duplicate and receives a card their album lacks. Eligibility is
//! validated here, against the live collections, immediately before the
//! swap is applied — a stale view held by a caller can never produce an
//! ineligible trade. Both collections mutate together in memory; callers
//! persist the containing [`AllCollections`] snapshot as one record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::card::Card;
use crate::catalog::LegendId;
use crate::collection::{AllCollections, OwnerId};

/// Why a trade was rejected. No state is mutated on rejection.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TradeError {
    #[error("owner {0} has no collection")]
    UnknownOwner(OwnerId),

    #[error("cannot trade with yourself")]
    SameOwner,

    #[error("{owner} does not have {id} in their album")]
    TargetMissingCard { owner: OwnerId, id: LegendId },

    #[error("requester already owns {0}")]
    AlreadyOwned(LegendId),

    #[error("offered card {id} is not a duplicate ({copies} copy in inventory)")]
    NotADuplicate { id: LegendId, copies: usize },

    #[error("{owner}'s inventory is missing a copy of {id}")]
    InventoryDesync { owner: OwnerId, id: LegendId },
}

/// Cards that changed hands in a successful trade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReceipt {
    /// Card the requester gave away.
    pub offered: Card,
    /// Card the requester received.
    pub received: Card,
}

/// Swap one card each way between `requester` and `target`.
///
/// Preconditions, all checked against the current state:
/// 1. distinct owners, both with existing collections;
/// 2. `target` has `requested` placed in their album;
/// 3. `requester` does not own `requested`;
/// 4. `requester` holds `offered` in two or more copies right now
///    (exactly two is fine — the post-trade count may drop to one).
///
/// On success both inventories keep their total size, and album slots only
/// ever gain cards: the receiving side's empty slot for the incoming card
/// fills, filled slots are left alone.
pub fn execute(
    all: &mut AllCollections,
    requester: &OwnerId,
    target: &OwnerId,
    offered: LegendId,
    requested: LegendId,
) -> Result<TradeReceipt, TradeError> {
    if requester == target {
        return Err(TradeError::SameOwner);
    }

    // Validate everything before touching either collection.
    let requester_coll = all
        .get(requester)
        .ok_or_else(|| TradeError::UnknownOwner(requester.clone()))?;
    let target_coll = all
        .get(target)
        .ok_or_else(|| TradeError::UnknownOwner(target.clone()))?;

    if !target_coll.owns(requested) {
        return Err(TradeError::TargetMissingCard {
            owner: target.clone(),
            id: requested,
        });
    }
    if requester_coll.owns(requested) {
        return Err(TradeError::AlreadyOwned(requested));
    }
    let copies = requester_coll.copies_of(offered);
    if copies < 2 {
        return Err(TradeError::NotADuplicate {
            id: offered,
            copies,
        });
    }

    // Resolve both removal positions (first acquisition first) while still
    // read-only, so every failure path leaves the collections untouched.
    let offered_index = requester_coll
        .inventory
        .iter()
        .position(|card| card.id() == offered)
        .ok_or_else(|| TradeError::InventoryDesync {
            owner: requester.clone(),
            id: offered,
        })?;
    let requested_index = target_coll
        .inventory
        .iter()
        .position(|card| card.id() == requested)
        .ok_or_else(|| TradeError::InventoryDesync {
            owner: target.clone(),
            id: requested,
        })?;

    // Apply: one copy each way. Nothing below can fail.
    let offered_card = all
        .get_mut(requester)
        .expect("validated above")
        .inventory
        .remove(offered_index);
    let received_card = all
        .get_mut(target)
        .expect("validated above")
        .inventory
        .remove(requested_index);
    give_card(all, target, offered_card.clone());
    give_card(all, requester, received_card.clone());

    Ok(TradeReceipt {
        offered: offered_card,
        received: received_card,
    })
}

/// Append a card to `owner`'s inventory and fill the matching slot if empty.
fn give_card(all: &mut AllCollections, owner: &OwnerId, card: Card) {
    let collection = all.get_mut(owner).expect("validated above");
    collection.acquire(card);
}
