//! Per-owner sticker albums and duplicate inventories.
//!
//! A [`PlayerCollection`] tracks two views of the same acquisitions: the
//! album slots (one per catalog legend, filled at most once) and the card
//! inventory (the full acquisition log, duplicates included). The slot for
//! a legend fills with the first card of that id and never unfills; every
//! later copy only grows the inventory.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::catalog::{Catalog, Legend, LegendId};

/// String key identifying whose collection a record belongs to.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// The canonical display position for one legend in an album.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSlot {
    pub legend: Legend,
    /// First card of this legend the owner obtained, if any.
    pub placed: Option<Card>,
}

impl AlbumSlot {
    pub fn is_filled(&self) -> bool {
        self.placed.is_some()
    }
}

/// A distinct inventory card together with how many copies the owner holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardCount {
    pub card: Card,
    pub count: usize,
}

/// One owner's album, reveal gate, and acquisition log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCollection {
    /// One slot per catalog legend, in catalog order.
    pub slots: Vec<AlbumSlot>,
    /// Calendar day of the last committed reveal.
    pub last_reveal: Option<NaiveDate>,
    /// Every card ever obtained, in acquisition order, duplicates included.
    pub inventory: Vec<Card>,
}

impl PlayerCollection {
    /// Fresh collection: one empty slot per catalog legend, empty inventory.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            slots: catalog
                .legends()
                .iter()
                .map(|legend| AlbumSlot {
                    legend: legend.clone(),
                    placed: None,
                })
                .collect(),
            last_reveal: None,
            inventory: Vec::new(),
        }
    }

    /// True iff no reveal has been committed on `today` yet.
    ///
    /// Day granularity is the sole gating rule; there is no time-of-day
    /// component.
    pub fn can_reveal(&self, today: NaiveDate) -> bool {
        self.last_reveal != Some(today)
    }

    /// Commit a revealed pack: fill still-empty slots (first ownership
    /// wins), append every card to the inventory, and consume today's
    /// allowance. An empty pack (completed collection) still stamps
    /// `last_reveal`.
    pub fn commit_reveal(&mut self, cards: Vec<Card>, today: NaiveDate) {
        for card in cards {
            self.acquire(card);
        }
        self.last_reveal = Some(today);
    }

    /// Log one newly obtained card: fill its slot if still empty (first
    /// ownership wins), append to the inventory unconditionally. Does not
    /// touch the reveal allowance — trades and prefills go through here too.
    pub(crate) fn acquire(&mut self, card: Card) {
        self.place_first(&card);
        self.inventory.push(card);
    }

    /// Place a card into its slot only if the slot is still empty.
    fn place_first(&mut self, card: &Card) {
        if let Some(slot) = self.slot_mut(card.id()) {
            if slot.placed.is_none() {
                slot.placed = Some(card.clone());
            }
        }
    }

    pub fn slot(&self, id: LegendId) -> Option<&AlbumSlot> {
        self.slots.iter().find(|s| s.legend.id == id)
    }

    fn slot_mut(&mut self, id: LegendId) -> Option<&mut AlbumSlot> {
        self.slots.iter_mut().find(|s| s.legend.id == id)
    }

    /// Whether the owner's slot for `id` is filled.
    pub fn owns(&self, id: LegendId) -> bool {
        self.slot(id).is_some_and(AlbumSlot::is_filled)
    }

    /// Number of filled album slots.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_filled()).count()
    }

    /// Legends whose slot is still empty, in catalog order.
    pub fn uncollected(&self) -> Vec<Legend> {
        self.slots
            .iter()
            .filter(|s| !s.is_filled())
            .map(|s| s.legend.clone())
            .collect()
    }

    /// Album completion as an unrounded percentage. 100.0 only when every
    /// slot is filled.
    pub fn completion_percentage(&self) -> f64 {
        self.filled_count() as f64 / self.slots.len() as f64 * 100.0
    }

    /// Copies of `id` in the inventory.
    pub fn copies_of(&self, id: LegendId) -> usize {
        self.inventory.iter().filter(|c| c.id() == id).count()
    }

    /// Per-legend inventory tallies, sorted by count descending; ties keep
    /// first-seen (acquisition) order.
    pub fn inventory_counts(&self) -> Vec<CardCount> {
        let mut counts: Vec<CardCount> = Vec::new();
        for card in &self.inventory {
            match counts.iter_mut().find(|entry| entry.card.id() == card.id()) {
                Some(entry) => entry.count += 1,
                None => counts.push(CardCount {
                    card: card.clone(),
                    count: 1,
                }),
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    /// Distinct cards held in two or more copies — the trade-offerable set.
    pub fn duplicates(&self) -> Vec<Card> {
        self.inventory_counts()
            .into_iter()
            .filter(|entry| entry.count >= 2)
            .map(|entry| entry.card)
            .collect()
    }

    /// Fill the slots for `ids` directly, as if each card had been revealed
    /// once. Used to seed mock rival albums so trading has counterparties.
    pub fn prefill(&mut self, ids: impl IntoIterator<Item = LegendId>, image_url: impl Fn(&Legend) -> String) {
        for id in ids {
            let Some(slot) = self.slot(id) else { continue };
            if slot.is_filled() {
                continue;
            }
            let card = Card::new(slot.legend.clone(), image_url(&slot.legend));
            self.acquire(card);
        }
    }
}

/// Every owner's collection, keyed by owner identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllCollections {
    collections: BTreeMap<OwnerId, PlayerCollection>,
}

impl AllCollections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, owner: &OwnerId) -> Option<&PlayerCollection> {
        self.collections.get(owner)
    }

    pub fn get_mut(&mut self, owner: &OwnerId) -> Option<&mut PlayerCollection> {
        self.collections.get_mut(owner)
    }

    /// Fetch `owner`'s collection, lazily creating an empty one.
    ///
    /// Returns whether a collection was created, so callers know a persist
    /// is due.
    pub fn get_or_create(
        &mut self,
        owner: &OwnerId,
        catalog: &Catalog,
    ) -> (&mut PlayerCollection, bool) {
        let created = !self.collections.contains_key(owner);
        let collection = self
            .collections
            .entry(owner.clone())
            .or_insert_with(|| PlayerCollection::new(catalog));
        (collection, created)
    }

    pub fn insert(&mut self, owner: OwnerId, collection: PlayerCollection) {
        self.collections.insert(owner, collection);
    }

    pub fn owners(&self) -> impl Iterator<Item = &OwnerId> {
        self.collections.keys()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
