//! Album, reveal, trade, and team-sheet orchestration.
//!
//! The service owns the persistence round-trips: every mutation loads the
//! current snapshot, applies one engine operation, and writes the snapshot
//! back before returning. Reveals are the one async path (image
//! generation) and are guarded so each owner has at most one pack open at
//! a time.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Datelike;
use tracing::info;

use game_core::{
    AllCollections, Card, Catalog, LegendId, OwnerId, PlayerCollection, RngOracle, TeamSheet,
    TradeReceipt, draw_pack, mix_seed, trade,
};

use crate::clock::Clock;
use crate::error::{Result, RuntimeError};
use crate::providers::{CardImageService, placeholder_url};
use crate::repository::{CollectionsRepository, TeamRepository};
use crate::storage::KeyValueStore;

/// Owner identity used when the client does not name one.
pub const DEFAULT_OWNER: &str = "Mon Album";

/// Mock rivals seeded on first launch so trading has counterparties, each
/// prefilled with a block of the album.
const RIVAL_SEEDS: [(&str, u32, u32); 2] =
    [("Joueur_Deux", 1, 20), ("Joueur_Trois", 21, 40)];

/// What a daily pack request amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Today's pack, freshly committed.
    Opened(Vec<Card>),
    /// Today's allowance was already spent; nothing happened.
    AlreadyRevealed,
    /// Every slot is filled. The allowance is still consumed so the button
    /// stays down until tomorrow.
    CollectionComplete,
}

/// Service managing every owner's album and team sheet.
pub struct CollectionService {
    catalog: Arc<Catalog>,
    collections: CollectionsRepository,
    teams: TeamRepository,
    images: Arc<dyn CardImageService>,
    clock: Arc<dyn Clock>,
    rng: Arc<dyn RngOracle>,
    base_seed: u64,
    /// Owners with a reveal currently in flight.
    opening: Mutex<HashSet<OwnerId>>,
}

impl CollectionService {
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn KeyValueStore>,
        images: Arc<dyn CardImageService>,
        clock: Arc<dyn Clock>,
        rng: Arc<dyn RngOracle>,
        base_seed: u64,
    ) -> Self {
        Self {
            catalog,
            collections: CollectionsRepository::new(store.clone()),
            teams: TeamRepository::new(store),
            images,
            clock,
            rng,
            base_seed,
            opening: Mutex::new(HashSet::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current snapshot of every collection, seeding the rival albums on
    /// the very first load.
    pub fn all_collections(&self) -> Result<AllCollections> {
        if let Some(all) = self.collections.load()? {
            return Ok(all);
        }
        let mut all = AllCollections::new();
        for (name, from, to) in RIVAL_SEEDS {
            let mut rival = PlayerCollection::new(&self.catalog);
            rival.prefill((from..=to).map(LegendId), |legend| {
                placeholder_url(legend.id)
            });
            all.insert(OwnerId::from(name), rival);
        }
        self.collections.save(&all)?;
        info!(rivals = RIVAL_SEEDS.len(), "seeded rival collections");
        Ok(all)
    }

    /// Fetch `owner`'s collection, creating and persisting an empty one on
    /// first access.
    pub fn collection(&self, owner: &OwnerId) -> Result<PlayerCollection> {
        let mut all = self.all_collections()?;
        let (collection, created) = all.get_or_create(owner, &self.catalog);
        let snapshot = collection.clone();
        if created {
            self.collections.save(&all)?;
            info!(%owner, "created empty collection");
        }
        Ok(snapshot)
    }

    /// Open today's pack for `owner`: draw up to three uncollected legends,
    /// generate their images, and commit the cards.
    ///
    /// Nothing is committed — and the daily allowance survives — unless
    /// every image generation succeeds. At most one pack per owner may be
    /// in flight.
    pub async fn open_daily_pack(&self, owner: &OwnerId) -> Result<RevealOutcome> {
        let _guard = OpeningGuard::acquire(&self.opening, owner)?;

        let today = self.clock.today();
        let mut all = self.all_collections()?;
        let (collection, _) = all.get_or_create(owner, &self.catalog);

        if !collection.can_reveal(today) {
            info!(%owner, %today, "pack already opened today");
            return Ok(RevealOutcome::AlreadyRevealed);
        }

        let seed = mix_seed(
            self.base_seed,
            today.num_days_from_ce() as u64,
            owner_context(owner),
        );
        let pack = draw_pack(collection, self.rng.as_ref(), seed);

        if pack.is_empty() {
            collection.commit_reveal(Vec::new(), today);
            self.collections.save(&all)?;
            info!(%owner, "collection complete, allowance consumed");
            return Ok(RevealOutcome::CollectionComplete);
        }

        // Generate every image before touching any state; one failure
        // aborts the whole pack.
        let mut cards = Vec::with_capacity(pack.len());
        for legend in pack {
            let url = self.images.generate(&legend).await?;
            cards.push(Card::new(legend, url));
        }

        let (collection, _) = all.get_or_create(owner, &self.catalog);
        collection.commit_reveal(cards.clone(), today);
        self.collections.save(&all)?;
        info!(%owner, cards = cards.len(), %today, "pack committed");
        Ok(RevealOutcome::Opened(cards))
    }

    /// Swap one of `requester`'s duplicates for a card they lack.
    ///
    /// Eligibility is validated by the engine against the snapshot loaded
    /// here, and both sides persist in a single write.
    pub fn trade(
        &self,
        requester: &OwnerId,
        target: &OwnerId,
        offered: LegendId,
        requested: LegendId,
    ) -> Result<TradeReceipt> {
        let mut all = self.all_collections()?;
        let receipt = trade::execute(&mut all, requester, target, offered, requested)?;
        self.collections.save(&all)?;
        info!(
            %requester,
            %target,
            offered = %receipt.offered.id(),
            received = %receipt.received.id(),
            "trade committed"
        );
        Ok(receipt)
    }

    /// `owner`'s team sheet, defaulting to the empty 4-4-2.
    pub fn team(&self, owner: &OwnerId) -> Result<TeamSheet> {
        Ok(self.teams.load(owner)?.unwrap_or_default())
    }

    /// Put a card from `owner`'s inventory on a team slot.
    pub fn assign_team_slot(
        &self,
        owner: &OwnerId,
        slot_id: &str,
        legend: LegendId,
    ) -> Result<TeamSheet> {
        let all = self.all_collections()?;
        let collection = all
            .get(owner)
            .ok_or_else(|| RuntimeError::UnknownOwner(owner.clone()))?;
        let card = collection
            .inventory
            .iter()
            .find(|card| card.id() == legend)
            .cloned()
            .ok_or_else(|| RuntimeError::CardNotInInventory {
                owner: owner.clone(),
                id: legend,
            })?;

        let mut sheet = self.team(owner)?;
        sheet.assign(slot_id, card)?;
        self.teams.save(owner, &sheet)?;
        Ok(sheet)
    }

    /// Empty a team slot.
    pub fn clear_team_slot(&self, owner: &OwnerId, slot_id: &str) -> Result<TeamSheet> {
        let mut sheet = self.team(owner)?;
        sheet.clear(slot_id)?;
        self.teams.save(owner, &sheet)?;
        Ok(sheet)
    }
}

/// Fold the owner identity into a draw context so two owners revealing on
/// the same day never share a pack. FNV-1a over the identity bytes.
fn owner_context(owner: &OwnerId) -> u32 {
    let mut hash: u32 = 0x811c9dc5;
    for byte in owner.as_str().bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x01000193);
    }
    hash
}

/// RAII membership in the in-flight set; dropping releases the owner even
/// when generation fails or the future is dropped.
struct OpeningGuard<'a> {
    opening: &'a Mutex<HashSet<OwnerId>>,
    owner: OwnerId,
}

impl<'a> OpeningGuard<'a> {
    fn acquire(opening: &'a Mutex<HashSet<OwnerId>>, owner: &OwnerId) -> Result<Self> {
        let mut set = opening.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(owner.clone()) {
            return Err(RuntimeError::RevealInProgress(owner.clone()));
        }
        Ok(Self {
            opening,
            owner: owner.clone(),
        })
    }
}

impl Drop for OpeningGuard<'_> {
    fn drop(&mut self) {
        let mut set = self.opening.lock().unwrap_or_else(PoisonError::into_inner);
        set.remove(&self.owner);
    }
}
