//! End-to-end album flows: daily packs, gating, rollback, recovery.

use std::sync::Arc;

use async_trait::async_trait;
use game_core::{Catalog, Legend, LegendId, OwnerId, PcgRng};
use runtime::{
    COLLECTIONS_KEY, CardImageService, CollectionService, FixedClock, GenerationError,
    KeyValueStore, MemoryStore, PlaceholderImageService, RevealOutcome, RuntimeError,
};

/// Image service standing in for a stopped AI proxy.
struct BrokenImageService;

#[async_trait]
impl CardImageService for BrokenImageService {
    async fn generate(&self, _legend: &Legend) -> Result<String, GenerationError> {
        Err(GenerationError::Status(503))
    }
}

fn small_catalog(n: u32) -> Arc<Catalog> {
    let legends = (1..=n)
        .map(|id| Legend {
            id: LegendId(id),
            name: format!("Legend {id}"),
            country: "Testland".to_string(),
            description: String::new(),
        })
        .collect();
    Arc::new(Catalog::new(legends).unwrap())
}

fn service_with(
    catalog: Arc<Catalog>,
    store: Arc<dyn KeyValueStore>,
    images: Arc<dyn CardImageService>,
    clock: Arc<FixedClock>,
) -> CollectionService {
    CollectionService::new(catalog, store, images, clock, Arc::new(PcgRng), 7)
}

fn fixed_clock(day: &str) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(day.parse().unwrap()))
}

#[tokio::test]
async fn first_pack_fills_three_distinct_slots() {
    let catalog = Arc::new(game_content::builtin_catalog());
    assert_eq!(catalog.len(), 100);

    let service = service_with(
        catalog,
        Arc::new(MemoryStore::new()),
        Arc::new(PlaceholderImageService),
        fixed_clock("2024-01-01"),
    );
    let owner = OwnerId::from("Mon Album");

    let outcome = service.open_daily_pack(&owner).await.unwrap();
    let RevealOutcome::Opened(cards) = outcome else {
        panic!("expected an opened pack, got {outcome:?}");
    };
    assert_eq!(cards.len(), 3);
    assert_ne!(cards[0].id(), cards[1].id());
    assert_ne!(cards[0].id(), cards[2].id());
    assert_ne!(cards[1].id(), cards[2].id());

    let collection = service.collection(&owner).unwrap();
    assert_eq!(collection.filled_count(), 3);
    assert_eq!(collection.inventory.len(), 3);
    for card in &cards {
        assert!(collection.owns(card.id()));
    }
    assert_eq!(collection.completion_percentage(), 3.0);
}

#[tokio::test]
async fn second_pack_same_day_is_a_noop() {
    let clock = fixed_clock("2024-03-10");
    let service = service_with(
        small_catalog(50),
        Arc::new(MemoryStore::new()),
        Arc::new(PlaceholderImageService),
        clock.clone(),
    );
    let owner = OwnerId::from("Mon Album");

    assert!(matches!(
        service.open_daily_pack(&owner).await.unwrap(),
        RevealOutcome::Opened(_)
    ));
    assert_eq!(
        service.open_daily_pack(&owner).await.unwrap(),
        RevealOutcome::AlreadyRevealed
    );
    assert_eq!(service.collection(&owner).unwrap().inventory.len(), 3);

    // Midnight passes; the allowance returns.
    clock.set("2024-03-11".parse().unwrap());
    assert!(matches!(
        service.open_daily_pack(&owner).await.unwrap(),
        RevealOutcome::Opened(_)
    ));
    assert_eq!(service.collection(&owner).unwrap().inventory.len(), 6);
}

#[tokio::test]
async fn generation_failure_commits_nothing_and_keeps_the_allowance() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let clock = fixed_clock("2024-05-05");
    let owner = OwnerId::from("Mon Album");

    let broken = service_with(
        small_catalog(50),
        store.clone(),
        Arc::new(BrokenImageService),
        clock.clone(),
    );
    let err = broken.open_daily_pack(&owner).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Generation(_)));

    let collection = broken.collection(&owner).unwrap();
    assert_eq!(collection.inventory.len(), 0);
    assert_eq!(collection.filled_count(), 0);

    // Backend comes back the same day; the pack opens normally.
    let healthy = service_with(
        small_catalog(50),
        store,
        Arc::new(PlaceholderImageService),
        clock,
    );
    assert!(matches!(
        healthy.open_daily_pack(&owner).await.unwrap(),
        RevealOutcome::Opened(_)
    ));
}

#[tokio::test]
async fn completed_collection_still_consumes_the_day() {
    let clock = fixed_clock("2024-07-01");
    let service = service_with(
        small_catalog(3),
        Arc::new(MemoryStore::new()),
        Arc::new(PlaceholderImageService),
        clock.clone(),
    );
    let owner = OwnerId::from("Mon Album");

    // Three legends, one pack: the album is complete.
    assert!(matches!(
        service.open_daily_pack(&owner).await.unwrap(),
        RevealOutcome::Opened(_)
    ));
    assert_eq!(
        service.collection(&owner).unwrap().completion_percentage(),
        100.0
    );

    clock.set("2024-07-02".parse().unwrap());
    assert_eq!(
        service.open_daily_pack(&owner).await.unwrap(),
        RevealOutcome::CollectionComplete
    );
    // The empty reveal consumed today's allowance.
    assert_eq!(
        service.open_daily_pack(&owner).await.unwrap(),
        RevealOutcome::AlreadyRevealed
    );
}

#[tokio::test]
async fn rival_collections_seed_on_first_load() {
    let service = service_with(
        small_catalog(50),
        Arc::new(MemoryStore::new()),
        Arc::new(PlaceholderImageService),
        fixed_clock("2024-01-01"),
    );

    let all = service.all_collections().unwrap();
    let rival = all.get(&OwnerId::from("Joueur_Deux")).unwrap();
    assert_eq!(rival.filled_count(), 20);
    assert!(rival.owns(LegendId(20)));
    assert!(!rival.owns(LegendId(21)));

    let other = all.get(&OwnerId::from("Joueur_Trois")).unwrap();
    assert!(other.owns(LegendId(21)));
    assert_eq!(other.filled_count(), 20);
}

/// Image service slow enough to observe the in-flight window.
struct SlowImageService;

#[async_trait]
impl CardImageService for SlowImageService {
    async fn generate(&self, legend: &Legend) -> Result<String, GenerationError> {
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        Ok(format!("mem://slow/{}", legend.id.0))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn at_most_one_pack_in_flight_per_owner() {
    let service = Arc::new(service_with(
        small_catalog(50),
        Arc::new(MemoryStore::new()),
        Arc::new(SlowImageService),
        fixed_clock("2024-02-02"),
    ));
    let owner = OwnerId::from("Mon Album");

    let background = {
        let service = service.clone();
        let owner = owner.clone();
        tokio::spawn(async move { service.open_daily_pack(&owner).await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    // The first pack is still generating images; a second request bounces.
    let err = service.open_daily_pack(&owner).await.unwrap_err();
    assert!(matches!(err, RuntimeError::RevealInProgress(_)));

    // The original request lands normally and releases the owner.
    let outcome = background.await.unwrap().unwrap();
    assert!(matches!(outcome, RevealOutcome::Opened(_)));
    assert_eq!(
        service.open_daily_pack(&owner).await.unwrap(),
        RevealOutcome::AlreadyRevealed
    );
}

#[tokio::test]
async fn malformed_snapshot_reads_as_fresh_state() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store
        .put(COLLECTIONS_KEY, "{definitely not json".to_string())
        .unwrap();

    let service = service_with(
        small_catalog(10),
        store,
        Arc::new(PlaceholderImageService),
        fixed_clock("2024-01-01"),
    );

    // The corrupt snapshot is replaced by defaults, not surfaced.
    let all = service.all_collections().unwrap();
    assert!(all.get(&OwnerId::from("Joueur_Deux")).is_some());

    let owner = OwnerId::from("Mon Album");
    assert!(matches!(
        service.open_daily_pack(&owner).await.unwrap(),
        RevealOutcome::Opened(_)
    ));
}
