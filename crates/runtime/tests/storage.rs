//! Store backends and the versioned snapshot layer.

use std::sync::Arc;

use game_core::{OwnerId, TeamSheet};
use runtime::{
    COLLECTIONS_KEY, CollectionsRepository, JsonFileStore, KeyValueStore, MemoryStore,
    PenaltyRepository, TeamRepository,
};

#[test]
fn file_store_round_trips_nested_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path()).unwrap();

    assert!(store.get("panini/collections").unwrap().is_none());

    store
        .put("panini/collections", "{\"a\":1}".to_string())
        .unwrap();
    store
        .put("panini/team/Mon Album", "{}".to_string())
        .unwrap();
    store.put("penalty/records", "{}".to_string()).unwrap();

    assert_eq!(
        store.get("panini/collections").unwrap().as_deref(),
        Some("{\"a\":1}")
    );
    assert_eq!(
        store.keys().unwrap(),
        vec![
            "panini/collections".to_string(),
            "panini/team/Mon Album".to_string(),
            "penalty/records".to_string(),
        ]
    );
}

#[test]
fn file_store_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = JsonFileStore::new(dir.path()).unwrap();
        store.put("penalty/records", "kept".to_string()).unwrap();
    }
    let store = JsonFileStore::new(dir.path()).unwrap();
    assert_eq!(store.get("penalty/records").unwrap().as_deref(), Some("kept"));
}

#[test]
fn unknown_snapshot_version_reads_as_absent() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store
        .put(COLLECTIONS_KEY, r#"{"version":99,"data":{}}"#.to_string())
        .unwrap();

    let repo = CollectionsRepository::new(store);
    assert!(repo.load().unwrap().is_none());
}

#[test]
fn corrupt_snapshot_reads_as_absent() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store
        .put(COLLECTIONS_KEY, "][not json".to_string())
        .unwrap();

    let repo = CollectionsRepository::new(store.clone());
    assert!(repo.load().unwrap().is_none());

    let penalty = PenaltyRepository::new(store);
    assert!(penalty.load().unwrap().is_none());
}

#[test]
fn team_sheets_are_stored_per_owner() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let repo = TeamRepository::new(store);

    let alice = OwnerId::from("Alice");
    let bob = OwnerId::from("Bob");
    assert!(repo.load(&alice).unwrap().is_none());

    let sheet = TeamSheet::default();
    repo.save(&alice, &sheet).unwrap();

    assert_eq!(repo.load(&alice).unwrap().unwrap(), sheet);
    assert!(repo.load(&bob).unwrap().is_none());
}

#[test]
fn snapshot_round_trip_through_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(dir.path()).unwrap());

    let records = game_core::PenaltyRecords {
        high_score: 7,
        leaderboard: vec![game_core::ScoreEntry {
            name: "Joueur 1".to_string(),
            score: 7,
        }],
        player_name: "Joueur 1".to_string(),
    };
    let repo = PenaltyRepository::new(store.clone());
    repo.save(&records).unwrap();

    let reloaded = PenaltyRepository::new(store).load().unwrap().unwrap();
    assert_eq!(reloaded, records);
}
