//! Entity store tests.

use proptest::prelude::*;
use quill_foundation::ErrorKind;
use quill_storage::EntityStore;

#[test]
fn despawned_ids_go_stale() {
    let mut store = EntityStore::new();
    let id = store.spawn();
    store.despawn(id).unwrap();

    assert!(!store.exists(id));
    let err = store.validate(id).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleEntity(_)));
}

#[test]
fn reused_slots_get_new_generations() {
    let mut store = EntityStore::new();
    let old = store.spawn();
    store.despawn(old).unwrap();
    let new = store.spawn();

    assert_eq!(old.index, new.index);
    assert_ne!(old, new);
    assert!(store.exists(new));
    assert!(!store.exists(old));
}

#[test]
fn despawning_twice_fails() {
    let mut store = EntityStore::new();
    let id = store.spawn();
    store.despawn(id).unwrap();
    assert!(store.despawn(id).is_err());
}

proptest! {
    #[test]
    fn live_count_matches_iteration(spawns in 1usize..50, kill_every in 1usize..5) {
        let mut store = EntityStore::new();
        let ids: Vec<_> = (0..spawns).map(|_| store.spawn()).collect();
        for id in ids.iter().step_by(kill_every) {
            store.despawn(*id).unwrap();
        }

        prop_assert_eq!(store.len(), store.iter().count());
        for id in store.iter() {
            prop_assert!(store.exists(id));
        }
    }
}
