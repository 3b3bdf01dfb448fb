use super::*;

#[test]
fn get_missing_is_none() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get_item("wishlist").unwrap(), None);
}

#[test]
fn set_then_get() {
    let mut storage = MemoryStorage::new();
    storage.set_item("wishlist", "[]").unwrap();
    assert_eq!(storage.get_item("wishlist").unwrap().as_deref(), Some("[]"));
}

#[test]
fn set_overwrites() {
    let mut storage = MemoryStorage::new();
    storage.set_item("k", "one").unwrap();
    storage.set_item("k", "two").unwrap();
    assert_eq!(storage.raw("k").as_deref(), Some("two"));
}

#[test]
fn remove_missing_is_ok() {
    let mut storage = MemoryStorage::new();
    storage.remove_item("nothing").unwrap();
}

#[test]
fn remove_deletes() {
    let mut storage = MemoryStorage::new();
    storage.set_item("k", "v").unwrap();
    storage.remove_item("k").unwrap();
    assert_eq!(storage.raw("k"), None);
}

#[test]
fn clones_share_slots() {
    let mut storage = MemoryStorage::new();
    let observer = storage.clone();
    storage.set_item("k", "v").unwrap();
    assert_eq!(observer.raw("k").as_deref(), Some("v"));
}

// =============================================================================
// quota
// =============================================================================

#[test]
fn quota_counts_keys_and_values() {
    let mut storage = MemoryStorage::with_quota(10);
    storage.set_item("k", "123456789").unwrap();
    let err = storage.set_item("x", "y").unwrap_err();
    match err {
        StorageError::QuotaExceeded { key, limit, attempted } => {
            assert_eq!(key, "x");
            assert_eq!(limit, 10);
            assert_eq!(attempted, 12);
        }
        other => panic!("expected quota error, got {other:?}"),
    }
}

#[test]
fn quota_ignores_value_being_replaced() {
    let mut storage = MemoryStorage::with_quota(10);
    storage.set_item("k", "123456789").unwrap();
    storage.set_item("k", "987654321").unwrap();
    assert_eq!(storage.raw("k").as_deref(), Some("987654321"));
}

#[test]
fn quota_failure_keeps_previous_value() {
    let mut storage = MemoryStorage::with_quota(4);
    storage.set_item("k", "ab").unwrap();
    assert!(storage.set_item("k", "abcdef").is_err());
    assert_eq!(storage.raw("k").as_deref(), Some("ab"));
}

// =============================================================================
// fault injection
// =============================================================================

#[test]
fn fail_writes_rejects_set_and_remove() {
    let mut storage = MemoryStorage::new();
    storage.set_item("k", "v").unwrap();
    storage.fail_writes(true);
    assert!(matches!(storage.set_item("k", "w"), Err(StorageError::Unavailable(_))));
    assert!(matches!(storage.remove_item("k"), Err(StorageError::Unavailable(_))));
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));

    storage.fail_writes(false);
    storage.set_item("k", "w").unwrap();
    assert_eq!(storage.raw("k").as_deref(), Some("w"));
}

#[test]
fn put_raw_bypasses_faults() {
    let storage = MemoryStorage::new();
    storage.fail_writes(true);
    storage.put_raw("k", "not json");
    assert_eq!(storage.raw("k").as_deref(), Some("not json"));
}
