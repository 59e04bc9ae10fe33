//! Database tests

use super::*;
use crate::history::HistoryStore;
use crate::models::Snapshot;
use crate::storage::KeyValueStore;

fn snapshot(id: i64, date: &str) -> Snapshot {
    Snapshot {
        id: id.into(),
        date: date.to_string(),
        income: 1000.0,
        expenses: 600.0,
        savings: 400.0,
    }
}

#[test]
fn test_in_memory_is_unencrypted() {
    let db = Database::in_memory().unwrap();
    assert!(!db.is_encrypted());
    assert!(db.path().contains("fintrack_test_"));
}

#[test]
fn test_get_missing_key() {
    let db = Database::in_memory().unwrap();
    assert!(db.get_value("finance_history").unwrap().is_none());
}

#[test]
fn test_set_then_get() {
    let db = Database::in_memory().unwrap();
    db.set_value("finance_history", "[]").unwrap();
    assert_eq!(
        db.get_value("finance_history").unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn test_set_replaces_existing_row() {
    let db = Database::in_memory().unwrap();
    db.set_value("k", "first").unwrap();
    db.set_value("k", "second").unwrap();

    assert_eq!(db.get_value("k").unwrap().as_deref(), Some("second"));
    assert_eq!(db.list_keys().unwrap(), vec!["k".to_string()]);
}

#[test]
fn test_list_keys_sorted() {
    let db = Database::in_memory().unwrap();
    db.set_value("b", "2").unwrap();
    db.set_value("a", "1").unwrap();

    assert_eq!(db.list_keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_trait_object_name() {
    let db = Database::in_memory().unwrap();
    let store: &dyn KeyValueStore = &db;
    assert_eq!(store.name(), "sqlite");
}

#[test]
fn test_reopen_keeps_values() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("fintrack.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new_unencrypted(path).unwrap();
        db.set_value("k", "persisted").unwrap();
    }

    let db = Database::new_unencrypted(path).unwrap();
    assert_eq!(db.get_value("k").unwrap().as_deref(), Some("persisted"));
}

#[test]
fn test_encrypted_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("secret.db");
    let path = path.to_str().unwrap();

    let db = Database::new_with_key(path, Some("correct horse")).unwrap();
    assert!(db.is_encrypted());
    db.set_value("k", "v").unwrap();
    drop(db);

    let db = Database::new_with_key(path, Some("correct horse")).unwrap();
    assert_eq!(db.get_value("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_history_store_over_database() {
    let db = Database::in_memory().unwrap();
    let store = HistoryStore::new(&db);

    let history = store.append(snapshot(1, "2025-07-01"), store.load().unwrap());
    let history = store.append(snapshot(2, "2025-08-01"), history);
    store.persist(&history).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, 1);
    assert_eq!(loaded[1].date, "2025-08-01");
}

#[test]
fn test_derive_key_is_deterministic() {
    let a = derive_key("passphrase").unwrap();
    let b = derive_key("passphrase").unwrap();
    let c = derive_key("other").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
}
