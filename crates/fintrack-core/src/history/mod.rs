//! Snapshot history: persistence, filtering, aggregation and export
//!
//! The history is one JSON array stored under a single key. It is loaded in
//! full, grown in memory and written back in full after every append.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{History, Snapshot};
use crate::storage::KeyValueStore;

mod export;
mod filter;
mod series;

pub use export::{export_history, ExportFormat};
pub use filter::filter_history;
pub use series::{chart_series, monthly_trend, summarize, ChartPoint, HistorySummary, TrendPoint};

/// Default key the history blob is stored under
pub const HISTORY_KEY: &str = "finance_history";

/// Loads and saves the history through an injected key-value store
pub struct HistoryStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    /// Use a custom blob key
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the full history
    ///
    /// A missing key or a blob that isn't a JSON array yields an empty
    /// history. Records that can't be read as snapshots are dropped one by
    /// one; the rest load normally. Only errors raised by the store itself
    /// are returned.
    pub fn load(&self) -> Result<History> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "No stored history");
            return Ok(Vec::new());
        };

        let records = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    key = %self.key,
                    backend = self.store.name(),
                    "Ignoring malformed history: {}",
                    e
                );
                return Ok(Vec::new());
            }
        };

        let total = records.len();
        let history: History = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Snapshot>(record) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!(key = %self.key, index, "Skipping unreadable history entry: {}", e);
                    None
                }
            })
            .collect();

        debug!(
            key = %self.key,
            entries = history.len(),
            skipped = total - history.len(),
            "Loaded history"
        );
        Ok(history)
    }

    /// Return `current` with `entry` appended at the end
    ///
    /// Nothing is written; pass the result to [`persist`](Self::persist).
    pub fn append(&self, entry: Snapshot, mut current: History) -> History {
        current.push(entry);
        current
    }

    /// Replace the stored blob with `history`
    pub fn persist(&self, history: &[Snapshot]) -> Result<()> {
        let raw = serde_json::to_string(history)?;
        self.store.set(&self.key, &raw)?;
        debug!(key = %self.key, entries = history.len(), "Saved history");
        Ok(())
    }
}

/// Next snapshot id for `history` given the current time in milliseconds
///
/// Ids are timestamps, bumped past the newest numeric id when the clock has
/// not advanced. Text ids are ignored. If the newest id is `i64::MAX`, the
/// first unused id from `now_ms` upwards is taken instead.
pub fn next_snapshot_id(history: &[Snapshot], now_ms: i64) -> i64 {
    let max_id = history.iter().filter_map(|s| s.id.as_number()).max();
    match max_id {
        Some(max_id) if max_id >= now_ms => max_id
            .checked_add(1)
            .unwrap_or_else(|| first_unused_id(history, now_ms)),
        _ => now_ms,
    }
}

fn first_unused_id(history: &[Snapshot], start: i64) -> i64 {
    let used: HashSet<i64> = history.iter().filter_map(|s| s.id.as_number()).collect();
    let mut id = start;
    while used.contains(&id) {
        id = id.wrapping_add(1);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SnapshotId;
    use crate::storage::MemoryStore;

    fn snapshot(id: i64, date: &str) -> Snapshot {
        Snapshot {
            id: id.into(),
            date: date.to_string(),
            income: 50000.0,
            expenses: 32000.0,
            savings: 18000.0,
        }
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = HistoryStore::new(MemoryStore::new());
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.key(), "finance_history");
    }

    #[test]
    fn test_load_malformed_blob_is_empty() {
        let store = HistoryStore::new(MemoryStore::with_value(HISTORY_KEY, "{not json"));
        assert!(store.load().unwrap().is_empty());

        let store = HistoryStore::new(MemoryStore::with_value(HISTORY_KEY, r#"{"id": 1}"#));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_does_not_write() {
        let store = HistoryStore::new(MemoryStore::new());
        let history = store.append(snapshot(1, "2025-07-01"), Vec::new());

        assert_eq!(history.len(), 1);
        assert!(store.store().is_empty());
    }

    #[test]
    fn test_append_persist_load_keeps_order() {
        let store = HistoryStore::new(MemoryStore::new());
        let mut history = store.load().unwrap();
        for (i, date) in ["2025-09-01", "2025-07-01", "2025-08-01"].iter().enumerate() {
            history = store.append(snapshot(i as i64 + 1, date), history);
            store.persist(&history).unwrap();
        }

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 3);
        let ids: Vec<Option<i64>> = loaded.iter().map(|s| s.id.as_number()).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(loaded[0].date, "2025-09-01");
    }

    #[test]
    fn test_persisted_blob_format() {
        let store = HistoryStore::new(MemoryStore::new());
        store.persist(&[snapshot(7, "2025-07-15")]).unwrap();

        let raw = store.store().get(HISTORY_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], 7);
        assert_eq!(value[0]["date"], "2025-07-15");
        assert_eq!(value[0]["savings"], 18000.0);
    }

    #[test]
    fn test_custom_key() {
        let store = HistoryStore::with_key(MemoryStore::new(), "alt");
        store.persist(&[snapshot(1, "2025-07-01")]).unwrap();

        assert!(store.store().get("alt").unwrap().is_some());
        assert!(store.store().get(HISTORY_KEY).unwrap().is_none());
    }

    #[test]
    fn test_next_snapshot_id() {
        assert_eq!(next_snapshot_id(&[], 1000), 1000);
        assert_eq!(next_snapshot_id(&[snapshot(500, "2025-07-01")], 1000), 1000);
        assert_eq!(next_snapshot_id(&[snapshot(1000, "2025-07-01")], 1000), 1001);
        assert_eq!(next_snapshot_id(&[snapshot(2000, "2025-07-01")], 1000), 2001);
    }

    #[test]
    fn test_load_keeps_text_ids() {
        let blob = r#"[
            {"id": "9b1f3c2e-6d4a-4f8e-a1b2-c3d4e5f60718", "date": "2025-06-01", "income": 100, "expenses": 40, "savings": 60},
            {"id": "0c2d4e6f-8a1b-4c3d-9e5f-a7b8c9d0e1f2", "date": "2025-07-01", "income": 200, "expenses": 50, "savings": 150}
        ]"#;
        let store = HistoryStore::new(MemoryStore::with_value(HISTORY_KEY, blob));

        let history = store.load().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history[0].id,
            SnapshotId::from("9b1f3c2e-6d4a-4f8e-a1b2-c3d4e5f60718")
        );
        assert_eq!(next_snapshot_id(&history, 1000), 1000);

        let history = store.append(snapshot(1000, "2025-08-01"), history);
        store.persist(&history).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded[1].id, SnapshotId::from("0c2d4e6f-8a1b-4c3d-9e5f-a7b8c9d0e1f2"));
        assert_eq!(reloaded[2].id, 1000);
    }

    #[test]
    fn test_load_keeps_damaged_records() {
        let blob = r#"[
            {"id": 1, "date": "2025-07-01", "income": 100, "expenses": 40, "savings": 60},
            {"id": 2, "date": null, "expenses": 10, "savings": 5}
        ]"#;
        let store = HistoryStore::new(MemoryStore::with_value(HISTORY_KEY, blob));

        let history = store.load().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].id, 2);
        assert_eq!(history[1].date, "");
        assert_eq!(history[1].income, 0.0);
    }

    #[test]
    fn test_load_skips_non_object_records() {
        let blob = r#"[42, {"id": 1, "date": "2025-07-01", "income": 1, "expenses": 1, "savings": 0}, "junk"]"#;
        let store = HistoryStore::new(MemoryStore::with_value(HISTORY_KEY, blob));

        let history = store.load().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, 1);
    }

    #[test]
    fn test_next_snapshot_id_at_max() {
        let history = vec![snapshot(i64::MAX, "2025-07-01"), snapshot(1000, "2025-07-02")];
        let id = next_snapshot_id(&history, 1000);

        assert_eq!(id, 1001);
        assert!(history.iter().all(|s| s.id != id));
    }
}
