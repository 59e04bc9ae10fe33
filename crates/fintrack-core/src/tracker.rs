//! The analyze action: metrics, recommendations and a recorded snapshot

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use crate::amount::parse_amount;
use crate::error::Result;
use crate::history::{next_snapshot_id, HistoryStore};
use crate::metrics::compute_metrics;
use crate::models::{ExpenseInput, History, Metrics, Snapshot};
use crate::recommendations::{Recommendation, RecommendationEngine};
use crate::storage::KeyValueStore;

/// Result of one analyze action
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub metrics: Metrics,
    pub recommendations: Vec<Recommendation>,
    pub snapshot: Snapshot,
}

/// Owns the history for one session and records an entry per analysis
///
/// History is loaded once when the tracker is opened and written back in
/// full after each analysis.
pub struct FinanceTracker<S> {
    store: HistoryStore<S>,
    history: History,
    engine: RecommendationEngine,
}

impl<S: KeyValueStore> FinanceTracker<S> {
    /// Load the history from `store`
    pub fn open(store: HistoryStore<S>) -> Result<Self> {
        let history = store.load()?;
        Ok(Self {
            store,
            history,
            engine: RecommendationEngine::new(),
        })
    }

    /// Replace the recommendation engine
    pub fn with_engine(mut self, engine: RecommendationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Run the analysis for one entry and record it
    ///
    /// If the history can't be saved the error is returned and the in-memory
    /// history is unchanged.
    pub fn analyze(
        &mut self,
        income: f64,
        expenses: &ExpenseInput,
        date: NaiveDate,
    ) -> Result<Analysis> {
        let metrics = compute_metrics(income, expenses);
        let recommendations = self.engine.evaluate(&metrics);

        let id = next_snapshot_id(&self.history, Utc::now().timestamp_millis());
        let snapshot = Snapshot::new(id, date, &metrics);

        let updated = self.store.append(snapshot.clone(), self.history.clone());
        self.store.persist(&updated)?;
        self.history = updated;

        info!(
            id = %snapshot.id,
            date = %snapshot.date,
            savings = snapshot.savings,
            recommendations = recommendations.len(),
            "Recorded snapshot"
        );

        Ok(Analysis {
            metrics,
            recommendations,
            snapshot,
        })
    }

    /// Same as [`analyze`](Self::analyze) with income given as entered text
    pub fn analyze_raw(
        &mut self,
        income: &str,
        expenses: &ExpenseInput,
        date: NaiveDate,
    ) -> Result<Analysis> {
        self.analyze(parse_amount(income), expenses, date)
    }

    /// History in insertion order
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn store(&self) -> &HistoryStore<S> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{ExpenseCategory, SnapshotId};
    use crate::recommendations::RuleId;
    use crate::storage::MemoryStore;

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn name(&self) -> &str {
            "read-only"
        }

        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("store is read-only".to_string()))
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_expenses() -> ExpenseInput {
        ExpenseInput::new()
            .with(ExpenseCategory::Housing, 20000.0)
            .with(ExpenseCategory::Food, 5000.0)
            .with(ExpenseCategory::Transportation, 2000.0)
            .with(ExpenseCategory::Entertainment, 1000.0)
            .with(ExpenseCategory::Utilities, 3000.0)
            .with(ExpenseCategory::Other, 1000.0)
    }

    #[test]
    fn test_analyze_records_snapshot() {
        let mut tracker = FinanceTracker::open(HistoryStore::new(MemoryStore::new())).unwrap();
        let analysis = tracker
            .analyze(50000.0, &sample_expenses(), date("2025-07-15"))
            .unwrap();

        assert_eq!(analysis.metrics.total_expenses, 32000.0);
        assert_eq!(analysis.snapshot.date, "2025-07-15");
        assert_eq!(analysis.snapshot.income, 50000.0);
        assert_eq!(analysis.snapshot.expenses, 32000.0);
        assert_eq!(analysis.snapshot.savings, 18000.0);

        let rules: Vec<RuleId> = analysis.recommendations.iter().map(|r| r.rule).collect();
        assert_eq!(
            rules,
            vec![
                RuleId::EmergencyFund,
                RuleId::HighHousingCost,
                RuleId::ExcellentSavingsRate
            ]
        );

        assert_eq!(tracker.history().len(), 1);
        assert_eq!(tracker.store().load().unwrap(), tracker.history());
    }

    #[test]
    fn test_ids_unique_and_increasing() {
        let mut tracker = FinanceTracker::open(HistoryStore::new(MemoryStore::new())).unwrap();
        for _ in 0..5 {
            tracker
                .analyze(1000.0, &ExpenseInput::new(), date("2025-07-01"))
                .unwrap();
        }

        let ids: Vec<i64> = tracker
            .history()
            .iter()
            .filter_map(|s| s.id.as_number())
            .collect();
        assert_eq!(ids.len(), 5);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_open_loads_existing_history() {
        let store = HistoryStore::new(MemoryStore::new());
        store
            .persist(&[Snapshot {
                id: SnapshotId::Number(1),
                date: "2025-06-01".to_string(),
                income: 10.0,
                expenses: 5.0,
                savings: 5.0,
            }])
            .unwrap();

        let mut tracker = FinanceTracker::open(store).unwrap();
        assert_eq!(tracker.history().len(), 1);

        tracker
            .analyze_raw("2000", &ExpenseInput::new(), date("2025-07-01"))
            .unwrap();
        assert_eq!(tracker.history().len(), 2);
        assert_eq!(tracker.history()[0].id, 1);
        assert_eq!(tracker.store().load().unwrap().len(), 2);
    }

    #[test]
    fn test_persist_failure_leaves_history_unchanged() {
        let mut tracker = FinanceTracker::open(HistoryStore::new(ReadOnlyStore)).unwrap();
        let result = tracker.analyze(1000.0, &ExpenseInput::new(), date("2025-07-01"));

        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn test_with_engine() {
        let mut tracker = FinanceTracker::open(HistoryStore::new(MemoryStore::new()))
            .unwrap()
            .with_engine(RecommendationEngine::with_rules(Vec::new()));

        let analysis = tracker
            .analyze(0.0, &ExpenseInput::new(), date("2025-07-01"))
            .unwrap();
        assert!(analysis.recommendations.is_empty());
        assert!(tracker.engine().rules().is_empty());
    }
}
