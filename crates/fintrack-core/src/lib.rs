//! Fintrack Core Library
//!
//! Shared functionality for the fintrack personal budget tool:
//! - Metrics calculation from one month of income and expenses
//! - Rule-based recommendation engine
//! - Snapshot history with month/year filtering, aggregation and export
//! - Pluggable key-value persistence (memory, files, encrypted SQLite)
//! - Configuration loading

pub mod amount;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod metrics;
pub mod models;
pub mod recommendations;
pub mod storage;
pub mod tracker;

pub use amount::{format_amount, format_currency, parse_amount, round_half_up};
pub use config::{Config, StorageBackend, StorageConfig};
pub use db::Database;
pub use error::{Error, Result};
pub use history::{
    export_history, filter_history, monthly_trend, summarize, ExportFormat, HistoryStore,
    HistorySummary, HISTORY_KEY,
};
pub use metrics::{compute_metrics, compute_metrics_raw};
pub use models::{ExpenseCategory, ExpenseInput, History, Metrics, Snapshot, SnapshotId};
pub use recommendations::{Priority, Recommendation, RecommendationEngine, Rule, RuleId};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tracker::{Analysis, FinanceTracker};
