//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (resolve_storage, open_store, open_history)
//! - `analyze` - Run the analysis for one month and record it
//! - `history` - Dashboard of recorded entries
//! - `export` - History export to CSV/JSON
//! - `rules` - Recommendation rule listing
//! - `status` - Storage status

pub mod analyze;
pub mod core;
pub mod export;
pub mod history;
pub mod rules;
pub mod status;

// Re-export command functions for main.rs
pub use analyze::*;
pub use core::*;
pub use export::*;
pub use history::*;
pub use rules::*;
pub use status::*;

use fintrack_core::Priority;

/// Marker shown next to a recommendation of this priority
pub fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "🟢",
    }
}

/// Percentage with one decimal, e.g. `36.0%`
pub fn format_pct(value: f64) -> String {
    format!("{:.1}%", value)
}
