//! Month/year filtering for the dashboard

use chrono::Datelike;
use tracing::warn;

use crate::models::Snapshot;

/// Select the entries recorded in `month` and/or `year`
///
/// `month` is compared against the two-digit month of each entry's date and
/// `year` against the four-digit year; both must match when both are given.
/// An absent or empty filter is ignored, so with neither set the whole
/// history comes back unchanged. Entries whose date cannot be parsed never
/// match. Order is preserved.
pub fn filter_history(
    history: &[Snapshot],
    month: Option<&str>,
    year: Option<&str>,
) -> Vec<Snapshot> {
    let month = month.filter(|m| !m.is_empty());
    let year = year.filter(|y| !y.is_empty());

    if month.is_none() && year.is_none() {
        return history.to_vec();
    }

    history
        .iter()
        .filter(|entry| {
            let Some(date) = entry.parsed_date() else {
                warn!(id = %entry.id, date = %entry.date, "Skipping entry with unparsable date");
                return false;
            };
            let month_ok = month.map_or(true, |m| format!("{:02}", date.month()) == m);
            let year_ok = year.map_or(true, |y| format!("{:04}", date.year()) == y);
            month_ok && year_ok
        })
        .cloned()
        .collect()
}
