//! Dashboard aggregation over a history subsequence

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Snapshot;

/// One chartable point, in history order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

/// Totals across a set of entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub entries: usize,
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_savings: f64,
    /// `100 × total_savings / total_income`, 0 without income
    pub average_savings_rate_pct: f64,
    /// Earliest parseable date
    pub first_date: Option<String>,
    /// Latest parseable date
    pub last_date: Option<String>,
}

/// Sums for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// `YYYY-MM`
    pub month: String,
    pub entries: usize,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

pub fn chart_series(entries: &[Snapshot]) -> Vec<ChartPoint> {
    entries
        .iter()
        .map(|e| ChartPoint {
            date: e.date.clone(),
            income: e.income,
            expenses: e.expenses,
            savings: e.savings,
        })
        .collect()
}

pub fn summarize(entries: &[Snapshot]) -> HistorySummary {
    let total_income: f64 = entries.iter().map(|e| e.income).sum();
    let total_expenses: f64 = entries.iter().map(|e| e.expenses).sum();
    let total_savings: f64 = entries.iter().map(|e| e.savings).sum();

    let average_savings_rate_pct = if total_income > 0.0 {
        total_savings / total_income * 100.0
    } else {
        0.0
    };

    let dates: Vec<_> = entries.iter().filter_map(|e| e.parsed_date()).collect();
    let fmt = |d: chrono::NaiveDate| d.format(crate::models::DATE_FORMAT).to_string();

    HistorySummary {
        entries: entries.len(),
        total_income,
        total_expenses,
        total_savings,
        average_savings_rate_pct,
        first_date: dates.iter().min().copied().map(fmt),
        last_date: dates.iter().max().copied().map(fmt),
    }
}

/// Group entries by calendar month, oldest month first
///
/// Entries with unparsable dates are left out.
pub fn monthly_trend(entries: &[Snapshot]) -> Vec<TrendPoint> {
    let mut months: BTreeMap<String, TrendPoint> = BTreeMap::new();

    for entry in entries {
        let Some(date) = entry.parsed_date() else {
            continue;
        };
        let month = date.format("%Y-%m").to_string();
        let point = months.entry(month.clone()).or_insert_with(|| TrendPoint {
            month,
            entries: 0,
            income: 0.0,
            expenses: 0.0,
            savings: 0.0,
        });
        point.entries += 1;
        point.income += entry.income;
        point.expenses += entry.expenses;
        point.savings += entry.savings;
    }

    months.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SnapshotId;

    fn entry(date: &str, income: f64, expenses: f64) -> Snapshot {
        Snapshot {
            id: SnapshotId::Number(0),
            date: date.to_string(),
            income,
            expenses,
            savings: income - expenses,
        }
    }

    #[test]
    fn test_chart_series_keeps_order() {
        let entries = vec![entry("2025-08-01", 10.0, 5.0), entry("2025-07-01", 20.0, 5.0)];
        let series = chart_series(&entries);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2025-08-01");
        assert_eq!(series[1].savings, 15.0);
    }

    #[test]
    fn test_summarize() {
        let entries = vec![
            entry("2025-08-01", 1000.0, 800.0),
            entry("2025-07-01", 1000.0, 600.0),
            entry("garbage", 0.0, 0.0),
        ];
        let summary = summarize(&entries);

        assert_eq!(summary.entries, 3);
        assert_eq!(summary.total_income, 2000.0);
        assert_eq!(summary.total_expenses, 1400.0);
        assert_eq!(summary.total_savings, 600.0);
        assert_eq!(summary.average_savings_rate_pct, 30.0);
        assert_eq!(summary.first_date.as_deref(), Some("2025-07-01"));
        assert_eq!(summary.last_date.as_deref(), Some("2025-08-01"));
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.entries, 0);
        assert_eq!(summary.average_savings_rate_pct, 0.0);
        assert!(summary.first_date.is_none());
    }

    #[test]
    fn test_monthly_trend() {
        let entries = vec![
            entry("2025-08-10", 100.0, 50.0),
            entry("2025-07-01", 100.0, 90.0),
            entry("2025-08-20", 200.0, 50.0),
            entry("bad", 999.0, 0.0),
        ];
        let trend = monthly_trend(&entries);

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].month, "2025-07");
        assert_eq!(trend[0].savings, 10.0);
        assert_eq!(trend[1].month, "2025-08");
        assert_eq!(trend[1].entries, 2);
        assert_eq!(trend[1].income, 300.0);
        assert_eq!(trend[1].savings, 200.0);
    }
}
