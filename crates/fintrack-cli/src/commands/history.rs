//! History command (the dashboard)

use anyhow::{Context, Result};
use fintrack_core::history::{chart_series, TrendPoint};
use fintrack_core::{
    filter_history, format_currency, monthly_trend, summarize, HistoryStore, HistorySummary,
    KeyValueStore,
};

use super::format_pct;
use crate::cli::FilterArgs;

pub fn cmd_history<S: KeyValueStore>(
    store: &HistoryStore<S>,
    filter: &FilterArgs,
    trend: bool,
    json: bool,
) -> Result<()> {
    let history = store.load().context("Failed to load history")?;
    let entries = filter_history(
        &history,
        filter.month.as_deref(),
        filter.year.as_deref(),
    );
    let summary = summarize(&entries);
    let months = if trend { monthly_trend(&entries) } else { Vec::new() };

    if json {
        let mut output = serde_json::json!({
            "entries": chart_series(&entries),
            "summary": summary,
        });
        if trend {
            output["trend"] = serde_json::to_value(&months)?;
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│          💰 Fintrack Dashboard          │");
    println!("╰─────────────────────────────────────────╯");

    if let Some(label) = filter_label(filter) {
        println!("  Showing: {}", label);
    }
    println!();

    if entries.is_empty() {
        println!("  No data to display.");
        println!();
        return Ok(());
    }

    println!(
        "  {:<12} {:>14} {:>14} {:>14}",
        "Date", "Income", "Expenses", "Savings"
    );
    println!("  {}", "─".repeat(57));
    for point in chart_series(&entries) {
        println!(
            "  {:<12} {:>14} {:>14} {:>14}",
            point.date,
            format_currency(point.income),
            format_currency(point.expenses),
            format_currency(point.savings)
        );
    }

    print_summary(&summary);

    if trend {
        print_trend(&months);
    }

    println!();
    Ok(())
}

fn filter_label(filter: &FilterArgs) -> Option<String> {
    let month = filter.month.as_deref().filter(|m| !m.is_empty());
    let year = filter.year.as_deref().filter(|y| !y.is_empty());
    match (month, year) {
        (Some(m), Some(y)) => Some(format!("{}-{}", y, m)),
        (Some(m), None) => Some(format!("month {} of every year", m)),
        (None, Some(y)) => Some(format!("year {}", y)),
        (None, None) => None,
    }
}

fn print_summary(summary: &HistorySummary) {
    println!();
    println!("  Entries:         {}", summary.entries);
    if let (Some(first), Some(last)) = (&summary.first_date, &summary.last_date) {
        println!("  Period:          {} → {}", first, last);
    }
    println!("  Total income:    {}", format_currency(summary.total_income));
    println!("  Total expenses:  {}", format_currency(summary.total_expenses));
    println!("  Total savings:   {}", format_currency(summary.total_savings));
    println!(
        "  Savings rate:    {}",
        format_pct(summary.average_savings_rate_pct)
    );
}

fn print_trend(months: &[TrendPoint]) {
    println!();
    println!("  📈 By month");
    for point in months {
        println!(
            "    {}  {:>3} {:<7} {:>14} saved",
            point.month,
            point.entries,
            if point.entries == 1 { "entry" } else { "entries" },
            format_currency(point.savings)
        );
    }
}
