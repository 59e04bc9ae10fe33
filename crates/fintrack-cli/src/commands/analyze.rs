//! Analyze command: metrics, recommendations, recorded snapshot

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use fintrack_core::models::DATE_FORMAT;
use fintrack_core::{
    format_currency, Analysis, ExpenseCategory, ExpenseInput, FinanceTracker, HistoryStore,
    KeyValueStore,
};

use super::{format_pct, priority_icon};
use crate::cli::EntryArgs;

/// Build the expense input from the entered amounts
pub fn expense_input(entry: &EntryArgs) -> ExpenseInput {
    let fields = [
        (ExpenseCategory::Housing, &entry.housing),
        (ExpenseCategory::Food, &entry.food),
        (ExpenseCategory::Transportation, &entry.transportation),
        (ExpenseCategory::Entertainment, &entry.entertainment),
        (ExpenseCategory::Utilities, &entry.utilities),
        (ExpenseCategory::Other, &entry.other),
    ];
    ExpenseInput::from_raw(
        fields
            .into_iter()
            .map(|(category, value)| (category, value.as_deref().unwrap_or(""))),
    )
}

/// Parse `--date`, defaulting to today
pub fn entry_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(d) => NaiveDate::parse_from_str(d.trim(), DATE_FORMAT)
            .context("Invalid --date format (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn cmd_analyze<S: KeyValueStore>(
    store: HistoryStore<S>,
    entry: &EntryArgs,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let date = entry_date(date)?;
    let expenses = expense_input(entry);

    let mut tracker = FinanceTracker::open(store).context("Failed to load history")?;
    let analysis = tracker
        .analyze_raw(entry.income.as_deref().unwrap_or(""), &expenses, date)
        .context("Failed to save history")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    print_analysis(&analysis, &expenses);
    println!();
    println!(
        "✅ Recorded entry for {} ({} in history)",
        analysis.snapshot.date,
        tracker.history().len()
    );

    Ok(())
}

fn print_analysis(analysis: &Analysis, expenses: &ExpenseInput) {
    let m = &analysis.metrics;

    println!();
    println!("📊 Analysis for {}", analysis.snapshot.date);
    println!("   ─────────────────────────────────────────────");
    println!("   Income:        {:>14}", format_currency(m.total_income));
    println!("   Expenses:      {:>14}", format_currency(m.total_expenses));
    println!("   Net savings:   {:>14}", format_currency(m.net_savings));
    println!("   Savings rate:  {:>14}", format_pct(m.savings_rate_pct));

    println!();
    println!("   Breakdown (share of income):");
    for (category, amount) in expenses.iter() {
        println!(
            "     {:<16} {:>12} {:>8}",
            category.label(),
            format_currency(amount),
            format_pct(m.category_pct(category))
        );
    }

    println!();
    if analysis.recommendations.is_empty() {
        println!("💡 No concerns detected. Keep it up!");
        return;
    }

    println!("💡 Recommendations");
    for rec in &analysis.recommendations {
        println!();
        println!(
            "   {} [{}] {}",
            priority_icon(rec.priority),
            rec.priority,
            rec.title
        );
        println!("      {}", rec.description);
        println!("      → {}", rec.action_text);
    }
}
