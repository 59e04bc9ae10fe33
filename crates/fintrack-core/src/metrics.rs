//! Metrics calculation
//!
//! Turns one month of income and categorized expenses into summary metrics.
//! Pure arithmetic: no validation, no clamping. Negative inputs flow through
//! unchanged and percentages are always relative to income.

use crate::amount::parse_amount;
use crate::models::{ExpenseCategory, ExpenseInput, Metrics};

/// Compute metrics from a parsed income and expense input
pub fn compute_metrics(income: f64, expenses: &ExpenseInput) -> Metrics {
    let total_expenses = expenses.total();
    let net_savings = income - total_expenses;

    let savings_rate_pct = if income > 0.0 {
        net_savings / income * 100.0
    } else {
        0.0
    };

    let category_pct = ExpenseCategory::ALL
        .iter()
        .map(|category| {
            let pct = if income > 0.0 {
                expenses.amount(*category) / income * 100.0
            } else {
                0.0
            };
            (*category, pct)
        })
        .collect();

    Metrics {
        total_income: income,
        total_expenses,
        net_savings,
        savings_rate_pct,
        category_pct,
    }
}

/// Compute metrics from a raw income string (unparsable input counts as 0)
pub fn compute_metrics_raw(income: &str, expenses: &ExpenseInput) -> Metrics {
    compute_metrics(parse_amount(income), expenses)
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_compute_sample_month() {
        let metrics = compute_metrics(50000.0, &sample_expenses());

        assert_eq!(metrics.total_income, 50000.0);
        assert_eq!(metrics.total_expenses, 32000.0);
        assert_eq!(metrics.net_savings, 18000.0);
        assert!((metrics.savings_rate_pct - 36.0).abs() < 1e-9);
        assert!((metrics.category_pct(ExpenseCategory::Housing) - 40.0).abs() < 1e-9);
        assert!((metrics.category_pct(ExpenseCategory::Food) - 10.0).abs() < 1e-9);
        assert!((metrics.category_pct(ExpenseCategory::Entertainment) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_income_yields_zero_rates() {
        let metrics = compute_metrics(0.0, &sample_expenses());

        assert_eq!(metrics.total_expenses, 32000.0);
        assert_eq!(metrics.net_savings, -32000.0);
        assert_eq!(metrics.savings_rate_pct, 0.0);
        for category in ExpenseCategory::ALL {
            assert_eq!(metrics.category_pct(category), 0.0);
        }
    }

    #[test]
    fn test_category_can_exceed_hundred_percent() {
        let expenses = ExpenseInput::new().with(ExpenseCategory::Housing, 3000.0);
        let metrics = compute_metrics(1000.0, &expenses);

        assert!((metrics.category_pct(ExpenseCategory::Housing) - 300.0).abs() < 1e-9);
        assert!((metrics.savings_rate_pct + 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_amounts_propagate() {
        // A refund entered as a negative expense increases savings
        let expenses = ExpenseInput::new()
            .with(ExpenseCategory::Food, 500.0)
            .with(ExpenseCategory::Other, -200.0);
        let metrics = compute_metrics(1000.0, &expenses);

        assert_eq!(metrics.total_expenses, 300.0);
        assert_eq!(metrics.net_savings, 700.0);
        assert!((metrics.category_pct(ExpenseCategory::Other) + 20.0).abs() < 1e-9);

        // Negative income is not rejected either; rates stay 0 because income <= 0
        let metrics = compute_metrics(-1000.0, &expenses);
        assert_eq!(metrics.net_savings, -1300.0);
        assert_eq!(metrics.savings_rate_pct, 0.0);
    }

    #[test]
    fn test_raw_income_is_lenient() {
        let metrics = compute_metrics_raw("not a number", &sample_expenses());
        assert_eq!(metrics.total_income, 0.0);
        assert_eq!(metrics.savings_rate_pct, 0.0);

        let metrics = compute_metrics_raw(" 50000 ", &sample_expenses());
        assert_eq!(metrics.net_savings, 18000.0);
    }

    #[test]
    fn test_is_repeatable() {
        let expenses = sample_expenses();
        assert_eq!(
            compute_metrics(50000.0, &expenses),
            compute_metrics(50000.0, &expenses)
        );
    }
}
