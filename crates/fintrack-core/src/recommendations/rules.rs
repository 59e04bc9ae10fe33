//! Built-in rule table
//!
//! Rules are plain data: an id, a priority bucket, an optional rule whose
//! firing suppresses this one, a predicate and a text builder. The engine
//! walks the table in order, so reordering advice means reordering
//! [`default_rules`].

use crate::amount::{format_currency, round_half_up};
use crate::models::{ExpenseCategory, Metrics};

use super::types::{Priority, RecommendationText, RuleId};

/// Months of income an emergency fund should cover
pub const EMERGENCY_FUND_MONTHS: f64 = 3.0;

/// Months over which the emergency fund gap is spread
pub const EMERGENCY_FUND_BUILD_MONTHS: f64 = 6.0;

/// Savings rate below which saving more is urged
pub const LOW_SAVINGS_RATE_PCT: f64 = 10.0;

/// Savings rate considered excellent (the 20 in 50/30/20)
pub const TARGET_SAVINGS_RATE_PCT: f64 = 20.0;

/// Housing share of income above which rent is flagged
pub const HOUSING_LIMIT_PCT: f64 = 30.0;

/// Food share of income above which meals are flagged
pub const FOOD_LIMIT_PCT: f64 = 15.0;

/// Entertainment share of income above which fun money is flagged
pub const ENTERTAINMENT_LIMIT_PCT: f64 = 10.0;

/// Share of savings suggested for investing
pub const INVEST_SHARE: f64 = 0.6;

pub type Predicate = fn(&Metrics) -> bool;
pub type Builder = fn(&Metrics) -> RecommendationText;

/// One entry of the rule table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    /// Title of the recommendation this rule emits
    pub name: &'static str,
    pub priority: Priority,
    /// Skip this rule when the named rule already fired in this evaluation
    pub unless: Option<RuleId>,
    pub applies: Predicate,
    pub build: Builder,
}

impl Rule {
    pub fn new(
        id: RuleId,
        name: &'static str,
        priority: Priority,
        applies: Predicate,
        build: Builder,
    ) -> Self {
        Self {
            id,
            name,
            priority,
            unless: None,
            applies,
            build,
        }
    }

    /// Make this rule the `else` branch of `other`
    pub fn unless(mut self, other: RuleId) -> Self {
        self.unless = Some(other);
        self
    }
}

/// The built-in rules in evaluation order
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            RuleId::EmergencyFund,
            "Build Emergency Fund",
            Priority::High,
            needs_emergency_fund,
            emergency_fund_text,
        ),
        Rule::new(
            RuleId::LowSavingsRate,
            "Increase Savings Rate",
            Priority::High,
            low_savings_rate,
            low_savings_rate_text,
        ),
        Rule::new(
            RuleId::ExcellentSavingsRate,
            "Excellent Savings Rate",
            Priority::Low,
            excellent_savings_rate,
            excellent_savings_rate_text,
        )
        .unless(RuleId::LowSavingsRate),
        Rule::new(
            RuleId::HighHousingCost,
            "High Housing Cost",
            Priority::High,
            high_housing_cost,
            high_housing_cost_text,
        ),
        Rule::new(
            RuleId::HighFoodSpending,
            "Food Expenses High",
            Priority::Medium,
            high_food_spending,
            high_food_spending_text,
        ),
        Rule::new(
            RuleId::HighEntertainmentSpending,
            "Entertainment Budget High",
            Priority::Medium,
            high_entertainment_spending,
            high_entertainment_spending_text,
        ),
        Rule::new(
            RuleId::InvestmentReady,
            "Ready for Investment",
            Priority::Medium,
            investment_ready,
            investment_ready_text,
        ),
        Rule::new(
            RuleId::Overspending,
            "Overspending",
            Priority::High,
            overspending,
            overspending_text,
        ),
    ]
}

fn emergency_fund_target(m: &Metrics) -> f64 {
    m.total_income * EMERGENCY_FUND_MONTHS
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

fn needs_emergency_fund(m: &Metrics) -> bool {
    m.net_savings > 0.0 && m.net_savings < emergency_fund_target(m)
}

fn low_savings_rate(m: &Metrics) -> bool {
    m.savings_rate_pct < LOW_SAVINGS_RATE_PCT
}

fn excellent_savings_rate(m: &Metrics) -> bool {
    m.savings_rate_pct >= TARGET_SAVINGS_RATE_PCT
}

fn high_housing_cost(m: &Metrics) -> bool {
    m.category_pct(ExpenseCategory::Housing) > HOUSING_LIMIT_PCT
}

fn high_food_spending(m: &Metrics) -> bool {
    m.category_pct(ExpenseCategory::Food) > FOOD_LIMIT_PCT
}

fn high_entertainment_spending(m: &Metrics) -> bool {
    m.category_pct(ExpenseCategory::Entertainment) > ENTERTAINMENT_LIMIT_PCT
}

fn investment_ready(m: &Metrics) -> bool {
    m.savings_rate_pct > TARGET_SAVINGS_RATE_PCT && m.net_savings > emergency_fund_target(m)
}

fn overspending(m: &Metrics) -> bool {
    m.net_savings < 0.0
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Percentage to one decimal place, ties rounded away from zero
fn pct(value: f64) -> String {
    let rounded = round_half_up(value.abs() * 10.0) / 10.0;
    format!("{:.1}", rounded.copysign(value))
}

fn emergency_fund_text(m: &Metrics) -> RecommendationText {
    let target = emergency_fund_target(m);
    let monthly = round_half_up((target - m.net_savings) / EMERGENCY_FUND_BUILD_MONTHS);
    RecommendationText::new(
        "Build Emergency Fund",
        format!(
            "You need {} for 3-months. Current: {}",
            format_currency(target),
            format_currency(m.net_savings)
        ),
        format!("Save {} monthly", format_currency(monthly)),
    )
}

fn low_savings_rate_text(m: &Metrics) -> RecommendationText {
    let gap = round_half_up(m.total_income * TARGET_SAVINGS_RATE_PCT / 100.0 - m.net_savings);
    RecommendationText::new(
        "Increase Savings Rate",
        format!("You're saving {}%. Aim for 20%", pct(m.savings_rate_pct)),
        format!("Reduce expenses by {}", format_currency(gap)),
    )
}

fn excellent_savings_rate_text(m: &Metrics) -> RecommendationText {
    RecommendationText::new(
        "Excellent Savings Rate",
        format!("{}% savings rate. Consider investing.", pct(m.savings_rate_pct)),
        "Explore SIP or mutual funds",
    )
}

fn high_housing_cost_text(m: &Metrics) -> RecommendationText {
    RecommendationText::new(
        "High Housing Cost",
        format!(
            "Housing is {}% of income",
            pct(m.category_pct(ExpenseCategory::Housing))
        ),
        "Try to cut rent or share housing",
    )
}

fn high_food_spending_text(m: &Metrics) -> RecommendationText {
    RecommendationText::new(
        "Food Expenses High",
        format!(
            "Food is {}% of income",
            pct(m.category_pct(ExpenseCategory::Food))
        ),
        "Plan meals and cook at home",
    )
}

fn high_entertainment_spending_text(m: &Metrics) -> RecommendationText {
    RecommendationText::new(
        "Entertainment Budget High",
        format!(
            "Entertainment is {}%",
            pct(m.category_pct(ExpenseCategory::Entertainment))
        ),
        "Set a fixed entertainment budget",
    )
}

fn investment_ready_text(m: &Metrics) -> RecommendationText {
    RecommendationText::new(
        "Ready for Investment",
        "Emergency fund and savings goals met",
        format!(
            "Invest {} in diversified portfolio",
            format_currency(round_half_up(m.net_savings * INVEST_SHARE))
        ),
    )
}

fn overspending_text(m: &Metrics) -> RecommendationText {
    RecommendationText::new(
        "Overspending",
        format!(
            "You're overspending by {}",
            format_currency(m.net_savings.abs())
        ),
        "Review non-essentials immediately",
    )
}
