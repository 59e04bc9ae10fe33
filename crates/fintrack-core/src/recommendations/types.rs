//! Core types for the recommendation engine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Priority bucket of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Numeric rank for ordering (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Identifier of a built-in rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    /// Savings positive but below three months of income
    EmergencyFund,
    /// Savings rate under 10%
    LowSavingsRate,
    /// Savings rate of 20% or more
    ExcellentSavingsRate,
    /// Housing above 30% of income
    HighHousingCost,
    /// Food above 15% of income
    HighFoodSpending,
    /// Entertainment above 10% of income
    HighEntertainmentSpending,
    /// Savings rate above 20% and savings beyond three months of income
    InvestmentReady,
    /// Spending more than earning
    Overspending,
    /// Rules registered by callers
    Custom,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::EmergencyFund => "emergency_fund",
            RuleId::LowSavingsRate => "low_savings_rate",
            RuleId::ExcellentSavingsRate => "excellent_savings_rate",
            RuleId::HighHousingCost => "high_housing_cost",
            RuleId::HighFoodSpending => "high_food_spending",
            RuleId::HighEntertainmentSpending => "high_entertainment_spending",
            RuleId::InvestmentReady => "investment_ready",
            RuleId::Overspending => "overspending",
            RuleId::Custom => "custom",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emergency_fund" => Ok(RuleId::EmergencyFund),
            "low_savings_rate" => Ok(RuleId::LowSavingsRate),
            "excellent_savings_rate" => Ok(RuleId::ExcellentSavingsRate),
            "high_housing_cost" => Ok(RuleId::HighHousingCost),
            "high_food_spending" => Ok(RuleId::HighFoodSpending),
            "high_entertainment_spending" => Ok(RuleId::HighEntertainmentSpending),
            "investment_ready" => Ok(RuleId::InvestmentReady),
            "overspending" => Ok(RuleId::Overspending),
            "custom" => Ok(RuleId::Custom),
            _ => Err(format!("Unknown rule: {}", s)),
        }
    }
}

/// Text produced by a rule builder, before the engine attaches a priority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationText {
    pub title: String,
    pub description: String,
    pub action_text: String,
}

impl RecommendationText {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        action_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            action_text: action_text.into(),
        }
    }
}

/// A prioritized piece of advice emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Rule that produced this recommendation
    pub rule: RuleId,
    pub title: String,
    pub description: String,
    pub action_text: String,
    pub priority: Priority,
}

impl Recommendation {
    pub fn new(rule: RuleId, priority: Priority, text: RecommendationText) -> Self {
        Self {
            rule,
            title: text.title,
            description: text.description,
            action_text: text.action_text,
            priority,
        }
    }
}
