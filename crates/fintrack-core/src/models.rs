//! Domain models for fintrack

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::amount::parse_amount;

/// Date format used for snapshot dates and filters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed set of expense categories captured by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Housing,
    Food,
    Transportation,
    Entertainment,
    Utilities,
    Other,
}

impl ExpenseCategory {
    /// All categories in form order
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Housing,
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Utilities,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Entertainment => "entertainment",
            Self::Utilities => "utilities",
            Self::Other => "other",
        }
    }

    /// Capitalized label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "housing" => Ok(Self::Housing),
            "food" => Ok(Self::Food),
            "transportation" => Ok(Self::Transportation),
            "entertainment" => Ok(Self::Entertainment),
            "utilities" => Ok(Self::Utilities),
            "other" => Ok(Self::Other),
            _ => Err(format!(
                "Unknown expense category: {} (valid: housing, food, transportation, entertainment, utilities, other)",
                s
            )),
        }
    }
}

/// Amount entered per expense category
///
/// Every category is always present; missing or unparsable entries are 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseInput {
    amounts: BTreeMap<ExpenseCategory, f64>,
}

impl Default for ExpenseInput {
    fn default() -> Self {
        Self {
            amounts: ExpenseCategory::ALL.iter().map(|c| (*c, 0.0)).collect(),
        }
    }
}

impl ExpenseInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw form strings, coercing anything unparsable to 0
    pub fn from_raw<'a>(entries: impl IntoIterator<Item = (ExpenseCategory, &'a str)>) -> Self {
        let mut input = Self::default();
        for (category, raw) in entries {
            input.set(category, parse_amount(raw));
        }
        input
    }

    /// Builder-style setter
    pub fn with(mut self, category: ExpenseCategory, amount: f64) -> Self {
        self.set(category, amount);
        self
    }

    pub fn set(&mut self, category: ExpenseCategory, amount: f64) {
        self.amounts.insert(category, amount);
    }

    pub fn amount(&self, category: ExpenseCategory) -> f64 {
        self.amounts.get(&category).copied().unwrap_or(0.0)
    }

    /// Sum of all category amounts
    pub fn total(&self) -> f64 {
        ExpenseCategory::ALL.iter().map(|c| self.amount(*c)).sum()
    }

    /// Iterate categories in form order with their amounts
    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, f64)> + '_ {
        ExpenseCategory::ALL.iter().map(move |c| (*c, self.amount(*c)))
    }
}

/// Summary metrics derived from one income/expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_income: f64,
    pub total_expenses: f64,
    /// `total_income - total_expenses`, negative when overspending
    pub net_savings: f64,
    /// Percentage of income saved, 0 when there is no income
    pub savings_rate_pct: f64,
    /// Each category as a percentage of income (not of expenses), unclamped
    pub category_pct: BTreeMap<ExpenseCategory, f64>,
}

impl Metrics {
    pub fn category_pct(&self, category: ExpenseCategory) -> f64 {
        self.category_pct.get(&category).copied().unwrap_or(0.0)
    }
}

/// Identifier of a history entry
///
/// New entries get millisecond timestamps. Stored histories may also carry
/// text ids such as UUIDs; those are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum SnapshotId {
    Number(i64),
    Text(String),
}

impl SnapshotId {
    /// Numeric value, `None` for text ids
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<i64> for SnapshotId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for SnapshotId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl PartialEq<i64> for SnapshotId {
    fn eq(&self, other: &i64) -> bool {
        self.as_number() == Some(*other)
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl<'de> Deserialize<'de> for SnapshotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => match n.as_i64() {
                Some(id) => Self::Number(id),
                None => Self::Text(n.to_string()),
            },
            Value::String(s) => Self::Text(s),
            Value::Null => Self::default(),
            other => Self::Text(other.to_string()),
        })
    }
}

/// One recorded analysis in the history
///
/// Deserialization is lenient: a missing or non-text date becomes an empty
/// (never matching) date and missing or non-numeric amounts become 0, so a
/// damaged record is still carried through the next save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Millisecond timestamp for new entries, unique within a history
    #[serde(default)]
    pub id: SnapshotId,
    /// Calendar date as `YYYY-MM-DD`; kept as text so malformed persisted
    /// dates survive a load/save round trip
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub income: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub expenses: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub savings: f64,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_amount(&s),
        _ => 0.0,
    })
}

impl Snapshot {
    /// Create a snapshot for `date` from computed metrics
    pub fn new(id: i64, date: NaiveDate, metrics: &Metrics) -> Self {
        Self {
            id: SnapshotId::Number(id),
            date: date.format(DATE_FORMAT).to_string(),
            income: metrics.total_income,
            expenses: metrics.total_expenses,
            savings: metrics.net_savings,
        }
    }

    /// Parsed calendar date, `None` if the stored date is malformed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_snapshot_date(&self.date)
    }
}

/// Append-only, insertion-ordered sequence of snapshots
pub type History = Vec<Snapshot>;

/// Parse a snapshot date leniently
///
/// Accepts `YYYY-MM-DD` and full ISO-8601 date-times (the date part is used).
pub fn parse_snapshot_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}
