//! Recommendation Engine - rule-based financial advice
//!
//! Turns computed [`Metrics`](crate::models::Metrics) into an ordered list of
//! prioritized recommendations. The rules are a declarative table evaluated
//! in a fixed order; each rule independently contributes at most one
//! recommendation to the High, Medium or Low bucket.
//!
//! ## Built-in Rules
//!
//! 1. **Build Emergency Fund** (High) - savings positive but under 3 months of income
//! 2. **Increase Savings Rate** (High) - savings rate under 10%
//! 3. **Excellent Savings Rate** (Low) - savings rate of 20% or more, unless rule 2 fired
//! 4. **High Housing Cost** (High) - housing over 30% of income
//! 5. **Food Expenses High** (Medium) - food over 15% of income
//! 6. **Entertainment Budget High** (Medium) - entertainment over 10% of income
//! 7. **Ready for Investment** (Medium) - savings rate over 20% and savings over 3 months of income
//! 8. **Overspending** (High) - expenses exceed income
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fintrack_core::recommendations::RecommendationEngine;
//!
//! let engine = RecommendationEngine::new();
//! let recommendations = engine.evaluate(&metrics);
//! ```

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::RecommendationEngine;
pub use rules::{default_rules, Builder, Predicate, Rule};
pub use types::{Priority, Recommendation, RecommendationText, RuleId};
