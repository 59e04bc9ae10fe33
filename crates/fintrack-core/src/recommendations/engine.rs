//! Recommendation engine - walks the rule table and orders the advice

use crate::models::Metrics;

use super::rules::{default_rules, Rule};
use super::types::{Recommendation, RuleId};

/// Evaluates an ordered rule table against computed metrics
pub struct RecommendationEngine {
    rules: Vec<Rule>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Create an engine with an explicit rule table (evaluated in order)
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Append a rule to the end of the table
    pub fn register(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// The rule table in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluate every rule and return recommendations grouped High, Medium, Low
    ///
    /// Within a priority the order is the order in which rules fired. An empty
    /// result means nothing worth flagging.
    pub fn evaluate(&self, metrics: &Metrics) -> Vec<Recommendation> {
        let mut fired: Vec<RuleId> = Vec::new();
        let mut recommendations = Vec::new();

        for rule in &self.rules {
            if let Some(blocker) = rule.unless {
                if fired.contains(&blocker) {
                    continue;
                }
            }
            if !(rule.applies)(metrics) {
                continue;
            }

            tracing::debug!(
                rule = rule.id.as_str(),
                priority = rule.priority.as_str(),
                "Rule fired"
            );
            fired.push(rule.id);
            recommendations.push(Recommendation::new(
                rule.id,
                rule.priority,
                (rule.build)(metrics),
            ));
        }

        // Stable sort keeps rule order within a priority bucket
        recommendations.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));

        tracing::debug!(count = recommendations.len(), "Recommendations evaluated");
        recommendations
    }
}
