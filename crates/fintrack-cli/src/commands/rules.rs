//! Rules command

use anyhow::Result;
use fintrack_core::RecommendationEngine;

use super::priority_icon;

pub fn cmd_rules() -> Result<()> {
    let engine = RecommendationEngine::new();

    println!();
    println!("📋 Recommendation rules (evaluation order)");
    println!("   ─────────────────────────────────────────────────────────────");

    for (i, rule) in engine.rules().iter().enumerate() {
        let unless = rule
            .unless
            .map(|id| format!("  (skipped if {} fired)", id))
            .unwrap_or_default();
        println!(
            "   {:>2}. {} {:<8} {:<28} {}{}",
            i + 1,
            priority_icon(rule.priority),
            rule.priority.as_str(),
            rule.name,
            rule.id,
            unless
        );
    }

    println!();
    println!("   Output is grouped High → Medium → Low, in rule order within each group.");
    println!();
    Ok(())
}
