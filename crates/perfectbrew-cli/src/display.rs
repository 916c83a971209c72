//! Vertical card display for coffees, target profiles and diagnoses.
//!
//! Each card is a header followed by labelled sections, one `label value`
//! row per line, with empty fields skipped.

use chrono::Local;
use perfectbrew_core::{
    AdjustmentCategory, BrewMethod, CoffeeDescriptor, ExtractionCharacteristics,
    rank_to_impact_percent,
};
use perfectbrew_engine::{BrewDiagnosticResult, RecipeMatch};

const BAR_WIDTH: usize = 20;
const MAX_REASONS: usize = 4;

// ── Coffee ──

/// Print the coffee's identity block.
pub fn print_coffee_header(coffee: &CoffeeDescriptor) {
    println!("=== {} ===", coffee.name);
    if !coffee.roaster.is_empty() {
        println!("{}", coffee.roaster);
    }
    println!();

    println!("Coffee");
    print_text("country", &coffee.country);
    print_text("region", &coffee.region);
    print_text("variety", &coffee.variety);
    match coffee.altitude_meters() {
        Some(m) => println!("  {:<26} {} ({} m)", "altitude", coffee.altitude, m),
        None => print_text("altitude", &coffee.altitude),
    }
    println!("  {:<26} {}", "roast", coffee.roast_level);
    println!("  {:<26} {}", "process", coffee.process);
    if !coffee.flavor_tags.is_empty() {
        let tags: Vec<&str> = coffee.flavor_tags.iter().map(|t| t.label()).collect();
        println!("  {:<26} {}", "flavor tags", tags.join(", "));
    }
    if let Some(days) = coffee.days_since_roast(Local::now().date_naive()) {
        println!("  {:<26} {} days ago", "roasted", days);
    }
    println!();
}

// ── Profiles ──

pub fn print_profile(header: &str, profile: &ExtractionCharacteristics) {
    println!("{header}");
    print_scalar("clarity", profile.clarity);
    print_scalar("acidity", profile.acidity);
    print_scalar("sweetness", profile.sweetness);
    print_scalar("body", profile.body);
    println!("  {:<26} {}", "agitation", profile.agitation);
    println!("  {:<26} {}", "thermal energy", profile.thermal);
    println!();
}

// ── Diagnosis ──

/// Print the unified adjustment card followed by per-dimension advice.
pub fn print_diagnosis(result: &BrewDiagnosticResult) {
    let unified = &result.unified;

    println!("Diagnosis");
    println!("  {:<26} {}", "assessment", result.assessment.label());
    println!("  {:<26} {}", "direction", unified.direction.label());
    println!("  {:<26} {:.0}%", "confidence", result.confidence * 100.0);
    if !result.has_coffee_context {
        println!("  {:<26} {}", "context", "feedback only (no coffee)");
    }
    println!("  {}", result.assessment.description());
    println!();

    if let Some(expected) = &result.expected_profile {
        let actual = &result.actual_profile;
        println!("Expected vs Tasted");
        print_comparison("acidity", Some(expected.acidity), actual.acidity);
        print_comparison("sweetness", Some(expected.sweetness), actual.sweetness);
        print_comparison("body", Some(expected.body), Some(actual.body));
        print_comparison(
            "bitterness",
            Some(expected.expected_bitterness()),
            actual.bitterness,
        );
        println!();
    }

    println!("{}", unified.summary);
    println!();

    match unified.primary() {
        Some(primary) => {
            println!("Primary Adjustment");
            print_adjustment_row(
                primary.category,
                &primary.suggested_change,
                primary.impact_percent,
            );
            println!("      {}", primary.explanation);
            println!();
        }
        None => {
            println!("No changes needed. Brew it the same way again.");
            println!();
        }
    }

    let secondary = unified.secondary();
    if !secondary.is_empty() {
        println!("Also Consider ({})", secondary.len());
        for item in secondary {
            print_adjustment_row(item.category, &item.suggested_change, item.impact_percent);
        }
        println!();
    }

    if !result.dimension_recommendations.is_empty() {
        println!("By Taste");
        for rec in &result.dimension_recommendations {
            println!(
                "  {:<26} {} (target: {})",
                rec.dimension.label(),
                rec.current_level,
                rec.target_level
            );
            println!("      {}", rec.advice);
            for step in &rec.specific_adjustments {
                println!("      - {step}");
            }
        }
        println!();
    }
}

// ── Recipes ──

pub fn print_recipe_matches(matches: &[RecipeMatch]) {
    if matches.is_empty() {
        println!("No recipes suit this coffee.");
        return;
    }

    println!("Recommended Recipes ({})", matches.len());
    for m in matches {
        println!(
            "  {:<26} {:>3}  {} · {}",
            truncate(&m.recipe.title, 26),
            m.score,
            m.recipe.brewing_method,
            m.recipe.skill_level
        );
        for reason in m.reasons.iter().take(MAX_REASONS) {
            println!("      {reason}");
        }
        if m.reasons.len() > MAX_REASONS {
            println!("      ... and {} more", m.reasons.len() - MAX_REASONS);
        }
    }
    println!();
}

// ── Methods ──

pub fn print_method_rankings() {
    println!("Adjustment impact by brew method");
    println!();
    for method in BrewMethod::ALL {
        println!("{method}");
        for (i, category) in method.priority_order().iter().enumerate() {
            let rank = i as u32 + 1;
            println!(
                "  {:<26} rank {}  {:>3}%",
                category.as_str(),
                rank,
                rank_to_impact_percent(rank)
            );
        }
        println!();
    }
}

// ── Helpers ──

fn print_text(label: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        println!("  {label:<26} {value}");
    }
}

fn print_scalar(label: &str, value: f64) {
    println!("  {:<26} {:.2}  {}", label, value, bar(value));
}

fn print_comparison(label: &str, expected: Option<f64>, actual: Option<f64>) {
    match (expected, actual) {
        (Some(e), Some(a)) => println!("  {:<26} {:.2} -> {:.2}  ({:+.2})", label, e, a, a - e),
        (Some(e), None) => println!("  {:<26} {:.2} -> (not rated)", label, e),
        _ => {}
    }
}

fn print_adjustment_row(category: AdjustmentCategory, change: &str, impact: u32) {
    println!("  {:<26} {}  [{}%]", category.as_str(), change, impact);
}

/// Fixed-width bar for a [0, 1] value.
fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_and_clamps() {
        assert_eq!(bar(0.0), ".".repeat(BAR_WIDTH));
        assert_eq!(bar(1.0), "#".repeat(BAR_WIDTH));
        assert_eq!(bar(0.5).matches('#').count(), 10);
        assert_eq!(bar(1.7).len(), BAR_WIDTH);
        assert_eq!(bar(-0.2), ".".repeat(BAR_WIDTH));
    }

    #[test]
    fn truncate_keeps_short_titles() {
        assert_eq!(truncate("Kasuya 4:6", 26), "Kasuya 4:6");
    }

    #[test]
    fn truncate_long_titles() {
        let t = truncate("The Ultimate Competition Light Roast V60", 20);
        assert_eq!(t.chars().count(), 20);
        assert!(t.ends_with("..."));
    }
}
