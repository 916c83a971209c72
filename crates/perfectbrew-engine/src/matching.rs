//! Recipe matching: rank recipes by how well they suit a coffee.

use perfectbrew_core::{CoffeeDescriptor, FlavorTag, Process, RoastLevel};
use serde::{Deserialize, Serialize};
use tracing::debug;

const NO_PROFILE_SCORE: u32 = 30;
const ROAST_MATCH: u32 = 50;
const ROAST_ANY: u32 = 30;
const PROCESS_MATCH: u32 = 30;
const PROCESS_ANY: u32 = 15;
const POINTS_PER_TAG: u32 = 10;
const MAX_TAG_POINTS: u32 = 20;
const ORIGIN_MATCH: u32 = 15;
const VARIETY_MATCH: u32 = 10;
const MIN_SCORE: u32 = 10;

/// What kind of coffee a recipe was written for. Empty lists mean "any".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeProfile {
    pub recommended_roast_levels: Vec<RoastLevel>,
    pub recommended_processes: Vec<Process>,
    pub recommended_flavor_tags: Vec<FlavorTag>,
    pub recommended_origins: Option<Vec<String>>,
    pub recommended_varieties: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub title: String,
    pub brewing_method: String,
    pub skill_level: String,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<RecipeProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeMatch {
    pub recipe: Recipe,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Score every recipe against `coffee`, drop poor matches, best first.
/// Recipes with equal scores keep their input order.
pub fn recommend_recipes(coffee: &CoffeeDescriptor, recipes: &[Recipe]) -> Vec<RecipeMatch> {
    let mut matches: Vec<RecipeMatch> = recipes
        .iter()
        .filter_map(|recipe| {
            let (score, reasons) = score_recipe(coffee, recipe);
            if score < MIN_SCORE {
                debug!(recipe = %recipe.title, score, "dropping poor match");
                return None;
            }
            Some(RecipeMatch {
                recipe: recipe.clone(),
                score,
                reasons,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Score a single recipe and explain the points.
pub fn score_recipe(coffee: &CoffeeDescriptor, recipe: &Recipe) -> (u32, Vec<String>) {
    let Some(profile) = &recipe.profile else {
        return (NO_PROFILE_SCORE, vec!["General recommendation".to_string()]);
    };

    let mut score = 0;
    let mut reasons = Vec::new();

    if profile.recommended_roast_levels.contains(&coffee.roast_level) {
        score += ROAST_MATCH;
        reasons.push(format!("Matches {} roast", coffee.roast_level));
    } else if profile.recommended_roast_levels.is_empty() {
        score += ROAST_ANY;
    }

    if profile.recommended_processes.contains(&coffee.process) {
        score += PROCESS_MATCH;
        reasons.push(format!("Best for {} process", coffee.process));
    } else if profile.recommended_processes.is_empty() {
        score += PROCESS_ANY;
    }

    let mut shared: Vec<FlavorTag> = Vec::new();
    for tag in &coffee.flavor_tags {
        if profile.recommended_flavor_tags.contains(tag) && !shared.contains(tag) {
            shared.push(*tag);
        }
    }
    if !shared.is_empty() {
        score += (shared.len() as u32 * POINTS_PER_TAG).min(MAX_TAG_POINTS);
        let names: Vec<&str> = shared.iter().map(|t| t.label()).collect();
        reasons.push(format!("Highlights: {}", names.join(", ")));
    }

    let country = coffee.country.trim().to_lowercase();
    let origin_match = profile
        .recommended_origins
        .as_ref()
        .is_some_and(|origins| origins.iter().any(|o| o.to_lowercase().contains(&country)));
    if !country.is_empty() && origin_match {
        score += ORIGIN_MATCH;
        reasons.push(format!("Best for {} coffee", coffee.country.trim()));
    }

    let variety = coffee.variety.trim();
    let variety_match = profile
        .recommended_varieties
        .as_ref()
        .is_some_and(|varieties| varieties.iter().any(|v| v.trim().eq_ignore_ascii_case(variety)));
    if !variety.is_empty() && variety_match {
        score += VARIETY_MATCH;
        reasons.push(format!("Perfect for {variety}"));
    }

    (score, reasons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str, method: &str, profile: Option<RecipeProfile>) -> Recipe {
        Recipe {
            title: title.to_string(),
            brewing_method: method.to_string(),
            skill_level: "Any".to_string(),
            rating: 5.0,
            profile,
        }
    }

    fn profile(roasts: &[RoastLevel], processes: &[Process], tags: &[FlavorTag]) -> RecipeProfile {
        RecipeProfile {
            recommended_roast_levels: roasts.to_vec(),
            recommended_processes: processes.to_vec(),
            recommended_flavor_tags: tags.to_vec(),
            ..Default::default()
        }
    }

    fn single(coffee: &CoffeeDescriptor, recipe: Recipe) -> RecipeMatch {
        let mut matches = recommend_recipes(coffee, &[recipe]);
        assert_eq!(matches.len(), 1);
        matches.remove(0)
    }

    #[test]
    fn perfect_match() {
        let coffee = CoffeeDescriptor::new("Test Coffee")
            .with_roast(RoastLevel::Light)
            .with_process(Process::Washed)
            .with_tags(&[FlavorTag::Citrus, FlavorTag::Floral]);
        let p = profile(
            &[RoastLevel::Light],
            &[Process::Washed],
            &[FlavorTag::Citrus, FlavorTag::Floral],
        );
        let m = single(&coffee, recipe("Perfect Match V60", "V60", Some(p)));
        assert_eq!(m.score, 100);
        assert!(m.reasons.contains(&"Matches Light roast".to_string()));
        assert!(m.reasons.contains(&"Best for Washed process".to_string()));
        assert!(m.reasons.contains(&"Highlights: Citrus, Floral".to_string()));
    }

    #[test]
    fn partial_match() {
        let coffee = CoffeeDescriptor::new("Medium Natural")
            .with_roast(RoastLevel::Medium)
            .with_process(Process::Natural)
            .with_tags(&[FlavorTag::Berry]);
        let p = profile(&[RoastLevel::Medium], &[Process::Washed], &[FlavorTag::Nutty]);
        let m = single(&coffee, recipe("Partial Match", "French Press", Some(p)));
        assert_eq!(m.score, 50);
        assert_eq!(m.reasons, vec!["Matches Medium roast".to_string()]);
    }

    #[test]
    fn origin_match() {
        let coffee = CoffeeDescriptor::new("Yirgacheffe")
            .with_roast(RoastLevel::Light)
            .with_process(Process::Washed)
            .with_country("Ethiopia");
        let p = RecipeProfile {
            recommended_origins: Some(vec!["Ethiopia".into(), "Kenya".into()]),
            ..profile(&[RoastLevel::Light], &[Process::Washed], &[])
        };
        let m = single(&coffee, recipe("African Coffee Method", "V60", Some(p)));
        assert_eq!(m.score, 95);
        assert!(m.reasons.contains(&"Best for Ethiopia coffee".to_string()));
    }

    #[test]
    fn variety_match() {
        let coffee = CoffeeDescriptor::new("Panama Geisha")
            .with_roast(RoastLevel::Light)
            .with_process(Process::Natural)
            .with_variety("Geisha");
        let p = RecipeProfile {
            recommended_varieties: Some(vec!["geisha".into()]),
            ..profile(&[RoastLevel::Light], &[Process::Natural], &[])
        };
        let m = single(&coffee, recipe("Competition V60", "V60", Some(p)));
        assert_eq!(m.score, 90);
        assert!(m.reasons.contains(&"Perfect for Geisha".to_string()));
    }

    #[test]
    fn no_profile_fallback() {
        let coffee = CoffeeDescriptor::new("Any Coffee");
        let m = single(&coffee, recipe("Legacy Recipe", "AeroPress", None));
        assert_eq!(m.score, 30);
        assert_eq!(m.reasons, vec!["General recommendation".to_string()]);
    }

    #[test]
    fn empty_lists_are_flexible() {
        let coffee = CoffeeDescriptor::new("Any");
        let (score, reasons) = score_recipe(&coffee, &recipe("Open", "V60", Some(RecipeProfile::default())));
        assert_eq!(score, 45);
        assert!(reasons.is_empty());
    }

    #[test]
    fn tag_points_cap_at_twenty() {
        let tags = [FlavorTag::Citrus, FlavorTag::Floral, FlavorTag::Berry];
        let coffee = CoffeeDescriptor::new("Fruity")
            .with_roast(RoastLevel::Dark)
            .with_process(Process::Honey)
            .with_tags(&tags);
        let p = profile(&[RoastLevel::Light], &[Process::Washed], &tags);
        let (score, _) = score_recipe(&coffee, &recipe("Tags", "V60", Some(p)));
        assert_eq!(score, 20);
    }

    #[test]
    fn poor_matches_are_dropped_and_results_sorted() {
        let coffee = CoffeeDescriptor::new("Dark Natural")
            .with_roast(RoastLevel::Dark)
            .with_process(Process::Natural);
        let mismatch = profile(&[RoastLevel::Light], &[Process::Washed], &[]);
        let roast_only = profile(&[RoastLevel::Dark], &[Process::Washed], &[]);
        let recipes = vec![
            recipe("Mismatch", "V60", Some(mismatch)),
            recipe("Legacy", "AeroPress", None),
            recipe("Dark", "French Press", Some(roast_only)),
        ];
        let matches = recommend_recipes(&coffee, &recipes);
        let titles: Vec<&str> = matches.iter().map(|m| m.recipe.title.as_str()).collect();
        assert_eq!(titles, vec!["Dark", "Legacy"]);
    }
}
