//! Single-direction extraction decision.
//!
//! Every diagnosis settles on exactly one [`ExtractionDirection`]. The
//! adjustment generators then only ever produce changes that push the brew
//! that way, so a result can never say "grind finer" and "lower the
//! temperature" at the same time.

use std::fmt;

use perfectbrew_core::DiagnosticConfig;
use perfectbrew_core::config::{AdherenceScaling, DefectConfidence};
use perfectbrew_core::profile::clamp_unit;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::feedback::{ActualTasteProfile, Defect, FollowedRecipe};
use crate::gap::{TasteDimension, TasteGap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionDirection {
    /// Under-extracted: finer, hotter, longer.
    #[serde(rename = "Increase Extraction")]
    Increase,
    /// Over-extracted: coarser, cooler, shorter.
    #[serde(rename = "Decrease Extraction")]
    Decrease,
    /// Dose and ratio only; extraction is fine.
    #[serde(rename = "Adjust Strength")]
    AdjustStrength,
    /// Uneven extraction or channeling.
    #[serde(rename = "Improve Technique")]
    ImproveTechnique,
    #[serde(rename = "Maintain Balance")]
    Balanced,
}

impl ExtractionDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Increase => "Increase Extraction",
            Self::Decrease => "Decrease Extraction",
            Self::AdjustStrength => "Adjust Strength",
            Self::ImproveTechnique => "Improve Technique",
            Self::Balanced => "Maintain Balance",
        }
    }

    pub fn action_verb(&self) -> &'static str {
        match self {
            Self::Increase => "extracting more",
            Self::Decrease => "extracting less",
            Self::AdjustStrength => "adjusting strength",
            Self::ImproveTechnique => "improving evenness",
            Self::Balanced => "fine-tuning",
        }
    }

    /// The extraction direction this one cancels out, if any.
    pub fn opposite(&self) -> Option<Self> {
        match self {
            Self::Increase => Some(Self::Decrease),
            Self::Decrease => Some(Self::Increase),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionAssessment {
    #[serde(rename = "Under-extracted")]
    UnderExtracted,
    #[serde(rename = "Over-extracted")]
    OverExtracted,
    Balanced,
    #[serde(rename = "Low Strength")]
    LowStrength,
    #[serde(rename = "High Strength")]
    HighStrength,
    Channeling,
}

impl ExtractionAssessment {
    /// Assessment implied by the chosen direction. A strength problem reads
    /// as high strength only when the user said the cup was strong.
    pub fn from_direction(direction: ExtractionDirection, defect: Defect) -> Self {
        match direction {
            ExtractionDirection::Increase => Self::UnderExtracted,
            ExtractionDirection::Decrease => Self::OverExtracted,
            ExtractionDirection::AdjustStrength if defect == Defect::StrongHeavy => {
                Self::HighStrength
            }
            ExtractionDirection::AdjustStrength => Self::LowStrength,
            ExtractionDirection::ImproveTechnique => Self::Channeling,
            ExtractionDirection::Balanced => Self::Balanced,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderExtracted => "Under-extracted",
            Self::OverExtracted => "Over-extracted",
            Self::Balanced => "Balanced",
            Self::LowStrength => "Low Strength",
            Self::HighStrength => "High Strength",
            Self::Channeling => "Channeling",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::UnderExtracted => "Not enough flavor compounds were dissolved from the coffee.",
            Self::OverExtracted => "Too many compounds were dissolved, including harsh ones.",
            Self::Balanced => {
                "Your extraction was well-balanced. Minor tweaks might enhance specific notes."
            }
            Self::LowStrength => {
                "The brew is thin. Consider adjusting your coffee-to-water ratio."
            }
            Self::HighStrength => {
                "The brew is intense. You might want to dilute or adjust ratio."
            }
            Self::Channeling => "Water flowed unevenly through the coffee bed.",
        }
    }
}

impl fmt::Display for ExtractionAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A direction with its confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionDecision {
    pub direction: ExtractionDirection,
    pub confidence: f64,
}

impl DirectionDecision {
    pub fn new(direction: ExtractionDirection, confidence: f64) -> Self {
        Self {
            direction,
            confidence,
        }
    }
}

/// Fixed mapping for an explicitly reported defect. `None` when the user
/// reported no defect, so the caller falls through to taste analysis.
pub fn direction_from_defect(defect: Defect, table: &DefectConfidence) -> Option<DirectionDecision> {
    let decision = match defect {
        Defect::None => return None,
        Defect::SourTart => DirectionDecision::new(ExtractionDirection::Increase, table.extraction),
        Defect::BitterDry => DirectionDecision::new(ExtractionDirection::Decrease, table.extraction),
        Defect::WeakWatery | Defect::StrongHeavy => {
            DirectionDecision::new(ExtractionDirection::AdjustStrength, table.strength)
        }
        Defect::Hollow => {
            DirectionDecision::new(ExtractionDirection::ImproveTechnique, table.technique)
        }
    };
    Some(decision)
}

/// Decide the direction from taste gaps against a known coffee.
///
/// An explicit defect wins outright. Otherwise each significant gap casts a
/// weighted vote for more or less extraction, and the winner must clear the
/// configured margin. A close call goes to "decrease" only when bitterness
/// is clearly over target.
pub fn decide_direction(gaps: &[TasteGap], defect: Defect, config: &DiagnosticConfig) -> DirectionDecision {
    if let Some(decision) = direction_from_defect(defect, &config.defects) {
        debug!(%defect, direction = %decision.direction, "direction from reported defect");
        return decision;
    }

    let v = &config.voting;
    let mut increase = 0.0;
    let mut decrease = 0.0;

    for gap in gaps.iter().filter(|g| g.is_significant()) {
        let weight = match gap.dimension {
            TasteDimension::Bitterness => v.bitterness_weight,
            TasteDimension::Acidity => v.acidity_weight,
            TasteDimension::Sweetness => v.sweetness_weight,
            TasteDimension::Body => v.body_weight,
        };
        let signal = f64::from(gap.significance.weight()) * weight;

        match gap.dimension {
            TasteDimension::Bitterness if gap.is_over() => decrease += signal,
            TasteDimension::Acidity if gap.is_under() => increase += signal,
            TasteDimension::Acidity if gap.is_over() => decrease += signal * v.acidity_over_factor,
            TasteDimension::Sweetness if gap.is_under() => increase += signal,
            TasteDimension::Body if gap.is_under() => increase += signal * v.body_factor,
            TasteDimension::Body if gap.is_over() => decrease += signal * v.body_factor,
            _ => {}
        }
    }

    let total = increase + decrease;
    let balanced = DirectionDecision::new(ExtractionDirection::Balanced, v.balanced_confidence);

    if total < v.min_total_votes {
        debug!(increase_votes = increase, decrease_votes = decrease, "no significant signal");
        return balanced;
    }

    let confidence = ((increase - decrease).abs() / total + v.confidence_baseline).min(1.0);

    let decision = if increase > decrease * v.winner_margin {
        DirectionDecision::new(ExtractionDirection::Increase, confidence)
    } else if decrease > increase * v.winner_margin {
        DirectionDecision::new(ExtractionDirection::Decrease, confidence)
    } else {
        let bitter_over = gaps.iter().any(|g| {
            g.dimension == TasteDimension::Bitterness
                && g.is_over()
                && g.significance.weight() >= v.tie_break_min_significance
        });
        if bitter_over {
            DirectionDecision::new(ExtractionDirection::Decrease, confidence * v.tie_break_discount)
        } else {
            balanced
        }
    };

    debug!(
        direction = %decision.direction,
        confidence = decision.confidence,
        increase_votes = increase,
        decrease_votes = decrease,
        "direction from taste gaps"
    );
    decision
}

/// Decide the direction from absolute taste levels when the coffee is
/// unknown. Checks run in order; one that needs an unrated slider is skipped.
pub fn decide_direction_without_context(
    actual: &ActualTasteProfile,
    defect: Defect,
    config: &DiagnosticConfig,
) -> DirectionDecision {
    if let Some(decision) = direction_from_defect(defect, &config.defects) {
        debug!(%defect, direction = %decision.direction, "direction from reported defect");
        return decision;
    }

    let t = &config.context_free;
    let above = |v: Option<f64>, limit: f64| v.is_some_and(|x| x > limit);
    let below = |v: Option<f64>, limit: f64| v.is_some_and(|x| x < limit);

    let decision = if above(actual.bitterness, t.high) && below(actual.acidity, t.moderate_low) {
        DirectionDecision::new(ExtractionDirection::Decrease, t.extraction_confidence)
    } else if above(actual.acidity, t.high) && below(actual.sweetness, t.low) {
        DirectionDecision::new(ExtractionDirection::Increase, t.extraction_confidence)
    } else if below(actual.acidity, t.low)
        && below(actual.sweetness, t.low)
        && below(actual.bitterness, t.low)
    {
        DirectionDecision::new(ExtractionDirection::AdjustStrength, t.strength_confidence)
    } else {
        DirectionDecision::new(ExtractionDirection::Balanced, config.voting.balanced_confidence)
    };

    debug!(
        direction = %decision.direction,
        confidence = decision.confidence,
        "direction from absolute taste levels"
    );
    decision
}

/// Scale confidence by how closely the recipe was followed, then clamp.
pub fn apply_adherence(
    decision: DirectionDecision,
    followed: Option<FollowedRecipe>,
    scaling: &AdherenceScaling,
) -> DirectionDecision {
    let factor = match followed {
        Some(FollowedRecipe::Yes) | None => scaling.yes,
        Some(FollowedRecipe::Mostly) => scaling.mostly,
        Some(FollowedRecipe::No) => scaling.no,
    };
    DirectionDecision {
        confidence: clamp_unit(decision.confidence * factor),
        ..decision
    }
}

#[cfg(test)]
mod tests {
    use perfectbrew_core::config::SignificanceThresholds;

    use super::*;

    fn gap(dimension: TasteDimension, expected: f64, actual: f64) -> TasteGap {
        TasteGap::new(dimension, expected, actual, &SignificanceThresholds::default())
    }

    fn taste(acidity: f64, sweetness: f64, bitterness: f64) -> ActualTasteProfile {
        ActualTasteProfile {
            acidity: Some(acidity),
            sweetness: Some(sweetness),
            bitterness: Some(bitterness),
            body: 0.5,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn defect_table() {
        let t = DefectConfidence::default();
        let d = |defect| direction_from_defect(defect, &t).unwrap();
        assert_eq!(d(Defect::SourTart), DirectionDecision::new(ExtractionDirection::Increase, 0.85));
        assert_eq!(d(Defect::BitterDry), DirectionDecision::new(ExtractionDirection::Decrease, 0.85));
        assert_eq!(d(Defect::WeakWatery), DirectionDecision::new(ExtractionDirection::AdjustStrength, 0.8));
        assert_eq!(d(Defect::StrongHeavy), DirectionDecision::new(ExtractionDirection::AdjustStrength, 0.8));
        assert_eq!(d(Defect::Hollow), DirectionDecision::new(ExtractionDirection::ImproveTechnique, 0.75));
        assert!(direction_from_defect(Defect::None, &t).is_none());
    }

    #[test]
    fn defect_overrides_gaps() {
        let gaps = vec![gap(TasteDimension::Bitterness, 0.2, 1.0)];
        let d = decide_direction(&gaps, Defect::SourTart, &DiagnosticConfig::default());
        assert_eq!(d.direction, ExtractionDirection::Increase);
        assert_eq!(d.confidence, 0.85);
    }

    #[test]
    fn bitter_and_flat_votes_decrease() {
        // Light washed Geisha target against bitterness 5, acidity 1.
        let gaps = vec![
            gap(TasteDimension::Acidity, 0.85, 0.2),
            gap(TasteDimension::Body, 0.4, 0.6),
            gap(TasteDimension::Bitterness, 0.2, 1.0),
        ];
        let d = decide_direction(&gaps, Defect::None, &DiagnosticConfig::default());
        // increase = 3*2 = 6, decrease = 3*3 + 1*1*0.3 = 9.3
        assert_eq!(d.direction, ExtractionDirection::Decrease);
        assert!(approx(d.confidence, 3.3 / 15.3 + 0.4));
    }

    #[test]
    fn under_acidity_and_sweetness_votes_increase() {
        let gaps = vec![
            gap(TasteDimension::Acidity, 0.8, 0.4),
            gap(TasteDimension::Sweetness, 0.6, 0.3),
            gap(TasteDimension::Bitterness, 0.2, 0.2),
        ];
        let d = decide_direction(&gaps, Defect::None, &DiagnosticConfig::default());
        // increase = 3*2 + 2*1.5 = 9, decrease = 0
        assert_eq!(d.direction, ExtractionDirection::Increase);
        assert_eq!(d.confidence, 1.0);
    }

    #[test]
    fn weak_signal_is_balanced() {
        // Minor body gap only: 1 * 1.0 * 0.3 < 1.0.
        let gaps = vec![gap(TasteDimension::Body, 0.5, 0.35)];
        let d = decide_direction(&gaps, Defect::None, &DiagnosticConfig::default());
        assert_eq!(d, DirectionDecision::new(ExtractionDirection::Balanced, 0.5));

        let d = decide_direction(&[], Defect::None, &DiagnosticConfig::default());
        assert_eq!(d.direction, ExtractionDirection::Balanced);
    }

    #[test]
    fn close_call_with_strong_bitterness_leans_decrease() {
        // increase = 3*2 = 6 (acidity major under), decrease = 2*3 = 6 (bitterness moderate over)
        let gaps = vec![
            gap(TasteDimension::Acidity, 0.9, 0.4),
            gap(TasteDimension::Bitterness, 0.2, 0.5),
        ];
        let d = decide_direction(&gaps, Defect::None, &DiagnosticConfig::default());
        assert_eq!(d.direction, ExtractionDirection::Decrease);
        assert!(approx(d.confidence, 0.4 * 0.8));
    }

    #[test]
    fn close_call_without_bitterness_is_balanced() {
        // increase = 2*1.5 = 3 (sweetness moderate under), decrease = 3*2*0.5 = 3 (acidity major over)
        let gaps = vec![
            gap(TasteDimension::Acidity, 0.3, 0.8),
            gap(TasteDimension::Sweetness, 0.6, 0.3),
        ];
        let d = decide_direction(&gaps, Defect::None, &DiagnosticConfig::default());
        assert_eq!(d, DirectionDecision::new(ExtractionDirection::Balanced, 0.5));
    }

    #[test]
    fn context_free_rules_in_order() {
        let c = DiagnosticConfig::default();
        let d = |a, s, b| decide_direction_without_context(&taste(a, s, b), Defect::None, &c);

        assert_eq!(d(0.2, 0.5, 0.8), DirectionDecision::new(ExtractionDirection::Decrease, 0.7));
        assert_eq!(d(0.8, 0.2, 0.5), DirectionDecision::new(ExtractionDirection::Increase, 0.7));
        assert_eq!(d(0.1, 0.1, 0.1), DirectionDecision::new(ExtractionDirection::AdjustStrength, 0.6));
        assert_eq!(d(0.5, 0.5, 0.5), DirectionDecision::new(ExtractionDirection::Balanced, 0.5));
    }

    #[test]
    fn context_free_rules_skip_unrated_sliders() {
        let c = DiagnosticConfig::default();
        let only_bitter = ActualTasteProfile {
            acidity: None,
            sweetness: None,
            bitterness: Some(1.0),
            body: 0.5,
        };
        let d = decide_direction_without_context(&only_bitter, Defect::None, &c);
        assert_eq!(d.direction, ExtractionDirection::Balanced);
    }

    #[test]
    fn context_free_honours_defect() {
        let d = decide_direction_without_context(
            &taste(0.5, 0.5, 0.5),
            Defect::Hollow,
            &DiagnosticConfig::default(),
        );
        assert_eq!(d.direction, ExtractionDirection::ImproveTechnique);
    }

    #[test]
    fn adherence_scales_confidence() {
        let s = AdherenceScaling::default();
        let base = DirectionDecision::new(ExtractionDirection::Increase, 0.8);
        assert!(approx(apply_adherence(base, Some(FollowedRecipe::Yes), &s).confidence, 0.8));
        assert!(approx(apply_adherence(base, None, &s).confidence, 0.8));
        assert!(approx(apply_adherence(base, Some(FollowedRecipe::Mostly), &s).confidence, 0.72));
        assert!(approx(apply_adherence(base, Some(FollowedRecipe::No), &s).confidence, 0.56));
        assert_eq!(
            apply_adherence(base, Some(FollowedRecipe::No), &s).direction,
            ExtractionDirection::Increase
        );
    }

    #[test]
    fn adherence_clamps() {
        let s = AdherenceScaling {
            yes: 1.5,
            ..Default::default()
        };
        let base = DirectionDecision::new(ExtractionDirection::Decrease, 0.9);
        assert_eq!(apply_adherence(base, Some(FollowedRecipe::Yes), &s).confidence, 1.0);
    }

    #[test]
    fn assessment_mapping() {
        use ExtractionAssessment as A;
        use ExtractionDirection as D;
        assert_eq!(A::from_direction(D::Increase, Defect::None), A::UnderExtracted);
        assert_eq!(A::from_direction(D::Decrease, Defect::None), A::OverExtracted);
        assert_eq!(A::from_direction(D::AdjustStrength, Defect::WeakWatery), A::LowStrength);
        assert_eq!(A::from_direction(D::AdjustStrength, Defect::None), A::LowStrength);
        assert_eq!(A::from_direction(D::AdjustStrength, Defect::StrongHeavy), A::HighStrength);
        assert_eq!(A::from_direction(D::ImproveTechnique, Defect::Hollow), A::Channeling);
        assert_eq!(A::from_direction(D::Balanced, Defect::None), A::Balanced);
    }

    #[test]
    fn action_verbs() {
        assert_eq!(ExtractionDirection::Increase.action_verb(), "extracting more");
        assert_eq!(ExtractionDirection::Balanced.action_verb(), "fine-tuning");
        assert_eq!(ExtractionDirection::Increase.opposite(), Some(ExtractionDirection::Decrease));
        assert_eq!(ExtractionDirection::AdjustStrength.opposite(), None);
    }
}
