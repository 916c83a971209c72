//! Per-dimension taste advice.
//!
//! Explains each off-target dimension in plain language alongside the
//! unified adjustment. Advice is filtered against the chosen direction so
//! the card never tells the user to extract more and less at once.

use perfectbrew_core::profile::clamp_unit;
use serde::{Deserialize, Serialize};

use crate::direction::ExtractionDirection;
use crate::feedback::ActualTasteProfile;
use crate::gap::{TasteDimension, TasteGap, value_to_comparative_label};

const NOT_ENOUGH: &str = "Not enough";
const TOO_MUCH: &str = "Too much";
const TARGET_LEVEL: &str = "Perfect";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpecificRecommendation {
    pub dimension: TasteDimension,
    pub current_level: String,
    pub target_level: String,
    pub advice: String,
    pub specific_adjustments: Vec<String>,
}

struct AdviceEntry {
    dimension: TasteDimension,
    level: &'static str,
    /// Extraction direction this advice pushes toward, if any.
    implies: Option<ExtractionDirection>,
    advice: &'static str,
    adjustments: &'static [&'static str],
}

const ADVICE: &[AdviceEntry] = &[
    AdviceEntry {
        dimension: TasteDimension::Acidity,
        level: NOT_ENOUGH,
        implies: Some(ExtractionDirection::Increase),
        advice: "To increase acidity, you need more extraction. Acidity comes from lighter compounds that extract first.",
        adjustments: &[
            "Grind finer to increase surface area",
            "Increase water temperature by 2-3°C",
            "Extend brew time slightly",
        ],
    },
    AdviceEntry {
        dimension: TasteDimension::Acidity,
        level: TOO_MUCH,
        implies: Some(ExtractionDirection::Decrease),
        advice: "To tame sharp acidity, extract more gently so the bright compounds don't dominate.",
        adjustments: &[
            "Lower water temperature by 1-2°C",
            "Use a slightly coarser grind",
        ],
    },
    AdviceEntry {
        dimension: TasteDimension::Sweetness,
        level: NOT_ENOUGH,
        implies: Some(ExtractionDirection::Increase),
        advice: "To increase sweetness, optimize your extraction window. Sweetness peaks in the middle extraction phase.",
        adjustments: &[
            "Ensure even extraction (proper agitation)",
            "Use slightly finer grind",
            "Maintain optimal water temperature",
        ],
    },
    AdviceEntry {
        dimension: TasteDimension::Sweetness,
        level: TOO_MUCH,
        implies: None,
        advice: "The cup is sweeter than expected. If it feels cloying, a slightly lighter ratio adds lift.",
        adjustments: &["Try a ratio one step lighter"],
    },
    AdviceEntry {
        dimension: TasteDimension::Body,
        level: NOT_ENOUGH,
        implies: None,
        advice: "To build more body, put more coffee in the cup. Body tracks strength more than extraction.",
        adjustments: &[
            "Add 1-2 grams of coffee",
            "Tighten the ratio slightly",
        ],
    },
    AdviceEntry {
        dimension: TasteDimension::Body,
        level: TOO_MUCH,
        implies: None,
        advice: "To lighten a heavy cup, reduce strength rather than extraction.",
        adjustments: &[
            "Use 1-2 grams less coffee",
            "Use a paper filter to hold back fines and oils",
        ],
    },
    AdviceEntry {
        dimension: TasteDimension::Bitterness,
        level: NOT_ENOUGH,
        implies: Some(ExtractionDirection::Increase),
        advice: "A little bitterness gives the cup structure. If it tastes flat, extend extraction slightly.",
        adjustments: &["Extend brew time slightly"],
    },
    AdviceEntry {
        dimension: TasteDimension::Bitterness,
        level: TOO_MUCH,
        implies: Some(ExtractionDirection::Decrease),
        advice: "To reduce bitterness, pull back on extraction. Bitter compounds are heavier and extract last.",
        adjustments: &[
            "Grind coarser",
            "Lower water temperature by 2-3°C",
            "Shorten brew time",
        ],
    },
];

/// Advice for every dimension that is off target.
///
/// With gaps, a dimension's comparative level is `0.5 - gap` so that an
/// on-target dimension sits at the ideal midpoint. Without gaps the raw
/// tasted level is used. Advice that would push extraction against
/// `direction` is dropped.
pub fn dimension_recommendations(
    gaps: Option<&[TasteGap]>,
    actual: &ActualTasteProfile,
    direction: ExtractionDirection,
) -> Vec<DimensionSpecificRecommendation> {
    let levels: Vec<(TasteDimension, f64)> = match gaps {
        Some(gaps) => gaps
            .iter()
            .map(|g| (g.dimension, clamp_unit(0.5 - g.gap)))
            .collect(),
        None => TasteDimension::ALL
            .iter()
            .filter_map(|&d| {
                let value = match d {
                    TasteDimension::Acidity => actual.acidity,
                    TasteDimension::Sweetness => actual.sweetness,
                    TasteDimension::Body => Some(actual.body),
                    TasteDimension::Bitterness => actual.bitterness,
                };
                value.map(|v| (d, v))
            })
            .collect(),
    };

    levels
        .into_iter()
        .filter_map(|(dimension, value)| {
            let level = value_to_comparative_label(value);
            let entry = ADVICE
                .iter()
                .find(|e| e.dimension == dimension && e.level == level)?;
            if entry.implies.is_some() && entry.implies == direction.opposite() {
                return None;
            }
            Some(DimensionSpecificRecommendation {
                dimension,
                current_level: level.to_string(),
                target_level: TARGET_LEVEL.to_string(),
                advice: entry.advice.to_string(),
                specific_adjustments: entry.adjustments.iter().map(|s| s.to_string()).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use perfectbrew_core::config::SignificanceThresholds;

    use super::*;

    fn gap(dimension: TasteDimension, expected: f64, actual: f64) -> TasteGap {
        TasteGap::new(dimension, expected, actual, &SignificanceThresholds::default())
    }

    fn dims(recs: &[DimensionSpecificRecommendation]) -> Vec<TasteDimension> {
        recs.iter().map(|r| r.dimension).collect()
    }

    fn unrated() -> ActualTasteProfile {
        ActualTasteProfile {
            acidity: None,
            sweetness: None,
            bitterness: None,
            body: 0.5,
        }
    }

    #[test]
    fn under_extracted_card() {
        let gaps = vec![
            gap(TasteDimension::Acidity, 0.8, 0.4),
            gap(TasteDimension::Sweetness, 0.6, 0.3),
            gap(TasteDimension::Body, 0.3, 0.4),
            gap(TasteDimension::Bitterness, 0.2, 0.2),
        ];
        let recs = dimension_recommendations(Some(&gaps), &unrated(), ExtractionDirection::Increase);
        assert_eq!(dims(&recs), vec![TasteDimension::Acidity, TasteDimension::Sweetness]);
        assert_eq!(recs[0].current_level, "Not enough");
        assert_eq!(recs[0].target_level, "Perfect");
        assert_eq!(recs[0].specific_adjustments.len(), 3);
        assert!(recs[1].advice.starts_with("To increase sweetness"));
    }

    #[test]
    fn conflicting_advice_is_dropped() {
        // Acidity short (implies more extraction) while bitterness is over.
        let gaps = vec![
            gap(TasteDimension::Acidity, 0.85, 0.2),
            gap(TasteDimension::Bitterness, 0.2, 1.0),
        ];
        let recs = dimension_recommendations(Some(&gaps), &unrated(), ExtractionDirection::Decrease);
        assert_eq!(dims(&recs), vec![TasteDimension::Bitterness]);
        assert_eq!(recs[0].current_level, "Too much");

        let recs = dimension_recommendations(Some(&gaps), &unrated(), ExtractionDirection::Increase);
        assert_eq!(dims(&recs), vec![TasteDimension::Acidity]);
    }

    #[test]
    fn strength_advice_never_conflicts() {
        let gaps = vec![gap(TasteDimension::Body, 0.3, 0.75)];
        for direction in [ExtractionDirection::Increase, ExtractionDirection::Decrease] {
            let recs = dimension_recommendations(Some(&gaps), &unrated(), direction);
            assert_eq!(dims(&recs), vec![TasteDimension::Body]);
            assert_eq!(recs[0].current_level, "Too much");
        }
    }

    #[test]
    fn on_target_cup_has_no_advice() {
        let gaps = vec![
            gap(TasteDimension::Acidity, 0.6, 0.55),
            gap(TasteDimension::Sweetness, 0.6, 0.7),
            gap(TasteDimension::Body, 0.5, 0.5),
        ];
        let recs = dimension_recommendations(Some(&gaps), &unrated(), ExtractionDirection::Balanced);
        assert!(recs.is_empty());
    }

    #[test]
    fn without_context_uses_raw_levels() {
        let actual = ActualTasteProfile {
            acidity: Some(0.2),
            sweetness: None,
            bitterness: Some(0.8),
            body: 0.25,
        };
        let recs = dimension_recommendations(None, &actual, ExtractionDirection::Balanced);
        assert_eq!(
            dims(&recs),
            vec![TasteDimension::Acidity, TasteDimension::Body, TasteDimension::Bitterness]
        );
        assert_eq!(recs[1].current_level, "Not enough");
        assert_eq!(recs[2].current_level, "Too much");
    }
}
