//! Expected-versus-actual taste gaps.
//!
//! A gap is `expected - actual`: positive means the cup came out short of
//! the target on that dimension, negative means it overshot.

use std::fmt;

use perfectbrew_core::ExtractionCharacteristics;
use perfectbrew_core::config::SignificanceThresholds;
use serde::{Deserialize, Serialize};

use crate::feedback::ActualTasteProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TasteDimension {
    Acidity,
    Sweetness,
    Body,
    Bitterness,
}

impl TasteDimension {
    /// Gap emission order.
    pub const ALL: [TasteDimension; 4] = [
        Self::Acidity,
        Self::Sweetness,
        Self::Body,
        Self::Bitterness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acidity => "acidity",
            Self::Sweetness => "sweetness",
            Self::Body => "body",
            Self::Bitterness => "bitterness",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Acidity => "Acidity",
            Self::Sweetness => "Sweetness",
            Self::Body => "Body",
            Self::Bitterness => "Bitterness",
        }
    }
}

impl fmt::Display for TasteDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSignificance {
    Negligible,
    Minor,
    Moderate,
    Major,
}

impl GapSignificance {
    pub fn classify(abs_gap: f64, thresholds: &SignificanceThresholds) -> Self {
        if abs_gap < thresholds.minor {
            Self::Negligible
        } else if abs_gap < thresholds.moderate {
            Self::Minor
        } else if abs_gap < thresholds.major {
            Self::Moderate
        } else {
            Self::Major
        }
    }

    pub fn weight(&self) -> u8 {
        match self {
            Self::Negligible => 0,
            Self::Minor => 1,
            Self::Moderate => 2,
            Self::Major => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TasteGap {
    pub dimension: TasteDimension,
    pub expected: f64,
    pub actual: f64,
    pub gap: f64,
    pub significance: GapSignificance,
}

impl TasteGap {
    pub fn new(
        dimension: TasteDimension,
        expected: f64,
        actual: f64,
        thresholds: &SignificanceThresholds,
    ) -> Self {
        let gap = expected - actual;
        Self {
            dimension,
            expected,
            actual,
            gap,
            significance: GapSignificance::classify(gap.abs(), thresholds),
        }
    }

    /// The cup fell short of the target.
    pub fn is_under(&self) -> bool {
        self.gap > 0.0
    }

    /// The cup overshot the target.
    pub fn is_over(&self) -> bool {
        self.gap < 0.0
    }

    pub fn is_significant(&self) -> bool {
        self.significance != GapSignificance::Negligible
    }
}

/// Compare the target profile with what the user tasted.
///
/// Gaps come out in the fixed order acidity, sweetness, body, bitterness.
/// Expected bitterness is the complement of target clarity. A dimension the
/// user did not rate produces no gap.
pub fn analyze_gaps(
    expected: &ExtractionCharacteristics,
    actual: &ActualTasteProfile,
    thresholds: &SignificanceThresholds,
) -> Vec<TasteGap> {
    TasteDimension::ALL
        .iter()
        .filter_map(|&dimension| {
            let (target, tasted) = match dimension {
                TasteDimension::Acidity => (expected.acidity, actual.acidity),
                TasteDimension::Sweetness => (expected.sweetness, actual.sweetness),
                TasteDimension::Body => (expected.body, Some(actual.body)),
                TasteDimension::Bitterness => (expected.expected_bitterness(), actual.bitterness),
            };
            tasted.map(|value| TasteGap::new(dimension, target, value, thresholds))
        })
        .collect()
}

/// Coarse three-way label for a [0, 1] level where 0.5 is ideal.
pub fn value_to_comparative_label(value: f64) -> &'static str {
    if value <= 0.25 {
        "Not enough"
    } else if value >= 0.75 {
        "Too much"
    } else {
        "Perfect"
    }
}
