//! Tuning constants for the diagnostic engine.
//!
//! The thresholds, weights and margins used by gap analysis and direction
//! voting are empirically chosen house rules. They live here rather than
//! inline so they can be tuned from a TOML file without touching the rules.
//!
//! ```toml
//! [voting]
//! winner_margin = 1.3
//!
//! [adherence]
//! no = 0.6
//! ```
//!
//! Every section and field is optional; missing values keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticConfig {
    pub significance: SignificanceThresholds,
    pub voting: VotingConfig,
    pub defects: DefectConfidence,
    pub context_free: ContextFreeThresholds,
    pub adherence: AdherenceScaling,
    pub execution: ExecutionBoost,
}

/// Absolute-gap cut-offs for the significance buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignificanceThresholds {
    /// |gap| below this is negligible.
    pub minor: f64,
    pub moderate: f64,
    /// |gap| at or above this is major.
    pub major: f64,
}

impl Default for SignificanceThresholds {
    fn default() -> Self {
        Self {
            minor: 0.1,
            moderate: 0.25,
            major: 0.4,
        }
    }
}

/// Weighted-vote parameters for the context-aware direction decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VotingConfig {
    pub bitterness_weight: f64,
    pub acidity_weight: f64,
    pub sweetness_weight: f64,
    pub body_weight: f64,
    /// Factor applied to an acidity-over vote for "decrease".
    pub acidity_over_factor: f64,
    /// Factor applied to body votes in either direction.
    pub body_factor: f64,
    /// Total votes below this yield a balanced verdict.
    pub min_total_votes: f64,
    /// Added to the normalised vote margin to form the confidence.
    pub confidence_baseline: f64,
    /// The winner must beat the loser by this factor.
    pub winner_margin: f64,
    /// Confidence multiplier when a close call is broken toward "decrease".
    pub tie_break_discount: f64,
    /// Minimum bitterness significance weight to break a close call.
    pub tie_break_min_significance: u8,
    /// Confidence reported for a balanced verdict.
    pub balanced_confidence: f64,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            bitterness_weight: 3.0,
            acidity_weight: 2.0,
            sweetness_weight: 1.5,
            body_weight: 1.0,
            acidity_over_factor: 0.5,
            body_factor: 0.3,
            min_total_votes: 1.0,
            confidence_baseline: 0.4,
            winner_margin: 1.2,
            tie_break_discount: 0.8,
            tie_break_min_significance: 2,
            balanced_confidence: 0.5,
        }
    }
}

/// Fixed confidence for an explicitly reported defect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefectConfidence {
    /// Sour or bitter.
    pub extraction: f64,
    /// Weak or strong.
    pub strength: f64,
    /// Hollow.
    pub technique: f64,
}

impl Default for DefectConfidence {
    fn default() -> Self {
        Self {
            extraction: 0.85,
            strength: 0.8,
            technique: 0.75,
        }
    }
}

/// Absolute taste thresholds used when no coffee context is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextFreeThresholds {
    pub high: f64,
    pub moderate_low: f64,
    pub low: f64,
    pub extraction_confidence: f64,
    pub strength_confidence: f64,
}

impl Default for ContextFreeThresholds {
    fn default() -> Self {
        Self {
            high: 0.6,
            moderate_low: 0.4,
            low: 0.3,
            extraction_confidence: 0.7,
            strength_confidence: 0.6,
        }
    }
}

/// Confidence multipliers by how closely the recipe was followed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdherenceScaling {
    pub yes: f64,
    pub mostly: f64,
    pub no: f64,
}

impl Default for AdherenceScaling {
    fn default() -> Self {
        Self {
            yes: 1.0,
            mostly: 0.9,
            no: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionBoost {
    /// Impact points added to a boosted adjustment.
    pub impact_bonus: u32,
}

impl Default for ExecutionBoost {
    fn default() -> Self {
        Self { impact_bonus: 10 }
    }
}

impl DiagnosticConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, CoreError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded diagnostic config");
        Ok(config)
    }
}
