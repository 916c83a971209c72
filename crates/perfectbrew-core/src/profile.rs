//! Extraction profile value types.
//!
//! [`ExtractionCharacteristics`] describes either the cup a coffee *should*
//! produce (a target) or what a brew method is inherently good at. All four
//! flavor scalars live in [0, 1]; the physical parameters are three-level
//! enums.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How much physical turbulence a bed of coffee tolerates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgitationLevel {
    /// Gentle pours, no stirring.
    Low,
    #[default]
    Medium,
    /// Heavy turbulence, stirring.
    High,
}

impl AgitationLevel {
    pub fn value(&self) -> f64 {
        match self {
            Self::Low => 0.2,
            Self::Medium => 0.5,
            Self::High => 0.8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for AgitationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Water temperature contribution to extraction rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThermalEnergy {
    /// Below 90°C.
    Low,
    /// 90-94°C.
    #[default]
    Medium,
    /// Above 94°C.
    High,
}

impl ThermalEnergy {
    pub fn value(&self) -> f64 {
        match self {
            Self::Low => 0.2,
            Self::Medium => 0.5,
            Self::High => 0.8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for ThermalEnergy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flavor-extraction profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionCharacteristics {
    /// 0.0 = body/texture focus, 1.0 = clarity/separation focus.
    pub clarity: f64,
    pub acidity: f64,
    pub sweetness: f64,
    /// 0.0 = tea-like, 1.0 = heavy/syrupy.
    pub body: f64,
    pub agitation: AgitationLevel,
    pub thermal: ThermalEnergy,
}

impl Default for ExtractionCharacteristics {
    /// The neutral baseline every target calculation starts from.
    fn default() -> Self {
        Self {
            clarity: 0.5,
            acidity: 0.5,
            sweetness: 0.5,
            body: 0.5,
            agitation: AgitationLevel::Medium,
            thermal: ThermalEnergy::Medium,
        }
    }
}

impl ExtractionCharacteristics {
    pub fn new(clarity: f64, acidity: f64, sweetness: f64, body: f64) -> Self {
        Self {
            clarity,
            acidity,
            sweetness,
            body,
            ..Default::default()
        }
    }

    /// Copy with the four flavor scalars clamped to [0, 1].
    pub fn clamped(&self) -> Self {
        Self {
            clarity: clamp_unit(self.clarity),
            acidity: clamp_unit(self.acidity),
            sweetness: clamp_unit(self.sweetness),
            body: clamp_unit(self.body),
            ..*self
        }
    }

    /// Expected bitterness: a cup tuned for clarity should taste less bitter.
    pub fn expected_bitterness(&self) -> f64 {
        1.0 - self.clarity
    }
}

/// Clamp to [0, 1]. NaN collapses to 0.
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_neutral_baseline() {
        let p = ExtractionCharacteristics::default();
        assert_eq!(p.clarity, 0.5);
        assert_eq!(p.acidity, 0.5);
        assert_eq!(p.sweetness, 0.5);
        assert_eq!(p.body, 0.5);
        assert_eq!(p.agitation, AgitationLevel::Medium);
        assert_eq!(p.thermal, ThermalEnergy::Medium);
    }

    #[test]
    fn clamped_bounds_all_scalars() {
        let p = ExtractionCharacteristics::new(1.4, -0.2, 0.7, f64::NAN).clamped();
        assert_eq!(p.clarity, 1.0);
        assert_eq!(p.acidity, 0.0);
        assert_eq!(p.sweetness, 0.7);
        assert_eq!(p.body, 0.0);
    }

    #[test]
    fn clamped_keeps_physical_parameters() {
        let mut p = ExtractionCharacteristics::new(2.0, 0.5, 0.5, 0.5);
        p.agitation = AgitationLevel::Low;
        p.thermal = ThermalEnergy::High;
        let c = p.clamped();
        assert_eq!(c.agitation, AgitationLevel::Low);
        assert_eq!(c.thermal, ThermalEnergy::High);
    }

    #[test]
    fn levels_are_ordered_by_value() {
        assert!(AgitationLevel::Low.value() < AgitationLevel::Medium.value());
        assert!(AgitationLevel::Medium.value() < AgitationLevel::High.value());
        assert!(ThermalEnergy::Low.value() < ThermalEnergy::High.value());
    }
}
