//! User taste preferences and target personalisation.

use perfectbrew_core::ExtractionCharacteristics;
use perfectbrew_core::profile::clamp_unit;
use serde::{Deserialize, Serialize};

/// Weight of the coffee's own profile when blending in a preference.
const COFFEE_SHARE: f64 = 0.7;
const PREFERENCE_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPreference {
    Light,
    #[default]
    Medium,
    Full,
}

impl BodyPreference {
    pub fn target_value(&self) -> f64 {
        match self {
            Self::Light => 0.3,
            Self::Medium => 0.5,
            Self::Full => 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyTexture {
    #[serde(rename = "Tea-like")]
    TeaLike,
    #[serde(rename = "Creamy/Syrupy")]
    CreamySyrupy,
}

impl BodyTexture {
    pub fn clarity_adjustment(&self) -> f64 {
        match self {
            Self::TeaLike => 0.3,
            Self::CreamySyrupy => -0.2,
        }
    }

    pub fn body_adjustment(&self) -> f64 {
        match self {
            Self::TeaLike => -0.2,
            Self::CreamySyrupy => 0.3,
        }
    }

    /// Clarity a drinker with this texture preference is aiming for.
    fn preferred_clarity(&self) -> f64 {
        match self {
            Self::TeaLike => 0.8,
            Self::CreamySyrupy => 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcidityPreference {
    #[default]
    #[serde(rename = "Bright/Juicy")]
    BrightJuicy,
    #[serde(rename = "Smooth/Low")]
    SmoothLow,
}

impl AcidityPreference {
    pub fn acidity_adjustment(&self) -> f64 {
        match self {
            Self::BrightJuicy => 0.25,
            Self::SmoothLow => -0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweetnessPreference {
    Sweet,
    #[default]
    Balanced,
    Bitter,
}

impl SweetnessPreference {
    pub fn sweetness_adjustment(&self) -> f64 {
        match self {
            Self::Sweet => 0.3,
            Self::Balanced => 0.0,
            Self::Bitter => -0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationType {
    #[default]
    General,
    #[serde(rename = "Method-specific")]
    MethodSpecific,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserTastePreferences {
    pub body_preference: BodyPreference,
    pub body_texture: Option<BodyTexture>,
    pub acidity_preference: AcidityPreference,
    pub sweetness_preference: SweetnessPreference,
    pub recommendation_type: RecommendationType,
    /// Brew method when recommendations are method-specific.
    pub selected_method: Option<String>,
}

impl UserTastePreferences {
    /// Blend the coffee's target with these preferences.
    ///
    /// Body, acidity and sweetness keep 70% of the coffee's value and take
    /// 30% from the preference. Texture shifts clarity and body on top.
    /// Agitation and thermal stay as the coffee dictates.
    pub fn adjust_target_profile(&self, base: &ExtractionCharacteristics) -> ExtractionCharacteristics {
        let mut adjusted = *base;

        adjusted.body = blend(base.body, self.body_preference.target_value());

        if let Some(texture) = self.body_texture {
            adjusted.clarity = clamp_unit(adjusted.clarity + texture.clarity_adjustment());
            adjusted.body = clamp_unit(adjusted.body + texture.body_adjustment());
        }

        let preferred_acidity = clamp_unit(base.acidity + self.acidity_preference.acidity_adjustment());
        adjusted.acidity = blend(base.acidity, preferred_acidity);

        let preferred_sweetness =
            clamp_unit(base.sweetness + self.sweetness_preference.sweetness_adjustment());
        adjusted.sweetness = blend(base.sweetness, preferred_sweetness);

        adjusted.clamped()
    }

    /// How well a profile suits these preferences, 0-100.
    ///
    /// Body, acidity and sweetness are worth 25 points each, scored by
    /// distance from the preferred level. Clarity is worth 25 when a texture
    /// preference is set, and a flat 12.5 otherwise.
    pub fn preference_alignment_score(&self, profile: &ExtractionCharacteristics) -> u32 {
        let axis = |actual: f64, preferred: f64| (1.0 - (actual - preferred).abs()) * 25.0;

        let mut score = axis(profile.body, self.body_preference.target_value());
        score += axis(profile.acidity, 0.5 + self.acidity_preference.acidity_adjustment());
        score += axis(profile.sweetness, 0.5 + self.sweetness_preference.sweetness_adjustment());
        score += match self.body_texture {
            Some(texture) => axis(profile.clarity, texture.preferred_clarity()),
            None => 12.5,
        };

        score.clamp(0.0, 100.0) as u32
    }
}

fn blend(coffee: f64, preferred: f64) -> f64 {
    coffee * COFFEE_SHARE + preferred * PREFERENCE_SHARE
}
