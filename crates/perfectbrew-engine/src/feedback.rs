//! Post-brew feedback and its normalised taste profile.
//!
//! Feedback arrives from the tasting form as 0-5 sliders, a body label and a
//! handful of optional multiple-choice answers. Every field is optional; an
//! unrated slider stays `None` all the way through gap analysis instead of
//! being read as "zero".

use std::fmt;

use perfectbrew_core::profile::clamp_unit;
use serde::{Deserialize, Serialize};

/// Primary taste defect reported by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Defect {
    #[default]
    #[serde(rename = "None (Balanced)")]
    None,
    #[serde(rename = "Sour/Tart")]
    SourTart,
    #[serde(rename = "Bitter/Dry")]
    BitterDry,
    #[serde(rename = "Weak/Watery")]
    WeakWatery,
    #[serde(rename = "Strong/Heavy")]
    StrongHeavy,
    Hollow,
}

impl Defect {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None (Balanced)",
            Self::SourTart => "Sour/Tart",
            Self::BitterDry => "Bitter/Dry",
            Self::WeakWatery => "Weak/Watery",
            Self::StrongHeavy => "Strong/Heavy",
            Self::Hollow => "Hollow",
        }
    }

    /// Parse a defect label, accepting the full label or its first word in
    /// any case ("sour", "Sour/Tart"). Unrecognised labels read as `None`.
    pub fn parse(label: &str) -> Self {
        let lowered = label.trim().to_lowercase();
        let first = lowered
            .split(|c: char| c == '/' || c == '(' || c.is_whitespace())
            .next()
            .unwrap_or("");

        match first {
            "sour" => Self::SourTart,
            "bitter" => Self::BitterDry,
            "weak" => Self::WeakWatery,
            "strong" => Self::StrongHeavy,
            "hollow" => Self::Hollow,
            _ => Self::None,
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowedRecipe {
    #[serde(alias = "yes")]
    Yes,
    #[serde(alias = "mostly")]
    Mostly,
    #[serde(alias = "no")]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrewTimeMatch {
    #[serde(rename = "As expected", alias = "as_expected")]
    AsExpected,
    #[serde(rename = "Too long", alias = "too_long")]
    TooLong,
    #[serde(rename = "Too short", alias = "too_short")]
    TooShort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowRate {
    #[serde(alias = "normal")]
    Normal,
    #[serde(rename = "Too fast", alias = "too_fast")]
    TooFast,
    #[serde(rename = "Too slow", alias = "too_slow")]
    TooSlow,
}

/// Raw tasting-form answers for one brew.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackRecord {
    /// Slider, 0-5.
    pub acidity_level: Option<f64>,
    /// Slider, 0-5.
    pub sweetness_level: Option<f64>,
    /// Slider, 0-5.
    pub bitterness_level: Option<f64>,
    /// "Light", "Medium", "Full" (Spanish labels accepted).
    pub body: Option<String>,
    /// Free-text defect label as shown on the form.
    pub defect: Option<String>,
    pub followed_recipe: Option<FollowedRecipe>,
    pub brew_time: Option<BrewTimeMatch>,
    pub flow_rate: Option<FlowRate>,
}

impl FeedbackRecord {
    /// The reported defect. Missing or unrecognised labels read as `None`.
    pub fn defect(&self) -> Defect {
        self.defect.as_deref().map(Defect::parse).unwrap_or_default()
    }
}

/// Feedback normalised to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActualTasteProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweetness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitterness: Option<f64>,
    pub body: f64,
}

impl ActualTasteProfile {
    pub fn from_feedback(feedback: &FeedbackRecord) -> Self {
        Self {
            acidity: feedback.acidity_level.map(slider_to_unit),
            sweetness: feedback.sweetness_level.map(slider_to_unit),
            bitterness: feedback.bitterness_level.map(slider_to_unit),
            body: body_to_value(feedback.body.as_deref()),
        }
    }
}

fn slider_to_unit(level: f64) -> f64 {
    clamp_unit(level / 5.0)
}

fn body_to_value(label: Option<&str>) -> f64 {
    match label.map(|b| b.trim().to_lowercase()).as_deref() {
        Some("light" | "ligero") => 0.25,
        Some("full" | "completo") => 0.75,
        _ => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sliders(acidity: f64, sweetness: f64, bitterness: f64) -> FeedbackRecord {
        FeedbackRecord {
            acidity_level: Some(acidity),
            sweetness_level: Some(sweetness),
            bitterness_level: Some(bitterness),
            ..Default::default()
        }
    }

    #[test]
    fn defect_parses_full_label_and_first_word() {
        assert_eq!(Defect::parse("Sour/Tart"), Defect::SourTart);
        assert_eq!(Defect::parse("sour"), Defect::SourTart);
        assert_eq!(Defect::parse("BITTER"), Defect::BitterDry);
        assert_eq!(Defect::parse("Weak/Watery"), Defect::WeakWatery);
        assert_eq!(Defect::parse("strong/heavy"), Defect::StrongHeavy);
        assert_eq!(Defect::parse(" Hollow "), Defect::Hollow);
        assert_eq!(Defect::parse("None (Balanced)"), Defect::None);
    }

    #[test]
    fn unknown_defect_reads_as_none() {
        assert_eq!(Defect::parse("Astringent"), Defect::None);
        assert_eq!(Defect::parse(""), Defect::None);
        let fb = FeedbackRecord {
            defect: Some("smoky".into()),
            ..Default::default()
        };
        assert_eq!(fb.defect(), Defect::None);
        assert_eq!(FeedbackRecord::default().defect(), Defect::None);
    }

    #[test]
    fn sliders_normalise_and_clamp() {
        let p = ActualTasteProfile::from_feedback(&sliders(5.0, 2.5, 7.0));
        assert_eq!(p.acidity, Some(1.0));
        assert_eq!(p.sweetness, Some(0.5));
        assert_eq!(p.bitterness, Some(1.0));

        let p = ActualTasteProfile::from_feedback(&sliders(-1.0, 0.0, 1.0));
        assert_eq!(p.acidity, Some(0.0));
        assert_eq!(p.sweetness, Some(0.0));
        assert_eq!(p.bitterness, Some(0.2));
    }

    #[test]
    fn unrated_sliders_stay_absent() {
        let fb = FeedbackRecord {
            bitterness_level: Some(4.0),
            ..Default::default()
        };
        let p = ActualTasteProfile::from_feedback(&fb);
        assert_eq!(p.acidity, None);
        assert_eq!(p.sweetness, None);
        assert_eq!(p.bitterness, Some(0.8));
    }

    #[test]
    fn body_labels_map_to_values() {
        let body = |label: Option<&str>| {
            let fb = FeedbackRecord {
                body: label.map(String::from),
                ..Default::default()
            };
            ActualTasteProfile::from_feedback(&fb).body
        };
        assert_eq!(body(Some("Light")), 0.25);
        assert_eq!(body(Some("ligero")), 0.25);
        assert_eq!(body(Some("Medium")), 0.5);
        assert_eq!(body(Some("medio")), 0.5);
        assert_eq!(body(Some("FULL")), 0.75);
        assert_eq!(body(Some("completo")), 0.75);
        assert_eq!(body(Some("soupy")), 0.5);
        assert_eq!(body(None), 0.5);
    }

    #[test]
    fn feedback_deserializes_from_form_json() {
        let json = r#"{
            "acidity_level": 1,
            "bitterness_level": 5,
            "body": "Full",
            "defect": "Bitter/Dry",
            "followed_recipe": "Mostly",
            "brew_time": "Too long",
            "flow_rate": "too_slow"
        }"#;
        let fb: FeedbackRecord = serde_json::from_str(json).unwrap();
        assert_eq!(fb.acidity_level, Some(1.0));
        assert_eq!(fb.sweetness_level, None);
        assert_eq!(fb.defect(), Defect::BitterDry);
        assert_eq!(fb.followed_recipe, Some(FollowedRecipe::Mostly));
        assert_eq!(fb.brew_time, Some(BrewTimeMatch::TooLong));
        assert_eq!(fb.flow_rate, Some(FlowRate::TooSlow));
    }
}
