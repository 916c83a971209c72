//! Extraction target calculation.
//!
//! Layers rules on top of a neutral baseline: variety sets the goal,
//! process shifts it, roast and altitude set the thermal budget, and flavor
//! tags fine-tune. The result is always clamped and never fails; an unknown
//! variety or process simply skips its step.

use perfectbrew_core::{
    CoffeeDescriptor, ExtractionCharacteristics, FlavorGroup, KnowledgeBase, ProcessProfile,
    RoastLevel, ThermalEnergy, VarietyProfile,
};
use tracing::debug;

use crate::preferences::UserTastePreferences;

const HIGH_ALTITUDE_M: u32 = 1700;
const LOW_ALTITUDE_M: u32 = 1000;

pub struct TargetCalculator<'a> {
    knowledge: &'a KnowledgeBase,
}

impl<'a> TargetCalculator<'a> {
    pub fn new(knowledge: &'a KnowledgeBase) -> Self {
        Self { knowledge }
    }

    /// Ideal extraction profile for `coffee`.
    pub fn compute(&self, coffee: &CoffeeDescriptor) -> ExtractionCharacteristics {
        let mut target = ExtractionCharacteristics::default();

        if let Some(variety) = self.knowledge.variety(&coffee.variety) {
            debug!(variety = %variety.variety, "applying variety profile");
            apply_variety(variety, &mut target);
        }

        if let Some(process) = self.knowledge.process(coffee.process.as_str()) {
            debug!(process = %process.process, "applying process profile");
            apply_process(process, &mut target);
        }

        apply_roast(coffee.roast_level, &mut target);
        apply_altitude(coffee.altitude_meters(), &mut target);

        for tag in &coffee.flavor_tags {
            apply_flavor_group(tag.group(), &mut target);
        }

        target.clamped()
    }

    /// Target profile blended with the user's taste preferences.
    pub fn compute_personalized(
        &self,
        coffee: &CoffeeDescriptor,
        preferences: &UserTastePreferences,
    ) -> ExtractionCharacteristics {
        preferences.adjust_target_profile(&self.compute(coffee))
    }
}

// ── Rule applicators ──

/// Pull each scalar halfway toward the variety's bias. The variety's
/// physical tolerances are taken as-is.
fn apply_variety(profile: &VarietyProfile, target: &mut ExtractionCharacteristics) {
    let bias = &profile.extraction_bias;
    target.clarity = (target.clarity + bias.clarity) / 2.0;
    target.acidity = (target.acidity + bias.acidity) / 2.0;
    target.sweetness = (target.sweetness + bias.sweetness) / 2.0;
    target.body = (target.body + bias.body) / 2.0;

    target.agitation = profile.brewing_parameters.agitation_tolerance;
    target.thermal = profile.brewing_parameters.thermal_mass_need;
}

/// Shift additively; agitation only ever gets more conservative.
fn apply_process(profile: &ProcessProfile, target: &mut ExtractionCharacteristics) {
    let m = &profile.extraction_modifier;
    target.clarity += m.clarity;
    target.acidity += m.acidity;
    target.sweetness += m.sweetness;
    target.body += m.body;

    let tolerance = profile.brewing_parameters.agitation_tolerance;
    if tolerance.value() < target.agitation.value() {
        target.agitation = tolerance;
    }
}

fn apply_roast(roast: RoastLevel, target: &mut ExtractionCharacteristics) {
    match roast {
        RoastLevel::Light => {
            target.thermal = ThermalEnergy::High;
            target.acidity += 0.1;
        }
        RoastLevel::Medium => {
            target.sweetness += 0.1;
        }
        RoastLevel::Dark => {
            target.thermal = ThermalEnergy::Low;
            target.body += 0.2;
            target.clarity -= 0.1;
        }
    }
}

fn apply_altitude(altitude: Option<u32>, target: &mut ExtractionCharacteristics) {
    match altitude {
        Some(m) if m > HIGH_ALTITUDE_M => {
            debug!(altitude_m = m, "dense high-grown bean");
            target.thermal = ThermalEnergy::High;
            target.acidity += 0.1;
        }
        Some(m) if m > 0 && m < LOW_ALTITUDE_M => {
            if target.thermal == ThermalEnergy::High {
                target.thermal = ThermalEnergy::Medium;
            }
        }
        _ => {}
    }
}

fn apply_flavor_group(group: FlavorGroup, target: &mut ExtractionCharacteristics) {
    match group {
        FlavorGroup::FruityAcidic => {
            target.acidity += 0.05;
            target.clarity += 0.05;
        }
        FlavorGroup::FloralDelicate => {
            target.clarity += 0.1;
            target.body -= 0.05;
        }
        FlavorGroup::SweetRich => {
            target.sweetness += 0.05;
            target.body += 0.05;
        }
        FlavorGroup::Fermented => {
            target.body += 0.05;
            target.sweetness += 0.05;
            target.acidity += 0.05;
        }
        FlavorGroup::BoldHeavy => {
            target.body += 0.05;
            target.acidity -= 0.05;
        }
        FlavorGroup::Neutral => {}
        FlavorGroup::Heavy => {
            target.body += 0.1;
        }
        FlavorGroup::Clarity => {
            target.clarity += 0.1;
            target.acidity += 0.05;
        }
    }
}
