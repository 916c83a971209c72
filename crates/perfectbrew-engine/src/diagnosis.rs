//! Diagnosis façade.
//!
//! feedback → actual profile → (target + gaps when the coffee is known) →
//! direction → generator → execution boosts → summary → legacy list →
//! per-dimension advice.

use perfectbrew_core::{
    AdjustmentCategory, BrewMethod, CoffeeDescriptor, DiagnosticConfig, ExtractionCharacteristics,
    KnowledgeBase,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adjust::{self, AdjustmentItem, GeneratorContext, UnifiedBrewAdjustment};
use crate::advice::{DimensionSpecificRecommendation, dimension_recommendations};
use crate::direction::{
    ExtractionAssessment, ExtractionDirection, apply_adherence, decide_direction,
    decide_direction_without_context,
};
use crate::feedback::{ActualTasteProfile, FeedbackRecord};
use crate::gap::analyze_gaps;
use crate::target::TargetCalculator;

/// Flat recommendation kept for older consumers of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrewRecommendation {
    /// 1 = highest.
    pub priority: u32,
    pub category: AdjustmentCategory,
    pub action: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_vs_actual: Option<String>,
    pub impact: String,
}

impl BrewRecommendation {
    fn from_adjustments(items: &[AdjustmentItem]) -> Vec<Self> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| Self {
                priority: i as u32 + 1,
                category: item.category,
                action: item.suggested_change.clone(),
                reason: item.explanation.clone(),
                expected_vs_actual: None,
                impact: format!("{}% impact on your brew", item.impact_percent),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewDiagnosticResult {
    pub assessment: ExtractionAssessment,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_profile: Option<ExtractionCharacteristics>,
    pub actual_profile: ActualTasteProfile,
    pub has_coffee_context: bool,
    pub unified: UnifiedBrewAdjustment,
    pub dimension_recommendations: Vec<DimensionSpecificRecommendation>,
    pub recommendations: Vec<BrewRecommendation>,
}

impl BrewDiagnosticResult {
    pub fn direction(&self) -> ExtractionDirection {
        self.unified.direction
    }

    pub fn top_recommendation(&self) -> Option<&BrewRecommendation> {
        self.recommendations.first()
    }
}

/// Runs diagnoses against a knowledge base and a set of house rules.
#[derive(Debug, Clone, Default)]
pub struct Diagnostician {
    pub knowledge: KnowledgeBase,
    pub config: DiagnosticConfig,
}

impl Diagnostician {
    pub fn new(knowledge: KnowledgeBase, config: DiagnosticConfig) -> Self {
        Self { knowledge, config }
    }

    /// Diagnose one brew. Never fails; with no coffee and no feedback the
    /// result is a low-confidence "balanced" verdict with no adjustments.
    pub fn diagnose(
        &self,
        coffee: Option<&CoffeeDescriptor>,
        method: &str,
        feedback: &FeedbackRecord,
    ) -> BrewDiagnosticResult {
        let actual = ActualTasteProfile::from_feedback(feedback);
        let brew_method = BrewMethod::resolve(method);
        let defect = feedback.defect();

        let expected = coffee.map(|c| TargetCalculator::new(&self.knowledge).compute(c));
        let gaps = expected
            .as_ref()
            .map(|e| analyze_gaps(e, &actual, &self.config.significance));

        let decision = match &gaps {
            Some(gaps) => decide_direction(gaps, defect, &self.config),
            None => decide_direction_without_context(&actual, defect, &self.config),
        };
        let decision = apply_adherence(decision, feedback.followed_recipe, &self.config.adherence);
        let direction = decision.direction;

        let ctx = GeneratorContext {
            roast: coffee.map(|c| c.roast_level),
            defect,
            gaps: gaps.as_deref(),
        };
        let mut adjustments = adjust::generate(direction, brew_method, &ctx);
        adjust::apply_execution_boosts(&mut adjustments, feedback, &self.config.execution);

        let summary = match coffee {
            Some(c) => summary_with_coffee(direction, &c.name),
            None => format!("Based on your feedback, try {}", direction.action_verb()),
        };

        let recommendations = BrewRecommendation::from_adjustments(&adjustments);
        let dimension_recommendations = dimension_recommendations(gaps.as_deref(), &actual, direction);

        info!(
            method = %brew_method,
            direction = %direction,
            confidence = decision.confidence,
            adjustments = adjustments.len(),
            has_coffee_context = coffee.is_some(),
            "diagnosed brew"
        );
        debug!(?gaps, "taste gaps");

        BrewDiagnosticResult {
            assessment: ExtractionAssessment::from_direction(direction, defect),
            confidence: decision.confidence,
            expected_profile: expected,
            actual_profile: actual,
            has_coffee_context: coffee.is_some(),
            unified: UnifiedBrewAdjustment {
                direction,
                confidence: decision.confidence,
                summary,
                adjustments,
            },
            dimension_recommendations,
            recommendations,
        }
    }
}

fn summary_with_coffee(direction: ExtractionDirection, name: &str) -> String {
    match direction {
        ExtractionDirection::Increase => {
            format!("Your {name} needs more extraction to bring out its full potential")
        }
        ExtractionDirection::Decrease => {
            format!("Your {name} is over-extracted. Dial back for a cleaner cup")
        }
        ExtractionDirection::AdjustStrength => {
            "Extraction looks good. Adjust your ratio for better strength".to_string()
        }
        ExtractionDirection::ImproveTechnique => {
            "Focus on even water distribution for more balanced extraction".to_string()
        }
        ExtractionDirection::Balanced => {
            "Your brew is well-balanced! Only minor tweaks suggested".to_string()
        }
    }
}
