//! Direction-aligned adjustment generators.
//!
//! One generator per [`ExtractionDirection`]. Ranks come from the brew
//! method's impact table, so the first item is always the lever that moves
//! the cup most for that method.

use perfectbrew_core::config::ExecutionBoost;
use perfectbrew_core::{AdjustmentCategory, BrewMethod, RoastLevel, rank_to_impact_percent};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::direction::ExtractionDirection;
use crate::feedback::{BrewTimeMatch, Defect, FeedbackRecord, FlowRate};
use crate::gap::{TasteDimension, TasteGap};

/// One concrete change to make on the next brew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentItem {
    /// 1 = highest impact for this method.
    pub rank: u32,
    pub category: AdjustmentCategory,
    /// "Grind Size", "Water Temperature".
    pub parameter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,
    pub suggested_change: String,
    pub impact_percent: u32,
    pub explanation: String,
}

impl AdjustmentItem {
    fn ranked(
        rank: u32,
        category: AdjustmentCategory,
        parameter: &str,
        suggested_change: &str,
        explanation: &str,
    ) -> Self {
        Self::with_impact(
            rank,
            category,
            parameter,
            suggested_change,
            rank_to_impact_percent(rank),
            explanation,
        )
    }

    fn with_impact(
        rank: u32,
        category: AdjustmentCategory,
        parameter: &str,
        suggested_change: &str,
        impact_percent: u32,
        explanation: &str,
    ) -> Self {
        Self {
            rank,
            category,
            parameter: parameter.to_string(),
            current_value: None,
            suggested_change: suggested_change.to_string(),
            impact_percent,
            explanation: explanation.to_string(),
        }
    }
}

/// All adjustments for a brew, aligned to a single direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedBrewAdjustment {
    pub direction: ExtractionDirection,
    pub confidence: f64,
    pub summary: String,
    /// Ascending by rank.
    pub adjustments: Vec<AdjustmentItem>,
}

impl UnifiedBrewAdjustment {
    pub fn primary(&self) -> Option<&AdjustmentItem> {
        self.adjustments.first()
    }

    pub fn secondary(&self) -> &[AdjustmentItem] {
        self.adjustments.get(1..).unwrap_or(&[])
    }
}

/// What the generators know about the brew beyond the method.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorContext<'a> {
    /// Roast level when the coffee is known.
    pub roast: Option<RoastLevel>,
    pub defect: Defect,
    /// Taste gaps when the coffee is known.
    pub gaps: Option<&'a [TasteGap]>,
}

/// Build the adjustment list for `direction`, sorted ascending by rank.
pub fn generate(
    direction: ExtractionDirection,
    method: BrewMethod,
    ctx: &GeneratorContext<'_>,
) -> Vec<AdjustmentItem> {
    let mut items = match direction {
        ExtractionDirection::Increase => increase_extraction(method, ctx.roast),
        ExtractionDirection::Decrease => decrease_extraction(method, ctx.roast),
        ExtractionDirection::AdjustStrength => adjust_strength(method, ctx.defect),
        ExtractionDirection::ImproveTechnique => improve_technique(method),
        ExtractionDirection::Balanced => ctx.gaps.map(|g| fine_tune(method, g)).unwrap_or_default(),
    };
    items.sort_by_key(|item| item.rank);
    items
}

// ── Generators ──

pub fn increase_extraction(method: BrewMethod, roast: Option<RoastLevel>) -> Vec<AdjustmentItem> {
    use AdjustmentCategory::*;

    let temperature = if roast == Some(RoastLevel::Light) {
        "Increase to 96-98°C"
    } else {
        "Increase by 2-3°C"
    };
    let time = match method {
        BrewMethod::AeroPress => "Steep 30 seconds longer",
        BrewMethod::FrenchPress => "Steep 1-2 minutes longer",
        _ => "Extend total brew time",
    };

    let mut items = vec![
        AdjustmentItem::ranked(
            method.rank(Grind),
            Grind,
            "Grind Size",
            "Grind 2 clicks finer",
            "Finer grind increases surface area, allowing more extraction",
        ),
        AdjustmentItem::ranked(
            method.rank(Temperature),
            Temperature,
            "Water Temperature",
            temperature,
            "Hotter water extracts compounds faster and more completely",
        ),
        AdjustmentItem::ranked(
            method.rank(Time),
            Time,
            "Brew Time",
            time,
            "More time allows more flavor compounds to dissolve",
        ),
    ];

    if method.is_pour_over() {
        items.push(AdjustmentItem::ranked(
            method.rank(Technique),
            Technique,
            "Pour Technique",
            "Pour slower and more deliberately",
            "Slower pours increase contact time with the coffee bed",
        ));
    }
    items
}

pub fn decrease_extraction(method: BrewMethod, roast: Option<RoastLevel>) -> Vec<AdjustmentItem> {
    use AdjustmentCategory::*;

    let temperature = if roast == Some(RoastLevel::Dark) {
        "Lower to 88-90°C"
    } else {
        "Lower by 3-4°C"
    };
    let time = match method {
        BrewMethod::AeroPress => "Reduce steep time by 30 seconds",
        BrewMethod::FrenchPress => "Steep 1 minute less",
        _ => "Reduce total brew time",
    };

    let mut items = vec![
        AdjustmentItem::ranked(
            method.rank(Grind),
            Grind,
            "Grind Size",
            "Grind 2 clicks coarser",
            "Coarser grind reduces surface area, preventing over-extraction",
        ),
        AdjustmentItem::ranked(
            method.rank(Temperature),
            Temperature,
            "Water Temperature",
            temperature,
            "Cooler water extracts more gently, avoiding bitter compounds",
        ),
        AdjustmentItem::ranked(
            method.rank(Time),
            Time,
            "Brew Time",
            time,
            "Less time stops extraction before bitter compounds release",
        ),
    ];

    if method.is_pour_over() {
        items.push(AdjustmentItem::ranked(
            method.rank(Technique),
            Technique,
            "Pour Technique",
            "Pour faster with less agitation",
            "Faster pours reduce contact time and extraction",
        ));
    }
    items
}

/// Dose and ratio changes. The dose item always takes the better of the two
/// ranks, while each item's impact follows its own category's rank.
pub fn adjust_strength(method: BrewMethod, defect: Defect) -> Vec<AdjustmentItem> {
    let dose_rank = method.rank(AdjustmentCategory::Dose);
    let ratio_rank = method.rank(AdjustmentCategory::Ratio);

    let (dose_change, ratio_change) = match defect {
        Defect::WeakWatery => ("Add 1-2 grams of coffee", "Tighten the ratio toward 1:15"),
        Defect::StrongHeavy => ("Use 1-2 grams less coffee", "Open the ratio toward 1:17"),
        _ => (
            "Adjust dose by 1-2 grams",
            "Try 1:15 for stronger, 1:17 for lighter",
        ),
    };

    vec![
        AdjustmentItem::with_impact(
            dose_rank.min(ratio_rank),
            AdjustmentCategory::Dose,
            "Coffee Dose",
            dose_change,
            rank_to_impact_percent(dose_rank),
            "More coffee makes a stronger cup, less makes a lighter one",
        ),
        AdjustmentItem::with_impact(
            dose_rank.max(ratio_rank),
            AdjustmentCategory::Ratio,
            "Brew Ratio",
            ratio_change,
            rank_to_impact_percent(ratio_rank),
            "Ratio controls final cup strength without changing extraction",
        ),
    ]
}

pub fn improve_technique(method: BrewMethod) -> Vec<AdjustmentItem> {
    let rank = method.rank(AdjustmentCategory::Technique);
    let tip = |rank, parameter, change, impact, why| {
        AdjustmentItem::with_impact(rank, AdjustmentCategory::Technique, parameter, change, impact, why)
    };

    match method {
        BrewMethod::V60 | BrewMethod::Chemex => vec![
            tip(
                rank,
                "Distribution",
                "Swirl during bloom for even saturation",
                80,
                "Even saturation prevents channeling and hollow cups",
            ),
            tip(
                rank + 1,
                "Pour Pattern",
                "Pour in concentric circles, center to edge",
                70,
                "Consistent pattern ensures all grounds extract equally",
            ),
        ],
        BrewMethod::AeroPress => vec![tip(
            rank,
            "Stirring",
            "Stir more thoroughly after adding water",
            75,
            "Even saturation prevents dry pockets and channeling",
        )],
        BrewMethod::FrenchPress => vec![tip(
            rank,
            "Initial Stir",
            "Break crust and stir at 4 minutes",
            70,
            "Breaking crust ensures all grounds participate in extraction",
        )],
        BrewMethod::Espresso => vec![tip(
            rank,
            "Puck Prep",
            "Distribute grounds evenly and tamp level",
            80,
            "A level, even puck stops water from finding a shortcut",
        )],
        BrewMethod::Other => vec![tip(
            rank,
            "Saturation",
            "Pre-wet all grounds evenly before the main pour",
            70,
            "Dry pockets extract less and leave the cup hollow",
        )],
    }
}

/// Minor tweak for an otherwise balanced cup: address the most significant
/// gap (first in dimension order on ties), and only when it is
/// over-bitterness or under-acidity.
pub fn fine_tune(method: BrewMethod, gaps: &[TasteGap]) -> Vec<AdjustmentItem> {
    let mut largest: Option<&TasteGap> = None;
    for gap in gaps.iter().filter(|g| g.is_significant()) {
        if largest.is_none_or(|l| gap.significance.weight() > l.significance.weight()) {
            largest = Some(gap);
        }
    }
    let Some(gap) = largest else {
        return Vec::new();
    };

    let rank = method.rank(AdjustmentCategory::Grind);
    let item = |change, why| {
        AdjustmentItem::with_impact(rank, AdjustmentCategory::Grind, "Grind Size", change, 50, why)
    };

    match gap.dimension {
        TasteDimension::Bitterness if gap.is_over() => vec![item(
            "Grind 1 click coarser for less bitterness",
            "Small adjustment to reduce slight over-extraction",
        )],
        TasteDimension::Acidity if gap.is_under() => vec![item(
            "Grind 1 click finer for more brightness",
            "Small adjustment to increase slight under-extraction",
        )],
        _ => Vec::new(),
    }
}

// ── Execution boosts ──

/// Promote the categories implicated by brew-time and flow-rate feedback.
///
/// A boosted item moves up one rank (never above 1) and gains impact
/// (capped at 100). Each item is boosted at most once, and the list is
/// re-sorted by rank afterwards.
pub fn apply_execution_boosts(
    items: &mut [AdjustmentItem],
    feedback: &FeedbackRecord,
    boost: &ExecutionBoost,
) {
    let mut boosted: Vec<AdjustmentCategory> = Vec::new();
    if matches!(
        feedback.brew_time,
        Some(BrewTimeMatch::TooLong | BrewTimeMatch::TooShort)
    ) {
        boosted.extend([AdjustmentCategory::Time, AdjustmentCategory::Grind]);
    }
    if matches!(feedback.flow_rate, Some(FlowRate::TooFast | FlowRate::TooSlow)) {
        boosted.extend([AdjustmentCategory::Grind, AdjustmentCategory::Technique]);
    }
    if boosted.is_empty() {
        return;
    }

    for item in items.iter_mut().filter(|i| boosted.contains(&i.category)) {
        item.rank = item.rank.saturating_sub(1).max(1);
        item.impact_percent = (item.impact_percent + boost.impact_bonus).min(100);
    }
    items.sort_by_key(|item| item.rank);
    debug!(categories = ?boosted, "applied execution boosts");
}
