pub mod adjust;
pub mod advice;
pub mod diagnosis;
pub mod direction;
pub mod feedback;
pub mod gap;
pub mod matching;
pub mod preferences;
pub mod target;

pub use adjust::{AdjustmentItem, UnifiedBrewAdjustment};
pub use advice::DimensionSpecificRecommendation;
pub use diagnosis::{BrewDiagnosticResult, BrewRecommendation, Diagnostician};
pub use direction::{DirectionDecision, ExtractionAssessment, ExtractionDirection};
pub use feedback::{ActualTasteProfile, BrewTimeMatch, Defect, FeedbackRecord, FlowRate, FollowedRecipe};
pub use gap::{GapSignificance, TasteDimension, TasteGap, analyze_gaps, value_to_comparative_label};
pub use matching::{Recipe, RecipeMatch, RecipeProfile, recommend_recipes};
pub use preferences::UserTastePreferences;
pub use target::TargetCalculator;
