pub mod coffee;
pub mod config;
mod error;
pub mod knowledge;
pub mod method;
pub mod profile;

pub use coffee::{CoffeeDescriptor, FlavorGroup, FlavorTag, Process, RoastLevel};
pub use config::DiagnosticConfig;
pub use error::CoreError;
pub use knowledge::{KnowledgeBase, ProcessProfile, VarietyProfile};
pub use method::{AdjustmentCategory, BrewMethod, rank_to_impact_percent};
pub use profile::{AgitationLevel, ExtractionCharacteristics, ThermalEnergy};
