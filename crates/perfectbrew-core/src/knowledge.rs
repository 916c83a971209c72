//! Variety and process knowledge base.
//!
//! Variety profiles *bias* the extraction target (the coffee's "soul");
//! process profiles *modify* it additively and may tighten the agitation
//! constraint. The built-in tables cover the common cultivars and the four
//! standard processes. Custom tables can be loaded from JSON with the same
//! field names.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::profile::{AgitationLevel, ThermalEnergy};

/// Per-scalar bias or additive modifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionBias {
    pub clarity: f64,
    pub acidity: f64,
    pub sweetness: f64,
    pub body: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrewingParameters {
    pub agitation_tolerance: AgitationLevel,
    pub thermal_mass_need: ThermalEnergy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarietyProfile {
    pub variety: String,
    pub extraction_bias: ExtractionBias,
    pub brewing_parameters: BrewingParameters,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessProfile {
    pub process: String,
    pub extraction_modifier: ExtractionBias,
    pub brewing_parameters: BrewingParameters,
    #[serde(default)]
    pub description: String,
}

// ── Built-in tables ──

type Row = (
    &'static str,
    [f64; 4],
    AgitationLevel,
    ThermalEnergy,
    &'static str,
);

const VARIETIES: &[Row] = &[
    (
        "Geisha",
        [0.9, 0.8, 0.7, 0.3],
        AgitationLevel::Low,
        ThermalEnergy::High,
        "Jasmine and bergamot aromatics; fragile, rewards gentle high-temperature brewing",
    ),
    (
        "Bourbon",
        [0.5, 0.5, 0.8, 0.6],
        AgitationLevel::Medium,
        ThermalEnergy::Medium,
        "Caramel sweetness with a rounded body",
    ),
    (
        "Pink Bourbon",
        [0.7, 0.7, 0.8, 0.5],
        AgitationLevel::Low,
        ThermalEnergy::High,
        "Floral and fruity Bourbon mutation with high sweetness",
    ),
    (
        "Typica",
        [0.7, 0.6, 0.6, 0.5],
        AgitationLevel::Medium,
        ThermalEnergy::Medium,
        "Clean, sweet and balanced heirloom cultivar",
    ),
    (
        "Caturra",
        [0.6, 0.7, 0.5, 0.5],
        AgitationLevel::Medium,
        ThermalEnergy::Medium,
        "Bright acidity with a medium body",
    ),
    (
        "Catuai",
        [0.5, 0.5, 0.6, 0.6],
        AgitationLevel::Medium,
        ThermalEnergy::Medium,
        "Mild acidity, nutty sweetness",
    ),
    (
        "SL28",
        [0.7, 0.9, 0.6, 0.5],
        AgitationLevel::Medium,
        ThermalEnergy::High,
        "Blackcurrant and citrus acidity; dense, needs energy",
    ),
    (
        "SL34",
        [0.6, 0.8, 0.6, 0.6],
        AgitationLevel::Medium,
        ThermalEnergy::High,
        "Juicy acidity with more body than SL28",
    ),
    (
        "Pacamara",
        [0.6, 0.7, 0.6, 0.7],
        AgitationLevel::Low,
        ThermalEnergy::High,
        "Large bean, savory-fruity complexity; uneven grind, keep agitation low",
    ),
    (
        "Ethiopian Heirloom",
        [0.8, 0.8, 0.6, 0.4],
        AgitationLevel::Low,
        ThermalEnergy::High,
        "Floral and tea-like landraces",
    ),
    (
        "Castillo",
        [0.4, 0.5, 0.6, 0.6],
        AgitationLevel::High,
        ThermalEnergy::Medium,
        "Robust hybrid, forgiving to brew",
    ),
    (
        "Catimor",
        [0.3, 0.4, 0.5, 0.7],
        AgitationLevel::High,
        ThermalEnergy::Medium,
        "Heavy body, muted acidity",
    ),
];

const PROCESSES: &[Row] = &[
    (
        "Washed",
        [0.1, 0.1, -0.05, 0.0],
        AgitationLevel::High,
        ThermalEnergy::Medium,
        "Clean and transparent; tolerates higher agitation",
    ),
    (
        "Natural",
        [-0.15, -0.05, 0.2, 0.15],
        AgitationLevel::Low,
        ThermalEnergy::Medium,
        "Fruit-forward and heavy; fines clog the bed under agitation",
    ),
    (
        "Honey",
        [-0.05, 0.0, 0.15, 0.1],
        AgitationLevel::Medium,
        ThermalEnergy::Medium,
        "Sweet with a syrupy texture",
    ),
    (
        "Anaerobic",
        [-0.1, 0.05, 0.15, 0.15],
        AgitationLevel::Low,
        ThermalEnergy::Low,
        "Intense fermented fruit; extracts readily",
    ),
];

fn bias([clarity, acidity, sweetness, body]: [f64; 4]) -> ExtractionBias {
    ExtractionBias {
        clarity,
        acidity,
        sweetness,
        body,
    }
}

fn params(agitation: AgitationLevel, thermal: ThermalEnergy) -> BrewingParameters {
    BrewingParameters {
        agitation_tolerance: agitation,
        thermal_mass_need: thermal,
    }
}

/// Lookup tables for variety and process profiles.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    varieties: Vec<VarietyProfile>,
    processes: Vec<ProcessProfile>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// The built-in tables.
    pub fn builtin() -> Self {
        let varieties = VARIETIES
            .iter()
            .map(|&(name, b, agitation, thermal, desc)| VarietyProfile {
                variety: name.to_string(),
                extraction_bias: bias(b),
                brewing_parameters: params(agitation, thermal),
                description: desc.to_string(),
            })
            .collect();
        let processes = PROCESSES
            .iter()
            .map(|&(name, b, agitation, thermal, desc)| ProcessProfile {
                process: name.to_string(),
                extraction_modifier: bias(b),
                brewing_parameters: params(agitation, thermal),
                description: desc.to_string(),
            })
            .collect();
        Self {
            varieties,
            processes,
        }
    }

    pub fn new(varieties: Vec<VarietyProfile>, processes: Vec<ProcessProfile>) -> Self {
        Self {
            varieties,
            processes,
        }
    }

    /// Parse custom tables from JSON arrays of profiles.
    pub fn from_json(varieties_json: &str, processes_json: &str) -> Result<Self, CoreError> {
        let varieties: Vec<VarietyProfile> = serde_json::from_str(varieties_json)?;
        let processes: Vec<ProcessProfile> = serde_json::from_str(processes_json)?;
        debug!(
            varieties = varieties.len(),
            processes = processes.len(),
            "loaded knowledge base from json"
        );
        Ok(Self::new(varieties, processes))
    }

    /// Load `varieties.json` and `processes.json` from a directory.
    pub fn load_dir(dir: &Path) -> Result<Self, CoreError> {
        let varieties_path = dir.join("varieties.json");
        let processes_path = dir.join("processes.json");
        for path in [&varieties_path, &processes_path] {
            if !path.exists() {
                return Err(CoreError::KnowledgeBaseNotFound(path.clone()));
            }
        }
        let varieties = std::fs::read_to_string(&varieties_path)?;
        let processes = std::fs::read_to_string(&processes_path)?;
        Self::from_json(&varieties, &processes)
    }

    pub fn varieties(&self) -> &[VarietyProfile] {
        &self.varieties
    }

    pub fn processes(&self) -> &[ProcessProfile] {
        &self.processes
    }

    /// Find a variety profile by name.
    ///
    /// Exact (case-insensitive) match first, then a profile whose name is
    /// contained in the query ("Panama Geisha" → Geisha), then a profile
    /// whose name contains the query (only for queries of 3+ characters).
    pub fn variety(&self, query: &str) -> Option<&VarietyProfile> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        if let Some(p) = self
            .varieties
            .iter()
            .find(|p| p.variety.to_lowercase() == normalized)
        {
            return Some(p);
        }

        if let Some(p) = self
            .varieties
            .iter()
            .find(|p| normalized.contains(&p.variety.to_lowercase()))
        {
            return Some(p);
        }

        if normalized.chars().count() < 3 {
            return None;
        }
        self.varieties
            .iter()
            .find(|p| p.variety.to_lowercase().contains(&normalized))
    }

    /// Find a process profile by name: exact match, then contained name.
    pub fn process(&self, query: &str) -> Option<&ProcessProfile> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        self.processes
            .iter()
            .find(|p| p.process.to_lowercase() == normalized)
            .or_else(|| {
                self.processes
                    .iter()
                    .find(|p| normalized.contains(&p.process.to_lowercase()))
            })
    }
}
