//! Brew methods and their per-category impact rankings.
//!
//! Each method has a fixed priority order over the six adjustable
//! categories; rank 1 is the lever with the most influence on the cup for
//! that method (grind for a V60, steep time for a French press).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Brewing parameter category an adjustment acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentCategory {
    Grind,
    Temperature,
    Time,
    Ratio,
    Technique,
    Dose,
}

impl AdjustmentCategory {
    pub const ALL: [AdjustmentCategory; 6] = [
        Self::Grind,
        Self::Temperature,
        Self::Time,
        Self::Ratio,
        Self::Technique,
        Self::Dose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grind => "Grind",
            Self::Temperature => "Temperature",
            Self::Time => "Time",
            Self::Ratio => "Ratio",
            Self::Technique => "Technique",
            Self::Dose => "Dose",
        }
    }
}

impl fmt::Display for AdjustmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brew method family, resolved from a recipe's free-text method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrewMethod {
    V60,
    Chemex,
    AeroPress,
    FrenchPress,
    Espresso,
    Other,
}

use AdjustmentCategory::*;

/// Priority order per method, highest impact first.
const RANKINGS: &[(BrewMethod, &str, [AdjustmentCategory; 6])] = &[
    (
        BrewMethod::V60,
        "V60",
        [Grind, Technique, Temperature, Time, Ratio, Dose],
    ),
    (
        BrewMethod::Chemex,
        "Chemex",
        [Grind, Technique, Temperature, Time, Ratio, Dose],
    ),
    (
        BrewMethod::AeroPress,
        "AeroPress",
        [Grind, Time, Temperature, Technique, Ratio, Dose],
    ),
    (
        BrewMethod::FrenchPress,
        "French Press",
        [Time, Grind, Temperature, Technique, Ratio, Dose],
    ),
    (
        BrewMethod::Espresso,
        "Espresso",
        [Grind, Dose, Time, Temperature, Technique, Ratio],
    ),
];

const DEFAULT_ORDER: [AdjustmentCategory; 6] = [Grind, Time, Temperature, Technique, Ratio, Dose];

impl BrewMethod {
    pub const ALL: [BrewMethod; 6] = [
        Self::V60,
        Self::Chemex,
        Self::AeroPress,
        Self::FrenchPress,
        Self::Espresso,
        Self::Other,
    ];

    /// Resolve a method name such as "V60", "V60 Kasuya" or "aeropress
    /// inverted". Exact match first, then substring in table order.
    pub fn resolve(name: &str) -> Self {
        let lowered = name.trim().to_lowercase();
        if lowered.is_empty() {
            return Self::Other;
        }

        RANKINGS
            .iter()
            .find(|(_, key, _)| key.to_lowercase() == lowered)
            .or_else(|| {
                RANKINGS
                    .iter()
                    .find(|(_, key, _)| lowered.contains(&key.to_lowercase()))
            })
            .map(|(method, _, _)| *method)
            .unwrap_or(Self::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V60 => "V60",
            Self::Chemex => "Chemex",
            Self::AeroPress => "AeroPress",
            Self::FrenchPress => "French Press",
            Self::Espresso => "Espresso",
            Self::Other => "Other",
        }
    }

    pub fn is_pour_over(&self) -> bool {
        matches!(self, Self::V60 | Self::Chemex)
    }

    /// Category priority order, highest impact first.
    pub fn priority_order(&self) -> &'static [AdjustmentCategory; 6] {
        RANKINGS
            .iter()
            .find(|(method, _, _)| method == self)
            .map(|(_, _, order)| order)
            .unwrap_or(&DEFAULT_ORDER)
    }

    /// Impact rank of `category` for this method (1 = highest).
    pub fn rank(&self, category: AdjustmentCategory) -> u32 {
        self.priority_order()
            .iter()
            .position(|c| *c == category)
            .map(|i| i as u32 + 1)
            .unwrap_or(99)
    }
}

impl fmt::Display for BrewMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Impact percentage shown for a rank (rank 1 = 90%).
pub fn rank_to_impact_percent(rank: u32) -> u32 {
    match rank {
        1 => 90,
        2 => 75,
        3 => 60,
        4 => 50,
        5 => 40,
        6 => 35,
        _ => 30,
    }
}
