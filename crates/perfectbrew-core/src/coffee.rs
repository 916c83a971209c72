//! Coffee bean descriptors as entered by the user.
//!
//! A [`CoffeeDescriptor`] carries the metadata the target calculator reads:
//! variety, process, roast level, altitude and flavor tags. Everything else
//! (name, roaster, origin) is display context or used by recipe matching.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoastLevel {
    Light,
    #[default]
    Medium,
    Dark,
}

impl RoastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Dark => "Dark",
        }
    }
}

impl fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post-harvest processing method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Process {
    #[default]
    Washed,
    Natural,
    Honey,
    Anaerobic,
    Other,
}

impl Process {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Washed => "Washed",
            Self::Natural => "Natural",
            Self::Honey => "Honey",
            Self::Anaerobic => "Anaerobic",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic bucket a flavor tag falls into. Each bucket nudges the
/// extraction target in one fixed way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlavorGroup {
    FruityAcidic,
    FloralDelicate,
    SweetRich,
    Fermented,
    BoldHeavy,
    /// Tags that describe balance rather than a flavor direction.
    Neutral,
    Heavy,
    Clarity,
}

macro_rules! flavor_tags {
    ($($variant:ident => $label:literal, $group:ident;)*) => {
        /// Flavor descriptor from the bag label or a recipe profile.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum FlavorTag {
            $(
                #[serde(rename = $label)]
                $variant,
            )*
        }

        impl FlavorTag {
            pub const ALL: &'static [FlavorTag] = &[$(FlavorTag::$variant),*];

            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                }
            }

            pub fn group(&self) -> FlavorGroup {
                match self {
                    $(Self::$variant => FlavorGroup::$group,)*
                }
            }

            /// Case-insensitive lookup by display label.
            pub fn from_label(label: &str) -> Option<Self> {
                let label = label.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|tag| tag.label().eq_ignore_ascii_case(label))
            }
        }
    };
}

flavor_tags! {
    Fruity => "Fruity", FruityAcidic;
    Floral => "Floral", FloralDelicate;
    Nutty => "Nutty", SweetRich;
    Chocolate => "Chocolate", SweetRich;
    Sweet => "Sweet", SweetRich;
    Citrus => "Citrus", FruityAcidic;
    Acidity => "Acidity", FruityAcidic;
    Berry => "Berry", FruityAcidic;
    Spicy => "Spicy", BoldHeavy;
    Savory => "Savory", BoldHeavy;
    Tea => "Tea-like", FloralDelicate;
    Caramel => "Caramel", SweetRich;
    StoneFruit => "Stone Fruit", FruityAcidic;
    Tropical => "Tropical", FruityAcidic;
    Fermented => "Fermented", Fermented;
    Vanilla => "Vanilla", SweetRich;
    Earthy => "Earthy", BoldHeavy;
    Roasted => "Roasted", SweetRich;
    Herbaceous => "Herbaceous", FloralDelicate;
    Complex => "Complex", Fermented;
    Silky => "Silky", Neutral;
    Clean => "Clean", FloralDelicate;
    Rich => "Rich", SweetRich;
    Bright => "Bright", FruityAcidic;
    Balanced => "Balanced", Neutral;
    Strong => "Strong", BoldHeavy;
    EspressoLike => "Espresso-like", BoldHeavy;
    Elegant => "Elegant", FloralDelicate;
    Intense => "Intense", BoldHeavy;
    Smooth => "Smooth", Neutral;
    LowAcidity => "Low Acidity", Neutral;
    Nuanced => "Nuanced", Neutral;
    Delicate => "Delicate", FloralDelicate;
    Aromatic => "Aromatic", Neutral;
    Vibrant => "Vibrant", FruityAcidic;
    Bold => "Bold", BoldHeavy;
    Creamy => "Creamy", SweetRich;
    Crisp => "Crisp", FruityAcidic;
    FullBodied => "Full-bodied", BoldHeavy;
    LightBodied => "Light-bodied", FloralDelicate;
    Mellow => "Mellow", Neutral;
    Punchy => "Punchy", BoldHeavy;
    Refined => "Refined", Neutral;
    Structured => "Structured", Neutral;
    Syrupy => "Syrupy", SweetRich;
    Winey => "Winey", Fermented;
    Juicy => "Juicy", FruityAcidic;
    ClarityFocused => "Clarity-focused", FloralDelicate;
    Thick => "Thick", Heavy;
    Reliable => "Reliable", Neutral;
    Round => "Round", Neutral;
    Classic => "Classic", Neutral;
    Layered => "Layered", Heavy;
    Clarified => "Clarified", Clarity;
    Deep => "Deep", Heavy;
    HighAcidity => "High Acidity", Clarity;
    Consistent => "Consistent", Neutral;
    Artisan => "Artisan", Neutral;
    Sustainable => "Sustainable", Neutral;
}

impl fmt::Display for FlavorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A bag of coffee as described by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoffeeDescriptor {
    pub name: String,
    pub roaster: String,
    pub country: String,
    pub region: String,
    pub variety: String,
    /// Free text as printed on the bag, e.g. "1800 masl" or "1500-1800m".
    pub altitude: String,
    pub roast_level: RoastLevel,
    pub process: Process,
    pub flavor_tags: Vec<FlavorTag>,
    pub roast_date: Option<NaiveDate>,
    pub notes: String,
}

impl CoffeeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_variety(mut self, variety: impl Into<String>) -> Self {
        self.variety = variety.into();
        self
    }

    pub fn with_process(mut self, process: Process) -> Self {
        self.process = process;
        self
    }

    pub fn with_roast(mut self, roast_level: RoastLevel) -> Self {
        self.roast_level = roast_level;
        self
    }

    pub fn with_altitude(mut self, altitude: impl Into<String>) -> Self {
        self.altitude = altitude.into();
        self
    }

    pub fn with_tags(mut self, tags: &[FlavorTag]) -> Self {
        self.flavor_tags = tags.to_vec();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Growing altitude in metres, parsed from the free-text field.
    ///
    /// Thousands separators are ignored ("1,800" and "1.800" both read as
    /// 1800). A range like "1500-1800m" yields its midpoint. Returns `None`
    /// when the text contains no digits.
    pub fn altitude_meters(&self) -> Option<u32> {
        parse_altitude(&self.altitude)
    }

    /// Days between the roast date and `today`, if a roast date is known.
    pub fn days_since_roast(&self, today: NaiveDate) -> Option<i64> {
        self.roast_date.map(|d| (today - d).num_days())
    }
}

fn parse_altitude(text: &str) -> Option<u32> {
    let cleaned: String = text.chars().filter(|c| *c != ',' && *c != '.').collect();

    let runs: Vec<u32> = cleaned
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .take(2)
        .filter_map(|s| s.parse().ok())
        .collect();

    match runs.as_slice() {
        [] => None,
        [single] => Some(*single),
        // Midpoint without overflow.
        [low, high, ..] => Some(low / 2 + high / 2 + (low % 2 + high % 2) / 2),
    }
}
