//! Nutrient range table.
//!
//! Each nutrient has an ordered list of labeled buckets. A value `v` matches
//! bucket `{min, max}` when `v >= min` and, for a bounded bucket, `v <= max`.
//! The unbounded top bucket requires `v > min` instead, so its lower edge
//! belongs to the bucket below it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nutrients with a range facet and a `<name>_per_serving` basic test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Protein,
    Carbs,
    Fats,
    Creatine,
}

impl Nutrient {
    pub fn all() -> &'static [Nutrient] {
        &[
            Nutrient::Protein,
            Nutrient::Carbs,
            Nutrient::Fats,
            Nutrient::Creatine,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fats => "fats",
            Nutrient::Creatine => "creatine",
        }
    }

    /// Key of the matching entry in `basic_tests`.
    pub fn test_key(&self) -> &'static str {
        match self {
            Nutrient::Protein => "protein_per_serving",
            Nutrient::Carbs => "carbs_per_serving",
            Nutrient::Fats => "fats_per_serving",
            Nutrient::Creatine => "creatine_per_serving",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Nutrient::Protein => "Protein per Serving",
            Nutrient::Carbs => "Carbs per Serving",
            Nutrient::Fats => "Fats per Serving",
            Nutrient::Creatine => "Creatine per Serving",
        }
    }

    pub fn ranges(&self) -> &'static [NutrientRange] {
        match self {
            Nutrient::Protein => PROTEIN_RANGES,
            Nutrient::Carbs => CARBS_RANGES,
            Nutrient::Fats => FATS_RANGES,
            Nutrient::Creatine => CREATINE_RANGES,
        }
    }

    /// Find a bucket by its label.
    pub fn range(&self, label: &str) -> Option<&'static NutrientRange> {
        self.ranges().iter().find(|range| range.label == label)
    }

    /// Accepts `protein` or `protein_per_serving`, case-insensitively.
    pub fn parse(name: &str) -> Option<Nutrient> {
        let normalized = name.trim().to_lowercase();
        let base = normalized
            .strip_suffix("_per_serving")
            .unwrap_or(&normalized);
        Nutrient::all()
            .iter()
            .copied()
            .find(|nutrient| nutrient.as_str() == base)
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Nutrient {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nutrient::parse(s).ok_or_else(|| format!("unknown nutrient: {}", s))
    }
}

/// One labeled bucket. `max: None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientRange {
    pub label: &'static str,
    pub min: f64,
    pub max: Option<f64>,
}

impl NutrientRange {
    const fn bounded(label: &'static str, min: f64, max: f64) -> Self {
        Self {
            label,
            min,
            max: Some(max),
        }
    }

    const fn open(label: &'static str, min: f64) -> Self {
        Self {
            label,
            min,
            max: None,
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        value >= self.min
            && match self.max {
                Some(max) => value <= max,
                None => value > self.min,
            }
    }
}

static PROTEIN_RANGES: &[NutrientRange] = &[
    NutrientRange::bounded("< 20g", 0.0, 20.0),
    NutrientRange::bounded("20-22g", 20.0, 22.0),
    NutrientRange::bounded("22-25g", 22.0, 25.0),
    NutrientRange::open("> 25g", 25.0),
];

static CARBS_RANGES: &[NutrientRange] = &[
    NutrientRange::bounded("< 5g", 0.0, 5.0),
    NutrientRange::bounded("5-10g", 5.0, 10.0),
    NutrientRange::bounded("10-20g", 10.0, 20.0),
    NutrientRange::bounded("20-30g", 20.0, 30.0),
    NutrientRange::open("> 30g", 30.0),
];

static FATS_RANGES: &[NutrientRange] = &[
    NutrientRange::bounded("< 5g", 0.0, 5.0),
    NutrientRange::bounded("5-10g", 5.0, 10.0),
    NutrientRange::bounded("10-15g", 10.0, 15.0),
    NutrientRange::open("> 15g", 15.0),
];

static CREATINE_RANGES: &[NutrientRange] = &[
    NutrientRange::bounded("< 3g", 0.0, 3.0),
    NutrientRange::bounded("3-4g", 3.0, 4.0),
    NutrientRange::bounded("4-5g", 4.0, 5.0),
    NutrientRange::open("> 5g", 5.0),
];

/// True when `value` falls in at least one of the selected buckets.
///
/// An empty selection accepts every value. Labels that are not buckets of
/// `nutrient` never match.
pub fn matches_nutrient_range(value: f64, selected: &[String], nutrient: Nutrient) -> bool {
    if selected.is_empty() {
        return true;
    }

    selected.iter().any(|label| {
        nutrient
            .range(label)
            .is_some_and(|range| range.matches(value))
    })
}
