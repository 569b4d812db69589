//! Sparse filter state and the active-filter counter.
//!
//! A missing key or an empty list means "no constraint from this facet".
//! A present range is always enforced; callers drop ranges equal to their
//! defaults before filtering (see `FilterSelections::to_filter_state`).

use crate::core::{AggregateVerdict, Verdict};
use crate::facets::nutrients::Nutrient;
use crate::facets::resolver::{SubjectiveAspect, TestSection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Inclusive numeric interval, written `[min, max]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const UNBOUNDED: PriceRange = PriceRange::new(0.0, f64::MAX);

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<(f64, f64)> for PriceRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<PriceRange> for (f64, f64) {
    fn from(range: PriceRange) -> Self {
        (range.min, range.max)
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Parses `MIN..MAX`; either side may be omitted (`..500`, `100..`) and is
/// then taken from `PriceRange::UNBOUNDED`.
impl std::str::FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once("..")
            .ok_or_else(|| format!("expected MIN..MAX, got '{}'", s))?;
        let parse_bound = |text: &str, fallback: f64| -> Result<f64, String> {
            let text = text.trim();
            if text.is_empty() {
                Ok(fallback)
            } else {
                text.parse::<f64>()
                    .map_err(|_| format!("invalid bound '{}' in '{}'", text, s))
            }
        };
        let range = PriceRange::new(
            parse_bound(min, PriceRange::UNBOUNDED.min)?,
            parse_bound(max, PriceRange::UNBOUNDED.max)?,
        );
        if range.min > range.max {
            return Err(format!("range minimum exceeds maximum in '{}'", s));
        }
        Ok(range)
    }
}

/// Full-span ranges that count as "no filter".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeDefaults {
    pub price: PriceRange,
    pub price_per_serving: PriceRange,
}

impl Default for RangeDefaults {
    fn default() -> Self {
        Self {
            price: PriceRange::new(0.0, 10000.0),
            price_per_serving: PriceRange::new(0.0, 1000.0),
        }
    }
}

/// Sparse record of the active facet predicates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verdict: Vec<Verdict>,
    /// Selected bucket labels per nutrient.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub nutrients: BTreeMap<Nutrient, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_serving: Option<PriceRange>,
    /// Keyed by contaminant facet key (`heavy_metals`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub contaminants: BTreeMap<String, Vec<Verdict>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub subjective: BTreeMap<SubjectiveAspect, Vec<Verdict>>,
    /// Food-filter aggregates.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sections: BTreeMap<TestSection, Vec<AggregateVerdict>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verdicts(mut self, verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        self.verdict.extend(verdicts);
        self
    }

    pub fn with_nutrient_ranges<I, S>(mut self, nutrient: Nutrient, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nutrients
            .entry(nutrient)
            .or_default()
            .extend(labels.into_iter().map(Into::into));
        self
    }

    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    pub fn with_price_per_serving(mut self, range: PriceRange) -> Self {
        self.price_per_serving = Some(range);
        self
    }

    pub fn with_contaminant(
        mut self,
        key: impl Into<String>,
        verdicts: impl IntoIterator<Item = Verdict>,
    ) -> Self {
        self.contaminants
            .entry(key.into())
            .or_default()
            .extend(verdicts);
        self
    }

    pub fn with_subjective(
        mut self,
        aspect: SubjectiveAspect,
        verdicts: impl IntoIterator<Item = Verdict>,
    ) -> Self {
        self.subjective.entry(aspect).or_default().extend(verdicts);
        self
    }

    pub fn with_section(
        mut self,
        section: TestSection,
        verdicts: impl IntoIterator<Item = AggregateVerdict>,
    ) -> Self {
        self.sections.entry(section).or_default().extend(verdicts);
        self
    }

    /// Drop empty lists and ranges equal to their defaults.
    pub fn without_defaults(mut self, defaults: &RangeDefaults) -> Self {
        self.nutrients.retain(|_, labels| !labels.is_empty());
        self.contaminants.retain(|_, verdicts| !verdicts.is_empty());
        self.subjective.retain(|_, verdicts| !verdicts.is_empty());
        self.sections.retain(|_, verdicts| !verdicts.is_empty());
        if self.price == Some(defaults.price) {
            self.price = None;
        }
        if self.price_per_serving == Some(defaults.price_per_serving) {
            self.price_per_serving = None;
        }
        self
    }

    /// True when no facet constrains the product list.
    pub fn is_empty(&self) -> bool {
        self.verdict.is_empty()
            && self.nutrients.values().all(Vec::is_empty)
            && self.price.is_none()
            && self.price_per_serving.is_none()
            && self.contaminants.values().all(Vec::is_empty)
            && self.subjective.values().all(Vec::is_empty)
            && self.sections.values().all(Vec::is_empty)
    }
}

/// Count facet slots in a non-default state, for the sidebar badge.
pub fn count_active_filters(filters: &FilterState, defaults: &RangeDefaults) -> usize {
    fn non_empty<K, V>(map: &BTreeMap<K, Vec<V>>) -> usize {
        map.values().filter(|values| !values.is_empty()).count()
    }

    let ranges = [
        filters.price.filter(|range| *range != defaults.price),
        filters
            .price_per_serving
            .filter(|range| *range != defaults.price_per_serving),
    ];

    usize::from(!filters.verdict.is_empty())
        + ranges.iter().flatten().count()
        + non_empty(&filters.nutrients)
        + non_empty(&filters.contaminants)
        + non_empty(&filters.subjective)
        + non_empty(&filters.sections)
}
