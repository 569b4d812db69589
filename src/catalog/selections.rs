//! Sidebar selections as an explicit reducer.
//!
//! `reduce(selections, action)` returns the next selections; nothing here
//! touches products. `to_filter_state` turns the selections into the sparse
//! `FilterState` the evaluator consumes.

use super::filter_state::{FilterState, PriceRange, RangeDefaults};
use super::sort::{SortField, SortState};
use crate::core::{AggregateVerdict, Verdict};
use crate::facets::nutrients::Nutrient;
use crate::facets::resolver::{SubjectiveAspect, TestSection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every control of the filter sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSelections {
    pub category: String,
    pub verdicts: Vec<Verdict>,
    pub nutrients: BTreeMap<Nutrient, Vec<String>>,
    pub price: PriceRange,
    pub price_per_serving: PriceRange,
    pub contaminants: BTreeMap<String, Vec<Verdict>>,
    pub subjective: BTreeMap<SubjectiveAspect, Vec<Verdict>>,
    pub sections: BTreeMap<TestSection, Vec<AggregateVerdict>>,
    pub sort: Option<SortState>,
    pub defaults: RangeDefaults,
}

/// One user interaction with the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    ToggleVerdict(Verdict),
    ToggleNutrientRange { nutrient: Nutrient, label: String },
    ToggleContaminant { key: String, verdict: Verdict },
    ToggleSubjective { aspect: SubjectiveAspect, verdict: Verdict },
    ToggleSection { section: TestSection, verdict: AggregateVerdict },
    SetPriceMin(f64),
    SetPriceMax(f64),
    SetPricePerServingMin(f64),
    SetPricePerServingMax(f64),
    ChooseSort(SortField),
    ClearAll,
    /// Full reset, remembering the new category.
    ChangeCategory(String),
}

impl Default for FilterSelections {
    fn default() -> Self {
        Self::new(RangeDefaults::default())
    }
}

/// Add `value` if missing, remove it if present.
fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) {
    match values.iter().position(|existing| *existing == value) {
        Some(index) => {
            values.remove(index);
        }
        None => values.push(value),
    }
}

fn non_empty<K: Ord + Clone, V: Clone>(map: &BTreeMap<K, Vec<V>>) -> BTreeMap<K, Vec<V>> {
    map.iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(key, values)| (key.clone(), values.clone()))
        .collect()
}

impl FilterSelections {
    pub fn new(defaults: RangeDefaults) -> Self {
        Self {
            category: String::new(),
            verdicts: Vec::new(),
            nutrients: BTreeMap::new(),
            price: defaults.price,
            price_per_serving: defaults.price_per_serving,
            contaminants: BTreeMap::new(),
            subjective: BTreeMap::new(),
            sections: BTreeMap::new(),
            sort: None,
            defaults,
        }
    }

    pub fn for_category(category: impl Into<String>, defaults: RangeDefaults) -> Self {
        Self {
            category: category.into(),
            ..Self::new(defaults)
        }
    }

    /// Apply one action (builder style).
    pub fn apply(self, action: FilterAction) -> Self {
        reduce(self, action)
    }

    /// Sparse filter state: empty lists and default ranges are omitted.
    pub fn to_filter_state(&self) -> FilterState {
        FilterState {
            verdict: self.verdicts.clone(),
            nutrients: non_empty(&self.nutrients),
            price: Some(self.price).filter(|range| *range != self.defaults.price),
            price_per_serving: Some(self.price_per_serving)
                .filter(|range| *range != self.defaults.price_per_serving),
            contaminants: non_empty(&self.contaminants),
            subjective: non_empty(&self.subjective),
            sections: non_empty(&self.sections),
        }
    }
}

/// Next selections after `action`.
pub fn reduce(mut selections: FilterSelections, action: FilterAction) -> FilterSelections {
    match action {
        FilterAction::ToggleVerdict(verdict) => toggle(&mut selections.verdicts, verdict),
        FilterAction::ToggleNutrientRange { nutrient, label } => {
            toggle(selections.nutrients.entry(nutrient).or_default(), label)
        }
        FilterAction::ToggleContaminant { key, verdict } => {
            toggle(selections.contaminants.entry(key).or_default(), verdict)
        }
        FilterAction::ToggleSubjective { aspect, verdict } => {
            toggle(selections.subjective.entry(aspect).or_default(), verdict)
        }
        FilterAction::ToggleSection { section, verdict } => {
            toggle(selections.sections.entry(section).or_default(), verdict)
        }
        FilterAction::SetPriceMin(value) => selections.price.min = value,
        FilterAction::SetPriceMax(value) => selections.price.max = value,
        FilterAction::SetPricePerServingMin(value) => selections.price_per_serving.min = value,
        FilterAction::SetPricePerServingMax(value) => selections.price_per_serving.max = value,
        FilterAction::ChooseSort(field) => {
            selections.sort = Some(SortState::toggle(selections.sort, field))
        }
        FilterAction::ClearAll => {
            selections = FilterSelections::for_category(selections.category, selections.defaults)
        }
        FilterAction::ChangeCategory(category) => {
            selections = FilterSelections::for_category(category, selections.defaults)
        }
    }
    selections
}
