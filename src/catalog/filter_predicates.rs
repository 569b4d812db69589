//! Pure predicate functions for filtering products.
//!
//! Each predicate checks one facet. An empty selection always passes. With a
//! non-empty selection a product lacking the underlying data fails.

use super::accessors;
use super::filter_state::PriceRange;
use crate::core::{AggregateVerdict, Product, Verdict};
use crate::facets::nutrients::{matches_nutrient_range, Nutrient};
use crate::facets::resolver::{contaminant_lookup_name, SubjectiveAspect, TestSection};

#[inline]
fn accepted_verdict(value: Option<&Verdict>, accepted: &[Verdict]) -> bool {
    accepted.is_empty() || value.is_some_and(|verdict| accepted.contains(verdict))
}

/// Overall product verdict is one of `accepted`.
#[inline]
pub fn passes_verdict(product: &Product, accepted: &[Verdict]) -> bool {
    accepted_verdict(product.verdict.as_ref(), accepted)
}

/// Tested nutrient value falls in one of the selected buckets.
pub fn passes_nutrient(product: &Product, nutrient: Nutrient, labels: &[String]) -> bool {
    if labels.is_empty() {
        return true;
    }
    accessors::nutrient_value(product, nutrient)
        .is_some_and(|value| matches_nutrient_range(value, labels, nutrient))
}

#[inline]
pub fn passes_price(product: &Product, range: &PriceRange) -> bool {
    accessors::price(product).is_some_and(|value| range.contains(value))
}

#[inline]
pub fn passes_price_per_serving(product: &Product, range: &PriceRange) -> bool {
    accessors::price_per_serving(product).is_some_and(|value| range.contains(value))
}

/// Verdict of contaminant facet `key` is one of `accepted`.
///
/// The key is looked up as written first, then with underscores read as
/// spaces (`heavy_metals` also finds "Heavy Metals").
pub fn passes_contaminant(product: &Product, key: &str, accepted: &[Verdict]) -> bool {
    if accepted.is_empty() {
        return true;
    }
    let verdict = accessors::contaminant_verdict(product, key)
        .or_else(|| accessors::contaminant_verdict(product, &contaminant_lookup_name(key)));
    accepted_verdict(verdict, accepted)
}

pub fn passes_subjective(product: &Product, aspect: SubjectiveAspect, accepted: &[Verdict]) -> bool {
    accepted_verdict(accessors::subjective_verdict(product, aspect), accepted)
}

/// Aggregate verdict of `section` is one of `accepted`.
pub fn passes_section(
    product: &Product,
    section: TestSection,
    accepted: &[AggregateVerdict],
) -> bool {
    accepted.is_empty()
        || accessors::section_verdict(product, section)
            .is_some_and(|verdict| accepted.contains(&verdict))
}
