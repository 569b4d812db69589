//! Filter evaluator with metrics tracking.
//!
//! Facets are applied as a sequential narrowing pipeline and combined with
//! logical AND. The input slice is never modified; the result is a new Vec.
//! Metrics attribute each removed product to the first facet it failed.

use super::filter_predicates::*;
use super::filter_state::FilterState;
use crate::core::Product;
use serde::Serialize;

/// How many products each facet group removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterMetrics {
    /// Products before filtering
    pub total_items: usize,
    pub filtered_by_verdict: usize,
    pub filtered_by_nutrients: usize,
    pub filtered_by_price: usize,
    pub filtered_by_price_per_serving: usize,
    pub filtered_by_contaminants: usize,
    pub filtered_by_subjective: usize,
    /// Removed by the food-filter aggregates
    pub filtered_by_sections: usize,
    /// Products in the final output
    pub included: usize,
}

impl FilterMetrics {
    pub fn new(total: usize) -> Self {
        Self {
            total_items: total,
            ..Self::default()
        }
    }

    /// Total products filtered (all facets).
    pub fn total_filtered(&self) -> usize {
        self.filtered_by_verdict
            + self.filtered_by_nutrients
            + self.filtered_by_price
            + self.filtered_by_price_per_serving
            + self.filtered_by_contaminants
            + self.filtered_by_subjective
            + self.filtered_by_sections
    }

    /// Percentage of products included.
    pub fn inclusion_rate(&self) -> f64 {
        if self.total_items == 0 {
            0.0
        } else {
            (self.included as f64 / self.total_items as f64) * 100.0
        }
    }
}

/// Result of filtering with transparency metrics.
#[derive(Debug, Clone)]
pub struct FilterResult {
    /// Products that passed every active facet, in input order
    pub included: Vec<Product>,
    pub metrics: FilterMetrics,
}

/// Facet group a product failed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Verdict,
    Nutrients,
    Price,
    PricePerServing,
    Contaminants,
    Subjective,
    Sections,
}

fn first_rejection(product: &Product, filters: &FilterState) -> Option<Rejection> {
    if !passes_verdict(product, &filters.verdict) {
        return Some(Rejection::Verdict);
    }
    if !filters
        .nutrients
        .iter()
        .all(|(nutrient, labels)| passes_nutrient(product, *nutrient, labels))
    {
        return Some(Rejection::Nutrients);
    }
    if let Some(range) = &filters.price {
        if !passes_price(product, range) {
            return Some(Rejection::Price);
        }
    }
    if let Some(range) = &filters.price_per_serving {
        if !passes_price_per_serving(product, range) {
            return Some(Rejection::PricePerServing);
        }
    }
    if !filters
        .contaminants
        .iter()
        .all(|(key, accepted)| passes_contaminant(product, key, accepted))
    {
        return Some(Rejection::Contaminants);
    }
    if !filters
        .subjective
        .iter()
        .all(|(aspect, accepted)| passes_subjective(product, *aspect, accepted))
    {
        return Some(Rejection::Subjective);
    }
    if !filters
        .sections
        .iter()
        .all(|(section, accepted)| passes_section(product, *section, accepted))
    {
        return Some(Rejection::Sections);
    }
    None
}

/// Filters products with metric collection (pure, functional).
pub fn filter_with_metrics(products: &[Product], filters: &FilterState) -> FilterResult {
    let mut metrics = FilterMetrics::new(products.len());

    let included: Vec<Product> = products
        .iter()
        .filter(|product| match first_rejection(product, filters) {
            None => true,
            Some(rejection) => {
                let counter = match rejection {
                    Rejection::Verdict => &mut metrics.filtered_by_verdict,
                    Rejection::Nutrients => &mut metrics.filtered_by_nutrients,
                    Rejection::Price => &mut metrics.filtered_by_price,
                    Rejection::PricePerServing => &mut metrics.filtered_by_price_per_serving,
                    Rejection::Contaminants => &mut metrics.filtered_by_contaminants,
                    Rejection::Subjective => &mut metrics.filtered_by_subjective,
                    Rejection::Sections => &mut metrics.filtered_by_sections,
                };
                *counter += 1;
                false
            }
        })
        .cloned()
        .collect();

    metrics.included = included.len();

    FilterResult { included, metrics }
}

/// Products satisfying every active facet of `filters`, in input order.
pub fn apply_filters(products: &[Product], filters: &FilterState) -> Vec<Product> {
    if filters.is_empty() {
        return products.to_vec();
    }
    filter_with_metrics(products, filters).included
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter_state::PriceRange;
    use crate::core::Verdict;
    use crate::facets::nutrients::Nutrient;

    fn product(id: i64, verdict: Option<Verdict>, price: Option<f64>) -> Product {
        Product {
            id,
            verdict,
            price,
            ..Product::default()
        }
    }

    #[test]
    fn test_empty_metrics() {
        let m = FilterMetrics::new(0);
        assert_eq!(m.total_filtered(), 0);
        assert_eq!(m.inclusion_rate(), 0.0);
    }

    #[test]
    fn test_inclusion_rate() {
        let m = FilterMetrics {
            total_items: 8,
            included: 2,
            ..FilterMetrics::default()
        };
        assert_eq!(m.inclusion_rate(), 25.0);
    }

    #[test]
    fn test_empty_filters_return_everything() {
        let products = vec![product(1, None, None), product(2, Some(Verdict::Fail), None)];
        assert_eq!(apply_filters(&products, &FilterState::new()), products);
    }

    #[test]
    fn test_metrics_attribute_first_failing_facet() {
        let products = vec![
            product(1, Some(Verdict::Pass), Some(500.0)),
            product(2, Some(Verdict::Fail), Some(500.0)),
            product(3, Some(Verdict::Pass), Some(5000.0)),
            product(4, None, None),
        ];
        let filters = FilterState::new()
            .with_verdicts([Verdict::Pass])
            .with_price(PriceRange::new(0.0, 1000.0));

        let result = filter_with_metrics(&products, &filters);
        assert_eq!(result.included.len(), 1);
        assert_eq!(result.included[0].id, 1);
        assert_eq!(result.metrics.filtered_by_verdict, 2);
        assert_eq!(result.metrics.filtered_by_price, 1);
        assert_eq!(result.metrics.total_filtered(), 3);
        assert_eq!(result.metrics.included, 1);
    }

    #[test]
    fn test_empty_nutrient_list_is_no_constraint() {
        let products = vec![product(1, None, None)];
        let filters = FilterState::new().with_nutrient_ranges(Nutrient::Protein, Vec::<String>::new());
        assert_eq!(apply_filters(&products, &filters).len(), 1);
    }

    #[test]
    fn test_input_is_not_modified() {
        let products = vec![product(1, Some(Verdict::Fail), None)];
        let before = products.clone();
        let _ = apply_filters(&products, &FilterState::new().with_verdicts([Verdict::Pass]));
        assert_eq!(products, before);
    }
}
