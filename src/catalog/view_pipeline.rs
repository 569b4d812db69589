//! Pure transformation pipeline for view preparation.
//!
//! ```text
//! &[Product] (already restricted to one category)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │  prepare_view()  │ ← FilterState, SortState, RangeDefaults (params, not env vars)
//! └──────────────────┘
//!        │
//!        ├─→ without_defaults()      ← default-width ranges constrain nothing
//!        ├─→ filter_with_metrics()   ← AND of every active facet
//!        ├─→ apply_sort()            ← stable, null-aware
//!        └─→ count_active_filters()  ← badge count
//!        │
//!        ▼
//! CatalogView
//! ```
//!
//! The pipeline holds no state and is re-run in full on every change.
//! Configuration is passed as parameters, not read from the environment.

use super::filter_state::{count_active_filters, FilterState, RangeDefaults};
use super::filtering::{filter_with_metrics, FilterMetrics};
use super::selections::FilterSelections;
use super::sort::{apply_sort, SortState};
use crate::core::Product;
use serde::Serialize;
use tracing::{debug, debug_span};

/// Filtered and sorted products ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub products: Vec<Product>,
    /// Products before filtering
    pub total: usize,
    pub shown: usize,
    pub active_filters: usize,
    pub sort: Option<SortState>,
    pub metrics: FilterMetrics,
}

impl CatalogView {
    /// "Showing N of M products"
    pub fn summary_line(&self) -> String {
        format!("Showing {} of {} products", self.shown, self.total)
    }
}

/// Single entry point: filter, then sort, then summarize.
pub fn prepare_view(
    products: &[Product],
    filters: &FilterState,
    sort: Option<SortState>,
    defaults: &RangeDefaults,
) -> CatalogView {
    let _span = debug_span!("prepare_view", total = products.len()).entered();

    // Stage 1: Filter (pure)
    let active = filters.clone().without_defaults(defaults);
    let filtered = filter_with_metrics(products, &active);
    debug!(
        before = products.len(),
        after = filtered.included.len(),
        filtered = filtered.metrics.total_filtered(),
        "Applied filters"
    );

    // Stage 2: Sort (pure)
    let sorted = apply_sort(filtered.included, sort);
    if let Some(sort) = sort {
        debug!(sort = %sort, "Sorted products");
    }

    // Stage 3: Summary (pure)
    let active_filters = count_active_filters(&active, defaults);

    CatalogView {
        total: products.len(),
        shown: sorted.len(),
        products: sorted,
        active_filters,
        sort,
        metrics: filtered.metrics,
    }
}

/// Prepare a view straight from sidebar selections.
pub fn prepare_view_for_selections(
    products: &[Product],
    selections: &FilterSelections,
) -> CatalogView {
    prepare_view(
        products,
        &selections.to_filter_state(),
        selections.sort,
        &selections.defaults,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter_state::PriceRange;
    use crate::catalog::selections::FilterAction;
    use crate::catalog::sort::{SortDirection, SortField};
    use crate::core::Verdict;

    fn product(id: i64, verdict: Verdict, price: f64) -> Product {
        Product {
            id,
            verdict: Some(verdict),
            price: Some(price),
            ..Product::default()
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, Verdict::Pass, 1200.0),
            product(2, Verdict::Fail, 900.0),
            product(3, Verdict::Pass, 2500.0),
            product(4, Verdict::Pass, 600.0),
        ]
    }

    #[test]
    fn test_empty_catalog() {
        let view = prepare_view(&[], &FilterState::new(), None, &RangeDefaults::default());
        assert_eq!(view.total, 0);
        assert_eq!(view.shown, 0);
        assert_eq!(view.summary_line(), "Showing 0 of 0 products");
    }

    #[test]
    fn test_filter_then_sort() {
        let filters = FilterState::new()
            .with_verdicts([Verdict::Pass])
            .with_price(PriceRange::new(0.0, 2000.0));
        let view = prepare_view(
            &catalog(),
            &filters,
            Some(SortState::new(SortField::Price, SortDirection::Asc)),
            &RangeDefaults::default(),
        );

        let ids: Vec<i64> = view.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 1]);
        assert_eq!(view.total, 4);
        assert_eq!(view.shown, 2);
        assert_eq!(view.active_filters, 2);
        assert_eq!(view.metrics.filtered_by_verdict, 1);
        assert_eq!(view.metrics.filtered_by_price, 1);
        assert_eq!(view.summary_line(), "Showing 2 of 4 products");
    }

    #[test]
    fn test_default_range_filters_like_omitted() {
        let defaults = RangeDefaults::default();
        let mut products = catalog();
        products.push(Product {
            id: 5,
            ..Product::default()
        });

        let at_default = prepare_view(
            &products,
            &FilterState::new()
                .with_price(defaults.price)
                .with_price_per_serving(defaults.price_per_serving),
            None,
            &defaults,
        );
        let omitted = prepare_view(&products, &FilterState::new(), None, &defaults);

        assert_eq!(at_default.shown, 5);
        assert_eq!(at_default.shown, omitted.shown);
        assert_eq!(at_default.active_filters, 0);
        assert_eq!(at_default.metrics.filtered_by_price, 0);
    }

    #[test]
    fn test_prepare_view_for_selections() {
        let selections = FilterSelections::default()
            .apply(FilterAction::ToggleVerdict(Verdict::Fail))
            .apply(FilterAction::ChooseSort(SortField::Price));
        let view = prepare_view_for_selections(&catalog(), &selections);
        assert_eq!(view.shown, 1);
        assert_eq!(view.products[0].id, 2);
        assert_eq!(view.active_filters, 1);
    }
}
