mod common;

use common::{fixture_category, ids};
use labcatalog::catalog::{
    prepare_view_for_selections, reduce, FilterAction, FilterSelections, PriceRange, RangeDefaults,
    SortDirection, SortField,
};
use labcatalog::core::Verdict;
use labcatalog::facets::Nutrient;
use pretty_assertions::assert_eq;

fn whey_selections() -> FilterSelections {
    FilterSelections::for_category("whey-isolate", RangeDefaults::default())
}

#[test]
fn test_sidebar_session() {
    let whey = fixture_category("whey-isolate");

    let selections = whey_selections()
        .apply(FilterAction::ToggleVerdict(Verdict::Pass))
        .apply(FilterAction::ToggleVerdict(Verdict::Fail));
    let view = prepare_view_for_selections(&whey, &selections);
    assert_eq!(ids(&view.products), vec![1, 2]);
    assert_eq!(view.active_filters, 1);

    let selections = selections.apply(FilterAction::ToggleNutrientRange {
        nutrient: Nutrient::Protein,
        label: "< 20g".to_string(),
    });
    let view = prepare_view_for_selections(&whey, &selections);
    assert_eq!(ids(&view.products), vec![2]);
    assert_eq!(view.active_filters, 2);

    let selections = selections.apply(FilterAction::ClearAll);
    let view = prepare_view_for_selections(&whey, &selections);
    assert_eq!(ids(&view.products), vec![1, 2, 3]);
    assert_eq!(view.active_filters, 0);
    assert_eq!(selections.category, "whey-isolate");
}

#[test]
fn test_untouched_price_slider_is_not_a_filter() {
    let whey = fixture_category("whey-isolate");
    let view = prepare_view_for_selections(&whey, &whey_selections());

    // Product 3 has no price but the default range is dropped before filtering.
    assert_eq!(view.shown, 3);
}

#[test]
fn test_moving_price_slider_enforces_range() {
    let whey = fixture_category("whey-isolate");
    let selections = reduce(whey_selections(), FilterAction::SetPriceMax(2000.0));

    assert_eq!(selections.to_filter_state().price, Some(PriceRange::new(0.0, 2000.0)));
    let view = prepare_view_for_selections(&whey, &selections);
    assert_eq!(ids(&view.products), vec![2]);
}

#[test]
fn test_sort_choice_cycles_desc_then_asc() {
    let selections = reduce(whey_selections(), FilterAction::ChooseSort(SortField::Price));
    assert_eq!(selections.sort.map(|s| s.direction), Some(SortDirection::Desc));

    let selections = reduce(selections, FilterAction::ChooseSort(SortField::Price));
    assert_eq!(selections.sort.map(|s| s.direction), Some(SortDirection::Asc));

    let selections = reduce(selections, FilterAction::ChooseSort(SortField::Price));
    assert_eq!(selections.sort.map(|s| s.direction), Some(SortDirection::Desc));

    let selections = reduce(
        selections,
        FilterAction::ChooseSort(SortField::ProteinPerServing),
    );
    assert_eq!(
        selections.sort.map(|s| (s.field, s.direction)),
        Some((SortField::ProteinPerServing, SortDirection::Desc))
    );
}

#[test]
fn test_change_category_resets_everything() {
    let selections = whey_selections()
        .apply(FilterAction::ToggleVerdict(Verdict::Pass))
        .apply(FilterAction::SetPriceMin(500.0))
        .apply(FilterAction::ChooseSort(SortField::Price))
        .apply(FilterAction::ChangeCategory("creatine".to_string()));

    assert_eq!(
        selections,
        FilterSelections::for_category("creatine", RangeDefaults::default())
    );
}
