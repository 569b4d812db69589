use crate::catalog::{prepare_view, FilterState, PriceRange, RangeDefaults, SortState};
use crate::cli::OutputFormat;
use crate::config::{get_display_config, get_range_defaults};
use crate::core::{AggregateVerdict, Verdict};
use crate::facets::{Nutrient, SubjectiveAspect, TestSection};
use crate::io::{self, create_writer};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Everything the `filter` command was asked to do.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub products: Option<PathBuf>,
    pub category: String,
    pub filters_json: Option<PathBuf>,
    pub verdicts: Vec<Verdict>,
    pub nutrients: Vec<(Nutrient, Vec<String>)>,
    pub price: Option<PriceRange>,
    pub price_per_serving: Option<PriceRange>,
    pub contaminants: Vec<(String, Verdict)>,
    pub subjective: Vec<(SubjectiveAspect, Verdict)>,
    pub sections: Vec<(TestSection, Vec<AggregateVerdict>)>,
    pub sort: Option<SortState>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
}

/// Merge command-line facets on top of `base`. Flags add to lists already
/// present; ranges given on the command line replace those in `base`.
pub fn merge_flags(base: FilterState, config: &FilterConfig, defaults: &RangeDefaults) -> FilterState {
    let mut state = base.with_verdicts(config.verdicts.iter().cloned());

    for (nutrient, labels) in &config.nutrients {
        for label in labels.iter().filter(|label| nutrient.range(label).is_none()) {
            warn!(nutrient = nutrient.as_str(), label = %label, "Unknown nutrient range; it matches no product");
        }
        state = state.with_nutrient_ranges(*nutrient, labels.iter().cloned());
    }
    if let Some(range) = config.price {
        state = state.with_price(range);
    }
    if let Some(range) = config.price_per_serving {
        state = state.with_price_per_serving(range);
    }
    for (key, verdict) in &config.contaminants {
        state = state.with_contaminant(key.clone(), [verdict.clone()]);
    }
    for (aspect, verdict) in &config.subjective {
        state = state.with_subjective(*aspect, [verdict.clone()]);
    }
    for (section, verdicts) in &config.sections {
        state = state.with_section(*section, verdicts.iter().copied());
    }

    state.without_defaults(defaults)
}

pub fn run_filter(config: FilterConfig) -> Result<()> {
    let path = super::resolve_products_path(config.products.clone())?;
    let products = io::load_catalog(&path, &config.category)
        .with_context(|| format!("Failed to load products from {}", path.display()))?;

    let base = match &config.filters_json {
        Some(filters_path) => io::load_filter_state(filters_path).with_context(|| {
            format!("Failed to load filter state from {}", filters_path.display())
        })?,
        None => FilterState::new(),
    };

    let defaults = get_range_defaults();
    let filters = merge_flags(base, &config, &defaults);
    debug!(?filters, "Resolved filter state");

    let view = prepare_view(&products, &filters, config.sort, &defaults);
    info!(
        category = %config.category,
        total = view.total,
        shown = view.shown,
        "Prepared catalog view"
    );

    let display = get_display_config();
    let mut writer = create_writer(
        super::resolve_format(config.format),
        config.output.as_deref(),
        &display.currency_symbol,
    )?;
    writer.write_view(&view)
}
