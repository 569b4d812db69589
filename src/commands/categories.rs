use crate::cli::OutputFormat;
use crate::config::get_display_config;
use crate::core::Product;
use crate::facets::{category_slug, distinct_categories, matches_category};
use crate::io::{self, create_writer, CategorySummary};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// One summary per distinct category, in first-seen order.
pub fn summarize_categories(products: &[Product]) -> Vec<CategorySummary> {
    distinct_categories(products)
        .into_iter()
        .map(|name| {
            let slug = category_slug(&name);
            let count = products
                .iter()
                .filter(|product| matches_category(product, &slug))
                .count();
            CategorySummary {
                name,
                slug,
                products: count,
            }
        })
        .collect()
}

pub fn list_categories(
    products: Option<PathBuf>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let path = super::resolve_products_path(products)?;
    let products = io::load_products(&path)
        .with_context(|| format!("Failed to load products from {}", path.display()))?;
    let visible = io::visible_products(products);

    let display = get_display_config();
    let mut writer = create_writer(
        super::resolve_format(format),
        output.as_deref(),
        &display.currency_symbol,
    )?;
    writer.write_categories(&summarize_categories(&visible))
}
