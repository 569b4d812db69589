use crate::cli::OutputFormat;
use crate::config::get_display_config;
use crate::facets::resolve_facets;
use crate::io::{self, create_writer};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

pub fn show_facets(
    category: &str,
    products: Option<PathBuf>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut facets = resolve_facets(category);
    info!(category, profile = facets.profile.as_str(), "Resolved facets");

    if let Some(path) = products {
        let catalog = io::load_catalog(&path, category)
            .with_context(|| format!("Failed to load products from {}", path.display()))?;
        facets = facets.with_discovered_contaminants(&catalog);
    }

    let display = get_display_config();
    let mut writer = create_writer(
        super::resolve_format(format),
        output.as_deref(),
        &display.currency_symbol,
    )?;
    writer.write_facets(&facets)
}
