//! CLI command implementations for labcatalog.
//!
//! Available commands:
//! - **facets**: Show which facets a category offers
//! - **filter**: Filter and sort the products of a category
//! - **categories**: List the categories present in a products file
//! - **init**: Initialize a new labcatalog configuration file
//!
//! Commands resolve configuration once and pass plain values to the engine.

pub mod categories;
pub mod facets;
pub mod filter;
pub mod init;

pub use categories::list_categories;
pub use facets::show_facets;
pub use filter::{run_filter, FilterConfig};

use crate::cli::OutputFormat;
use crate::config::{get_default_products_path, get_display_config, DefaultFormat};
use crate::core::Error;
use anyhow::Result;
use std::path::PathBuf;

/// Explicit path, else `data.products` from the config file.
pub(crate) fn resolve_products_path(products: Option<PathBuf>) -> Result<PathBuf> {
    match products.or_else(get_default_products_path) {
        Some(path) => Ok(path),
        None => Err(Error::Configuration(
            "No products file given. Pass a path or set `data.products` in .labcatalog.toml."
                .to_string(),
        )
        .into()),
    }
}

/// Explicit format, else `display.default_format` from the config file.
pub(crate) fn resolve_format(format: Option<OutputFormat>) -> OutputFormat {
    format.unwrap_or(match get_display_config().default_format {
        DefaultFormat::Table => OutputFormat::Table,
        DefaultFormat::Json => OutputFormat::Json,
    })
}
