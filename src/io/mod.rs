pub mod loader;
pub mod output;

pub use loader::{load_catalog, load_filter_state, load_products, parse_products, visible_products};
pub use output::{create_writer, CategorySummary, JsonWriter, OutputWriter, TableWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
