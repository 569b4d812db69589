//! Product catalog loading.
//!
//! Stands in for the data-fetch collaborator: reads a JSON array of product
//! records, skips records that do not deserialize, keeps only records whose
//! image pipeline completed, and orders them newest first.

use crate::catalog::filter_state::FilterState;
use crate::core::errors::{Error, Result};
use crate::core::{ImageStatus, Product};
use crate::facets::category::filter_by_category;
use serde_json::Value;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parse a JSON array of product records. Malformed records are skipped.
pub fn parse_products(contents: &str, path: &Path) -> Result<Vec<Product>> {
    let value: Value =
        serde_json::from_str(contents).map_err(|e| Error::parse(path, e.to_string()))?;
    let Value::Array(records) = value else {
        return Err(Error::parse(path, "expected a JSON array of products"));
    };

    let total = records.len();
    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Product>(record) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed product record");
                None
            }
        })
        .collect();

    debug!(
        path = %path.display(),
        total,
        parsed = products.len(),
        "Parsed product records"
    );
    Ok(products)
}

/// Read every parseable product record from `path`.
pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_products(&contents, path)
}

/// Completed records only, newest first. Records without a timestamp keep
/// their relative order after the dated ones.
pub fn visible_products(products: Vec<Product>) -> Vec<Product> {
    let mut visible: Vec<Product> = products
        .into_iter()
        .filter(|product| product.image_status == ImageStatus::Completed)
        .collect();
    visible.sort_by(|a, b| match (&a.created_at, &b.created_at) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    visible
}

/// Visible products of one category (`all` for every category).
pub fn load_catalog(path: &Path, category_slug: &str) -> Result<Vec<Product>> {
    let products = visible_products(load_products(path)?);
    let in_category = filter_by_category(&products, category_slug);
    debug!(
        category = category_slug,
        count = in_category.len(),
        "Loaded catalog"
    );
    Ok(in_category)
}

/// Read a `FilterState` from a JSON file. Inverted ranges are rejected.
pub fn load_filter_state(path: &Path) -> Result<FilterState> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let state: FilterState =
        serde_json::from_str(&contents).map_err(|e| Error::parse(path, e.to_string()))?;

    let ranges = [("price", state.price), ("price_per_serving", state.price_per_serving)];
    if let Some((name, range)) = ranges
        .into_iter()
        .find_map(|(name, range)| range.filter(|r| r.min > r.max).map(|r| (name, r)))
    {
        return Err(Error::validation(format!(
            "{} range minimum exceeds maximum ({}) in {}",
            name,
            range,
            path.display()
        )));
    }
    Ok(state)
}
