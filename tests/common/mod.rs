// Shared fixtures for labcatalog integration tests
#![allow(dead_code)]

use labcatalog::core::Product;
use labcatalog::io;
use std::path::PathBuf;

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/products.json")
}

/// Visible fixture products (completed only, newest first).
pub fn fixture_products() -> Vec<Product> {
    io::load_catalog(&fixture_path(), "all").expect("fixture should load")
}

/// Fixture products of one category slug.
pub fn fixture_category(slug: &str) -> Vec<Product> {
    io::load_catalog(&fixture_path(), slug).expect("fixture should load")
}

/// Parse one product from a JSON literal.
pub fn product_from_json(json: &str) -> Product {
    serde_json::from_str(json).expect("valid product json")
}

pub fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|p| p.id).collect()
}
