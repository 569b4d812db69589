//! Category names, routing slugs and category matching.

use crate::core::Product;
use std::collections::HashSet;

/// Slug that matches every product.
pub const ALL_SLUG: &str = "all";

/// Categories shown in navigation.
pub const CATEGORIES: &[&str] = &[
    "Whey Concentrate",
    "Whey Isolate",
    "Whey Blend",
    "Creatine",
    "Omega 3",
    "Food",
    "Plant Protein",
    "All Products",
];

/// Routing slug for a category name: lowercase, spaces become hyphens.
pub fn category_slug(name: &str) -> String {
    if name.eq_ignore_ascii_case("all products") {
        return ALL_SLUG.to_string();
    }
    name.trim().to_lowercase().replace(' ', "-")
}

/// Category name for a slug: hyphens become spaces.
pub fn category_from_slug(slug: &str) -> String {
    slug.trim().replace('-', " ")
}

/// `all` matches everything; otherwise the product category must equal the
/// de-slugged name, ignoring case.
pub fn matches_category(product: &Product, slug: &str) -> bool {
    let slug = slug.trim();
    if slug.is_empty() || slug.eq_ignore_ascii_case(ALL_SLUG) {
        return true;
    }
    product
        .category
        .trim()
        .eq_ignore_ascii_case(&category_from_slug(slug))
}

/// Products in the given category, in input order.
pub fn filter_by_category(products: &[Product], slug: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|product| matches_category(product, slug))
        .cloned()
        .collect()
}

/// Distinct non-empty categories in first-seen order. Case variants of the
/// same name collapse onto the first spelling seen.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|product| product.category.trim())
        .filter(|category| !category.is_empty() && seen.insert(category.to_lowercase()))
        .map(str::to_string)
        .collect()
}
