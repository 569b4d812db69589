//! Facet catalog: nutrient buckets, category profiles and category routing.

pub mod category;
pub mod nutrients;
pub mod resolver;

pub use category::{
    category_from_slug, category_slug, distinct_categories, filter_by_category, matches_category,
    CATEGORIES,
};
pub use nutrients::{matches_nutrient_range, Nutrient, NutrientRange};
pub use resolver::{
    discover_contaminants, resolve_facets, CategoryProfile, FacetConfig, SubjectiveAspect,
    TestSection, STANDARD_CONTAMINANTS,
};
