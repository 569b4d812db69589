//! Category to facet configuration.
//!
//! `resolve_facets` is total: every category string maps to one of five
//! profiles by case-insensitive substring match, checked in priority order,
//! with the union profile as the fallback.

use super::nutrients::Nutrient;
use crate::catalog::sort::SortField;
use crate::core::{AggregateVerdict, Product, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Contaminant facet keys offered by the protein, creatine and default profiles.
pub const STANDARD_CONTAMINANTS: &[&str] = &[
    "aflatoxins",
    "pesticides",
    "amino_spiking",
    "heavy_metals",
    "melamine_spiking",
];

/// Name searched for in `contaminant_tests` for a facet key
/// (`heavy_metals` → `heavy metals`).
pub fn contaminant_lookup_name(key: &str) -> String {
    key.replace('_', " ")
}

/// Subjective review aspects with a verdict facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectiveAspect {
    Taste,
    Mixability,
    Packaging,
    ServingSizeAccuracy,
}

impl SubjectiveAspect {
    pub fn all() -> &'static [SubjectiveAspect] {
        &[
            SubjectiveAspect::Taste,
            SubjectiveAspect::Mixability,
            SubjectiveAspect::Packaging,
            SubjectiveAspect::ServingSizeAccuracy,
        ]
    }

    /// Facet key, as used in filter files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            SubjectiveAspect::Taste => "taste",
            SubjectiveAspect::Mixability => "mixability",
            SubjectiveAspect::Packaging => "packaging",
            SubjectiveAspect::ServingSizeAccuracy => "serving_size_accuracy",
        }
    }

    /// Key of the aspect inside the `review` section.
    pub fn review_key(&self) -> &'static str {
        match self {
            SubjectiveAspect::ServingSizeAccuracy => "serving size accuracy",
            other => other.key(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubjectiveAspect::Taste => "Taste",
            SubjectiveAspect::Mixability => "Mixability",
            SubjectiveAspect::Packaging => "Packaging",
            SubjectiveAspect::ServingSizeAccuracy => "Serving Size Accuracy",
        }
    }

    pub fn parse(name: &str) -> Option<SubjectiveAspect> {
        let normalized = name.trim().to_lowercase().replace(' ', "_");
        SubjectiveAspect::all()
            .iter()
            .copied()
            .find(|aspect| aspect.key() == normalized)
    }
}

impl fmt::Display for SubjectiveAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Report sections summarized by the food-filter aggregate facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestSection {
    BasicTests,
    ContaminantTests,
    Review,
}

impl TestSection {
    pub fn all() -> &'static [TestSection] {
        &[
            TestSection::BasicTests,
            TestSection::ContaminantTests,
            TestSection::Review,
        ]
    }

    /// Facet key of the aggregate verdict for this section.
    pub fn facet_key(&self) -> &'static str {
        match self {
            TestSection::BasicTests => "basic_tests_verdict",
            TestSection::ContaminantTests => "contaminant_tests_verdict",
            TestSection::Review => "review_verdict",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TestSection::BasicTests => "Basic Tests",
            TestSection::ContaminantTests => "Contaminant Tests",
            TestSection::Review => "Review",
        }
    }
}

impl fmt::Display for TestSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.facet_key())
    }
}

/// Facet profile a category resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryProfile {
    Protein,
    Creatine,
    Omega,
    Food,
    Default,
}

impl CategoryProfile {
    /// Slugs are accepted too: hyphens are read as spaces.
    pub fn from_category(category: &str) -> Self {
        let lower = category.to_lowercase().replace('-', " ");
        if lower.contains("whey") || lower.contains("plant protein") {
            CategoryProfile::Protein
        } else if lower.contains("creatine") {
            CategoryProfile::Creatine
        } else if lower.contains("omega") {
            CategoryProfile::Omega
        } else if lower.contains("food") || lower.contains("other") {
            CategoryProfile::Food
        } else {
            CategoryProfile::Default
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryProfile::Protein => "protein",
            CategoryProfile::Creatine => "creatine",
            CategoryProfile::Omega => "omega",
            CategoryProfile::Food => "food",
            CategoryProfile::Default => "default",
        }
    }
}

/// Which facet groups are offered for a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetConfig {
    pub profile: CategoryProfile,
    pub has_verdict: bool,
    pub has_nutrients: bool,
    pub nutrients: Vec<Nutrient>,
    pub has_contaminants: bool,
    /// Facet keys; empty for the omega profile until discovered from data.
    pub contaminants: Vec<String>,
    pub has_subjective: bool,
    pub subjective: Vec<SubjectiveAspect>,
    pub has_price: bool,
    pub has_price_per_serving: bool,
    pub has_sorting: bool,
    pub sorting_fields: Vec<SortField>,
    pub has_food_filters: bool,
}

impl FacetConfig {
    fn supplement(
        profile: CategoryProfile,
        nutrients: Vec<Nutrient>,
        contaminants: Vec<String>,
        sorting_fields: Vec<SortField>,
    ) -> Self {
        Self {
            profile,
            has_verdict: true,
            has_nutrients: !nutrients.is_empty(),
            nutrients,
            has_contaminants: true,
            contaminants,
            has_subjective: true,
            subjective: SubjectiveAspect::all().to_vec(),
            has_price: true,
            has_price_per_serving: true,
            has_sorting: true,
            sorting_fields,
            has_food_filters: false,
        }
    }

    fn food() -> Self {
        Self {
            profile: CategoryProfile::Food,
            has_verdict: false,
            has_nutrients: false,
            nutrients: Vec::new(),
            has_contaminants: false,
            contaminants: Vec::new(),
            has_subjective: false,
            subjective: Vec::new(),
            has_price: true,
            has_price_per_serving: true,
            has_sorting: false,
            sorting_fields: Vec::new(),
            has_food_filters: true,
        }
    }

    /// Fill an empty contaminant list from the loaded products.
    ///
    /// Only profiles that defer contaminants to the data (omega) start
    /// empty; others are returned unchanged.
    pub fn with_discovered_contaminants(mut self, products: &[Product]) -> Self {
        if self.has_contaminants && self.contaminants.is_empty() {
            self.contaminants = discover_contaminants(products);
        }
        self
    }
}

fn standard_contaminants() -> Vec<String> {
    STANDARD_CONTAMINANTS.iter().map(|s| s.to_string()).collect()
}

/// Resolve the facet configuration for a category name or slug.
pub fn resolve_facets(category: &str) -> FacetConfig {
    let profile = CategoryProfile::from_category(category);
    match profile {
        CategoryProfile::Protein => FacetConfig::supplement(
            profile,
            vec![Nutrient::Protein],
            standard_contaminants(),
            vec![
                SortField::Price,
                SortField::PricePerServing,
                SortField::ProteinPerServing,
            ],
        ),
        CategoryProfile::Creatine => FacetConfig::supplement(
            profile,
            vec![Nutrient::Creatine],
            standard_contaminants(),
            vec![
                SortField::Price,
                SortField::PricePerServing,
                SortField::CreatinePerServing,
            ],
        ),
        CategoryProfile::Omega => FacetConfig::supplement(
            profile,
            Vec::new(),
            Vec::new(),
            vec![SortField::Price, SortField::PricePerServing],
        ),
        CategoryProfile::Food => FacetConfig::food(),
        CategoryProfile::Default => FacetConfig::supplement(
            profile,
            vec![Nutrient::Protein, Nutrient::Creatine],
            standard_contaminants(),
            vec![
                SortField::Price,
                SortField::PricePerServing,
                SortField::ProteinPerServing,
                SortField::CreatinePerServing,
            ],
        ),
    }
}

/// Contaminant facet keys present in the data, in first-seen order.
///
/// Keys are lowercased with spaces replaced by underscores, so
/// `"Heavy Metals"` becomes `heavy_metals`.
pub fn discover_contaminants(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter_map(|product| product.results.contaminant_tests.as_ref())
        .flat_map(|section| section.keys())
        .map(|key| key.trim().to_lowercase().replace(' ', "_"))
        .filter(|key| !key.is_empty() && seen.insert(key.clone()))
        .collect()
}

/// Options offered by the overall verdict facet.
pub fn verdict_options() -> Vec<Verdict> {
    vec![Verdict::Pass, Verdict::Fail, Verdict::NotAssigned]
}

/// Options offered by each contaminant facet.
pub fn contaminant_options() -> Vec<Verdict> {
    vec![Verdict::Pass, Verdict::Fail]
}

/// Options offered by each subjective facet.
pub fn subjective_options() -> Vec<Verdict> {
    vec![Verdict::Pass, Verdict::Fail, Verdict::Neutral]
}

/// Options offered by the food aggregate facets.
pub fn food_options() -> Vec<AggregateVerdict> {
    vec![AggregateVerdict::Pass, AggregateVerdict::Fail]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ContaminantEntry, ProductResults, Section, TestResult};

    #[test]
    fn test_whey_profile() {
        let config = resolve_facets("Whey Isolate");
        assert_eq!(config.profile, CategoryProfile::Protein);
        assert_eq!(config.nutrients, vec![Nutrient::Protein]);
        assert_eq!(config.contaminants.len(), 5);
        assert_eq!(config.subjective.len(), 4);
        assert!(config.sorting_fields.contains(&SortField::ProteinPerServing));
        assert!(!config.has_food_filters);
    }

    #[test]
    fn test_plant_protein_and_slug_forms() {
        assert_eq!(
            resolve_facets("plant-protein").profile,
            CategoryProfile::Protein
        );
        assert_eq!(
            resolve_facets("Plant Protein").profile,
            CategoryProfile::Protein
        );
        assert_eq!(
            resolve_facets("whey-concentrate").profile,
            CategoryProfile::Protein
        );
    }

    #[test]
    fn test_creatine_profile() {
        let config = resolve_facets("CREATINE");
        assert_eq!(config.nutrients, vec![Nutrient::Creatine]);
        assert_eq!(
            config.sorting_fields,
            vec![
                SortField::Price,
                SortField::PricePerServing,
                SortField::CreatinePerServing
            ]
        );
    }

    #[test]
    fn test_omega_profile_defers_contaminants() {
        let config = resolve_facets("omega-3");
        assert!(!config.has_nutrients);
        assert!(config.has_contaminants);
        assert!(config.contaminants.is_empty());
        assert_eq!(
            config.sorting_fields,
            vec![SortField::Price, SortField::PricePerServing]
        );
    }

    #[test]
    fn test_food_profile() {
        let config = resolve_facets("Food");
        assert!(!config.has_verdict);
        assert!(!config.has_nutrients);
        assert!(!config.has_contaminants);
        assert!(!config.has_subjective);
        assert!(!config.has_sorting);
        assert!(config.has_price);
        assert!(config.has_food_filters);
        assert_eq!(resolve_facets("Others").profile, CategoryProfile::Food);
    }

    #[test]
    fn test_default_profile() {
        let config = resolve_facets("all");
        assert_eq!(config.profile, CategoryProfile::Default);
        assert_eq!(config.nutrients, vec![Nutrient::Protein, Nutrient::Creatine]);
        assert_eq!(config.sorting_fields.len(), 4);
        assert_eq!(resolve_facets("").profile, CategoryProfile::Default);
    }

    #[test]
    fn test_discover_contaminants_first_seen_order() {
        let product = |keys: &[&str]| {
            let section = keys.iter().fold(Section::new(), |section, key| {
                section.with_entry(
                    *key,
                    ContaminantEntry::Test(TestResult::with_verdict(Verdict::Pass)),
                )
            });
            Product {
                results: ProductResults {
                    contaminant_tests: Some(section),
                    ..ProductResults::default()
                },
                ..Product::default()
            }
        };

        let products = vec![
            product(&["Mercury", "Heavy Metals"]),
            product(&["heavy metals", "Oxidation"]),
            Product::default(),
        ];

        assert_eq!(
            discover_contaminants(&products),
            vec!["mercury", "heavy_metals", "oxidation"]
        );

        let config = resolve_facets("omega 3").with_discovered_contaminants(&products);
        assert_eq!(config.contaminants.len(), 3);
        let whey = resolve_facets("whey").with_discovered_contaminants(&products);
        assert_eq!(whey.contaminants.len(), 5);
    }

    #[test]
    fn test_subjective_review_keys() {
        assert_eq!(
            SubjectiveAspect::ServingSizeAccuracy.review_key(),
            "serving size accuracy"
        );
        assert_eq!(
            SubjectiveAspect::parse("serving size accuracy"),
            Some(SubjectiveAspect::ServingSizeAccuracy)
        );
        assert_eq!(contaminant_lookup_name("amino_spiking"), "amino spiking");
    }

    #[test]
    fn test_option_vocabularies() {
        assert_eq!(verdict_options().len(), 3);
        assert!(subjective_options().contains(&Verdict::Neutral));
        assert!(!contaminant_options().contains(&Verdict::Neutral));
        assert_eq!(food_options().len(), 2);
    }
}
