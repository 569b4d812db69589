//! Record accessors.
//!
//! Every accessor is total: a missing section, key, or unparseable value
//! yields `None`. Unparseable numbers are never read as zero.

use crate::core::{AggregateVerdict, ContaminantEntry, Product, Verdict};
use crate::facets::nutrients::Nutrient;
use crate::facets::resolver::{SubjectiveAspect, TestSection};

/// Parse the leading decimal number of `text` (`"24.5g"` → 24.5).
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse price text after dropping everything but digits and dots
/// (`"₹1,250"` → 1250). Non-positive results are absent.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_leading_float(&digits).filter(|value| *value > 0.0)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Tested amount of `nutrient` per serving from `basic_tests`.
pub fn nutrient_value(product: &Product, nutrient: Nutrient) -> Option<f64> {
    product
        .results
        .basic_tests
        .as_ref()?
        .get(nutrient.test_key())?
        .tested
        .as_deref()
        .and_then(parse_leading_float)
}

/// Price: nested `product_info.price` first, then the flat field when positive.
pub fn price(product: &Product) -> Option<f64> {
    product
        .results
        .product_info
        .as_ref()
        .and_then(|info| info.price.as_deref())
        .and_then(parse_price_text)
        .or_else(|| positive(product.price))
}

/// Price per serving: nested `product_info.price_per_serving` first, then
/// the flat field when positive.
pub fn price_per_serving(product: &Product) -> Option<f64> {
    product
        .results
        .product_info
        .as_ref()
        .and_then(|info| info.price_per_serving.as_deref())
        .and_then(parse_price_text)
        .or_else(|| positive(product.price_per_serving))
}

/// Verdict of a contaminant by lookup name (e.g. `"heavy metals"`).
///
/// An exact key with a verdict wins. Otherwise the first entry, in report
/// order, whose key contains the name (ignoring case) and carries a verdict.
pub fn contaminant_verdict<'a>(product: &'a Product, name: &str) -> Option<&'a Verdict> {
    let tests = product.results.contaminant_tests.as_ref()?;

    if let Some(verdict) = tests.get(name).and_then(ContaminantEntry::verdict) {
        return Some(verdict);
    }

    let needle = name.to_lowercase();
    tests
        .iter()
        .filter(|(key, _)| key.to_lowercase().contains(&needle))
        .find_map(|(_, entry)| entry.verdict())
}

/// Verdict of a subjective review aspect.
pub fn subjective_verdict(product: &Product, aspect: SubjectiveAspect) -> Option<&Verdict> {
    product
        .results
        .review
        .as_ref()?
        .get(aspect.review_key())?
        .verdict
        .as_ref()
}

/// Aggregate over the immediate children of `basic_tests`.
pub fn basic_tests_verdict(product: &Product) -> Option<AggregateVerdict> {
    let section = product.results.basic_tests.as_ref()?;
    AggregateVerdict::from_verdicts(section.values().filter_map(|test| test.verdict.as_ref()))
}

/// Aggregate over the immediate children of `contaminant_tests`; a group
/// contributes its own verdict, not its sub-checks.
pub fn contaminant_tests_verdict(product: &Product) -> Option<AggregateVerdict> {
    let section = product.results.contaminant_tests.as_ref()?;
    AggregateVerdict::from_verdicts(section.values().filter_map(ContaminantEntry::verdict))
}

/// Aggregate over the aspects of `review`.
pub fn review_verdict(product: &Product) -> Option<AggregateVerdict> {
    let section = product.results.review.as_ref()?;
    AggregateVerdict::from_verdicts(section.values().filter_map(|entry| entry.verdict.as_ref()))
}

pub fn section_verdict(product: &Product, section: TestSection) -> Option<AggregateVerdict> {
    match section {
        TestSection::BasicTests => basic_tests_verdict(product),
        TestSection::ContaminantTests => contaminant_tests_verdict(product),
        TestSection::Review => review_verdict(product),
    }
}

/// Price as displayed on a card: nested text wins, flat number otherwise.
pub fn display_price(product: &Product, currency: &str) -> Option<String> {
    display_amount(
        product
            .results
            .product_info
            .as_ref()
            .and_then(|info| info.price.as_deref()),
        product.price,
        currency,
    )
}

pub fn display_price_per_serving(product: &Product, currency: &str) -> Option<String> {
    display_amount(
        product
            .results
            .product_info
            .as_ref()
            .and_then(|info| info.price_per_serving.as_deref()),
        product.price_per_serving,
        currency,
    )
}

fn display_amount(text: Option<&str>, flat: Option<f64>, currency: &str) -> Option<String> {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => Some(with_currency(text, currency)),
        None => positive(flat).map(|value| with_currency(&format_amount(value), currency)),
    }
}

/// Prefix `currency` unless the text already starts with it.
pub fn with_currency(text: &str, currency: &str) -> String {
    if currency.is_empty() || text.starts_with(currency) {
        text.to_string()
    } else {
        format!("{}{}", currency, text)
    }
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProductInfo, ProductResults, ReviewEntry, Section, TestResult};

    fn with_results(results: ProductResults) -> Product {
        Product {
            results,
            ..Product::default()
        }
    }

    fn with_basic_tests(section: Section<TestResult>) -> Product {
        with_results(ProductResults {
            basic_tests: Some(section),
            ..ProductResults::default()
        })
    }

    fn with_contaminants(section: Section<ContaminantEntry>) -> Product {
        with_results(ProductResults {
            contaminant_tests: Some(section),
            ..ProductResults::default()
        })
    }

    fn leaf(verdict: Verdict) -> ContaminantEntry {
        ContaminantEntry::Test(TestResult::with_verdict(verdict))
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("24.5g"), Some(24.5));
        assert_eq!(parse_leading_float(" 3 g"), Some(3.0));
        assert_eq!(parse_leading_float("0g"), Some(0.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("-"), None);
    }

    #[test]
    fn test_parse_price_text() {
        assert_eq!(parse_price_text("₹1,250"), Some(1250.0));
        assert_eq!(parse_price_text("1.299.00"), Some(1.299));
        assert_eq!(parse_price_text("₹45.50"), Some(45.5));
        assert_eq!(parse_price_text("₹0"), None);
        assert_eq!(parse_price_text("n/a"), None);
    }

    #[test]
    fn test_nutrient_value() {
        let product = with_basic_tests(
            Section::new().with_entry("protein_per_serving", TestResult::measured("24g", Verdict::Pass)),
        );
        assert_eq!(nutrient_value(&product, Nutrient::Protein), Some(24.0));
        assert_eq!(nutrient_value(&product, Nutrient::Carbs), None);
        assert_eq!(nutrient_value(&Product::default(), Nutrient::Protein), None);
    }

    #[test]
    fn test_unparseable_nutrient_is_absent() {
        let product = with_basic_tests(
            Section::new().with_entry("fats_per_serving", TestResult::measured("trace", Verdict::Pass)),
        );
        assert_eq!(nutrient_value(&product, Nutrient::Fats), None);
    }

    #[test]
    fn test_price_prefers_nested() {
        let mut product = with_results(ProductResults {
            product_info: Some(ProductInfo {
                price: Some("₹2,000".to_string()),
                price_per_serving: Some("₹66.67".to_string()),
                ..ProductInfo::default()
            }),
            ..ProductResults::default()
        });
        product.price = Some(1800.0);
        product.price_per_serving = Some(60.0);

        assert_eq!(price(&product), Some(2000.0));
        assert_eq!(price_per_serving(&product), Some(66.67));
    }

    #[test]
    fn test_price_falls_back_to_positive_flat() {
        let mut product = Product {
            price: Some(100.0),
            price_per_serving: Some(0.0),
            ..Product::default()
        };
        assert_eq!(price(&product), Some(100.0));
        assert_eq!(price_per_serving(&product), None);

        product.price = Some(-5.0);
        assert_eq!(price(&product), None);
    }

    #[test]
    fn test_contaminant_exact_key_first() {
        let product = with_contaminants(
            Section::new()
                .with_entry("heavy metals (lead)", leaf(Verdict::Fail))
                .with_entry("heavy metals", leaf(Verdict::Pass)),
        );
        assert_eq!(
            contaminant_verdict(&product, "heavy metals"),
            Some(&Verdict::Pass)
        );
    }

    #[test]
    fn test_contaminant_substring_scan_skips_missing_verdicts() {
        let product = with_contaminants(
            Section::new()
                .with_entry("Amino Spiking (glycine)", ContaminantEntry::Test(TestResult::default()))
                .with_entry("Amino Spiking (taurine)", leaf(Verdict::Fail))
                .with_entry("Amino Spiking (alanine)", leaf(Verdict::Pass)),
        );
        assert_eq!(
            contaminant_verdict(&product, "amino spiking"),
            Some(&Verdict::Fail)
        );
        assert_eq!(contaminant_verdict(&product, "pesticides"), None);
    }

    #[test]
    fn test_contaminant_group_verdict() {
        let group = Section::new()
            .with_entry("lead", TestResult::with_verdict(Verdict::Fail))
            .with_verdict(Verdict::Fail);
        let product = with_contaminants(
            Section::new().with_entry("heavy metals", ContaminantEntry::Group(group)),
        );
        assert_eq!(
            contaminant_verdict(&product, "heavy metals"),
            Some(&Verdict::Fail)
        );
    }

    #[test]
    fn test_subjective_verdict_uses_review_key() {
        let product = with_results(ProductResults {
            review: Some(
                Section::new()
                    .with_entry("taste", ReviewEntry::with_verdict(Verdict::Pass))
                    .with_entry(
                        "serving size accuracy",
                        ReviewEntry::with_verdict(Verdict::Neutral),
                    ),
            ),
            ..ProductResults::default()
        });
        assert_eq!(
            subjective_verdict(&product, SubjectiveAspect::Taste),
            Some(&Verdict::Pass)
        );
        assert_eq!(
            subjective_verdict(&product, SubjectiveAspect::ServingSizeAccuracy),
            Some(&Verdict::Neutral)
        );
        assert_eq!(subjective_verdict(&product, SubjectiveAspect::Packaging), None);
    }

    #[test]
    fn test_section_aggregates() {
        let product = with_basic_tests(
            Section::new()
                .with_entry("a", TestResult::with_verdict(Verdict::Pass))
                .with_entry("b", TestResult::with_verdict(Verdict::Fail))
                .with_entry("c", TestResult::with_verdict(Verdict::Pass)),
        );
        assert_eq!(basic_tests_verdict(&product), Some(AggregateVerdict::Fail));
        assert_eq!(review_verdict(&product), None);
        assert_eq!(
            section_verdict(&product, TestSection::ContaminantTests),
            None
        );
    }

    #[test]
    fn test_section_without_verdicts_is_absent() {
        let product = with_basic_tests(Section::new().with_entry("a", TestResult::default()));
        assert_eq!(basic_tests_verdict(&product), None);
    }

    #[test]
    fn test_contaminant_aggregate_uses_group_verdict() {
        let group = Section::new()
            .with_entry("lead", TestResult::with_verdict(Verdict::Fail))
            .with_verdict(Verdict::Neutral);
        let product = with_contaminants(
            Section::new()
                .with_entry("heavy metals", ContaminantEntry::Group(group))
                .with_entry("aflatoxins", leaf(Verdict::Neutral)),
        );
        assert_eq!(
            contaminant_tests_verdict(&product),
            Some(AggregateVerdict::Mixed)
        );
    }

    #[test]
    fn test_display_price() {
        let product = with_results(ProductResults {
            product_info: Some(ProductInfo {
                price: Some("₹1,999".to_string()),
                price_per_serving: Some("66".to_string()),
                ..ProductInfo::default()
            }),
            ..ProductResults::default()
        });
        assert_eq!(display_price(&product, "₹").as_deref(), Some("₹1,999"));
        assert_eq!(
            display_price_per_serving(&product, "₹").as_deref(),
            Some("₹66")
        );

        let flat = Product {
            price: Some(45.5),
            ..Product::default()
        };
        assert_eq!(display_price(&flat, "₹").as_deref(), Some("₹45.50"));
        assert_eq!(display_price_per_serving(&flat, "₹"), None);
    }
}
