use super::section::{ContaminantEntry, Section};
use super::verdict::{self, Verdict};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One lab-tested product as supplied by the catalog feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    /// Stable external identifier used for detail-page lookup.
    #[serde(default, deserialize_with = "text_or_empty")]
    pub product_id: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub product_name: String,
    #[serde(rename = "product_category", default, deserialize_with = "text_or_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "verdict::optional")]
    pub verdict: Option<Verdict>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_per_serving: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_status: ImageStatus,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: ProductResults,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Status of the ingestion/image pipeline for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Nested lab report. Every section is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_info: Option<ProductInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_tests: Option<Section<TestResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contaminant_tests: Option<Section<ContaminantEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<Section<ReviewEntry>>,
    /// Diagnostic metadata; never read by the filtering engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
}

/// Display metadata. Prices are text and may already carry a currency glyph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub serving_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price_per_serving: Option<String>,
    #[serde(default, deserialize_with = "verdict::optional")]
    pub verdict: Option<Verdict>,
}

/// Leaf test outcome.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub tested: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub claimed: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "verdict::optional")]
    pub verdict: Option<Verdict>,
}

impl TestResult {
    pub fn with_verdict(verdict: Verdict) -> Self {
        Self {
            verdict: Some(verdict),
            ..Self::default()
        }
    }

    /// A measured result, e.g. `TestResult::measured("24g", Verdict::Pass)`.
    pub fn measured(tested: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            tested: Some(tested.into()),
            verdict: Some(verdict),
            ..Self::default()
        }
    }
}

/// Subjective review of one aspect (taste, mixability, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewEntry {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "verdict::optional")]
    pub verdict: Option<Verdict>,
}

impl ReviewEntry {
    pub fn with_verdict(verdict: Verdict) -> Self {
        Self {
            verdict: Some(verdict),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DebugInfo {
    #[serde(default)]
    pub can_access_url: Option<bool>,
    #[serde(default)]
    pub request_timestamp: Option<String>,
}

/// Accept strings, numbers and booleans as text; anything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// `lenient_text` for required text fields: absent or null becomes empty.
fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Accept numbers and numeric strings; anything unparseable is absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_record_deserializes() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "product_id": "whey-001",
            "product_category": "Whey Isolate"
        }))
        .unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.category, "Whey Isolate");
        assert_eq!(product.verdict, None);
        assert_eq!(product.results, ProductResults::default());
        assert_eq!(product.image_status, ImageStatus::Pending);
    }

    #[test]
    fn test_null_results_and_empty_verdict() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "verdict": "",
            "results": null,
            "price": null
        }))
        .unwrap();

        assert_eq!(product.verdict, None);
        assert_eq!(product.price, None);
        assert!(product.results.basic_tests.is_none());
    }

    #[test]
    fn test_null_identity_fields_become_empty() {
        let product: Product = serde_json::from_value(json!({
            "id": null,
            "product_id": 1042,
            "product_name": null,
            "product_category": null,
            "company": null,
            "image_status": null
        }))
        .unwrap();

        assert_eq!(product.id, 0);
        assert_eq!(product.product_id, "1042");
        assert_eq!(product.product_name, "");
        assert_eq!(product.category, "");
        assert_eq!(product.company, "");
        assert_eq!(product.image_status, ImageStatus::Pending);
    }

    #[test]
    fn test_numeric_tested_value_accepted() {
        let test: TestResult =
            serde_json::from_value(json!({"tested": 24.5, "verdict": "pass"})).unwrap();
        assert_eq!(test.tested.as_deref(), Some("24.5"));
    }

    #[test]
    fn test_price_as_string_accepted() {
        let product: Product =
            serde_json::from_value(json!({"id": 1, "price": "1499", "price_per_serving": "n/a"}))
                .unwrap();
        assert_eq!(product.price, Some(1499.0));
        assert_eq!(product.price_per_serving, None);
    }

    #[test]
    fn test_unknown_image_status() {
        let product: Product =
            serde_json::from_value(json!({"id": 1, "image_status": "archived"})).unwrap();
        assert_eq!(product.image_status, ImageStatus::Unknown);
    }
}
