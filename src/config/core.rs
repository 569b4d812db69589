use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for labcatalog
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LabcatalogConfig {
    /// Filter range defaults
    #[serde(default)]
    pub filters: Option<FiltersConfig>,

    /// Display configuration for output formatting
    #[serde(default)]
    pub display: Option<DisplayConfig>,

    /// Catalog data location
    #[serde(default)]
    pub data: Option<DataConfig>,
}

/// Upper bounds of the full-span price ranges. A range equal to its full
/// span counts as "no filter".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FiltersConfig {
    /// Maximum of the default price range (default: 10000)
    #[serde(default)]
    pub price_max: Option<f64>,

    /// Maximum of the default price-per-serving range (default: 1000)
    #[serde(default)]
    pub price_per_serving_max: Option<f64>,
}

/// Output format used when `--format` is not given
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DefaultFormat {
    #[default]
    Table,
    Json,
}

/// Display configuration for output formatting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Prefix added to prices that do not already carry it
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default)]
    pub default_format: DefaultFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            default_format: DefaultFormat::default(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DataConfig {
    /// Default products file for commands that take one
    #[serde(default)]
    pub products: Option<PathBuf>,
}
