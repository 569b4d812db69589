use std::path::PathBuf;
use std::sync::OnceLock;

use super::core::{DisplayConfig, LabcatalogConfig};
use super::loader::load_config;
use crate::catalog::filter_state::{PriceRange, RangeDefaults};

pub const PRICE_MAX_ENV: &str = "LABCATALOG_PRICE_MAX";
pub const PRICE_PER_SERVING_MAX_ENV: &str = "LABCATALOG_PRICE_PER_SERVING_MAX";

/// Cache the configuration
static CONFIG: OnceLock<LabcatalogConfig> = OnceLock::new();

/// Get the cached configuration
pub fn get_config() -> &'static LabcatalogConfig {
    CONFIG.get_or_init(load_config)
}

/// Get display configuration (with defaults)
pub fn get_display_config() -> DisplayConfig {
    get_config().display.clone().unwrap_or_default()
}

/// Default products file from `[data] products`
pub fn get_default_products_path() -> Option<PathBuf> {
    get_config()
        .data
        .as_ref()
        .and_then(|data| data.products.clone())
}

/// Range defaults with precedence: env vars > config file > built-in.
pub fn get_range_defaults() -> RangeDefaults {
    resolve_range_defaults(get_config(), |name| std::env::var(name).ok())
}

/// Pure resolution of the range defaults; `env` looks up a variable.
pub fn resolve_range_defaults<F>(config: &LabcatalogConfig, env: F) -> RangeDefaults
where
    F: Fn(&str) -> Option<String>,
{
    let builtin = RangeDefaults::default();
    let filters = config.filters.as_ref();

    let max_for = |var: &str, configured: Option<f64>, fallback: f64| -> f64 {
        env(var)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value > 0.0)
            .or(configured)
            .unwrap_or(fallback)
    };

    RangeDefaults {
        price: PriceRange::new(
            builtin.price.min,
            max_for(
                PRICE_MAX_ENV,
                filters.and_then(|f| f.price_max),
                builtin.price.max,
            ),
        ),
        price_per_serving: PriceRange::new(
            builtin.price_per_serving.min,
            max_for(
                PRICE_PER_SERVING_MAX_ENV,
                filters.and_then(|f| f.price_per_serving_max),
                builtin.price_per_serving.max,
            ),
        ),
    }
}
