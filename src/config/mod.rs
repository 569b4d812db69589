//! Configuration loaded from `.labcatalog.toml`.
//!
//! The file is searched from the current directory upward. A missing file
//! yields defaults; an unreadable or invalid file logs a warning and yields
//! defaults. Engine functions never read configuration themselves; commands
//! resolve it once and pass values down.

mod accessors;
mod core;
mod loader;

pub use accessors::{
    get_config, get_default_products_path, get_display_config, get_range_defaults,
    resolve_range_defaults, PRICE_MAX_ENV, PRICE_PER_SERVING_MAX_ENV,
};
pub use self::core::{DataConfig, DefaultFormat, DisplayConfig, FiltersConfig, LabcatalogConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
