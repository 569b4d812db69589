//! Filtering, sorting and view preparation over product records.
//!
//! Everything in this module is pure and synchronous. Callers hold the
//! selections and re-run `prepare_view` on every change.

pub mod accessors;
pub mod filter_predicates;
pub mod filter_state;
pub mod filtering;
pub mod selections;
pub mod sort;
pub mod view_pipeline;

pub use filter_state::{count_active_filters, FilterState, PriceRange, RangeDefaults};
pub use filtering::{apply_filters, filter_with_metrics, FilterMetrics, FilterResult};
pub use selections::{reduce, FilterAction, FilterSelections};
pub use sort::{apply_sort, SortDirection, SortField, SortState};
pub use view_pipeline::{prepare_view, prepare_view_for_selections, CatalogView};
