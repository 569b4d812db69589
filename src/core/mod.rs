//! Product record model shared by every other module.

pub mod errors;
pub mod section;
pub mod types;
pub mod verdict;

pub use errors::{Error, Result};
pub use section::{ContaminantEntry, Section};
pub use types::{DebugInfo, ImageStatus, Product, ProductInfo, ProductResults, ReviewEntry, TestResult};
pub use verdict::{AggregateVerdict, Verdict};
