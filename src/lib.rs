//! Faceted filtering and sorting engine for lab-tested product catalogs.
//!
//! Products carry a nested lab report (basic tests, contaminant tests and a
//! subjective review). The engine resolves which facets a category offers,
//! filters products by the selected facets, sorts them, and reports how many
//! filters are active. Every engine function is pure; configuration and I/O
//! live in [`config`], [`io`] and [`commands`].

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod facets;
pub mod io;

pub use crate::core::{
    AggregateVerdict, ContaminantEntry, Error, Product, ProductResults, Result, Section,
    TestResult, Verdict,
};

pub use crate::catalog::{
    apply_filters, apply_sort, count_active_filters, prepare_view, reduce, CatalogView,
    FilterAction, FilterSelections, FilterState, PriceRange, RangeDefaults, SortDirection,
    SortField, SortState,
};

pub use crate::facets::{resolve_facets, FacetConfig, Nutrient, SubjectiveAspect, TestSection};

pub use crate::io::{create_writer, load_catalog, OutputWriter};
