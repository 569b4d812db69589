//! Sort state and the sort comparator.
//!
//! Keys are computed through the record accessors. Missing keys go last
//! when ascending and first when descending. The sort is stable.

use super::accessors;
use crate::core::Product;
use crate::facets::nutrients::Nutrient;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Fields a product list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Price,
    PricePerServing,
    ProteinPerServing,
    CarbsPerServing,
    FatsPerServing,
    CreatinePerServing,
}

impl SortField {
    pub fn all() -> &'static [SortField] {
        &[
            SortField::Price,
            SortField::PricePerServing,
            SortField::ProteinPerServing,
            SortField::CarbsPerServing,
            SortField::FatsPerServing,
            SortField::CreatinePerServing,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::PricePerServing => "price_per_serving",
            SortField::ProteinPerServing => "protein_per_serving",
            SortField::CarbsPerServing => "carbs_per_serving",
            SortField::FatsPerServing => "fats_per_serving",
            SortField::CreatinePerServing => "creatine_per_serving",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortField::Price => "Price",
            SortField::PricePerServing => "Price per Serving",
            SortField::ProteinPerServing => "Protein per Serving",
            SortField::CarbsPerServing => "Carbs per Serving",
            SortField::FatsPerServing => "Fats per Serving",
            SortField::CreatinePerServing => "Creatine per Serving",
        }
    }

    fn nutrient(&self) -> Option<Nutrient> {
        match self {
            SortField::Price | SortField::PricePerServing => None,
            SortField::ProteinPerServing => Some(Nutrient::Protein),
            SortField::CarbsPerServing => Some(Nutrient::Carbs),
            SortField::FatsPerServing => Some(Nutrient::Fats),
            SortField::CreatinePerServing => Some(Nutrient::Creatine),
        }
    }

    /// Comparison key for a product.
    pub fn key(&self, product: &Product) -> Option<f64> {
        match self {
            SortField::Price => accessors::price(product),
            SortField::PricePerServing => accessors::price_per_serving(product),
            _ => self
                .nutrient()
                .and_then(|nutrient| accessors::nutrient_value(product, nutrient)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        SortField::all()
            .iter()
            .copied()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| format!("unknown sort field: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Reselecting the field currently sorted descending flips it to
    /// ascending; any other choice sorts the new field descending.
    pub fn toggle(current: Option<SortState>, field: SortField) -> SortState {
        match current {
            Some(state) if state.field == field && state.direction == SortDirection::Desc => {
                SortState::new(field, SortDirection::Asc)
            }
            _ => SortState::new(field, SortDirection::Desc),
        }
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}

/// Parses `field` or `field:asc|desc`. A bare field sorts descending.
impl std::str::FromStr for SortState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((field, direction)) => Ok(SortState::new(field.parse()?, direction.parse()?)),
            None => Ok(SortState::new(s.parse()?, SortDirection::Desc)),
        }
    }
}

/// Compare two optional keys under a direction.
pub fn compare_keys(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b, direction) {
        (None, None, _) => Ordering::Equal,
        (None, Some(_), SortDirection::Asc) => Ordering::Greater,
        (None, Some(_), SortDirection::Desc) => Ordering::Less,
        (Some(_), None, SortDirection::Asc) => Ordering::Less,
        (Some(_), None, SortDirection::Desc) => Ordering::Greater,
        (Some(a), Some(b), SortDirection::Asc) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(a), Some(b), SortDirection::Desc) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Sort products. `None` returns the input order unchanged.
///
/// Pure function - returns new sorted Vec.
pub fn apply_sort(products: Vec<Product>, sort: Option<SortState>) -> Vec<Product> {
    let Some(sort) = sort else {
        return products;
    };

    let mut keyed: Vec<(Option<f64>, Product)> = products
        .into_iter()
        .map(|product| (sort.field.key(&product), product))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(*a, *b, sort.direction));
    keyed.into_iter().map(|(_, product)| product).collect()
}
