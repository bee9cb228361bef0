//! Catalog
//!
//! Product listing models and the filter panel state applied to them.

mod filters;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::ids::ProductId;

pub use filters::{
    MAX_PRICE, MIN_PRICE, ProductFilters, available_colors, available_sizes,
};

/// Product as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    /// Product id; higher ids are newer.
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Current price
    pub price: Decimal,

    /// Ids of the product types (categories) the product belongs to.
    #[serde(default)]
    pub product_type_ids: Vec<String>,

    /// Size attribute values
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Colour attribute values
    #[serde(default)]
    pub colors: Vec<ProductColor>,
}

/// Colour attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ProductColor {
    /// Display name
    pub name: String,

    /// Stable identifier
    pub slug: String,
}

/// Product type checkbox in the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductTypeFilter {
    /// Product type id
    pub id: String,

    /// Display name
    pub name: String,

    /// Whether the type is selected.
    #[serde(default)]
    pub checked: bool,
}

impl ProductTypeFilter {
    /// Creates an unchecked product type.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            checked: false,
        }
    }
}

/// Listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Backend order
    #[default]
    Popular,

    /// Cheapest first
    PriceAscending,

    /// Most expensive first
    PriceDescending,

    /// Highest id first
    Newest,
}
