//! Raw backend response shapes.
//!
//! Only the fields the client reads are modelled; everything else in the
//! backend's payload is ignored.

use serde::Deserialize;

/// `GetCart` query result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCartResponse {
    /// Session cart, absent when the backend has no session.
    #[serde(default)]
    pub cart: Option<RawCart>,
}

/// Cart node
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCart {
    /// Cart contents node
    #[serde(default)]
    pub contents: Option<RawCartContents>,

    /// Formatted subtotal, e.g. `"kr 200.00"`.
    #[serde(default)]
    pub subtotal: Option<String>,

    /// Formatted grand total.
    #[serde(default)]
    pub total: Option<String>,
}

/// Cart contents connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCartContents {
    /// Cart lines
    #[serde(default)]
    pub nodes: Vec<RawCartLine>,
}

/// Cart line node
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartLine {
    /// Backend line key
    pub key: String,

    /// Product edge
    #[serde(default)]
    pub product: Option<RawProductEdge>,

    /// Variation edge, for variable products.
    #[serde(default)]
    pub variation: Option<RawVariationEdge>,

    /// Line quantity
    #[serde(default)]
    pub quantity: Option<u32>,

    /// Formatted line total.
    #[serde(default)]
    pub total: Option<String>,
}

/// Product edge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawProductEdge {
    /// Product node
    pub node: RawProductNode,
}

/// Product node
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductNode {
    /// Product database id
    pub database_id: i64,

    /// Product name
    #[serde(default)]
    pub name: String,
}

/// Variation edge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawVariationEdge {
    /// Variation node
    pub node: RawVariationNode,
}

/// Variation node
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariationNode {
    /// Variation database id
    pub database_id: i64,

    /// Variation name
    #[serde(default)]
    pub name: Option<String>,
}

/// Result of a cart mutation (`AddToCart`, `UpdateItemQuantities`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMutationResponse {
    /// Echo of the idempotency token.
    #[serde(default)]
    pub client_mutation_id: Option<String>,

    /// Line touched by `AddToCart`.
    #[serde(default)]
    pub cart_item: Option<RawMutationLine>,

    /// Lines updated by `UpdateItemQuantities`.
    #[serde(default)]
    pub items: Vec<RawMutationLine>,

    /// Lines removed by `UpdateItemQuantities`.
    #[serde(default)]
    pub removed: Vec<RawMutationLine>,
}

/// Line reported by a cart mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawMutationLine {
    /// Backend line key
    pub key: String,

    /// Quantity after the mutation.
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// `Checkout` mutation result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderResponse {
    /// Echo of the idempotency token.
    #[serde(default)]
    pub client_mutation_id: Option<String>,

    /// Order outcome, `"success"` when the order was placed.
    #[serde(default)]
    pub result: Option<String>,

    /// Created order
    #[serde(default)]
    pub order: Option<RawOrder>,
}

impl RawOrderResponse {
    /// Whether the backend reported a placed order.
    pub fn is_success(&self) -> bool {
        self.result.as_deref() == Some("success")
    }
}

/// Order node
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    /// Order database id
    #[serde(default)]
    pub database_id: Option<i64>,

    /// Human-facing order number.
    #[serde(default)]
    pub order_number: Option<String>,

    /// Order status, e.g. `"PROCESSING"`.
    #[serde(default)]
    pub status: Option<String>,
}
