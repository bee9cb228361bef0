//! Cart mutation inputs.

use std::num::NonZeroU32;

use serde::Serialize;

use crate::ids::{IdempotencyToken, ProductId, VariationId};

/// `AddToCart` mutation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    /// Token the backend uses to deduplicate retries of this request.
    #[serde(rename = "clientMutationId")]
    pub idempotency_token: IdempotencyToken,

    /// Product to add
    pub product_id: ProductId,

    /// Variation to add, for variable products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<VariationId>,

    /// Number of units to add
    pub quantity: NonZeroU32,
}

impl AddToCart {
    /// Creates an input for the given product with a fresh idempotency token.
    #[must_use]
    pub fn new(product_id: ProductId, quantity: NonZeroU32) -> Self {
        Self {
            idempotency_token: IdempotencyToken::new(),
            product_id,
            variation_id: None,
            quantity,
        }
    }

    /// Targets a specific variation of the product.
    #[must_use]
    pub fn with_variation(mut self, variation_id: VariationId) -> Self {
        self.variation_id = Some(variation_id);
        self
    }
}

/// `UpdateItemQuantities` mutation input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemQuantities {
    /// Token the backend uses to deduplicate retries of this request.
    #[serde(rename = "clientMutationId")]
    pub idempotency_token: IdempotencyToken,

    /// New quantities by cart line key.
    pub items: Vec<QuantityUpdate>,
}

impl UpdateItemQuantities {
    /// Creates an input with a fresh idempotency token.
    #[must_use]
    pub fn new(items: Vec<QuantityUpdate>) -> Self {
        Self {
            idempotency_token: IdempotencyToken::new(),
            items,
        }
    }
}

/// New quantity for one cart line. Zero removes the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityUpdate {
    /// Backend cart line key
    pub key: String,

    /// New quantity
    pub quantity: u32,
}
