//! Cart

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use tracing::warn;

use crate::ids::{ProductId, VariationId};

/// A single line in the cart, as last reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    key: String,
    product_id: ProductId,
    variation_id: Option<VariationId>,
    name: String,
    quantity: NonZeroU32,
    unit_price: Decimal,
    line_total: Decimal,
}

impl CartItem {
    /// Creates a cart line from the backend's line total.
    ///
    /// The unit price is derived from the total, which stays authoritative.
    pub fn new(
        key: impl Into<String>,
        product_id: ProductId,
        variation_id: Option<VariationId>,
        name: impl Into<String>,
        quantity: NonZeroU32,
        line_total: Decimal,
    ) -> Self {
        Self {
            key: key.into(),
            product_id,
            variation_id,
            name: name.into(),
            quantity,
            unit_price: line_total / Decimal::from(quantity.get()),
            line_total,
        }
    }

    /// Backend cart line key, used for quantity updates.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Product id
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Variation id, for variable products.
    pub fn variation_id(&self) -> Option<VariationId> {
        self.variation_id
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Price of a single unit.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Price of the whole line.
    pub fn line_total(&self) -> Decimal {
        self.line_total
    }
}

/// Normalized cart contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    total_quantity: u32,
    subtotal: Decimal,
    total: Decimal,
}

impl Cart {
    /// Builds a cart from its lines.
    ///
    /// Missing server totals fall back to the sum of line totals (subtotal) and
    /// to the subtotal (total). Sums saturate instead of overflowing.
    pub fn new(items: Vec<CartItem>, subtotal: Option<Decimal>, total: Option<Decimal>) -> Self {
        let total_quantity = items
            .iter()
            .fold(0_u32, |sum, item| sum.saturating_add(item.quantity()));

        let subtotal = subtotal.unwrap_or_else(|| line_sum(&items));

        Self {
            items,
            total_quantity,
            subtotal,
            total: total.unwrap_or(subtotal),
        }
    }

    /// Cart lines in backend order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    /// Subtotal before shipping, fees and discounts.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Grand total
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Returns the first line for the given product, if any.
    pub fn find_product(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn line_sum(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.line_total()))
        .unwrap_or_else(|| {
            warn!("cart line totals overflow, capping subtotal");

            Decimal::MAX
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product: i64, quantity: u32, line_total: i64) -> CartItem {
        CartItem::new(
            format!("key-{product}"),
            ProductId::from_raw(product),
            None,
            format!("Product {product}"),
            NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN),
            Decimal::from(line_total),
        )
    }

    #[test]
    fn unit_price_is_derived_from_line_total() {
        let item = item(1, 2, 200);

        assert_eq!(item.unit_price(), Decimal::from(100));
        assert_eq!(item.line_total(), Decimal::from(200));
    }

    #[test]
    fn totals_fall_back_to_line_sums() {
        let cart = Cart::new(vec![item(1, 2, 200), item(2, 1, 50)], None, None);

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), Decimal::from(250));
        assert_eq!(cart.total(), Decimal::from(250));
    }

    #[test]
    fn server_totals_win_over_line_sums() {
        let cart = Cart::new(
            vec![item(1, 1, 100)],
            Some(Decimal::from(90)),
            Some(Decimal::from(120)),
        );

        assert_eq!(cart.subtotal(), Decimal::from(90));
        assert_eq!(cart.total(), Decimal::from(120));
    }

    #[test]
    fn oversized_sums_saturate() {
        let huge = CartItem::new(
            "key-huge",
            ProductId::from_raw(1),
            None,
            "Huge",
            NonZeroU32::MAX,
            Decimal::MAX,
        );

        let cart = Cart::new(vec![huge, item(2, 1, 1)], None, None);

        assert_eq!(cart.total_quantity(), u32::MAX);
        assert_eq!(cart.subtotal(), Decimal::MAX);
        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[test]
    fn find_product() {
        let cart = Cart::new(vec![item(1, 1, 100), item(42, 1, 10)], None, None);

        assert_eq!(
            cart.find_product(ProductId::from_raw(42)).map(CartItem::key),
            Some("key-42")
        );
        assert!(cart.find_product(ProductId::from_raw(7)).is_none());
        assert_eq!(cart.len(), 2);
        assert!(!cart.is_empty());
    }
}
