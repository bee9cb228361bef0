//! Cart formatting

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use tracing::warn;

use crate::{
    cart::{Cart, CartItem},
    gateway::responses::{RawCartLine, RawCartResponse},
    ids::{ProductId, VariationId},
    prices::parse_price,
};

/// Normalizes a `GetCart` response.
///
/// Returns `None` when the backend reports no cart, no contents, or an empty
/// list of lines. Callers treat that as an empty cart and clear their state;
/// it is not an error.
pub fn to_cart(response: RawCartResponse) -> Option<Cart> {
    let cart = response.cart?;
    let lines = cart.contents?.nodes;

    if lines.is_empty() {
        return None;
    }

    let items: Vec<CartItem> = lines.into_iter().filter_map(to_cart_item).collect();

    if items.is_empty() {
        return None;
    }

    Some(Cart::new(
        items,
        cart.subtotal.as_deref().map(parse_price),
        cart.total.as_deref().map(parse_price),
    ))
}

fn to_cart_item(line: RawCartLine) -> Option<CartItem> {
    let Some(product) = line.product else {
        warn!(key = %line.key, "cart line has no product, skipping");

        return None;
    };

    let Some(quantity) = line.quantity.and_then(NonZeroU32::new) else {
        warn!(key = %line.key, "cart line has no quantity, skipping");

        return None;
    };

    let line_total = line.total.as_deref().map_or(Decimal::ZERO, parse_price);

    Some(CartItem::new(
        line.key,
        ProductId::from_raw(product.node.database_id),
        line.variation
            .map(|variation| VariationId::from_raw(variation.node.database_id)),
        product.node.name,
        quantity,
        line_total,
    ))
}
