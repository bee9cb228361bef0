use std::num::NonZeroU32;

use clap::Args;
use storefront::{
    cart::Cart,
    gateway::QuantityUpdate,
    ids::{ProductId, VariationId},
};

use crate::{backend::Backend, config::backend::BackendConfig};

#[derive(Debug, Args)]
pub(crate) struct ShowCartArgs {
    #[command(flatten)]
    pub(super) backend: BackendConfig,
}

#[derive(Debug, Args)]
pub(crate) struct AddItemArgs {
    #[command(flatten)]
    pub(super) backend: BackendConfig,

    /// Product database id
    #[arg(long)]
    pub(super) product_id: i64,

    /// Variation database id, for variable products
    #[arg(long)]
    pub(super) variation_id: Option<i64>,

    /// Units to add
    #[arg(long, default_value_t = NonZeroU32::MIN)]
    pub(super) quantity: NonZeroU32,
}

#[derive(Debug, Args)]
pub(crate) struct UpdateItemArgs {
    #[command(flatten)]
    pub(super) backend: BackendConfig,

    /// Cart line key, as printed by `storefront cart`
    #[arg(long)]
    pub(super) key: String,

    /// New quantity; 0 removes the line
    #[arg(long)]
    pub(super) quantity: u32,
}

pub(crate) async fn show(args: ShowCartArgs) -> Result<(), String> {
    let backend = Backend::connect(&args.backend).await?;

    let outcome = backend.sync().refresh().await;

    backend.persist_session().await?;

    let cart = outcome.map_err(|error| format!("failed to fetch cart: {error}"))?;

    println!("{}", render_cart(cart.as_ref()));

    Ok(())
}

pub(crate) async fn add(args: AddItemArgs) -> Result<(), String> {
    let backend = Backend::connect(&args.backend).await?;
    let product_id = ProductId::from_raw(args.product_id);

    let outcome = match args.variation_id {
        Some(variation_id) => {
            backend
                .sync()
                .add_variation(product_id, VariationId::from_raw(variation_id), args.quantity)
                .await
        }
        None => backend.sync().add_item(product_id, args.quantity).await,
    };

    backend.persist_session().await?;

    outcome.map_err(|error| format!("failed to add product {product_id}: {error}"))?;

    let cart = backend.settle().await;

    println!("{}", render_cart(cart.as_ref()));

    Ok(())
}

pub(crate) async fn update(args: UpdateItemArgs) -> Result<(), String> {
    let backend = Backend::connect(&args.backend).await?;

    let outcome = backend
        .sync()
        .update_quantities(vec![QuantityUpdate {
            key: args.key.clone(),
            quantity: args.quantity,
        }])
        .await;

    backend.persist_session().await?;

    outcome.map_err(|error| format!("failed to update line {}: {error}", args.key))?;

    let cart = backend.settle().await;

    println!("{}", render_cart(cart.as_ref()));

    Ok(())
}

pub(super) fn render_cart(cart: Option<&Cart>) -> String {
    let Some(cart) = cart else {
        return "cart is empty".to_string();
    };

    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| {
            let variation = item
                .variation_id()
                .map(|id| format!(" (variation {id})"))
                .unwrap_or_default();

            format!(
                "{}  {} x {}{variation}  {}",
                item.key(),
                item.quantity(),
                item.name(),
                item.line_total()
            )
        })
        .collect();

    lines.push(format!("items: {}", cart.total_quantity()));
    lines.push(format!("subtotal: {}", cart.subtotal()));
    lines.push(format!("total: {}", cart.total()));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use storefront::cart::CartItem;

    use super::*;

    #[test]
    fn empty_cart() {
        assert_eq!(render_cart(None), "cart is empty");
    }

    #[test]
    fn lines_and_totals() {
        let cart = Cart::new(
            vec![
                CartItem::new(
                    "a1",
                    ProductId::from_raw(42),
                    None,
                    "Hoodie",
                    NonZeroU32::MIN.saturating_add(1),
                    Decimal::from(200),
                ),
                CartItem::new(
                    "b2",
                    ProductId::from_raw(7),
                    Some(VariationId::from_raw(71)),
                    "Cap",
                    NonZeroU32::MIN,
                    Decimal::from(50),
                ),
            ],
            None,
            Some(Decimal::from(290)),
        );

        assert_eq!(
            render_cart(Some(&cart)),
            "a1  2 x Hoodie  200\n\
             b2  1 x Cap (variation 71)  50\n\
             items: 3\n\
             subtotal: 250\n\
             total: 290"
        );
    }
}
