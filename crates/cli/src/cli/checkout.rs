use std::path::{Path, PathBuf};

use clap::Args;
use storefront::{
    checkout::{CheckoutController, ErrorKind},
    formatter::FormInput,
};
use tokio::fs;

use crate::{backend::Backend, config::backend::BackendConfig};

use super::cart::render_cart;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    #[command(flatten)]
    backend: BackendConfig,

    /// YAML file with the billing address, optional shipping address and payment method
    #[arg(long)]
    order: PathBuf,
}

pub(crate) async fn run(args: CheckoutArgs) -> Result<(), String> {
    let input = read_order(&args.order).await?;
    let backend = Backend::connect(&args.backend).await?;
    let controller = CheckoutController::new(backend.sync().clone());

    let outcome = controller.submit(input).await;

    backend.persist_session().await?;

    let confirmation =
        outcome.map_err(|error| format!("checkout failed: {}", ErrorKind::from(&error)))?;

    if let Some(order_id) = confirmation.order_id {
        println!("order_id: {order_id}");
    }
    if let Some(order_number) = &confirmation.order_number {
        println!("order_number: {order_number}");
    }
    if let Some(status) = &confirmation.status {
        println!("status: {status}");
    }

    let cart = backend.settle().await;

    println!("{}", render_cart(cart.as_ref()));

    Ok(())
}

async fn read_order(path: &Path) -> Result<FormInput, String> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|error| format!("failed to read order file {}: {error}", path.display()))?;

    parse_order(&contents)
        .map_err(|error| format!("invalid order file {}: {error}", path.display()))
}

fn parse_order(contents: &str) -> Result<FormInput, serde_norway::Error> {
    serde_norway::from_str(contents)
}
