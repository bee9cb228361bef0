use clap::{Parser, Subcommand};

use crate::config::logging::LoggingConfig;

mod cart;
mod catalog;
mod checkout;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart and checkout client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the session cart
    Cart(cart::ShowCartArgs),

    /// Add a product to the cart
    Add(cart::AddItemArgs),

    /// Set the quantity of a cart line (0 removes it)
    Update(cart::UpdateItemArgs),

    /// Place an order from the session cart
    Checkout(checkout::CheckoutArgs),

    /// Filter and sort a product listing file
    Filter(catalog::FilterArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Cart(args) => cart::show(args).await,
            Commands::Add(args) => cart::add(args).await,
            Commands::Update(args) => cart::update(args).await,
            Commands::Checkout(args) => checkout::run(args).await,
            Commands::Filter(args) => catalog::run(args).await,
        }
    }
}
