//! Remote cart gateway
//!
//! The boundary to the commerce backend. Every call returns a
//! [`GatewayError`] on failure; nothing panics across this boundary.

mod config;
mod errors;
mod graphql;
mod queries;
pub mod requests;
pub mod responses;

use async_trait::async_trait;
use mockall::automock;

use crate::checkout::CheckoutSubmission;

pub use config::*;
pub use errors::GatewayError;
pub use graphql::{GraphqlCartGateway, SESSION_HEADER};
pub use requests::{AddToCart, QuantityUpdate, UpdateItemQuantities};
pub use responses::{RawCartResponse, RawMutationResponse, RawOrderResponse};

/// Remote cart backend: reads the session cart, mutates it and places orders.
#[automock]
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Reads the current session cart. Idempotent.
    async fn fetch_cart(&self) -> Result<RawCartResponse, GatewayError>;

    /// Adds a product to the session cart.
    ///
    /// Not idempotent: the backend deduplicates only requests carrying the
    /// same idempotency token.
    async fn add_item(&self, input: AddToCart) -> Result<RawMutationResponse, GatewayError>;

    /// Sets quantities of existing cart lines; zero removes a line.
    async fn update_item_quantities(
        &self,
        input: UpdateItemQuantities,
    ) -> Result<RawMutationResponse, GatewayError>;

    /// Places an order from the session cart.
    ///
    /// Only a retry with the same submission (and therefore the same token)
    /// is safe; a new token risks a duplicate order.
    async fn submit_checkout(
        &self,
        submission: &CheckoutSubmission,
    ) -> Result<RawOrderResponse, GatewayError>;
}
