//! Cart synchronization
//!
//! Keeps a [`CartStore`] in step with the backend session cart. Mutations are
//! followed by an immediate re-read and, after a settle delay, a second
//! background re-read, because the backend does not always reflect a mutation
//! in the same response cycle. The delayed read is a workaround for missing
//! consistency signals: it makes the store eventually consistent, not correct
//! at any particular instant.

use std::{fmt, num::NonZeroU32, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{
    cart::Cart,
    formatter::to_cart,
    gateway::{AddToCart, CartGateway, GatewayError, QuantityUpdate, UpdateItemQuantities},
    ids::{ProductId, VariationId},
    store::CartStore,
};

/// Default wait before the background reconciliation read.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// When to re-read the cart after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationPolicy {
    /// Wait before the background read; `None` disables it.
    pub settle_delay: Option<Duration>,
}

impl ReconciliationPolicy {
    /// Reconcile after the given delay.
    #[must_use]
    pub const fn after(delay: Duration) -> Self {
        Self {
            settle_delay: Some(delay),
        }
    }

    /// Never schedule background reads.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { settle_delay: None }
    }
}

impl Default for ReconciliationPolicy {
    fn default() -> Self {
        Self::after(DEFAULT_SETTLE_DELAY)
    }
}

/// Synchronizes the cart store with the backend.
#[derive(Clone)]
pub struct CartSync {
    gateway: Arc<dyn CartGateway>,
    store: CartStore,
    policy: ReconciliationPolicy,
}

impl fmt::Debug for CartSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartSync")
            .field("store", &self.store)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CartSync {
    /// Creates a synchronizer over the given gateway and store.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn CartGateway>,
        store: CartStore,
        policy: ReconciliationPolicy,
    ) -> Self {
        Self {
            gateway,
            store,
            policy,
        }
    }

    /// The store this synchronizer writes to.
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub(crate) fn gateway(&self) -> &Arc<dyn CartGateway> {
        &self.gateway
    }

    /// Reads the cart from the backend, raising the loading flag meanwhile.
    ///
    /// Returns the store's cart afterwards, which may be newer than this
    /// response if another one overtook it.
    ///
    /// # Errors
    ///
    /// Returns the gateway error; the store is left unchanged.
    pub async fn refresh(&self) -> Result<Option<Cart>, GatewayError> {
        let _loading = self.store.track_loading();

        self.fetch_and_apply().await
    }

    /// Adds `quantity` units of a product.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the mutation or of the follow-up read.
    pub async fn add_item(
        &self,
        product_id: ProductId,
        quantity: NonZeroU32,
    ) -> Result<Option<Cart>, GatewayError> {
        self.add(AddToCart::new(product_id, quantity)).await
    }

    /// Adds `quantity` units of a product variation.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the mutation or of the follow-up read.
    pub async fn add_variation(
        &self,
        product_id: ProductId,
        variation_id: VariationId,
        quantity: NonZeroU32,
    ) -> Result<Option<Cart>, GatewayError> {
        self.add(AddToCart::new(product_id, quantity).with_variation(variation_id))
            .await
    }

    /// Sets quantities of existing lines; zero removes a line.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the mutation or of the follow-up read.
    pub async fn update_quantities(
        &self,
        updates: Vec<QuantityUpdate>,
    ) -> Result<Option<Cart>, GatewayError> {
        let _loading = self.store.track_loading();

        let input = UpdateItemQuantities::new(updates);

        debug!(
            token = %input.idempotency_token,
            lines = input.items.len(),
            "updating cart quantities"
        );

        self.gateway.update_item_quantities(input).await?;

        self.schedule_reconciliation();
        self.fetch_and_apply().await
    }

    /// Re-reads the cart in the background.
    ///
    /// Does not touch the loading flag. Failures are logged and dropped; the
    /// next read corrects the store.
    pub async fn reconcile(&self) {
        if let Err(error) = self.fetch_and_apply().await {
            warn!(%error, "cart reconciliation failed");
        }
    }

    /// Spawns a reconciliation read after the policy's settle delay.
    ///
    /// Fire and forget. Does nothing when reconciliation is disabled.
    pub fn schedule_reconciliation(&self) {
        let Some(delay) = self.policy.settle_delay else {
            return;
        };

        let sync = self.clone();

        tokio::spawn(async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }

            sync.reconcile().await;
        });
    }

    async fn add(&self, input: AddToCart) -> Result<Option<Cart>, GatewayError> {
        let _loading = self.store.track_loading();

        debug!(
            token = %input.idempotency_token,
            product = %input.product_id,
            quantity = input.quantity.get(),
            "adding item to cart"
        );

        self.gateway.add_item(input).await?;

        self.schedule_reconciliation();
        self.fetch_and_apply().await
    }

    async fn fetch_and_apply(&self) -> Result<Option<Cart>, GatewayError> {
        let ticket = self.store.begin_request();
        let response = self.gateway.fetch_cart().await?;

        if self.store.apply(ticket, to_cart(response)) {
            debug!(sequence = ticket.sequence(), "applied cart response");
        }

        Ok(self.store.cart())
    }
}
