//! Backend connection

use std::{path::PathBuf, sync::Arc};

use storefront::{
    cart::Cart,
    gateway::GraphqlCartGateway,
    store::CartStore,
    sync::{CartSync, ReconciliationPolicy},
};
use tokio::time::sleep;
use tracing::debug;

use crate::{config::backend::BackendConfig, session};

/// Gateway and cart state for one CLI invocation.
#[derive(Debug)]
pub(crate) struct Backend {
    gateway: GraphqlCartGateway,
    sync: CartSync,
    reconciliation: ReconciliationPolicy,
    session_file: Option<PathBuf>,
}

impl Backend {
    /// Connects to the configured backend, resuming a saved session if any.
    pub(crate) async fn connect(config: &BackendConfig) -> Result<Self, String> {
        let mut gateway = GraphqlCartGateway::new(config.gateway());

        if let Some(path) = &config.session_file
            && let Some(token) = session::load(path).await?
        {
            debug!(path = %path.display(), "resuming saved cart session");

            gateway = gateway.with_session(token);
        }

        // The process may exit before a spawned re-read fires, so
        // reconciliation runs in the foreground through `settle`.
        let sync = CartSync::new(
            Arc::new(gateway.clone()),
            CartStore::new(),
            ReconciliationPolicy::disabled(),
        );

        Ok(Self {
            gateway,
            sync,
            reconciliation: config.reconciliation(),
            session_file: config.session_file.clone(),
        })
    }

    pub(crate) fn sync(&self) -> &CartSync {
        &self.sync
    }

    /// Waits out the settle delay, then re-reads the cart.
    pub(crate) async fn settle(&self) -> Option<Cart> {
        if let Some(delay) = self.reconciliation.settle_delay {
            sleep(delay).await;

            self.sync.reconcile().await;
        }

        self.sync.store().cart()
    }

    /// Saves the current session token, if a session file is configured.
    pub(crate) async fn persist_session(&self) -> Result<(), String> {
        let (Some(path), Some(token)) = (&self.session_file, self.gateway.session()) else {
            return Ok(());
        };

        session::save(path, &token).await
    }
}
