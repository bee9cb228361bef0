//! Backend Config

use std::{path::PathBuf, time::Duration};

use clap::Args;
use storefront::{
    gateway::{DEFAULT_RETRY_BACKOFF, GatewayConfig, RetryPolicy},
    sync::ReconciliationPolicy,
};

/// Commerce backend connection settings.
#[derive(Debug, Clone, Args)]
pub struct BackendConfig {
    /// GraphQL endpoint of the commerce backend
    #[arg(long, env = "STOREFRONT_GRAPHQL_URL")]
    pub endpoint: String,

    /// Timeout for a single request attempt, in milliseconds
    #[arg(long, env = "STOREFRONT_TIMEOUT_MS", default_value_t = 10_000_u64)]
    pub timeout_ms: u64,

    /// Attempts for a timed out request, including the first
    #[arg(long, env = "STOREFRONT_MAX_ATTEMPTS", default_value_t = 3_u32)]
    pub max_attempts: u32,

    /// Wait before re-reading the cart after a mutation, in milliseconds (0 disables)
    #[arg(long, env = "STOREFRONT_SETTLE_DELAY_MS", default_value_t = 2_000_u64)]
    pub settle_delay_ms: u64,

    /// File the cart session token is read from and saved to
    #[arg(long, env = "STOREFRONT_SESSION_FILE")]
    pub session_file: Option<PathBuf>,
}

impl BackendConfig {
    /// Gateway settings
    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig {
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            retry: RetryPolicy {
                max_attempts: self.max_attempts,
                backoff: DEFAULT_RETRY_BACKOFF,
            },
        }
    }

    /// Post-mutation re-read settings
    pub fn reconciliation(&self) -> ReconciliationPolicy {
        if self.settle_delay_ms == 0 {
            ReconciliationPolicy::disabled()
        } else {
            ReconciliationPolicy::after(Duration::from_millis(self.settle_delay_ms))
        }
    }
}
