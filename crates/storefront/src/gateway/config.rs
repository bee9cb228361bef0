//! Gateway configuration.

use std::time::Duration;

/// Default per-attempt request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of attempts for a timed out request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait between timed out attempts.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Connection settings for [`GraphqlCartGateway`](super::GraphqlCartGateway).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// GraphQL endpoint, e.g. `"https://shop.example.com/graphql"`.
    pub endpoint: String,

    /// Timeout for a single attempt.
    pub timeout: Duration,

    /// Retry behaviour for timed out attempts.
    pub retry: RetryPolicy,
}

impl GatewayConfig {
    /// Creates a config for the endpoint with default timeout and retries.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Retry behaviour for timed out requests.
///
/// Only timeouts are retried, always with the identical payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Zero is treated as one.
    pub max_attempts: u32,

    /// Wait between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    pub(crate) fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}
