//! Gateway errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by a [`CartGateway`](super::CartGateway).
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Every attempt timed out.
    #[error("request timed out after {attempts} attempt(s)")]
    Timeout {
        /// Number of attempts made
        attempts: u32,
    },

    /// The request could not be sent or the response could not be read.
    #[error("http error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// Response status
        status: StatusCode,

        /// Response body, possibly empty.
        body: String,
    },

    /// The backend answered with a GraphQL `errors` array.
    #[error("{}", .0.join("; "))]
    Backend(Vec<String>),

    /// The response body was not the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Whether the failure was a timeout and the request may be retried as is.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout { attempts: 1 }
        } else if error.is_decode() {
            Self::InvalidResponse(error.to_string())
        } else {
            Self::Network(error)
        }
    }
}
