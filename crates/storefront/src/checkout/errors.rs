//! Checkout errors.

use thiserror::Error;

use crate::{
    formatter::{BillingField, ValidationError, join_fields},
    gateway::GatewayError,
};

/// Why a submission was refused without being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictReason {
    /// Another submission has not resolved yet.
    #[error("a submission is already in flight")]
    InFlight,

    /// The order was already placed.
    #[error("the order has already been completed")]
    Completed,
}

/// Errors returned by [`CheckoutController::submit`](super::CheckoutController::submit).
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form was incomplete; nothing was sent.
    #[error("invalid checkout details")]
    Validation(#[from] ValidationError),

    /// The backend could not be reached or refused the order.
    #[error("checkout request failed")]
    Gateway(#[from] GatewayError),

    /// The submission was refused as a no-op.
    #[error("checkout rejected: {0}")]
    Conflict(ConflictReason),
}

/// Error shown to the shopper, kept in [`UiState`](super::UiState).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Transport failure, timeout or unexpected HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the request.
    #[error("{0}")]
    Backend(String),

    /// Required form fields are missing.
    #[error("missing required billing fields: {}", join_fields(.0))]
    Validation(Vec<BillingField>),

    /// A submission was refused as a no-op.
    #[error("{0}")]
    Conflict(ConflictReason),
}

impl From<&GatewayError> for ErrorKind {
    fn from(error: &GatewayError) -> Self {
        match error {
            GatewayError::Timeout { .. }
            | GatewayError::Network(_)
            | GatewayError::Status { .. } => Self::Network(error.to_string()),
            GatewayError::Backend(messages) => Self::Backend(messages.join("; ")),
            GatewayError::InvalidResponse(message) => Self::Backend(message.clone()),
        }
    }
}

impl From<&CheckoutError> for ErrorKind {
    fn from(error: &CheckoutError) -> Self {
        match error {
            CheckoutError::Validation(error) => Self::Validation(error.missing().to_vec()),
            CheckoutError::Gateway(error) => Self::from(error),
            CheckoutError::Conflict(reason) => Self::Conflict(*reason),
        }
    }
}
