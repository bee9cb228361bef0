//! Checkout UI state

use super::ErrorKind;

/// Position in the checkout flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CheckoutPhase {
    /// Waiting for the shopper to submit.
    #[default]
    Idle,

    /// An order request is in flight.
    Submitting,

    /// The order was placed. Terminal.
    Completed,
}

/// State the checkout view renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Current phase
    pub phase: CheckoutPhase,

    /// Whether an order request is in flight.
    pub loading: bool,

    /// Error from the last attempt, cleared when the next one starts.
    pub error: Option<ErrorKind>,

    /// Whether the order was placed.
    pub order_completed: bool,
}

/// Order placed by a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Backend order id, when reported.
    pub order_id: Option<i64>,

    /// Order number shown to the shopper, when reported.
    pub order_number: Option<String>,

    /// Order status, e.g. `"PROCESSING"`.
    pub status: Option<String>,
}
