//! Checkout
//!
//! The checkout flow: form input is validated into a [`CheckoutSubmission`],
//! sent once per attempt, and the outcome published as [`UiState`].

mod controller;
mod errors;
mod state;
mod submission;

pub use controller::CheckoutController;
pub use errors::{CheckoutError, ConflictReason, ErrorKind};
pub use state::{CheckoutPhase, OrderConfirmation, UiState};
pub use submission::{Address, CheckoutSubmission};
