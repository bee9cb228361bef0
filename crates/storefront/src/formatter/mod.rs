//! Formatter
//!
//! Pure translations between backend response shapes, form input and the
//! client's own types.

mod cart;
mod checkout;

pub use cart::to_cart;
pub use checkout::*;

pub(crate) use checkout::join_fields;
