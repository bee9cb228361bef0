//! Storefront
//!
//! Client-side cart and checkout state for a headless commerce backend: a
//! cart store kept in step with the remote session cart, the checkout state
//! machine, and product listing filters.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod formatter;
pub mod gateway;
pub mod ids;
pub mod prices;
pub mod store;
pub mod sync;

#[cfg(test)]
mod test;
