//! Test fixtures shared across modules.


use crate::{
    checkout::CheckoutSubmission,
    formatter::{AddressInput, FormInput, ValidationError, to_checkout_submission},
    gateway::responses::{
        RawCart, RawCartContents, RawCartLine, RawCartResponse, RawProductEdge, RawProductNode,
    },
};

pub(crate) fn raw_line(product: i64, quantity: u32, total: &str) -> RawCartLine {
    RawCartLine {
        key: format!("line-{product}"),
        product: Some(RawProductEdge {
            node: RawProductNode {
                database_id: product,
                name: format!("Product {product}"),
            },
        }),
        variation: None,
        quantity: Some(quantity),
        total: Some(total.to_string()),
    }
}

pub(crate) fn raw_cart(lines: Vec<RawCartLine>) -> RawCartResponse {
    RawCartResponse {
        cart: Some(RawCart {
            contents: Some(RawCartContents { nodes: lines }),
            subtotal: None,
            total: None,
        }),
    }
}

pub(crate) fn empty_raw_cart() -> RawCartResponse {
    raw_cart(Vec::new())
}

pub(crate) fn billing_input() -> AddressInput {
    AddressInput {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        address1: Some("12 Analytical Row".to_string()),
        address2: Some("Flat 2".to_string()),
        city: Some("Oslo".to_string()),
        postcode: Some("0150".to_string()),
        email: Some("ada@example.com".to_string()),
        phone: Some("+47 555 01 234".to_string()),
        company: None,
        country: Some("NO".to_string()),
        state: None,
    }
}

pub(crate) fn form_input() -> FormInput {
    FormInput {
        billing: billing_input(),
        shipping: None,
        payment_method: None,
    }
}

pub(crate) fn valid_submission() -> Result<CheckoutSubmission, ValidationError> {
    to_checkout_submission(form_input())
}
