//! Checkout formatting

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    checkout::{Address, CheckoutSubmission},
    ids::IdempotencyToken,
};

/// Payment method used when the form does not name one.
pub const DEFAULT_PAYMENT_METHOD: &str = "cod";

/// Billing fields that must be present to place an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillingField {
    /// `firstName`
    FirstName,

    /// `lastName`
    LastName,

    /// `address1`
    Address1,

    /// `city`
    City,

    /// `postcode`
    Postcode,

    /// `email`
    Email,

    /// `phone`
    Phone,
}

impl BillingField {
    /// Every required field, in form order.
    pub const REQUIRED: [Self; 7] = [
        Self::FirstName,
        Self::LastName,
        Self::Address1,
        Self::City,
        Self::Postcode,
        Self::Email,
        Self::Phone,
    ];

    /// Backend field name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address1 => "address1",
            Self::City => "city",
            Self::Postcode => "postcode",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl Display for BillingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Form input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required billing fields: {}", join_fields(.missing))]
pub struct ValidationError {
    missing: Vec<BillingField>,
}

impl ValidationError {
    /// Missing fields, in form order.
    pub fn missing(&self) -> &[BillingField] {
        &self.missing
    }
}

pub(crate) fn join_fields(fields: &[BillingField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Address as entered in the checkout form. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressInput {
    /// First name
    pub first_name: Option<String>,

    /// Last name
    pub last_name: Option<String>,

    /// Street address
    pub address1: Option<String>,

    /// Second address line
    pub address2: Option<String>,

    /// City
    pub city: Option<String>,

    /// Postcode
    pub postcode: Option<String>,

    /// Email
    pub email: Option<String>,

    /// Phone
    pub phone: Option<String>,

    /// Company
    pub company: Option<String>,

    /// Country code
    pub country: Option<String>,

    /// State or county
    pub state: Option<String>,
}

/// Checkout form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    /// Billing address
    pub billing: AddressInput,

    /// Separate shipping address; billing is used when absent.
    pub shipping: Option<AddressInput>,

    /// Payment gateway id, defaults to [`DEFAULT_PAYMENT_METHOD`].
    pub payment_method: Option<String>,
}

/// Validates form input and builds a submission with a fresh idempotency token.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every required billing field that is
/// missing or blank. No submission is built in that case.
pub fn to_checkout_submission(input: FormInput) -> Result<CheckoutSubmission, ValidationError> {
    let billing = billing_address(input.billing)?;

    let (shipping, ship_to_different_address) = match input.shipping {
        Some(shipping) => (shipping_address(shipping, &billing), true),
        None => (billing.clone(), false),
    };

    Ok(CheckoutSubmission {
        idempotency_token: IdempotencyToken::new(),
        billing,
        shipping,
        ship_to_different_address,
        payment_method: present(input.payment_method)
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        is_paid: false,
        transaction_id: String::new(),
    })
}

fn billing_address(input: AddressInput) -> Result<Address, ValidationError> {
    let mut missing = Vec::new();

    let mut require = |value: Option<String>, field: BillingField| {
        present(value).unwrap_or_else(|| {
            missing.push(field);
            String::new()
        })
    };

    let address = Address {
        first_name: require(input.first_name, BillingField::FirstName),
        last_name: require(input.last_name, BillingField::LastName),
        address1: require(input.address1, BillingField::Address1),
        city: require(input.city, BillingField::City),
        postcode: require(input.postcode, BillingField::Postcode),
        email: require(input.email, BillingField::Email),
        phone: require(input.phone, BillingField::Phone),
        address2: present(input.address2),
        company: present(input.company),
        country: present(input.country),
        state: present(input.state),
    };

    if missing.is_empty() {
        Ok(address)
    } else {
        Err(ValidationError { missing })
    }
}

/// Shipping fields left blank fall back to the billing address.
fn shipping_address(input: AddressInput, billing: &Address) -> Address {
    let or_billing = |value: Option<String>, fallback: &String| {
        present(value).unwrap_or_else(|| fallback.clone())
    };

    Address {
        first_name: or_billing(input.first_name, &billing.first_name),
        last_name: or_billing(input.last_name, &billing.last_name),
        address1: or_billing(input.address1, &billing.address1),
        city: or_billing(input.city, &billing.city),
        postcode: or_billing(input.postcode, &billing.postcode),
        email: or_billing(input.email, &billing.email),
        phone: or_billing(input.phone, &billing.phone),
        address2: present(input.address2).or_else(|| billing.address2.clone()),
        company: present(input.company).or_else(|| billing.company.clone()),
        country: present(input.country).or_else(|| billing.country.clone()),
        state: present(input.state).or_else(|| billing.state.clone()),
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
