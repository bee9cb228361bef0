//! Checkout submission

use serde::Serialize;

use crate::ids::IdempotencyToken;

/// Validated billing or shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) address1: String,
    pub(crate) city: String,
    pub(crate) postcode: String,
    pub(crate) email: String,
    pub(crate) phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) address2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) company: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) state: Option<String>,
}

impl Address {
    /// First name
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Last name
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Street address
    pub fn address1(&self) -> &str {
        &self.address1
    }

    /// City
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Postcode
    pub fn postcode(&self) -> &str {
        &self.postcode
    }

    /// Email
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Second address line
    pub fn address2(&self) -> Option<&str> {
        self.address2.as_deref()
    }

    /// Company
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Country code
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// State or county
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }
}

/// Order placement request.
///
/// Built once per submit attempt by
/// [`to_checkout_submission`](crate::formatter::to_checkout_submission) and
/// never modified afterwards. Serializes to the backend's `CheckoutInput`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSubmission {
    #[serde(rename = "clientMutationId")]
    pub(crate) idempotency_token: IdempotencyToken,
    pub(crate) billing: Address,
    pub(crate) shipping: Address,
    pub(crate) ship_to_different_address: bool,
    pub(crate) payment_method: String,
    pub(crate) is_paid: bool,
    pub(crate) transaction_id: String,
}

impl CheckoutSubmission {
    /// Token identifying this submission to the backend.
    pub fn idempotency_token(&self) -> IdempotencyToken {
        self.idempotency_token
    }

    /// Billing address
    pub fn billing(&self) -> &Address {
        &self.billing
    }

    /// Shipping address; a copy of billing unless shipping differs.
    pub fn shipping(&self) -> &Address {
        &self.shipping
    }

    /// Whether a separate shipping address was supplied.
    pub fn ship_to_different_address(&self) -> bool {
        self.ship_to_different_address
    }

    /// Payment gateway id, e.g. `"cod"`.
    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    /// Whether payment was already taken.
    pub fn is_paid(&self) -> bool {
        self.is_paid
    }

    /// Payment transaction id, empty for unpaid orders.
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }
}
