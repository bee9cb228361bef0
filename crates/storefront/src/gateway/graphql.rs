//! GraphQL gateway over HTTP.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::{Client, header::HeaderMap};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{
    checkout::CheckoutSubmission,
    gateway::{
        CartGateway, GatewayConfig, GatewayError,
        queries::{ADD_TO_CART, CHECKOUT, GET_CART, UPDATE_ITEM_QUANTITIES},
        requests::{AddToCart, UpdateItemQuantities},
        responses::{RawCartResponse, RawMutationResponse, RawOrderResponse},
    },
};

/// Header carrying the backend cart session token.
pub const SESSION_HEADER: &str = "woocommerce-session";

/// [`CartGateway`] that talks to a WooGraphQL-compatible endpoint.
///
/// The backend identifies the shopper's cart by a session token it returns in
/// the [`SESSION_HEADER`] response header. The gateway keeps the latest token
/// and sends it back on every request; clones share the same session.
#[derive(Debug, Clone)]
pub struct GraphqlCartGateway {
    config: GatewayConfig,
    http: Client,
    session: Arc<RwLock<Option<String>>>,
}

impl GraphqlCartGateway {
    /// Create a new gateway from the given configuration.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Resumes an existing backend session.
    #[must_use]
    pub fn with_session(self, token: impl Into<String>) -> Self {
        self.set_session(Some(token.into()));
        self
    }

    /// Returns the current session token, if the backend has issued one.
    pub fn session(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forgets the current session; the backend will start a new one.
    pub fn reset_session(&self) {
        self.set_session(None);
    }

    fn set_session(&self, token: Option<String>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    fn remember_session(&self, headers: &HeaderMap) {
        let Some(token) = headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|token| !token.is_empty())
        else {
            return;
        };

        if self.session().as_deref() != Some(token) {
            debug!("backend issued a new cart session");

            self.set_session(Some(token.to_string()));
        }
    }

    async fn execute<V, D>(
        &self,
        operation: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<D, GatewayError>
    where
        V: Serialize + Send + Sync,
        D: DeserializeOwned,
    {
        let request = GraphqlRequest {
            operation_name: operation,
            query,
            variables,
        };

        let mut attempt = 1;

        loop {
            match self.send(&request).await {
                Err(error) if error.is_timeout() => {
                    if !self.config.retry.allows_retry_after(attempt) {
                        warn!(operation, attempt, "request timed out, giving up");

                        return Err(GatewayError::Timeout { attempts: attempt });
                    }

                    warn!(operation, attempt, "request timed out, retrying");

                    sleep(self.config.retry.backoff).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn send<V, D>(&self, request: &GraphqlRequest<'_, V>) -> Result<D, GatewayError>
    where
        V: Serialize + Sync,
        D: DeserializeOwned,
    {
        debug!(operation = request.operation_name, "sending request");

        let mut builder = self
            .http
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .json(request);

        if let Some(token) = self.session() {
            builder = builder.header(SESSION_HEADER, format!("Session {token}"));
        }

        let response = builder.send().await?;

        self.remember_session(response.headers());

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(GatewayError::Status { status, body });
        }

        let envelope: GraphqlResponse<D> = response.json().await?;

        envelope.into_data()
    }
}

#[async_trait]
impl CartGateway for GraphqlCartGateway {
    async fn fetch_cart(&self) -> Result<RawCartResponse, GatewayError> {
        self.execute("GetCart", GET_CART, NoVariables {}).await
    }

    async fn add_item(&self, input: AddToCart) -> Result<RawMutationResponse, GatewayError> {
        let data: AddToCartData = self
            .execute("AddToCart", ADD_TO_CART, Input { input: &input })
            .await?;

        required(data.add_to_cart, "addToCart")
    }

    async fn update_item_quantities(
        &self,
        input: UpdateItemQuantities,
    ) -> Result<RawMutationResponse, GatewayError> {
        let data: UpdateItemQuantitiesData = self
            .execute(
                "UpdateItemQuantities",
                UPDATE_ITEM_QUANTITIES,
                Input { input: &input },
            )
            .await?;

        required(data.update_item_quantities, "updateItemQuantities")
    }

    async fn submit_checkout(
        &self,
        submission: &CheckoutSubmission,
    ) -> Result<RawOrderResponse, GatewayError> {
        let data: CheckoutData = self
            .execute("Checkout", CHECKOUT, Input { input: submission })
            .await?;

        required(data.checkout, "checkout")
    }
}

fn required<T>(field: Option<T>, name: &str) -> Result<T, GatewayError> {
    field.ok_or_else(|| GatewayError::InvalidResponse(format!("response has no `{name}` field")))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a, V> {
    operation_name: &'a str,
    query: &'a str,
    variables: V,
}

#[derive(Debug, Serialize)]
struct NoVariables {}

#[derive(Debug, Serialize)]
struct Input<'a, T> {
    input: &'a T,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<D> {
    data: Option<D>,

    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

impl<D> GraphqlResponse<D> {
    fn into_data(self) -> Result<D, GatewayError> {
        if !self.errors.is_empty() {
            return Err(GatewayError::Backend(
                self.errors.into_iter().map(|error| error.message).collect(),
            ));
        }

        self.data
            .ok_or_else(|| GatewayError::InvalidResponse("response has no data".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartData {
    #[serde(default)]
    add_to_cart: Option<RawMutationResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateItemQuantitiesData {
    #[serde(default)]
    update_item_quantities: Option<RawMutationResponse>,
}

#[derive(Debug, Deserialize)]
struct CheckoutData {
    #[serde(default)]
    checkout: Option<RawOrderResponse>,
}
