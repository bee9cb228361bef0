//! Checkout controller

use std::{fmt, sync::Arc};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    cart::Cart,
    formatter::{FormInput, to_checkout_submission},
    gateway::{GatewayError, RawOrderResponse},
    sync::CartSync,
};

use super::{CheckoutError, CheckoutPhase, ConflictReason, ErrorKind, OrderConfirmation, UiState};

/// Drives the checkout state machine.
///
/// `Idle` moves to `Submitting` on a valid submit. A successful order moves
/// to `Completed`, which is terminal; a failure returns to `Idle` with the
/// error set. Only one submission is ever in flight.
#[derive(Clone)]
pub struct CheckoutController {
    sync: CartSync,
    state: Arc<watch::Sender<UiState>>,
}

impl fmt::Debug for CheckoutController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutController")
            .field("sync", &self.sync)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl CheckoutController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(sync: CartSync) -> Self {
        Self {
            sync,
            state: Arc::new(watch::Sender::new(UiState::default())),
        }
    }

    /// Returns a copy of the current UI state.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Subscribes to UI state changes.
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// The cart being checked out, for display.
    pub fn cart(&self) -> Option<Cart> {
        self.sync.store().cart()
    }

    /// Validates the form and places the order.
    ///
    /// The phase check and the move to `Submitting` happen in one atomic
    /// update, so concurrent calls cannot both get through. A failed attempt
    /// is never retried with a new token here; the caller submits again.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Conflict`] while another submission is in flight or
    ///   after the order was placed. The state is left untouched.
    /// - [`CheckoutError::Validation`] when required fields are missing.
    ///   Nothing is sent.
    /// - [`CheckoutError::Gateway`] when the backend could not be reached or
    ///   refused the order.
    pub async fn submit(&self, input: FormInput) -> Result<OrderConfirmation, CheckoutError> {
        let validated = to_checkout_submission(input);
        let mut conflict = None;

        self.state.send_if_modified(|state| match state.phase {
            CheckoutPhase::Submitting => {
                conflict = Some(ConflictReason::InFlight);
                false
            }
            CheckoutPhase::Completed => {
                conflict = Some(ConflictReason::Completed);
                false
            }
            CheckoutPhase::Idle => {
                let next = match &validated {
                    Ok(_) => UiState {
                        phase: CheckoutPhase::Submitting,
                        loading: true,
                        error: None,
                        order_completed: false,
                    },
                    Err(error) => UiState {
                        error: Some(ErrorKind::Validation(error.missing().to_vec())),
                        ..state.clone()
                    },
                };

                if *state == next {
                    return false;
                }

                *state = next;

                true
            }
        });

        if let Some(reason) = conflict {
            debug!(%reason, "checkout submit rejected");

            return Err(CheckoutError::Conflict(reason));
        }

        let submission = validated?;
        let guard = SubmittingGuard {
            state: Arc::clone(&self.state),
        };

        debug!(token = %submission.idempotency_token(), "submitting order");

        let outcome = self
            .sync
            .gateway()
            .submit_checkout(&submission)
            .await
            .and_then(confirm);

        match &outcome {
            Ok(confirmation) => {
                info!(
                    order = ?confirmation.order_id,
                    number = ?confirmation.order_number,
                    "order placed"
                );

                self.sync.store().clear();
                self.state.send_replace(UiState {
                    phase: CheckoutPhase::Completed,
                    loading: false,
                    error: None,
                    order_completed: true,
                });
            }
            Err(error) => {
                warn!(%error, "checkout failed");

                self.state.send_replace(UiState {
                    phase: CheckoutPhase::Idle,
                    loading: false,
                    error: Some(ErrorKind::from(error)),
                    order_completed: false,
                });
            }
        }

        drop(guard);

        self.sync.schedule_reconciliation();

        outcome.map_err(CheckoutError::from)
    }
}

fn confirm(response: RawOrderResponse) -> Result<OrderConfirmation, GatewayError> {
    if !response.is_success() {
        let result = response.result.as_deref().unwrap_or("missing");

        return Err(GatewayError::Backend(vec![format!(
            "checkout result: {result}"
        )]));
    }

    let order = response.order.unwrap_or_default();

    Ok(OrderConfirmation {
        order_id: order.database_id,
        order_number: order.order_number,
        status: order.status,
    })
}

/// Returns the controller to `Idle` if a submission is abandoned mid-flight.
struct SubmittingGuard {
    state: Arc<watch::Sender<UiState>>,
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if state.phase != CheckoutPhase::Submitting {
                return false;
            }

            state.phase = CheckoutPhase::Idle;
            state.loading = false;

            true
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use testresult::TestResult;
    use tokio::{sync::Notify, time::sleep};

    use crate::{
        checkout::CheckoutSubmission,
        formatter::{BillingField, to_cart},
        gateway::{
            AddToCart, CartGateway, MockCartGateway, RawCartResponse, RawMutationResponse,
            UpdateItemQuantities, responses::RawOrder,
        },
        store::CartStore,
        sync::{DEFAULT_SETTLE_DELAY, ReconciliationPolicy},
        test::{empty_raw_cart, form_input, raw_cart, raw_line},
    };

    use super::*;

    fn placed_order() -> RawOrderResponse {
        RawOrderResponse {
            client_mutation_id: None,
            result: Some("success".to_string()),
            order: Some(RawOrder {
                database_id: Some(501),
                order_number: Some("501".to_string()),
                status: Some("PROCESSING".to_string()),
            }),
        }
    }

    fn controller_with(gateway: impl CartGateway + 'static) -> CheckoutController {
        controller_with_policy(gateway, ReconciliationPolicy::disabled())
    }

    fn controller_with_policy(
        gateway: impl CartGateway + 'static,
        policy: ReconciliationPolicy,
    ) -> CheckoutController {
        let store = CartStore::new();

        if let Some(cart) = to_cart(raw_cart(vec![raw_line(1, 2, "200")])) {
            store.set_cart(cart);
        }

        CheckoutController::new(CartSync::new(Arc::new(gateway), store, policy))
    }

    #[tokio::test]
    async fn declined_order_returns_to_idle_with_error() {
        let mut gateway = MockCartGateway::new();

        gateway
            .expect_submit_checkout()
            .once()
            .returning(|_| Err(GatewayError::Backend(vec!["declined".to_string()])));

        let controller = controller_with(gateway);
        let cart_before = controller.cart();

        let result = controller.submit(form_input()).await;

        assert!(
            matches!(result, Err(CheckoutError::Gateway(GatewayError::Backend(_)))),
            "expected Backend error, got {result:?}"
        );

        let state = controller.state();

        assert_eq!(state.phase, CheckoutPhase::Idle);
        assert_eq!(state.error, Some(ErrorKind::Backend("declined".to_string())));
        assert_eq!(
            state.error.as_ref().map(ToString::to_string).as_deref(),
            Some("declined")
        );
        assert!(!state.loading);
        assert!(!state.order_completed);
        assert_eq!(controller.cart(), cart_before);
    }

    #[tokio::test]
    async fn placed_order_completes_and_clears_cart() -> TestResult {
        let mut gateway = MockCartGateway::new();

        gateway
            .expect_submit_checkout()
            .once()
            .returning(|_| Ok(placed_order()));

        let controller = controller_with(gateway);

        assert!(controller.cart().is_some());

        let confirmation = controller.submit(form_input()).await?;

        assert_eq!(confirmation.order_id, Some(501));
        assert_eq!(confirmation.order_number.as_deref(), Some("501"));

        let state = controller.state();

        assert_eq!(state.phase, CheckoutPhase::Completed);
        assert!(state.order_completed);
        assert!(!state.loading);
        assert!(controller.cart().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn completed_checkout_rejects_further_submits() -> TestResult {
        let mut gateway = MockCartGateway::new();

        gateway
            .expect_submit_checkout()
            .once()
            .returning(|_| Ok(placed_order()));

        let controller = controller_with(gateway);

        controller.submit(form_input()).await?;

        let before = controller.state();
        let result = controller.submit(form_input()).await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::Conflict(ConflictReason::Completed))
            ),
            "expected Completed conflict, got {result:?}"
        );
        assert_eq!(controller.state(), before);

        Ok(())
    }

    #[tokio::test]
    async fn unsuccessful_result_is_a_backend_error() {
        let mut gateway = MockCartGateway::new();

        gateway.expect_submit_checkout().once().returning(|_| {
            Ok(RawOrderResponse {
                result: Some("failure".to_string()),
                ..RawOrderResponse::default()
            })
        });

        let controller = controller_with(gateway);

        let result = controller.submit(form_input()).await;

        assert!(result.is_err(), "expected an error, got {result:?}");
        assert_eq!(
            controller.state().error,
            Some(ErrorKind::Backend("checkout result: failure".to_string()))
        );
        assert_eq!(controller.state().phase, CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_backend() {
        let mut gateway = MockCartGateway::new();

        gateway.expect_submit_checkout().never();

        let controller = controller_with(gateway);

        let mut input = form_input();
        input.billing.email = Some("   ".to_string());
        input.billing.phone = None;

        let result = controller.submit(input).await;

        assert!(
            matches!(result, Err(CheckoutError::Validation(_))),
            "expected Validation error, got {result:?}"
        );

        let state = controller.state();

        assert_eq!(state.phase, CheckoutPhase::Idle);
        assert_eq!(
            state.error,
            Some(ErrorKind::Validation(vec![
                BillingField::Email,
                BillingField::Phone
            ]))
        );
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn next_attempt_clears_previous_error() -> TestResult {
        let mut gateway = MockCartGateway::new();
        let mut attempts = 0;

        gateway
            .expect_submit_checkout()
            .times(2)
            .returning(move |_| {
                attempts += 1;

                if attempts == 1 {
                    Err(GatewayError::Timeout { attempts: 3 })
                } else {
                    Ok(placed_order())
                }
            });

        let controller = controller_with(gateway);

        let failed = controller.submit(form_input()).await;

        assert!(failed.is_err(), "first attempt should fail");
        assert!(
            matches!(controller.state().error, Some(ErrorKind::Network(_))),
            "timeout should surface as a network error"
        );

        controller.submit(form_input()).await?;

        assert_eq!(controller.state().error, None);
        assert_eq!(controller.state().phase, CheckoutPhase::Completed);

        Ok(())
    }

    /// Gateway whose checkout waits until the test releases it.
    struct HeldCheckout {
        release: Arc<Notify>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CartGateway for HeldCheckout {
        async fn fetch_cart(&self) -> Result<RawCartResponse, GatewayError> {
            Ok(empty_raw_cart())
        }

        async fn add_item(&self, _: AddToCart) -> Result<RawMutationResponse, GatewayError> {
            Ok(RawMutationResponse::default())
        }

        async fn update_item_quantities(
            &self,
            _: UpdateItemQuantities,
        ) -> Result<RawMutationResponse, GatewayError> {
            Ok(RawMutationResponse::default())
        }

        async fn submit_checkout(
            &self,
            _: &CheckoutSubmission,
        ) -> Result<RawOrderResponse, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;

            Ok(placed_order())
        }
    }

    fn held_controller() -> (CheckoutController, Arc<Notify>, Arc<AtomicUsize>) {
        let release = Arc::new(Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let controller = controller_with(HeldCheckout {
            release: Arc::clone(&release),
            calls: Arc::clone(&calls),
        });

        (controller, release, calls)
    }

    async fn wait_for_phase(controller: &CheckoutController, phase: CheckoutPhase) -> TestResult {
        controller
            .subscribe()
            .wait_for(|state| state.phase == phase)
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn submit_while_in_flight_is_rejected() -> TestResult {
        let (controller, release, calls) = held_controller();

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit(form_input()).await }
        });

        wait_for_phase(&controller, CheckoutPhase::Submitting).await?;

        let before = controller.state();
        let second = controller.submit(form_input()).await;

        assert!(
            matches!(
                second,
                Err(CheckoutError::Conflict(ConflictReason::InFlight))
            ),
            "expected InFlight conflict, got {second:?}"
        );
        assert_eq!(controller.state(), before);
        assert!(controller.state().loading);

        release.notify_one();
        first.await??;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state().phase, CheckoutPhase::Completed);

        Ok(())
    }

    #[tokio::test]
    async fn abandoned_submission_returns_to_idle() -> TestResult {
        let (controller, _release, _calls) = held_controller();

        let handle = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit(form_input()).await }
        });

        wait_for_phase(&controller, CheckoutPhase::Submitting).await?;

        handle.abort();

        let joined = handle.await;

        assert!(
            joined.as_ref().is_err_and(tokio::task::JoinError::is_cancelled),
            "expected a cancelled task, got {joined:?}"
        );

        let state = controller.state();

        assert_eq!(state.phase, CheckoutPhase::Idle);
        assert!(!state.loading);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn resolved_checkout_schedules_reconciliation() -> TestResult {
        let fetches = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&fetches);

        let mut gateway = MockCartGateway::new();

        gateway
            .expect_submit_checkout()
            .once()
            .returning(|_| Ok(placed_order()));

        gateway.expect_fetch_cart().once().returning(move || {
            counted.fetch_add(1, Ordering::SeqCst);

            Ok(empty_raw_cart())
        });

        let controller = controller_with_policy(gateway, ReconciliationPolicy::default());

        controller.submit(form_input()).await?;

        sleep(DEFAULT_SETTLE_DELAY / 2).await;

        assert_eq!(
            fetches.load(Ordering::SeqCst),
            0,
            "reconciliation must wait for the settle delay"
        );

        sleep(DEFAULT_SETTLE_DELAY).await;

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(controller.cart().is_none());

        let rejected = controller.submit(form_input()).await;

        assert!(
            matches!(
                rejected,
                Err(CheckoutError::Conflict(ConflictReason::Completed))
            ),
            "expected Completed conflict, got {rejected:?}"
        );

        Ok(())
    }

    #[test]
    fn confirm_reads_order_fields() -> TestResult {
        let confirmation = confirm(placed_order())?;

        assert_eq!(confirmation.status.as_deref(), Some("PROCESSING"));

        let missing = confirm(RawOrderResponse::default());

        assert!(
            matches!(&missing, Err(GatewayError::Backend(messages)) if messages == &["checkout result: missing"]),
            "expected Backend error, got {missing:?}"
        );

        Ok(())
    }
}
