//! Cart store
//!
//! The single source of truth for cart UI state. Cheap to clone; every clone
//! shares the same state, so it is passed to collaborators explicitly rather
//! than held globally.
//!
//! Responses may arrive out of order. Each request takes a [`RequestTicket`]
//! when it is issued and the store only applies a response whose ticket is
//! newer than the last one applied, so a slow read never overwrites a newer
//! cart.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;
use tracing::debug;

use crate::cart::Cart;

/// State published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    cart: Option<Cart>,
    in_flight: usize,
    applied: u64,
}

impl CartSnapshot {
    /// Current cart, `None` when empty.
    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    /// Whether a foreground request is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// Sequence number taken when a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Raw sequence number
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Shared handle to the cart state.
#[derive(Debug, Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: watch::Sender<CartSnapshot>,
    sequence: AtomicU64,
}

impl CartStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: watch::Sender::new(CartSnapshot::default()),
                sequence: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the current cart.
    pub fn cart(&self) -> Option<Cart> {
        self.inner.state.borrow().cart.clone()
    }

    /// Whether a foreground request is in flight.
    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> CartSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.state.subscribe()
    }

    /// Replaces the cart, superseding every request still in flight.
    pub fn set_cart(&self, cart: Cart) {
        let ticket = self.begin_request();

        self.apply(ticket, Some(cart));
    }

    /// Empties the cart, superseding every request still in flight.
    pub fn clear(&self) {
        let ticket = self.begin_request();

        self.apply(ticket, None);
    }

    /// Issues the ticket for a request about to be sent.
    pub fn begin_request(&self) -> RequestTicket {
        RequestTicket(self.inner.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Applies a response to the request holding `ticket`.
    ///
    /// Returns `false`, leaving the state untouched, when a newer response has
    /// already been applied.
    pub fn apply(&self, ticket: RequestTicket, cart: Option<Cart>) -> bool {
        let mut accepted = false;

        self.inner.state.send_if_modified(|state| {
            if ticket.0 <= state.applied {
                return false;
            }

            state.applied = ticket.0;
            accepted = true;

            if state.cart == cart {
                return false;
            }

            state.cart = cart;

            true
        });

        if !accepted {
            debug!(sequence = ticket.0, "discarding stale cart response");
        }

        accepted
    }

    /// Marks a foreground request as in flight until the guard is dropped.
    #[must_use = "loading ends as soon as the guard is dropped"]
    pub fn track_loading(&self) -> LoadingGuard {
        self.inner.state.send_if_modified(|state| {
            state.in_flight += 1;
            state.in_flight == 1
        });

        LoadingGuard {
            store: self.clone(),
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the store's loading flag raised while alive.
///
/// Dropping the guard on any path (success, error, early return, or a
/// cancelled future) lowers the flag.
#[derive(Debug)]
pub struct LoadingGuard {
    store: CartStore,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.store.inner.state.send_if_modified(|state| {
            state.in_flight = state.in_flight.saturating_sub(1);
            state.in_flight == 0
        });
    }
}
