//! Per-session cart storage.
//!
//! Carts are keyed by session id and each sits behind its own async mutex, so
//! every operation on one visitor's cart runs to completion before the next
//! one starts. Different sessions never contend.
//!
//! Idle carts are dropped by [`CartStore::prune_idle`], which the binary runs
//! periodically with the session inactivity timeout.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, OwnedMutexGuard};
use tower_sessions::session::Id;
use yogurt_shop_core::Cart;

struct Slot {
    cart: Arc<Mutex<Cart>>,
    last_used: Instant,
}

/// Carts for every active session.
#[derive(Default)]
pub struct CartStore {
    slots: Mutex<HashMap<Id, Slot>>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the cart for `id`, creating an empty one on first use.
    ///
    /// The guard is held for the whole read-modify step; other requests in
    /// the same session wait on it.
    pub async fn lock(&self, id: Id) -> OwnedMutexGuard<Cart> {
        let cart = {
            let mut slots = self.slots.lock().await;
            let slot = slots.entry(id).or_insert_with(|| Slot {
                cart: Arc::new(Mutex::new(Cart::new())),
                last_used: Instant::now(),
            });
            slot.last_used = Instant::now();
            Arc::clone(&slot.cart)
        };
        cart.lock_owned().await
    }

    /// Copy of the cart for `id`, or an empty cart if the session has none.
    pub async fn snapshot(&self, id: Id) -> Cart {
        let cart = {
            let mut slots = self.slots.lock().await;
            match slots.get_mut(&id) {
                Some(slot) => {
                    slot.last_used = Instant::now();
                    Arc::clone(&slot.cart)
                }
                None => return Cart::new(),
            }
        };
        let guard = cart.lock().await;
        guard.clone()
    }

    /// Drop carts unused for longer than `max_idle`. Returns how many were
    /// removed.
    ///
    /// A cart that is currently locked is kept.
    pub async fn prune_idle(&self, max_idle: Duration) -> usize {
        let mut slots = self.slots.lock().await;
        let before = slots.len();
        slots.retain(|_, slot| {
            slot.last_used.elapsed() <= max_idle || Arc::strong_count(&slot.cart) > 1
        });
        before - slots.len()
    }

    /// Number of carts held.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }
}
