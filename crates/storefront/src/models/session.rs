//! Session-related types.
//!
//! A visitor's session identifies their cart in the [`CartStore`] and holds
//! notifications waiting for the next page render. Cart operations lock the
//! cart for the whole request step, so concurrent requests from one visitor
//! apply one after another.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::StatusCode, http::request::Parts};
use tokio::sync::OwnedMutexGuard;
use tower_sessions::Session;
use tower_sessions::session::{Error as SessionError, Id};
use yogurt_shop_core::{Cart, Notification};

use super::CartStore;
use crate::state::AppState;

/// Session keys for storefront data.
pub mod keys {
    /// Set once the visitor owns a cart; persists the session so it has an id.
    pub const HAS_CART: &str = "has_cart";

    /// Key for notifications waiting to be shown on the next page render.
    pub const NOTIFICATIONS: &str = "notifications";
}

/// The visitor's cart and pending notifications.
///
/// # Example
///
/// ```ignore
/// async fn handler(session: SessionCart) -> Result<impl IntoResponse> {
///     let mut cart = session.lock().await?;
///     // ...
/// }
/// ```
#[derive(Clone)]
pub struct SessionCart {
    session: Session,
    carts: Arc<CartStore>,
}

impl FromRequestParts<AppState> for SessionCart {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        Ok(Self::new(session, Arc::clone(state.carts())))
    }
}

impl SessionCart {
    #[must_use]
    pub const fn new(session: Session, carts: Arc<CartStore>) -> Self {
        Self { session, carts }
    }

    /// Copy of the cart, or an empty cart for a visitor without one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(&self) -> Result<Cart, SessionError> {
        Ok(match self.stored_id().await? {
            Some(id) => self.carts.snapshot(id).await,
            None => Cart::new(),
        })
    }

    /// Lock the cart for a read-modify step, creating the session if needed.
    ///
    /// Changes made through the guard are kept; other requests from the same
    /// visitor wait until it is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn lock(&self) -> Result<OwnedMutexGuard<Cart>, SessionError> {
        let id = match self.stored_id().await? {
            Some(id) => id,
            None => self.create().await?,
        };
        Ok(self.carts.lock(id).await)
    }

    /// Id of a session that exists in the store.
    async fn stored_id(&self) -> Result<Option<Id>, SessionError> {
        // Loading the record forgets a cookie id the store no longer knows.
        self.session.get::<bool>(keys::HAS_CART).await?;
        Ok(self.session.id())
    }

    /// Persist a new session and return its id.
    async fn create(&self) -> Result<Id, SessionError> {
        self.session.insert(keys::HAS_CART, true).await?;
        self.session.save().await?;
        self.session.id().ok_or_else(|| {
            SessionError::Store(tower_sessions::session_store::Error::Backend(
                "session has no id after save".to_string(),
            ))
        })
    }

    /// Queue a notification for the next page render.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn notify(&self, notification: Notification) -> Result<(), SessionError> {
        let mut pending = self
            .session
            .get::<Vec<Notification>>(keys::NOTIFICATIONS)
            .await?
            .unwrap_or_default();
        pending.push(notification);
        self.session.insert(keys::NOTIFICATIONS, pending).await
    }

    /// Remove and return all pending notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn take_notifications(&self) -> Result<Vec<Notification>, SessionError> {
        Ok(self
            .session
            .remove::<Vec<Notification>>(keys::NOTIFICATIONS)
            .await?
            .unwrap_or_default())
    }
}
