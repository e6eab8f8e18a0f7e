//! Transient user-facing notifications.
//!
//! Notifications are raised by cart actions and shown briefly by the UI layer,
//! which removes them after [`Notification::DISPLAY_MS`] plus a
//! [`Notification::FADE_MS`] fade-out.

use serde::{Deserialize, Serialize};

/// Message raised after a product is added to the cart.
pub const ADDED_TO_CART: &str = "Producto agregado al carrito";

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    #[default]
    Success,
    Error,
}

/// A short message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    /// How long a notification stays fully visible, in milliseconds.
    pub const DISPLAY_MS: u32 = 2000;

    /// Duration of the slide-out animation before removal, in milliseconds.
    pub const FADE_MS: u32 = 300;

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// The notification raised by a successful add.
    #[must_use]
    pub fn added_to_cart() -> Self {
        Self::success(ADDED_TO_CART)
    }
}
