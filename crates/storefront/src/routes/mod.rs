//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Catalog grid with cart panel (#cart)
//! GET  /health                        - Health check
//!
//! # Cart (HTML forms, redirect after POST)
//! GET  /cart                          - Cart page
//! POST /cart/add                      - Add product (form: product_id)
//! POST /cart/increase                 - Increase quantity (form: product_id)
//! POST /cart/decrease                 - Decrease quantity (form: product_id)
//!
//! # Checkout
//! POST /checkout                      - Confirmation page, or back to cart when empty
//!
//! # JSON API
//! GET  /api/catalog                   - Product list
//! GET  /api/cart                      - Cart summary
//! POST /api/cart/{product_id}/{action} - add | increase | decrease
//! POST /api/checkout                  - Receipt, or 409 when empty
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod home;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};
use yogurt_shop_core::{Notification, NotificationLevel};

use crate::error::AppError;
use crate::state::AppState;

/// Content hash of the static assets, computed at build time.
pub const ASSET_HASH: &str = env!("ASSET_HASH");

/// Notification display data for templates.
#[derive(Clone)]
pub struct NotificationView {
    pub class: &'static str,
    pub message: String,
    /// Visible time before the slide-out, read by `storefront.js`.
    pub display_ms: u32,
    pub fade_ms: u32,
}

impl From<Notification> for NotificationView {
    fn from(notification: Notification) -> Self {
        let class = match notification.level {
            NotificationLevel::Success => "notification notification-success",
            NotificationLevel::Error => "notification notification-error",
        };
        Self {
            class,
            message: notification.message,
            display_ms: Notification::DISPLAY_MS,
            fade_ms: Notification::FADE_MS,
        }
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(api::catalog))
        .route("/cart", get(api::cart))
        .route("/cart/{product_id}/{action}", post(api::cart_action))
        .route("/checkout", post(api::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::checkout))
        .nest("/api", api_routes())
        .fallback(not_found)
}

/// Fallback for unmatched paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
