//! Cart route handlers.
//!
//! Cart buttons are plain HTML forms. Each POST applies one cart operation to
//! the session cart, queues a notification when there is something to tell,
//! and redirects back to the page the form came from.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;
use yogurt_shop_core::{Cart, CartEntry, Notification, ProductId};

use super::{ASSET_HASH, NotificationView};
use crate::error::{AppError, Result};
use crate::models::SessionCart;
use crate::services::{CartAction, apply_action};
use crate::state::AppState;

/// Where cart forms on the home page send the visitor back to.
pub const HOME_CART_PATH: &str = "/#cart";

/// Where cart forms on the cart page send the visitor back to.
pub const CART_PAGE_PATH: &str = "/cart";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub glyph: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            product_id: entry.product_id().as_i32(),
            name: entry.name().to_string(),
            glyph: entry.glyph().to_string(),
            quantity: entry.quantity(),
            price: entry.unit_price().display(),
            line_price: entry.line_total().display(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.entries().iter().map(CartItemView::from).collect(),
            total: cart.total_price().display(),
            item_count: cart.total_items(),
        }
    }
}

/// Form data for every cart button.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: ProductId,
    /// Page to return to after the action.
    pub return_to: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub notifications: Vec<NotificationView>,
    pub return_to: &'static str,
    pub asset_hash: &'static str,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: SessionCart) -> Result<impl IntoResponse> {
    let cart = session.load().await?;
    let notifications = session.take_notifications().await?;

    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
        notifications: notifications.into_iter().map(Into::into).collect(),
        return_to: CART_PAGE_PATH,
        asset_hash: ASSET_HASH,
    })
}

/// Add one unit of a product and raise the "added" notification.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: SessionCart,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let target = return_path(form.return_to.as_deref(), "/");

    match apply_action(&state, &session, CartAction::Add, form.product_id).await {
        Ok(_) => session.notify(Notification::added_to_cart()).await?,
        Err(e @ AppError::Cart(_)) => {
            session.notify(Notification::error(e.client_message())).await?;
        }
        Err(e) => return Err(e),
    }

    Ok(Redirect::to(&target).into_response())
}

/// Increase a cart entry's quantity.
#[instrument(skip(state, session))]
pub async fn increase(
    State(state): State<AppState>,
    session: SessionCart,
    Form(form): Form<CartItemForm>,
) -> Result<Redirect> {
    apply_action(&state, &session, CartAction::Increase, form.product_id).await?;
    Ok(Redirect::to(&return_path(
        form.return_to.as_deref(),
        HOME_CART_PATH,
    )))
}

/// Decrease a cart entry's quantity, removing it at zero.
#[instrument(skip(state, session))]
pub async fn decrease(
    State(state): State<AppState>,
    session: SessionCart,
    Form(form): Form<CartItemForm>,
) -> Result<Redirect> {
    apply_action(&state, &session, CartAction::Decrease, form.product_id).await?;
    Ok(Redirect::to(&return_path(
        form.return_to.as_deref(),
        HOME_CART_PATH,
    )))
}

/// Resolve a form's `return_to` to a same-site path.
///
/// Anything that is not an absolute local path (including protocol-relative
/// `//host` URLs) falls back to `default`.
pub(crate) fn return_path(return_to: Option<&str>, default: &str) -> String {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => default.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use yogurt_shop_core::Catalog;

    use super::*;

    #[test]
    fn test_return_path_accepts_local_paths() {
        assert_eq!(return_path(Some("/cart"), "/"), "/cart");
        assert_eq!(return_path(Some("/#cart"), "/"), "/#cart");
        assert_eq!(return_path(None, HOME_CART_PATH), HOME_CART_PATH);
    }

    #[test]
    fn test_return_path_rejects_external_targets() {
        assert_eq!(return_path(Some("https://evil.example"), "/"), "/");
        assert_eq!(return_path(Some("//evil.example"), "/"), "/");
        assert_eq!(return_path(Some("/\\evil.example"), "/"), "/");
        assert_eq!(return_path(Some("/cart\r\nSet-Cookie: x"), "/"), "/");
    }

    #[test]
    fn test_cart_view_formats_prices() {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add(&catalog, ProductId::new(1)).ok();
        cart.add(&catalog, ProductId::new(2)).ok();
        cart.add(&catalog, ProductId::new(1)).ok();

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "$\u{a0}26.500");
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].line_price, "$\u{a0}17.000");
        assert_eq!(view.items[1].price, "$\u{a0}9.500");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.items.is_empty());
        assert_eq!(view.total, "$\u{a0}0");
        assert_eq!(view.item_count, 0);
    }
}
