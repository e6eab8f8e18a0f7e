//! Checkout route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::instrument;
use yogurt_shop_core::{Notification, Receipt};

use super::cart::{CartItemView, HOME_CART_PATH};
use super::{ASSET_HASH, NotificationView};
use crate::error::{AppError, Result};
use crate::models::SessionCart;
use crate::services;

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    /// Confirmation text split into paragraphs.
    pub paragraphs: Vec<String>,
    pub order_number: String,
    pub items: Vec<CartItemView>,
    pub total: String,
    pub notifications: Vec<NotificationView>,
    pub asset_hash: &'static str,
}

impl From<&Receipt> for ConfirmationTemplate {
    fn from(receipt: &Receipt) -> Self {
        Self {
            paragraphs: receipt
                .confirmation()
                .split("\n\n")
                .map(str::to_string)
                .collect(),
            order_number: receipt.order_number.to_string(),
            items: receipt.entries.iter().map(CartItemView::from).collect(),
            total: receipt.total.display(),
            notifications: Vec::new(),
            asset_hash: ASSET_HASH,
        }
    }
}

/// Finalize the cart.
///
/// An empty cart is sent back to the cart panel with the "empty cart"
/// notification and nothing changes.
#[instrument(skip(session))]
pub async fn checkout(session: SessionCart) -> Result<Response> {
    match services::checkout(&session).await {
        Ok(receipt) => Ok(ConfirmationTemplate::from(&receipt).into_response()),
        Err(e @ AppError::Checkout(_)) => {
            session
                .notify(Notification::error(e.client_message()))
                .await?;
            Ok(Redirect::to(HOME_CART_PATH).into_response())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use yogurt_shop_core::{Cart, Catalog, ProductId};

    use super::*;

    #[test]
    fn test_confirmation_paragraphs() {
        let mut cart = Cart::new();
        cart.add(&Catalog::builtin(), ProductId::new(3)).unwrap();
        let receipt = yogurt_shop_core::checkout(&mut cart).unwrap();

        let page = ConfirmationTemplate::from(&receipt);
        assert_eq!(
            page.paragraphs,
            vec![
                "¡Gracias por tu compra!".to_string(),
                "Total: $\u{a0}9.500".to_string(),
                "Tu pedido será procesado pronto.".to_string(),
            ]
        );
        assert_eq!(page.items.len(), 1);
    }
}
