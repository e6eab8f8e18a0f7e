//! Cart operations against the session-owned cart.
//!
//! Each call locks the visitor's cart, applies one core operation, and
//! releases it, so requests from one session never interleave.

use serde::Deserialize;
use yogurt_shop_core::{Cart, ProductId, QuantityChange, Receipt};

use crate::error::{Result, add_breadcrumb};
use crate::models::SessionCart;
use crate::state::AppState;

/// A quantity-changing cart action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartAction {
    Add,
    Increase,
    Decrease,
}

impl CartAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }
}

/// Apply an action to the session cart and return the updated cart.
///
/// Increase and decrease on a product that is not in the cart are no-ops.
///
/// # Errors
///
/// Returns `AppError::Cart` when adding an id missing from the catalog (the
/// cart is unchanged), or `AppError::Session` if the session store fails.
pub async fn apply_action(
    state: &AppState,
    session: &SessionCart,
    action: CartAction,
    product_id: ProductId,
) -> Result<Cart> {
    let mut cart = session.lock().await?;

    let changed = match action {
        CartAction::Add => {
            let quantity = cart.add(state.catalog(), product_id).inspect_err(|e| {
                tracing::warn!(%product_id, error = %e, "Rejected add to cart");
            })?;
            tracing::info!(%product_id, quantity, "Added product to cart");
            true
        }
        CartAction::Increase => match cart.increase(product_id) {
            Some(quantity) => {
                tracing::info!(%product_id, quantity, "Increased cart quantity");
                true
            }
            None => {
                tracing::debug!(%product_id, "Increase ignored, product not in cart");
                false
            }
        },
        CartAction::Decrease => match cart.decrease(product_id) {
            Some(QuantityChange::Updated(quantity)) => {
                tracing::info!(%product_id, quantity, "Decreased cart quantity");
                true
            }
            Some(QuantityChange::Removed) => {
                tracing::info!(%product_id, "Removed product from cart");
                true
            }
            None => {
                tracing::debug!(%product_id, "Decrease ignored, product not in cart");
                false
            }
        },
    };

    if changed {
        let id = product_id.to_string();
        add_breadcrumb("cart", action.as_str(), Some(&[("product_id", id.as_str())]));
    }

    Ok(Cart::clone(&cart))
}

/// Check out the session cart.
///
/// On success the cart is cleared and the receipt carries the pre-checkout
/// total. Concurrent checkouts of one cart yield a single receipt.
///
/// # Errors
///
/// Returns `AppError::Checkout` for an empty cart (nothing changes), or
/// `AppError::Session` if the session store fails.
pub async fn checkout(session: &SessionCart) -> Result<Receipt> {
    let mut cart = session.lock().await?;

    let receipt = yogurt_shop_core::checkout(&mut cart).inspect_err(|_| {
        tracing::info!("Checkout rejected, cart is empty");
    })?;
    drop(cart);

    tracing::info!(
        order_number = %receipt.order_number,
        total_items = receipt.total_items,
        total = receipt.total.pesos(),
        "Checkout completed"
    );
    let order_number = receipt.order_number.to_string();
    add_breadcrumb(
        "checkout",
        "Completed checkout",
        Some(&[("order_number", order_number.as_str())]),
    );

    Ok(receipt)
}
