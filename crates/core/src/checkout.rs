//! Checkout: finalize and clear a cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{Cart, CartEntry};
use crate::types::Price;

/// Message shown when checkout is attempted on an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Tu carrito está vacío";

/// Errors returned by [`checkout`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart has no entries. Nothing was changed.
    #[error("{}", EMPTY_CART_MESSAGE)]
    EmptyCart,
}

/// The result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Order reference shown to the customer.
    pub order_number: Uuid,
    pub placed_at: DateTime<Utc>,
    /// Entries as they were in the cart at checkout.
    pub entries: Vec<CartEntry>,
    pub total_items: u64,
    /// Equal to the cart's `total_price()` just before checkout.
    pub total: Price,
}

impl Receipt {
    /// The confirmation text shown to the customer.
    ///
    /// # Examples
    ///
    /// ```
    /// use yogurt_shop_core::{Cart, Catalog, ProductId, checkout};
    ///
    /// let mut cart = Cart::new();
    /// cart.add(&Catalog::builtin(), ProductId::new(1)).unwrap();
    /// let receipt = checkout(&mut cart).unwrap();
    /// assert!(receipt.confirmation().contains("Total: $\u{a0}8.500"));
    /// ```
    #[must_use]
    pub fn confirmation(&self) -> String {
        format!(
            "¡Gracias por tu compra!\n\nTotal: {}\n\nTu pedido será procesado pronto.",
            self.total
        )
    }
}

/// Finalize the cart.
///
/// On success the cart is cleared and the returned [`Receipt`] carries the
/// pre-checkout total.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart is empty; the cart is not
/// modified.
pub fn checkout(cart: &mut Cart) -> Result<Receipt, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let receipt = Receipt {
        order_number: Uuid::new_v4(),
        placed_at: Utc::now(),
        entries: cart.entries().to_vec(),
        total_items: cart.total_items(),
        total: cart.total_price(),
    };
    cart.clear();
    Ok(receipt)
}
