//! JSON API handlers.
//!
//! Same cart operations as the HTML forms, reporting outcomes through status
//! codes instead of notifications: an unknown product on add is `404`, and
//! checkout of an empty cart is `409`.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;
use yogurt_shop_core::{Cart, CartEntry, Price, Product, ProductId, Receipt};

use crate::error::Result;
use crate::models::SessionCart;
use crate::services::{self, CartAction};
use crate::state::AppState;

/// Cart contents and derived totals.
#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub entries: Vec<CartEntry>,
    pub total_items: u64,
    pub total_price: Price,
    /// `total_price` formatted as Colombian pesos.
    pub total_display: String,
}

impl From<Cart> for CartSummary {
    fn from(cart: Cart) -> Self {
        let total_items = cart.total_items();
        let total_price = cart.total_price();
        Self {
            entries: cart.entries().to_vec(),
            total_items,
            total_price,
            total_display: total_price.display(),
        }
    }
}

/// List the catalog.
pub async fn catalog(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().products().to_vec())
}

/// Show the session cart.
#[instrument(skip(session))]
pub async fn cart(session: SessionCart) -> Result<Json<CartSummary>> {
    Ok(Json(session.load().await?.into()))
}

/// Apply `add`, `increase` or `decrease` to a product.
#[instrument(skip(state, session))]
pub async fn cart_action(
    State(state): State<AppState>,
    session: SessionCart,
    Path((product_id, action)): Path<(ProductId, CartAction)>,
) -> Result<Json<CartSummary>> {
    let cart = services::apply_action(&state, &session, action, product_id).await?;
    Ok(Json(cart.into()))
}

/// Check out the session cart.
#[instrument(skip(session))]
pub async fn checkout(session: SessionCart) -> Result<Json<Receipt>> {
    Ok(Json(services::checkout(&session).await?))
}
