//! Home page route handler.
//!
//! Renders the catalog grid together with the cart panel, which opens when
//! the URL fragment is `#cart`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;
use yogurt_shop_core::Product;

use super::cart::{CartView, HOME_CART_PATH};
use super::{ASSET_HASH, NotificationView};
use crate::error::Result;
use crate::models::SessionCart;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub glyph: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            glyph: product.glyph.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub cart: CartView,
    pub notifications: Vec<NotificationView>,
    pub return_to: &'static str,
    pub asset_hash: &'static str,
}

/// Display the catalog grid and cart panel.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: SessionCart) -> Result<impl IntoResponse> {
    let cart = session.load().await?;
    let notifications = session.take_notifications().await?;

    Ok(HomeTemplate {
        products: state
            .catalog()
            .products()
            .iter()
            .map(ProductView::from)
            .collect(),
        cart: CartView::from(&cart),
        notifications: notifications.into_iter().map(Into::into).collect(),
        return_to: HOME_CART_PATH,
        asset_hash: ASSET_HASH,
    })
}
