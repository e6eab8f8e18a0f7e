//! End-to-end cart and checkout flows over HTTP.
//!
//! Run with: cargo test -p yogurt-shop-integration-tests

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;
use yogurt_shop_integration_tests::TestContext;

async fn cart_summary(ctx: &TestContext) -> Value {
    ctx.client
        .get(ctx.url("/api/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .json()
        .await
        .expect("Failed to parse cart")
}

async fn api_action(ctx: &TestContext, product_id: i32, action: &str) -> StatusCode {
    ctx.client
        .post(ctx.url(&format!("/api/cart/{product_id}/{action}")))
        .send()
        .await
        .expect("Failed to apply cart action")
        .status()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_storefront_health() {
    let ctx = TestContext::new().await.unwrap();

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("Failed to get health");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_sample_order_total() {
    let ctx = TestContext::new().await.unwrap();

    for id in [1, 2, 1] {
        assert_eq!(api_action(&ctx, id, "add").await, StatusCode::OK);
    }

    let cart = cart_summary(&ctx).await;
    assert_eq!(cart["total_items"], 3);
    assert_eq!(cart["total_price"], 26_500);
    assert_eq!(cart["total_display"], "$\u{a0}26.500");
}

#[tokio::test]
async fn test_quantity_never_goes_negative() {
    let ctx = TestContext::new().await.unwrap();

    api_action(&ctx, 6, "add").await;
    api_action(&ctx, 6, "increase").await;
    for _ in 0..4 {
        assert_eq!(api_action(&ctx, 6, "decrease").await, StatusCode::OK);
    }

    let cart = cart_summary(&ctx).await;
    assert_eq!(cart["total_items"], 0);
    assert!(cart["entries"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_product_leaves_cart_unchanged() {
    let ctx = TestContext::new().await.unwrap();
    api_action(&ctx, 2, "add").await;

    assert_eq!(api_action(&ctx, 404, "add").await, StatusCode::NOT_FOUND);

    let cart = cart_summary(&ctx).await;
    assert_eq!(cart["total_items"], 1);
    assert_eq!(cart["total_price"], 9_500);
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart() {
    let ctx = TestContext::new().await.unwrap();

    let resp = ctx
        .client
        .post(ctx.url("/api/checkout"))
        .send()
        .await
        .expect("Failed to check out");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(resp.text().await.unwrap(), "Tu carrito está vacío");
}

#[tokio::test]
async fn test_checkout_returns_receipt_and_clears_cart() {
    let ctx = TestContext::new().await.unwrap();
    api_action(&ctx, 1, "add").await;
    api_action(&ctx, 5, "add").await;

    let receipt: Value = ctx
        .client
        .post(ctx.url("/api/checkout"))
        .send()
        .await
        .expect("Failed to check out")
        .json()
        .await
        .expect("Failed to parse receipt");

    assert_eq!(receipt["total_items"], 2);
    assert_eq!(receipt["total"], 18_500);
    assert!(receipt["order_number"].as_str().is_some());

    let cart = cart_summary(&ctx).await;
    assert_eq!(cart["total_items"], 0);
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let ctx = TestContext::new().await.unwrap();
    api_action(&ctx, 3, "add").await;

    let other = ctx.fresh_session().unwrap();

    assert_eq!(cart_summary(&other).await["total_items"], 0);
    assert_eq!(cart_summary(&ctx).await["total_items"], 1);
}

// ============================================================================
// HTML forms
// ============================================================================

#[tokio::test]
async fn test_form_flow_shows_notification_then_confirmation() {
    let ctx = TestContext::new().await.unwrap();

    let resp = ctx
        .client
        .post(ctx.url("/cart/add"))
        .form(&[("product_id", "4")])
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let home = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .expect("Failed to get home")
        .text()
        .await
        .unwrap();
    assert!(home.contains("Producto agregado al carrito"));
    assert!(home.contains("Yogurt Griego"));

    let confirmation = ctx
        .client
        .post(ctx.url("/checkout"))
        .send()
        .await
        .expect("Failed to check out")
        .text()
        .await
        .unwrap();
    assert!(confirmation.contains("¡Gracias por tu compra!"));
    assert!(confirmation.contains("Total: $\u{a0}12.000"));
}
