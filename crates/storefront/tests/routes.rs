//! Router tests for the storefront.
//!
//! Requests are driven in-process through `tower::ServiceExt::oneshot`; the
//! session cookie is carried between requests by [`TestClient`].

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, Response, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;
use yogurt_shop_core::Catalog;
use yogurt_shop_storefront::{app, config::StorefrontConfig, state::AppState};

struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    fn new() -> Self {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        Self {
            app: app(AppState::with_catalog(config, Catalog::builtin())),
            cookie: None,
        }
    }

    async fn send(&mut self, mut request: Request<Body>) -> Response<Body> {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }

    async fn get(&mut self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post(&mut self, uri: &str) -> Response<Body> {
        self.send(Request::post(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post_form(&mut self, uri: &str, form: &str) -> Response<Body> {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

// ============================================================================
// Ambient
// ============================================================================

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new();

    let response = client.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let mut client = TestClient::new();

    let response = client.get("/productos").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Página no encontrada");
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let mut client = TestClient::new();

    let response = client.get("/static/js/storefront.js").await;

    assert_eq!(response.status(), StatusCode::OK);
    let cache_control = response.headers().get(header::CACHE_CONTROL).unwrap();
    assert_eq!(cache_control, "public, max-age=31536000, immutable");
    assert!(body_text(response).await.contains("dataset.displayMs"));
}

#[tokio::test]
async fn test_pages_are_not_cached() {
    let mut client = TestClient::new();

    let response = client.get("/").await;

    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store, max-age=0"
    );
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let mut client = TestClient::new();

    let response = client.get("/").await;

    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let mut client = TestClient::new();
    let request = Request::get("/health")
        .header("x-request-id", "req-abc-123")
        .body(Body::empty())
        .unwrap();

    let response = client.send(request).await;

    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-abc-123");
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_api_catalog_lists_products() {
    let mut client = TestClient::new();

    let catalog = body_json(client.get("/api/catalog").await).await;

    let products = catalog.as_array().unwrap();
    assert_eq!(products.len(), 6);
    assert_eq!(products.first().unwrap()["name"], "Yogurt Natural");
    assert_eq!(products.first().unwrap()["price"], 8500);
}

#[tokio::test]
async fn test_api_sample_order_totals() {
    let mut client = TestClient::new();

    for id in [1, 2, 1] {
        let response = client.post(&format!("/api/cart/{id}/add")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let cart = body_json(client.get("/api/cart").await).await;
    assert_eq!(cart["total_items"], 3);
    assert_eq!(cart["total_price"], 26_500);
    assert_eq!(cart["total_display"], "$\u{a0}26.500");
    assert_eq!(cart["entries"].as_array().unwrap().len(), 2);
    assert_eq!(cart["entries"][0]["quantity"], 2);
    assert_eq!(cart["entries"][1]["quantity"], 1);
}

#[tokio::test]
async fn test_api_add_then_decrease_empties_cart() {
    let mut client = TestClient::new();

    client.post("/api/cart/3/add").await;
    let cart = body_json(client.post("/api/cart/3/decrease").await).await;

    assert_eq!(cart["total_items"], 0);
    assert_eq!(cart["total_price"], 0);
    assert_eq!(cart["total_display"], "$\u{a0}0");
}

#[tokio::test]
async fn test_api_unknown_product_is_not_found() {
    let mut client = TestClient::new();

    let response = client.post("/api/cart/99/add").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Producto no encontrado");

    let cart = body_json(client.get("/api/cart").await).await;
    assert_eq!(cart["total_items"], 0);
}

#[tokio::test]
async fn test_api_unknown_action_is_rejected() {
    let mut client = TestClient::new();

    let response = client.post("/api/cart/1/remove").await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_api_checkout_empty_cart_conflicts() {
    let mut client = TestClient::new();

    let response = client.post("/api/checkout").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_text(response).await, "Tu carrito está vacío");
}

#[tokio::test]
async fn test_api_checkout_clears_cart() {
    let mut client = TestClient::new();
    client.post("/api/cart/4/add").await;
    client.post("/api/cart/4/increase").await;

    let response = client.post("/api/checkout").await;
    assert_eq!(response.status(), StatusCode::OK);
    let receipt = body_json(response).await;
    assert_eq!(receipt["total_items"], 2);
    assert_eq!(receipt["total"], 24_000);

    let cart = body_json(client.get("/api/cart").await).await;
    assert_eq!(cart["total_items"], 0);
}

/// Send `count` copies of a request concurrently with the client's cookie.
async fn concurrent_posts(client: &TestClient, uri: &str, count: usize) -> Vec<StatusCode> {
    let cookie = client.cookie.clone().unwrap();
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..count {
        let app = client.app.clone();
        let request = Request::post(uri)
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        tasks.spawn(async move { app.oneshot(request).await.unwrap().status() });
    }

    let mut statuses = Vec::with_capacity(count);
    while let Some(status) = tasks.join_next().await {
        statuses.push(status.unwrap());
    }
    statuses
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_adds_in_one_session_are_all_counted() {
    let mut client = TestClient::new();
    client.post("/api/cart/1/add").await;

    let statuses = concurrent_posts(&client, "/api/cart/1/add", 100).await;
    assert!(statuses.iter().all(|status| *status == StatusCode::OK));

    let cart = body_json(client.get("/api/cart").await).await;
    assert_eq!(cart["total_items"], 101);
    assert_eq!(cart["total_price"], 101 * 8500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_checkouts_issue_one_receipt() {
    let mut client = TestClient::new();
    client.post("/api/cart/2/add").await;
    client.post("/api/cart/2/add").await;

    let statuses = concurrent_posts(&client, "/api/checkout", 10).await;

    let receipts = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let rejected = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(receipts, 1);
    assert_eq!(rejected, 9);
}

#[tokio::test]
async fn test_sessions_do_not_share_carts() {
    let mut alice = TestClient::new();
    alice.post("/api/cart/1/add").await;

    let mut bob = TestClient {
        app: alice.app.clone(),
        cookie: None,
    };
    let cart = body_json(bob.get("/api/cart").await).await;

    assert_eq!(cart["total_items"], 0);
}

// ============================================================================
// HTML forms
// ============================================================================

#[tokio::test]
async fn test_home_renders_catalog_and_empty_cart() {
    let mut client = TestClient::new();

    let response = client.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Yogurt de Mango"));
    assert!(body.contains("Agregar al Carrito"));
    assert!(body.contains("Tu carrito está vacío"));
    assert!(body.contains("$\u{a0}10.000"));
}

#[tokio::test]
async fn test_form_add_redirects_and_flashes_notification() {
    let mut client = TestClient::new();

    let response = client.post_form("/cart/add", "product_id=2").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let body = body_text(client.get("/").await).await;
    assert!(body.contains("Producto agregado al carrito"));
    assert!(body.contains(r#"data-display-ms="2000" data-fade-ms="300""#));
    assert!(body.contains(r#"<span id="cart-count" class="cart-count">1</span>"#));

    // Notifications are shown once
    let body = body_text(client.get("/").await).await;
    assert!(!body.contains("Producto agregado al carrito"));
}

#[tokio::test]
async fn test_form_add_unknown_product_flashes_error() {
    let mut client = TestClient::new();

    let response = client.post_form("/cart/add", "product_id=42").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = body_text(client.get("/").await).await;
    assert!(body.contains("notification notification-error"));
    assert!(body.contains("Producto no encontrado"));
    assert!(body.contains(r#"<span id="cart-count" class="cart-count">0</span>"#));
}

#[tokio::test]
async fn test_form_quantity_buttons_return_to_cart() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=5").await;

    let response = client
        .post_form("/cart/increase", "product_id=5&return_to=%2Fcart")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/cart");

    let response = client.post_form("/cart/decrease", "product_id=5").await;
    assert_eq!(location(&response), "/#cart");

    let cart = body_json(client.get("/api/cart").await).await;
    assert_eq!(cart["total_items"], 1);
}

#[tokio::test]
async fn test_form_rejects_external_return_target() {
    let mut client = TestClient::new();

    let response = client
        .post_form("/cart/add", "product_id=1&return_to=https%3A%2F%2Fevil.example")
        .await;

    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_form_checkout_empty_cart_returns_to_panel() {
    let mut client = TestClient::new();

    let response = client.post_form("/checkout", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/#cart");

    let body = body_text(client.get("/").await).await;
    assert!(body.contains("notification notification-error"));
}

#[tokio::test]
async fn test_form_checkout_shows_confirmation() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=1").await;
    client.post_form("/cart/add", "product_id=2").await;
    client.post_form("/cart/add", "product_id=1").await;

    let response = client.post_form("/checkout", "").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("¡Gracias por tu compra!"));
    assert!(body.contains("Total: $\u{a0}26.500"));
    assert!(body.contains("Tu pedido será procesado pronto."));

    let body = body_text(client.get("/cart").await).await;
    assert!(body.contains("Tu carrito está vacío"));
}
