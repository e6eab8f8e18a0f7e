//! Integration tests for Yogurt Shop.
//!
//! # Running Tests
//!
//! ```bash
//! # Against an in-process storefront bound to a random port
//! cargo test -p yogurt-shop-integration-tests
//!
//! # Against an already running storefront
//! STOREFRONT_TEST_URL=http://localhost:3000 cargo test -p yogurt-shop-integration-tests
//! ```
//!
//! Each [`TestContext`] owns a cookie-enabled client, so every test gets its
//! own session and therefore its own cart.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use reqwest::Client;
use yogurt_shop_core::Catalog;
use yogurt_shop_storefront::{app, config::StorefrontConfig, state::AppState};

/// Error raised while setting up a test context.
pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

/// A storefront to talk to and a client with its own cookie jar.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Connect to `STOREFRONT_TEST_URL`, or spawn a storefront in-process.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or the client cannot
    /// be built.
    pub async fn new() -> Result<Self, SetupError> {
        let base_url = match std::env::var("STOREFRONT_TEST_URL") {
            Ok(url) => url.trim_end_matches('/').to_string(),
            Err(_) => format!("http://{}", spawn_storefront().await?),
        };

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A second context against the same server with an empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn fresh_session(&self) -> Result<Self, SetupError> {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            base_url: self.base_url.clone(),
        })
    }
}

/// Serve the storefront with the built-in catalog on an ephemeral port.
async fn spawn_storefront() -> Result<SocketAddr, SetupError> {
    let config = StorefrontConfig::from_lookup(|_| None)?;
    let router = app(AppState::with_catalog(config, Catalog::builtin()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(addr)
}
