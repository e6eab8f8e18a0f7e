//! Application state shared across handlers.

use std::sync::Arc;

use yogurt_shop_core::{Catalog, CatalogError};

use crate::config::StorefrontConfig;
use crate::models::CartStore;

/// Error loading the product catalog at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is read-only for
/// the life of the process; carts are keyed by session id in the cart store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    carts: Arc<CartStore>,
}

impl AppState {
    /// Create a new application state, loading the catalog named by the
    /// configuration or falling back to the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog file cannot be read or is
    /// invalid.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogLoadError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let catalog = Catalog::from_json(&text)?;
                tracing::info!(
                    path = %path.display(),
                    products = catalog.len(),
                    "Loaded catalog from file"
                );
                catalog
            }
            None => Catalog::builtin(),
        };

        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state around an already-built catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts: Arc::new(CartStore::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the per-session cart store.
    #[must_use]
    pub fn carts(&self) -> &Arc<CartStore> {
        &self.inner.carts
    }
}
