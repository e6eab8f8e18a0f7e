//! CLI command implementations.

pub mod catalog;
pub mod checkout;

use std::path::{Path, PathBuf};

use yogurt_shop_core::Catalog;

/// Resolve the catalog to operate on.
///
/// An explicit path wins, then `STOREFRONT_CATALOG_PATH`, then the built-in
/// catalog.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub async fn load_catalog(path: Option<PathBuf>) -> Result<Catalog, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let path = path.or_else(|| {
        std::env::var("STOREFRONT_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    });

    match path {
        Some(path) => read_catalog(&path).await,
        None => Ok(Catalog::builtin()),
    }
}

/// Read and validate a catalog JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid catalog.
pub async fn read_catalog(path: &Path) -> Result<Catalog, Box<dyn std::error::Error>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let catalog = Catalog::from_json(&text)?;
    tracing::debug!(path = %path.display(), products = catalog.len(), "Loaded catalog");
    Ok(catalog)
}
