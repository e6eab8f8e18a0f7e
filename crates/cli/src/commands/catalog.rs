//! `catalog` subcommands.

use std::path::{Path, PathBuf};

use yogurt_shop_core::Catalog;

/// Print the catalog as a table or as JSON.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or serialized.
pub async fn list(path: Option<PathBuf>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = super::load_catalog(path).await?;

    let output = if json {
        serde_json::to_string_pretty(catalog.products())?
    } else {
        render_table(&catalog)
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}

/// Validate a catalog file, reporting the number of products.
///
/// # Errors
///
/// Returns an error if the file is unreadable, malformed, or has invalid ids.
pub async fn validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = super::read_catalog(path).await?;
    tracing::info!(
        path = %path.display(),
        products = catalog.len(),
        "Catalog is valid"
    );
    Ok(())
}

fn render_table(catalog: &Catalog) -> String {
    catalog
        .products()
        .iter()
        .map(|p| {
            format!(
                "{:>3}  {} {:<28} {:>10}",
                p.id.to_string(),
                p.glyph,
                p.name,
                p.price.display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
