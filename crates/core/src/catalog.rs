//! Read-only product catalog.
//!
//! The catalog is defined once at process start and never mutated. Lookups
//! by id return `None` for unknown products; callers decide what absence means.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Errors that can occur when building a [`Catalog`].
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// A product id is zero or negative.
    #[error("product id must be positive (got {0})")]
    NonPositiveId(ProductId),
    /// Two products share the same id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    /// The catalog source is not valid JSON for a product list.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A product offered in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique positive product id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short marketing description.
    pub description: String,
    /// Unit price in whole pesos.
    pub price: Price,
    /// Display glyph (an emoji) used in place of a product image.
    pub glyph: String,
}

/// A fixed list of products in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating that ids are positive and unique.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NonPositiveId`] or [`CatalogError::DuplicateId`]
    /// for the first offending product.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        for (index, product) in products.iter().enumerate() {
            if !product.id.is_positive() {
                return Err(CatalogError::NonPositiveId(product.id));
            }
            if products
                .iter()
                .take(index)
                .any(|earlier| earlier.id == product.id)
            {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the text does not deserialize, or a
    /// validation error from [`Catalog::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use yogurt_shop_core::{Catalog, ProductId};
    ///
    /// let catalog = Catalog::from_json(
    ///     r#"[{"id": 1, "name": "Kéfir", "description": "Fermentado", "price": 7000, "glyph": "🥛"}]"#,
    /// ).unwrap();
    /// assert_eq!(catalog.find_by_id(ProductId::new(1)).unwrap().name, "Kéfir");
    /// ```
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(text)?;
        Self::new(products)
    }

    /// The built-in yogurt catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let product = |id, name: &str, description: &str, price, glyph: &str| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            price: Price::from_pesos(price),
            glyph: glyph.to_string(),
        };

        Self {
            products: vec![
                product(
                    1,
                    "Yogurt Natural",
                    "Yogurt natural sin azúcar, 100% natural",
                    8500,
                    "🥛",
                ),
                product(
                    2,
                    "Yogurt de Fresa",
                    "Delicioso yogurt con trozos de fresa",
                    9500,
                    "🍓",
                ),
                product(
                    3,
                    "Yogurt de Mora",
                    "Yogurt cremoso con mora colombiana",
                    9500,
                    "🫐",
                ),
                product(
                    4,
                    "Yogurt Griego",
                    "Yogurt griego alto en proteína",
                    12000,
                    "🏛️",
                ),
                product(
                    5,
                    "Yogurt de Mango",
                    "Yogurt tropical con mango fresco",
                    10000,
                    "🥭",
                ),
                product(
                    6,
                    "Yogurt de Arándanos",
                    "Yogurt con arándanos antioxidantes",
                    11000,
                    "🫐",
                ),
            ],
        }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
