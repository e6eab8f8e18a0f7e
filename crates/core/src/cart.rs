//! Cart aggregator.
//!
//! A cart is an ordered list of entries, one per product, in the order each
//! product was first added. Entries hold a snapshot of the product taken at
//! add-time, so later catalog edits never change an existing entry.
//!
//! Invariants:
//! - every entry has `quantity >= 1`; an entry reaching zero is removed
//! - at most one entry per product id
//!
//! Totals are recomputed on every read rather than maintained incrementally.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{Price, ProductId};

/// Errors returned by cart operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product id does not resolve in the catalog.
    #[error("unknown product id {0}")]
    UnknownProduct(ProductId),
}

/// One product's quantity record within a [`Cart`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    product_id: ProductId,
    name: String,
    description: String,
    glyph: String,
    unit_price: Price,
    quantity: u32,
}

impl CartEntry {
    fn snapshot(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            glyph: product.glyph.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Product name at add-time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product description at add-time.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Unit price at add-time.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `quantity × unit_price`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// Result of decreasing an entry's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The entry is still in the cart with the given quantity.
    Updated(u32),
    /// The quantity reached zero and the entry was removed.
    Removed,
}

/// A per-session shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing entry, or appends a new entry with quantity 1
    /// holding a snapshot of the catalog product. Returns the entry's new
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownProduct`] if the id is not in the catalog.
    /// The cart is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use yogurt_shop_core::{Cart, Catalog, Price, ProductId};
    ///
    /// let catalog = Catalog::builtin();
    /// let mut cart = Cart::new();
    /// cart.add(&catalog, ProductId::new(1)).unwrap();
    /// cart.add(&catalog, ProductId::new(2)).unwrap();
    /// cart.add(&catalog, ProductId::new(1)).unwrap();
    ///
    /// assert_eq!(cart.total_items(), 3);
    /// assert_eq!(cart.total_price(), Price::from_pesos(26_500));
    /// ```
    pub fn add(&mut self, catalog: &Catalog, product_id: ProductId) -> Result<u32, CartError> {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.product_id == product_id)
        {
            entry.quantity = entry.quantity.saturating_add(1);
            return Ok(entry.quantity);
        }

        let product = catalog
            .find_by_id(product_id)
            .ok_or(CartError::UnknownProduct(product_id))?;
        self.entries.push(CartEntry::snapshot(product));
        Ok(1)
    }

    /// Increase an entry's quantity by one.
    ///
    /// Returns the new quantity, or `None` if the product is not in the cart.
    pub fn increase(&mut self, product_id: ProductId) -> Option<u32> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.product_id == product_id)?;
        entry.quantity = entry.quantity.saturating_add(1);
        Some(entry.quantity)
    }

    /// Decrease an entry's quantity by one, removing it at zero.
    ///
    /// Returns `None` if the product is not in the cart.
    pub fn decrease(&mut self, product_id: ProductId) -> Option<QuantityChange> {
        let index = self.position(product_id)?;
        let entry = self.entries.get_mut(index)?;
        if entry.quantity > 1 {
            entry.quantity -= 1;
            return Some(QuantityChange::Updated(entry.quantity));
        }
        self.entries.remove(index);
        Some(QuantityChange::Removed)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of all entry quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    /// Sum of `quantity × unit_price` over all entries.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Entries in the order products were first added.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries
            .iter()
            .find(|entry| entry.product_id == product_id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.product_id == product_id)
    }
}
