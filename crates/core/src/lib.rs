//! Yogurt Shop Core - Catalog, cart and checkout logic.
//!
//! This crate provides the domain model shared by the Yogurt Shop binaries:
//! - `storefront` - Public web storefront (catalog grid, cart panel)
//! - `cli` - Command-line tools for inspecting catalogs and scripted checkouts
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP,
//! no sessions. Callers own a [`Cart`] explicitly and pass the [`Catalog`] in
//! when adding products.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and peso prices
//! - [`catalog`] - Read-only product catalog
//! - [`cart`] - Cart aggregator with add-time product snapshots
//! - [`checkout`] - Guarded checkout producing a [`Receipt`]
//! - [`notification`] - Transient user-facing messages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod notification;
pub mod types;

pub use cart::{Cart, CartEntry, CartError, QuantityChange};
pub use catalog::{Catalog, CatalogError, Product};
pub use checkout::{CheckoutError, Receipt, checkout};
pub use notification::{Notification, NotificationLevel};
pub use types::*;
