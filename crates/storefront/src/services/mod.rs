//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Session-scoped cart operations and checkout

pub mod cart;

pub use cart::{CartAction, apply_action, checkout};
