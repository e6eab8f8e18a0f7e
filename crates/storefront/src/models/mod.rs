//! Session-backed models for storefront.

pub mod cart_store;
pub mod session;

pub use cart_store::CartStore;
pub use session::{SessionCart, keys};
