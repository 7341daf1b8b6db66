//! GIMCO KE Storefront library.
//!
//! Shopper-facing flows over the in-memory shop:
//! - Catalog browsing with category, occasion and price filters
//! - Cart, wishlist and the recently viewed strip
//! - Checkout with a simulated M-PESA payment
//! - Order tracking split into active orders and history
//! - Measurements profile and the "Tailor AI" stylist chat

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod recently_viewed;
pub mod services;
pub mod session;
pub mod views;
pub mod wishlist;

pub use config::{PaymentConfig, StorefrontConfig};
pub use error::StorefrontError;
pub use session::ShopperSession;
