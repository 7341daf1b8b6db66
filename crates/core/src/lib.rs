//! GIMCO KE Core - Shared domain library.
//!
//! This crate provides the types and pure logic used by every GIMCO KE
//! component:
//! - `storefront` - Shopper flows: catalog, cart, checkout, tracking
//! - `admin` - Back-office inventory, order and customer management
//! - `cli` - Command-line tools over a seeded shop
//!
//! # Architecture
//!
//! The core crate contains only types and in-memory logic - no I/O beyond
//! the bundled seed data, no HTTP clients.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, KES amounts, statuses and measurements
//! - [`catalog`] - Catalog entries and storefront filtering
//! - [`cart`] - The shopping cart
//! - [`order`] - Orders, lines and checkout snapshots
//! - [`tracking`] - Progress steps for order lines
//! - [`user`] - Customer profiles and roles
//! - [`shop`] - The in-memory application state
//! - [`seed`] - Bundled sample data

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod seed;
pub mod shop;
pub mod tracking;
pub mod types;
pub mod user;

pub use cart::{Cart, CartEntry};
pub use catalog::{
    CatalogEntry, CatalogFilter, Category, HistoryEntry, ITEM_CREATED, Occasion, max_catalog_price,
};
pub use order::{Order, OrderError, OrderLine};
pub use seed::SeedError;
pub use shop::Shop;
pub use tracking::{Progress, Step, StepState};
pub use types::*;
pub use user::{Role, UserProfile};
