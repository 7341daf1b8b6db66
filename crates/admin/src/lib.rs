//! GIMCO KE Admin library.
//!
//! Back-office operations over the in-memory shop:
//! - Overview figures and recent orders
//! - Inventory management with an audit trail and AI image fallback
//! - Order filtering, sorting, status edits and bulk actions
//! - CSV export and printable invoices
//! - Customer directory
//!
//! Every entry point assumes the caller already passed [`access::authorize`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod config;
pub mod customers;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod inventory;
pub mod invoice;
pub mod orders;

pub use config::AdminConfig;
pub use error::AdminError;
pub use inventory::{ImageError, InventoryError, InventoryService, ItemForm};
pub use orders::{AdminOrderQuery, BulkAction, OrderSelection, SortOrder};
