//! Unified error handling for admin.

use gimco_core::OrderError;
use thiserror::Error;

use crate::export::ExportError;
use crate::inventory::{ImageError, InventoryError};

/// Back-office error type.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The signed-in user is not staff.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Order update failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Catalog edit failed.
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// Explicit image generation failed.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// CSV export failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl AdminError {
    /// Message suitable for showing to staff.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Forbidden(_) => "You do not have access to the admin panel.".to_string(),
            Self::Inventory(e) => e.to_string(),
            Self::Image(e) => e.to_string(),
            Self::Export(ExportError::NoOrders) => ExportError::NoOrders.to_string(),
            _ => self.to_string(),
        }
    }
}
