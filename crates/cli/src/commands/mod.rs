//! Subcommand implementations.

pub mod ai;
pub mod checkout;
pub mod orders;
pub mod shop;

use gimco_admin::AdminError;
use gimco_admin::export::ExportError;
use gimco_admin::inventory::InventoryError;
use gimco_genai::GeminiError;
use gimco_storefront::StorefrontError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Acting user is missing or not staff.
    #[error(transparent)]
    Admin(#[from] AdminError),

    /// A shopper flow failed.
    #[error("{}", .0.user_message())]
    Storefront(#[from] StorefrontError),

    /// Catalog item could not be saved.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// CSV export failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Gemini client could not be built.
    #[error("Gemini error: {0}")]
    Gemini(#[from] GeminiError),

    /// Environment configuration is malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Referenced id does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<gimco_storefront::config::ConfigError> for CommandError {
    fn from(e: gimco_storefront::config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<gimco_admin::config::ConfigError> for CommandError {
    fn from(e: gimco_admin::config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
