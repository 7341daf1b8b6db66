//! Unified error handling for shopper-facing operations.

use gimco_core::{MeasurementError, OrderError};
use thiserror::Error;

use crate::services::mpesa::PaymentError;

/// Storefront error type.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Order placement or update failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Payment was rejected.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// A measurement value was rejected.
    #[error("Measurement error: {0}")]
    Measurement(#[from] MeasurementError),

    /// Referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl StorefrontError {
    /// Message suitable for showing to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Payment(e) => e.to_string(),
            Self::Order(OrderError::EmptyCart) => "Your cart is empty.".to_string(),
            Self::Measurement(e) => e.to_string(),
            Self::NotFound(_) | Self::Order(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}
