//! The shopper's measurements profile.

use gimco_core::{MeasurementField, Measurements, Shop, UserId};
use tracing::{info, instrument};

use crate::error::StorefrontError;

/// One row of the "How to measure" guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideRow {
    pub key: &'static str,
    pub label: &'static str,
    pub instructions: &'static str,
}

/// Instructions for each standard measurement.
#[must_use]
pub fn measurement_guide() -> Vec<GuideRow> {
    MeasurementField::ALL
        .iter()
        .map(|field| GuideRow {
            key: field.key(),
            label: field.label(),
            instructions: field.instructions(),
        })
        .collect()
}

/// Apply measurement edits to a customer's profile.
///
/// All edits are validated before any is saved. Orders already placed keep
/// the measurements they were placed with.
///
/// # Errors
///
/// Returns an error if the customer is unknown or any value is invalid.
#[instrument(skip_all, fields(user_id = %user_id, fields = updates.len()))]
pub fn update_measurements(
    shop: &mut Shop,
    user_id: &UserId,
    updates: &[(&str, f64)],
) -> Result<Measurements, StorefrontError> {
    let customer = shop
        .customer_mut(user_id)
        .ok_or_else(|| StorefrontError::NotFound(format!("customer {user_id}")))?;

    let mut measurements = customer.measurements.clone();
    for (key, value) in updates {
        measurements.set(key, *value)?;
    }
    customer.measurements = measurements.clone();
    info!("Measurements saved");
    Ok(measurements)
}
