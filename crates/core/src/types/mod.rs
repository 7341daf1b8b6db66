//! Core types for the GIMCO KE shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod measurements;
pub mod price;
pub mod status;

pub use id::*;
pub use measurements::{GENERIC_INSTRUCTIONS, MeasurementError, MeasurementField, Measurements};
pub use price::{Kes, VAT_RATE, format_kes_decimal};
pub use status::*;
