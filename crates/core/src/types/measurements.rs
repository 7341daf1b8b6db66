//! Body measurements for bespoke tailoring.
//!
//! Five named fields are always present. Tailors may record extra named
//! measurements (e.g. `neck`, `hip`), which are kept alongside them and
//! round-trip through serialization as sibling keys.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when recording a measurement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasurementError {
    /// The value was NaN or infinite.
    #[error("measurement '{0}' must be a finite number")]
    NotFinite(String),

    /// The value was negative.
    #[error("measurement '{field}' cannot be negative (got {value})")]
    Negative { field: String, value: f64 },

    /// The field name was empty.
    #[error("measurement name cannot be empty")]
    EmptyName,
}

/// The standard measurements every profile carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementField {
    Chest,
    Waist,
    Inseam,
    Shoulders,
    Sleeve,
}

impl MeasurementField {
    pub const ALL: [Self; 5] = [
        Self::Chest,
        Self::Waist,
        Self::Inseam,
        Self::Shoulders,
        Self::Sleeve,
    ];

    /// Key used in serialized profiles.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Waist => "waist",
            Self::Inseam => "inseam",
            Self::Shoulders => "shoulders",
            Self::Sleeve => "sleeve",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Waist => "Waist",
            Self::Inseam => "Inseam",
            Self::Shoulders => "Shoulders",
            Self::Sleeve => "Sleeve",
        }
    }

    /// How to take this measurement with a tape.
    #[must_use]
    pub const fn instructions(&self) -> &'static str {
        match self {
            Self::Chest => {
                "Wrap the tape measure around the fullest part of your chest, under your armpits. Keep the tape parallel to the floor."
            }
            Self::Waist => {
                "Measure around your natural waistline, slightly above your belly button. Keep the tape comfortable, not tight."
            }
            Self::Inseam => {
                "Measure from the crotch seam down to the bottom of the ankle bone on the inside of the leg."
            }
            Self::Shoulders => {
                "Measure across the back from the tip of one shoulder bone to the other."
            }
            Self::Sleeve => {
                "Measure from the tip of the shoulder down to your wrist bone, with your arm slightly bent."
            }
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

/// Fallback instructions for non-standard measurements.
pub const GENERIC_INSTRUCTIONS: &str = "Use a flexible tape measure.";

/// A customer's body measurements, in inches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurements {
    pub chest: f64,
    pub waist: f64,
    pub inseam: f64,
    pub shoulders: f64,
    pub sleeve: f64,
    /// Additional named measurements.
    #[serde(flatten)]
    pub extra: BTreeMap<String, f64>,
}

impl Measurements {
    /// Create a profile from the five standard measurements.
    #[must_use]
    pub fn new(chest: f64, waist: f64, inseam: f64, shoulders: f64, sleeve: f64) -> Self {
        Self {
            chest,
            waist,
            inseam,
            shoulders,
            sleeve,
            extra: BTreeMap::new(),
        }
    }

    /// Look up a measurement by key, standard or extra.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        match MeasurementField::from_key(key) {
            Some(field) => Some(self.field(field)),
            None => self.extra.get(key).copied(),
        }
    }

    /// Value of a standard field.
    #[must_use]
    pub const fn field(&self, field: MeasurementField) -> f64 {
        match field {
            MeasurementField::Chest => self.chest,
            MeasurementField::Waist => self.waist,
            MeasurementField::Inseam => self.inseam,
            MeasurementField::Shoulders => self.shoulders,
            MeasurementField::Sleeve => self.sleeve,
        }
    }

    /// Record a measurement by key, standard or extra.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the value is negative or not finite.
    pub fn set(&mut self, key: &str, value: f64) -> Result<(), MeasurementError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(MeasurementError::EmptyName);
        }
        if !value.is_finite() {
            return Err(MeasurementError::NotFinite(key.to_owned()));
        }
        if value < 0.0 {
            return Err(MeasurementError::Negative {
                field: key.to_owned(),
                value,
            });
        }

        match MeasurementField::from_key(key) {
            Some(MeasurementField::Chest) => self.chest = value,
            Some(MeasurementField::Waist) => self.waist = value,
            Some(MeasurementField::Inseam) => self.inseam = value,
            Some(MeasurementField::Shoulders) => self.shoulders = value,
            Some(MeasurementField::Sleeve) => self.sleeve = value,
            None => {
                self.extra.insert(key.to_owned(), value);
            }
        }
        Ok(())
    }

    /// Short summary used as stylist context: `Chest: 42, Waist: 34, Inseam: 32`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Chest: {}, Waist: {}, Inseam: {}",
            self.chest, self.waist, self.inseam
        )
    }
}

impl fmt::Display for Measurements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let standard = MeasurementField::ALL
            .iter()
            .map(|field| (field.key(), self.field(*field)));
        let extra = self.extra.iter().map(|(k, v)| (k.as_str(), *v));
        for (i, (key, value)) in standard.chain(extra).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}
