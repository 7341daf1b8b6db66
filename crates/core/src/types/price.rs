//! Kenyan shilling amounts.
//!
//! Prices in the shop are whole shillings with no minor units. VAT is only
//! ever applied for display at the payment prompt, so it is computed with
//! decimal arithmetic and never stored on an order.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kenyan VAT rate (16%).
pub const VAT_RATE: Decimal = Decimal::from_parts(16, 0, 0, false, 2);

/// An amount in whole Kenyan shillings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Kes(u64);

impl Kes {
    /// Zero shillings.
    pub const ZERO: Self = Self(0);

    /// Create an amount from whole shillings.
    #[must_use]
    pub const fn new(shillings: u64) -> Self {
        Self(shillings)
    }

    /// Get the amount in whole shillings.
    #[must_use]
    pub const fn shillings(&self) -> u64 {
        self.0
    }

    /// The amount as a decimal value.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// The VAT portion of this amount, rounded to cents.
    #[must_use]
    pub fn vat(&self) -> Decimal {
        (self.as_decimal() * VAT_RATE).round_dp(2)
    }

    /// The amount with VAT added, as shown on the M-PESA prompt.
    #[must_use]
    pub fn with_vat(&self) -> Decimal {
        self.as_decimal() + self.vat()
    }
}

impl fmt::Display for Kes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KES {}", group_thousands(&self.0.to_string()))
    }
}

impl Add for Kes {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Kes {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Kes {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<u64> for Kes {
    fn from(shillings: u64) -> Self {
        Self(shillings)
    }
}

/// Format a decimal amount as `KES 1,234.56`.
#[must_use]
pub fn format_kes_decimal(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let text = rounded.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    if fraction.is_empty() {
        format!("KES {}", group_thousands(whole))
    } else {
        format!("KES {}.{fraction}", group_thousands(whole))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Kes::new(15_000).to_string(), "KES 15,000");
        assert_eq!(Kes::new(950).to_string(), "KES 950");
        assert_eq!(Kes::new(1_234_567).to_string(), "KES 1,234,567");
    }

    #[test]
    fn test_sum_of_amounts() {
        let total: Kes = [Kes::new(15_000), Kes::new(6_500)].iter().sum();
        assert_eq!(total, Kes::new(21_500));
    }

    #[test]
    fn test_vat_is_sixteen_percent() {
        let total = Kes::new(21_500);
        assert_eq!(total.vat(), Decimal::from(3_440));
        assert_eq!(total.with_vat(), Decimal::from(24_940));
    }

    #[test]
    fn test_format_decimal_amount() {
        assert_eq!(format_kes_decimal(Decimal::from(24_940)), "KES 24,940");
        assert_eq!(format_kes_decimal(Decimal::new(2_088, 1)), "KES 208.8");
    }
}
