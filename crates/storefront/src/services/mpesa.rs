//! Simulated M-PESA STK push.
//!
//! No money moves. The simulator waits a fixed delay and approves with a
//! configurable probability, so the checkout flow can be exercised end to end.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::PaymentConfig;

/// Safaricom mobile numbers: optional 254/+254/0 prefix, then 7xx xxx xxx.
static SAFARICOM_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:254|\+254|0)?(7(?:(?:[129][0-9])|(?:0[0-8])|(4[0-1]))[0-9]{6})$")
        .expect("Invalid regex")
});

/// Errors that can occur during payment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The number is not a Safaricom line.
    #[error("Please enter a valid Safaricom number (e.g., 0712345678)")]
    InvalidPhone,

    /// The customer cancelled or had insufficient funds.
    #[error("Transaction declined by user or insufficient funds.")]
    Declined,
}

/// Validate a Safaricom number and normalise it to `2547XXXXXXXX`.
///
/// # Errors
///
/// Returns `PaymentError::InvalidPhone` if the number does not match.
pub fn normalize_phone(input: &str) -> Result<String, PaymentError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    SAFARICOM_NUMBER
        .captures(&compact)
        .and_then(|caps| caps.get(1))
        .map(|subscriber| format!("254{}", subscriber.as_str()))
        .ok_or(PaymentError::InvalidPhone)
}

/// Proof of an approved payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Ten-character confirmation code, e.g. `QK7P2M9XZA`.
    pub reference: String,
    /// Normalised payer number.
    pub phone: String,
    /// Amount charged, VAT inclusive.
    pub amount: Decimal,
}

/// Something that can collect a mobile-money payment.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Push a payment request to the customer's phone and wait for the outcome.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidPhone` for a bad number, or
    /// `PaymentError::Declined` when the customer rejects it.
    async fn request_payment(&self, phone: &str, amount: Decimal) -> Result<PaymentReceipt, PaymentError>;

    /// Pause on the success screen before the order is placed.
    fn confirmation_delay(&self) -> Duration {
        Duration::ZERO
    }
}

/// Fake STK push gateway.
#[derive(Debug, Clone, Copy)]
pub struct MpesaSimulator {
    config: PaymentConfig,
}

impl MpesaSimulator {
    /// A rate outside 0..=1 is clamped; a non-finite rate declines everything.
    #[must_use]
    pub fn new(config: PaymentConfig) -> Self {
        let success_rate = if config.success_rate.is_finite() {
            config.success_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            config: PaymentConfig {
                success_rate,
                ..config
            },
        }
    }

    #[must_use]
    pub const fn config(&self) -> &PaymentConfig {
        &self.config
    }
}

#[async_trait]
impl PaymentGateway for MpesaSimulator {
    #[instrument(skip_all, fields(amount = %amount))]
    async fn request_payment(&self, phone: &str, amount: Decimal) -> Result<PaymentReceipt, PaymentError> {
        let phone = normalize_phone(phone)?;

        tokio::time::sleep(self.config.delay).await;

        if !rand::random_bool(self.config.success_rate) {
            warn!("Simulated payment declined");
            return Err(PaymentError::Declined);
        }

        let reference = confirmation_code();
        info!(reference = %reference, "Simulated payment approved");
        Ok(PaymentReceipt {
            reference,
            phone,
            amount,
        })
    }

    fn confirmation_delay(&self) -> Duration {
        self.config.confirmation_delay
    }
}

fn confirmation_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

/// Where the payment prompt is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentState {
    #[default]
    Idle,
    Processing,
    Success(PaymentReceipt),
    Failed(PaymentError),
}

/// State machine behind the payment prompt.
///
/// An invalid number leaves the prompt idle with an error shown. A decline
/// moves it to `Failed`; [`PaymentPrompt::retry`] returns it to `Idle`.
#[derive(Debug, Clone, Default)]
pub struct PaymentPrompt {
    state: PaymentState,
    error: Option<PaymentError>,
}

impl PaymentPrompt {
    #[must_use]
    pub const fn state(&self) -> &PaymentState {
        &self.state
    }

    /// Validation error to show under the phone field.
    #[must_use]
    pub const fn error(&self) -> Option<&PaymentError> {
        self.error.as_ref()
    }

    /// Validate the number and run the payment.
    ///
    /// # Errors
    ///
    /// Returns the payment error, which is also reflected in the state.
    pub async fn submit(
        &mut self,
        gateway: &dyn PaymentGateway,
        phone: &str,
        amount: Decimal,
    ) -> Result<PaymentReceipt, PaymentError> {
        if let Err(e) = normalize_phone(phone) {
            self.error = Some(e.clone());
            return Err(e);
        }

        self.error = None;
        self.state = PaymentState::Processing;
        match gateway.request_payment(phone, amount).await {
            Ok(receipt) => {
                self.state = PaymentState::Success(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                self.state = PaymentState::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Return to the idle state after a failure.
    pub fn retry(&mut self) {
        self.state = PaymentState::Idle;
        self.error = None;
    }
}
