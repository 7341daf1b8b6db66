//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GIMCO_CACHE_DIR` - Directory for the recently viewed cache (default: .gimco-cache)
//! - `GIMCO_PAYMENT_DELAY_MS` - Simulated M-PESA round trip (default: 3000)
//! - `GIMCO_PAYMENT_CONFIRM_MS` - Pause on the success screen before the order is placed (default: 1500)
//! - `GIMCO_PAYMENT_SUCCESS_RATE` - Probability a simulated payment is approved (default: 0.9)
//! - `GEMINI_API_KEY` and friends - see [`gimco_genai::config`]

use std::path::PathBuf;
use std::time::Duration;

use gimco_genai::GeminiConfig;
use thiserror::Error;

const DEFAULT_CACHE_DIR: &str = ".gimco-cache";
const DEFAULT_PAYMENT_DELAY_MS: u64 = 3000;
const DEFAULT_PAYMENT_CONFIRM_MS: u64 = 1500;
const DEFAULT_PAYMENT_SUCCESS_RATE: f64 = 0.9;

/// File name of the recently viewed cache inside the cache directory.
pub const RECENTLY_VIEWED_FILE: &str = "gimco_recently_viewed.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error(transparent)]
    Gemini(#[from] gimco_genai::ConfigError),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding per-device caches
    pub cache_dir: PathBuf,
    /// Simulated payment behaviour
    pub payment: PaymentConfig,
    /// Gemini configuration (None disables the stylist)
    pub gemini: Option<GeminiConfig>,
}

/// Simulated M-PESA behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentConfig {
    /// How long the STK push takes to resolve
    pub delay: Duration,
    /// How long the success screen shows before the order is placed
    pub confirmation_delay: Duration,
    /// Probability of approval, within 0..=1
    pub success_rate: f64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_PAYMENT_DELAY_MS),
            confirmation_delay: Duration::from_millis(DEFAULT_PAYMENT_CONFIRM_MS),
            success_rate: DEFAULT_PAYMENT_SUCCESS_RATE,
        }
    }
}

impl PaymentConfig {
    /// No delays and a fixed outcome. Useful for demos and tests.
    #[must_use]
    pub const fn instant(success_rate: f64) -> Self {
        Self {
            delay: Duration::ZERO,
            confirmation_delay: Duration::ZERO,
            success_rate,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let cache_dir = get("GIMCO_CACHE_DIR").map_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR), PathBuf::from);
        let delay = parse_millis("GIMCO_PAYMENT_DELAY_MS", get("GIMCO_PAYMENT_DELAY_MS"), DEFAULT_PAYMENT_DELAY_MS)?;
        let confirmation_delay = parse_millis(
            "GIMCO_PAYMENT_CONFIRM_MS",
            get("GIMCO_PAYMENT_CONFIRM_MS"),
            DEFAULT_PAYMENT_CONFIRM_MS,
        )?;
        let success_rate = match get("GIMCO_PAYMENT_SUCCESS_RATE") {
            Some(raw) => parse_rate("GIMCO_PAYMENT_SUCCESS_RATE", &raw)?,
            None => DEFAULT_PAYMENT_SUCCESS_RATE,
        };

        Ok(Self {
            cache_dir,
            payment: PaymentConfig {
                delay,
                confirmation_delay,
                success_rate,
            },
            gemini: GeminiConfig::from_lookup(&lookup)?,
        })
    }

    /// Path of the recently viewed cache file.
    #[must_use]
    pub fn recently_viewed_path(&self) -> PathBuf {
        self.cache_dir.join(RECENTLY_VIEWED_FILE)
    }
}

fn parse_millis(key: &str, raw: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let millis = match raw {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?,
        None => default,
    };
    Ok(Duration::from_millis(millis))
}

fn parse_rate(key: &str, raw: &str) -> Result<f64, ConfigError> {
    let rate = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0 and 1 (got {rate})"),
        ));
    }
    Ok(rate)
}
