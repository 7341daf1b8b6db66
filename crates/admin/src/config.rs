//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GIMCO_PLACEHOLDER_IMAGE` - Image used when none was given and generation fails
//! - `GIMCO_EXPORT_DIR` - Where CSV exports are written (default: current directory)
//! - `GEMINI_API_KEY` and friends - see [`gimco_genai::config`]

use std::path::PathBuf;

use gimco_genai::GeminiConfig;
use thiserror::Error;

/// Shown for items saved without an image when generation is unavailable.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400?text=No+Image";

const DEFAULT_EXPORT_DIR: &str = ".";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error(transparent)]
    Gemini(#[from] gimco_genai::ConfigError),
}

/// Back-office configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Fallback catalog image
    pub placeholder_image: String,
    /// Directory for CSV exports
    pub export_dir: PathBuf,
    /// Gemini configuration (None disables image generation)
    pub gemini: Option<GeminiConfig>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            gemini: None,
        }
    }
}

impl AdminConfig {
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

        let placeholder_image = match get("GIMCO_PLACEHOLDER_IMAGE") {
            Some(url) => validate_image_ref("GIMCO_PLACEHOLDER_IMAGE", url.trim())?,
            None => DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        };
        let export_dir =
            get("GIMCO_EXPORT_DIR").map_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR), PathBuf::from);

        Ok(Self {
            placeholder_image,
            export_dir,
            gemini: GeminiConfig::from_lookup(&lookup)?,
        })
    }
}

fn validate_image_ref(key: &str, value: &str) -> Result<String, ConfigError> {
    if ["http://", "https://", "data:"]
        .iter()
        .any(|scheme| value.starts_with(scheme))
    {
        Ok(value.to_string())
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an http(s) URL or a data: URI".to_string(),
        ))
    }
}
