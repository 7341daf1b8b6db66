//! Gemini configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY` - Google AI Studio key (falls back to `API_KEY`)
//! - `GEMINI_CHAT_MODEL` - Stylist chat model (default: gemini-2.5-flash)
//! - `GEMINI_IMAGE_MODEL` - Product image model (default: gemini-2.5-flash-image)
//! - `GEMINI_BASE_URL` - API root (default: the public v1beta endpoint)
//!
//! A missing key is not an error: AI features degrade to their fallbacks.

use std::collections::HashMap;

use secrecy::SecretString;
use thiserror::Error;

pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Gemini API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Google AI Studio API key
    pub api_key: SecretString,
    /// Model used for stylist chat
    pub chat_model: String,
    /// Model used for product photography
    pub image_model: String,
    /// API root, without trailing slash
    pub base_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("chat_model", &self.chat_model)
            .field("image_model", &self.image_model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiConfig {
    /// Configuration with default models and endpoint.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load configuration from the process environment.
    ///
    /// Returns `None` if no API key is set.
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_BASE_URL` is not an http(s) URL.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_BASE_URL` is not an http(s) URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(api_key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) else {
            return Ok(None);
        };

        if let Some(warning) = weak_key_warning(api_key.trim()) {
            tracing::warn!("GEMINI_API_KEY validation warning: {warning}");
        }

        let base_url = non_empty("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "GEMINI_BASE_URL".to_string(),
                format!("must be an http(s) URL (got {base_url})"),
            ));
        }

        Ok(Some(Self {
            api_key: SecretString::from(api_key.trim().to_string()),
            chat_model: non_empty("GEMINI_CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            image_model: non_empty("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Describe why a key looks like a placeholder, if it does.
///
/// Keys are only warned about; a bad key surfaces as an auth error on
/// first use.
fn weak_key_warning(key: &str) -> Option<String> {
    let lower = key.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Some(format!("appears to be a placeholder (contains '{pattern}')"));
    }
    let entropy = shannon_entropy(key);
    (entropy < MIN_ENTROPY_BITS_PER_CHAR)
        .then(|| format!("low entropy ({entropy:.2} bits/char)"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_key_disables_gemini() {
        let config = GeminiConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.is_none());

        let config = GeminiConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_defaults_applied() {
        let config = GeminiConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k-123")]))
            .unwrap()
            .unwrap();
        assert_eq!(config.api_key.expose_secret(), "k-123");
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_api_key_fallback_and_overrides() {
        let config = GeminiConfig::from_lookup(lookup(&[
            ("API_KEY", "legacy"),
            ("GEMINI_CHAT_MODEL", "gemini-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9000/v1beta/"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(config.api_key.expose_secret(), "legacy");
        assert_eq!(config.chat_model, "gemini-pro");
        assert_eq!(config.base_url, "http://localhost:9000/v1beta");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = GeminiConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_BASE_URL", "ftp://nope"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_weak_key_warning() {
        assert!(weak_key_warning("your-gemini-key").is_some());
        assert!(weak_key_warning("aaaaaaaaaaaaaaaa").is_some());
        assert!(weak_key_warning("AIzaSyD3f8Kq2LmN9pQ7rT0uW4vZ6bC1xY5hJ").is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = GeminiConfig::new(SecretString::from("super-secret-key"));
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-key"));
    }
}
