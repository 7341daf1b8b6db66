//! Gemini integration for GIMCO KE.
//!
//! Two features are backed by Google's Gemini models:
//! - Stylist chat ("Tailor AI") via [`StyleAdvisor`]
//! - Product photography for inventory items via [`ImageGenerator`]
//!
//! Both are traits so callers can run without a key or substitute a fake in tests.
//! [`GeminiClient`] implements both.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod imagery;
pub mod stylist;
pub mod types;

pub use client::GeminiClient;
pub use config::{ConfigError, GeminiConfig};
pub use error::GeminiError;
pub use imagery::{ImageGenerator, ImagePayload, ImageRequest, product_photo_prompt};
pub use stylist::{StyleAdvisor, user_prompt};
