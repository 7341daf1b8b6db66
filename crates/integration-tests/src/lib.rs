//! Shared fixtures for GIMCO KE cross-crate scenario tests.
//!
//! Every scenario runs against the bundled seed shop; nothing touches the
//! network. Image generation is replaced by [`StubImages`]. Payments use
//! [`PaymentConfig::instant`] or [`StubGateway`] so no test waits on
//! simulated delays.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gimco-integration-tests
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use gimco_core::{Shop, UserId, seed};
use gimco_genai::{GeminiError, ImageGenerator, ImagePayload, ImageRequest};
use gimco_storefront::recently_viewed::RecentlyViewedStore;
use gimco_storefront::services::mpesa::{
    MpesaSimulator, PaymentError, PaymentGateway, PaymentReceipt,
};
use gimco_storefront::{PaymentConfig, ShopperSession};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Seed shop plus a scratch directory for caches and exports.
#[derive(Debug)]
pub struct TestContext {
    pub shop: Shop,
    pub scratch: TempDir,
}

impl TestContext {
    /// # Panics
    ///
    /// Panics if the seed data does not load or no temp dir can be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shop: seed::shop().expect("Seed data should load"),
            scratch: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// A session whose recently viewed cache lives in the scratch directory.
    #[must_use]
    pub fn session(&self, user_id: &str) -> ShopperSession {
        let store = RecentlyViewedStore::new(self.scratch.path().join("gimco_recently_viewed.json"));
        ShopperSession::with_store(UserId::new(user_id), store)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A payment gateway that always approves, immediately.
#[must_use]
pub fn approving_gateway() -> MpesaSimulator {
    MpesaSimulator::new(PaymentConfig::instant(1.0))
}

/// A payment gateway that always declines, immediately.
#[must_use]
pub fn declining_gateway() -> MpesaSimulator {
    MpesaSimulator::new(PaymentConfig::instant(0.0))
}

/// Payment gateway double that counts calls.
#[derive(Debug)]
pub struct StubGateway {
    approve: bool,
    calls: AtomicUsize,
}

impl StubGateway {
    #[must_use]
    pub const fn approving() -> Self {
        Self {
            approve: true,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub const fn declining() -> Self {
        Self {
            approve: false,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn request_payment(
        &self,
        phone: &str,
        amount: Decimal,
    ) -> Result<PaymentReceipt, PaymentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.approve {
            return Err(PaymentError::Declined);
        }
        Ok(PaymentReceipt {
            reference: "STUBREF001".to_string(),
            phone: phone.to_string(),
            amount,
        })
    }
}

/// What [`StubImages`] answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubBehaviour {
    /// A tiny PNG payload.
    Image,
    /// A reply without image data.
    NoImage,
    /// A transport failure.
    Fail,
}

/// Image generator double that counts calls.
#[derive(Debug)]
pub struct StubImages {
    behaviour: StubBehaviour,
    calls: AtomicUsize,
}

impl StubImages {
    #[must_use]
    pub const fn new(behaviour: StubBehaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for StubImages {
    async fn generate_product_image(
        &self,
        _request: &ImageRequest,
    ) -> Result<Option<ImagePayload>, GeminiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            StubBehaviour::Image => Ok(Some(ImagePayload {
                mime_type: "image/png".to_string(),
                data: "iVBORw0KGgo=".to_string(),
            })),
            StubBehaviour::NoImage => Ok(None),
            StubBehaviour::Fail => Err(GeminiError::Api {
                status: "UNAVAILABLE".to_string(),
                message: "The model is overloaded".to_string(),
            }),
        }
    }
}
