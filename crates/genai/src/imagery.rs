//! Product photography generation and the [`ImageGenerator`] seam.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use gimco_core::{Category, ItemType};
use tracing::{info, instrument};

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::types::{GenerateContentRequest, InlineData};

const DEFAULT_MIME_TYPE: &str = "image/png";

/// What to photograph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub name: String,
    pub category: Category,
    pub item_type: ItemType,
}

/// Studio product-shot prompt for an inventory item.
#[must_use]
pub fn product_photo_prompt(request: &ImageRequest) -> String {
    format!(
        "Professional high-end product photography of {name}, a {category} {item_type}.
Style: Minimalist, clean white or neutral background, studio lighting, highly detailed, realistic, commercial fashion photography suitable for an e-commerce store.
Composition: Wide angle shot, entire object centered and fully visible with ample white space around the edges. Do not crop the item.
Context: Kenyan fashion context if applicable (e.g. if name implies prints).",
        name = request.name,
        category = request.category,
        item_type = request.item_type,
    )
}

/// A generated image, base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    /// Validate inline data returned by the model.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::InvalidImage` if the data is not valid base64.
    pub fn from_inline(inline: &InlineData) -> Result<Self, GeminiError> {
        STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| GeminiError::InvalidImage(e.to_string()))?;
        Ok(Self {
            mime_type: inline
                .mime_type
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            data: inline.data.clone(),
        })
    }

    /// `data:{mime};base64,{data}`, usable directly as a catalog image.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Something that can render a product photo.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate a photo for the item.
    ///
    /// Returns `Ok(None)` when the model answered without an image.
    ///
    /// # Errors
    ///
    /// Returns any transport/API error, or `GeminiError::InvalidImage`.
    async fn generate_product_image(
        &self,
        request: &ImageRequest,
    ) -> Result<Option<ImagePayload>, GeminiError>;
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    #[instrument(skip_all, fields(model = %self.image_model(), item = %request.name))]
    async fn generate_product_image(
        &self,
        request: &ImageRequest,
    ) -> Result<Option<ImagePayload>, GeminiError> {
        let body = GenerateContentRequest::from_text(product_photo_prompt(request));
        let response = self.generate_content(self.image_model(), &body).await?;

        let Some(inline) = response.first_inline_data() else {
            info!("Model returned no image data");
            return Ok(None);
        };
        ImagePayload::from_inline(inline).map(Some)
    }
}
