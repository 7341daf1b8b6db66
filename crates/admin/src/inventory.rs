//! Catalog management with an append-only audit trail.
//!
//! Saving an item without an image asks the configured [`ImageGenerator`]
//! for a product shot. Generation never blocks a save: any failure falls
//! back to the placeholder image.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use gimco_core::{
    CatalogEntry, CatalogEntryId, Category, ITEM_CREATED, ItemType, Kes, Occasion, Shop,
};
use gimco_genai::{GeminiClient, GeminiError, ImageGenerator, ImageRequest};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::AdminConfig;

/// Change note recorded when an edit touched none of the tracked fields.
pub const UNCHANGED_NOTE: &str = "Updated item details";

/// Errors from saving or deleting catalog items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The item has no name.
    #[error("Item name is required.")]
    MissingName,

    /// The price is zero.
    #[error("Price must be greater than zero.")]
    InvalidPrice,

    /// No catalog entry with this id.
    #[error("Catalog item not found: {0}")]
    NotFound(CatalogEntryId),
}

/// Errors from the explicit "Generate with AI" action.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Nothing to describe to the model yet.
    #[error("Please enter an item name first.")]
    MissingName,

    /// No generator configured, or the model returned no image.
    #[error("Could not generate image. Please try again or check API key.")]
    Unavailable,

    /// The generator call failed.
    #[error("Error generating image.")]
    Failed(#[source] GeminiError),
}

/// The inventory editor's form state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub price: Kes,
    pub item_type: ItemType,
    pub category: Category,
    /// URL or `data:` URI; empty means "generate one".
    pub image: String,
    pub occasions: Vec<Occasion>,
}

impl ItemForm {
    /// Prefill the form for editing an existing entry.
    #[must_use]
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.name.clone(),
            description: entry.description.clone(),
            price: entry.price,
            item_type: entry.item_type,
            category: entry.category,
            image: entry.image.clone(),
            occasions: entry.occasions.clone(),
        }
    }

    /// # Errors
    ///
    /// Returns `InventoryError::MissingName` or `InventoryError::InvalidPrice`.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.name.trim().is_empty() {
            return Err(InventoryError::MissingName);
        }
        if self.price == Kes::ZERO {
            return Err(InventoryError::InvalidPrice);
        }
        Ok(())
    }

    fn image_request(&self) -> ImageRequest {
        ImageRequest {
            name: self.name.trim().to_string(),
            category: self.category,
            item_type: self.item_type,
        }
    }
}

/// Audit note for an edit, e.g. `Price: 15000 -> 16000, Name updated`.
#[must_use]
pub fn describe_changes(before: &CatalogEntry, after: &ItemForm, image: &str) -> String {
    let mut changes = Vec::new();
    if before.price != after.price {
        changes.push(format!(
            "Price: {} -> {}",
            before.price.shillings(),
            after.price.shillings()
        ));
    }
    if before.name != after.name {
        changes.push("Name updated".to_string());
    }
    if before.description != after.description {
        changes.push("Description updated".to_string());
    }
    if before.image != image {
        changes.push("Image updated".to_string());
    }
    if before.category != after.category {
        changes.push(format!("Category: {} -> {}", before.category, after.category));
    }

    if changes.is_empty() {
        UNCHANGED_NOTE.to_string()
    } else {
        changes.join(", ")
    }
}

/// Inventory list filter. `None` means "all".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryQuery {
    /// Case-insensitive substring of the item name.
    pub search: String,
    pub item_type: Option<ItemType>,
    pub category: Option<Category>,
}

impl InventoryQuery {
    #[must_use]
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        entry
            .name
            .to_lowercase()
            .contains(&self.search.trim().to_lowercase())
            && self.item_type.is_none_or(|t| entry.item_type == t)
            && self.category.is_none_or(|c| entry.category == c)
    }

    /// Matching entries in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        catalog.iter().filter(|entry| self.matches(entry)).collect()
    }
}

/// Creates, edits and deletes catalog entries.
#[derive(Clone)]
pub struct InventoryService {
    images: Option<Arc<dyn ImageGenerator>>,
    placeholder_image: String,
}

impl fmt::Debug for InventoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryService")
            .field("images", &self.images.is_some())
            .field("placeholder_image", &self.placeholder_image)
            .finish()
    }
}

impl InventoryService {
    #[must_use]
    pub fn new(images: Option<Arc<dyn ImageGenerator>>, placeholder_image: impl Into<String>) -> Self {
        Self {
            images,
            placeholder_image: placeholder_image.into(),
        }
    }

    /// Build the service with a Gemini client when a key is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &AdminConfig) -> Result<Self, GeminiError> {
        let images = match &config.gemini {
            Some(gemini) => Some(Arc::new(GeminiClient::new(gemini)?) as Arc<dyn ImageGenerator>),
            None => None,
        };
        Ok(Self::new(images, config.placeholder_image.clone()))
    }

    #[must_use]
    pub fn placeholder_image(&self) -> &str {
        &self.placeholder_image
    }

    /// Generate a product shot for the form, as a `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::MissingName` before calling out if the form has
    /// no name, `ImageError::Unavailable` if there is no generator or it
    /// produced nothing, and `ImageError::Failed` if the call failed.
    #[instrument(skip_all, fields(item = %form.name))]
    pub async fn generate_image(&self, form: &ItemForm) -> Result<String, ImageError> {
        if form.name.trim().is_empty() {
            return Err(ImageError::MissingName);
        }
        let images = self.images.as_ref().ok_or(ImageError::Unavailable)?;

        match images.generate_product_image(&form.image_request()).await {
            Ok(Some(payload)) => Ok(payload.to_data_uri()),
            Ok(None) => Err(ImageError::Unavailable),
            Err(e) => Err(ImageError::Failed(e)),
        }
    }

    /// The image to store: the form's own, a generated one, or the placeholder.
    async fn resolve_image(&self, form: &ItemForm) -> String {
        if !form.image.trim().is_empty() {
            return form.image.clone();
        }
        match self.generate_image(form).await {
            Ok(uri) => uri,
            Err(ImageError::Failed(error)) => {
                warn!(item = %form.name, error = %error, "Auto-generation failed, using placeholder");
                self.placeholder_image.clone()
            }
            Err(_) => self.placeholder_image.clone(),
        }
    }

    /// Add a new entry to the end of the catalog.
    ///
    /// # Errors
    ///
    /// Returns a validation error; nothing is generated or saved in that case.
    #[instrument(skip_all, fields(item = %form.name))]
    pub async fn create(
        &self,
        shop: &mut Shop,
        form: ItemForm,
        now: DateTime<Utc>,
    ) -> Result<CatalogEntryId, InventoryError> {
        form.validate()?;
        let image = self.resolve_image(&form).await;

        let mut millis = now.timestamp_millis();
        let mut id = CatalogEntryId::new(format!("new-{millis}"));
        while shop.catalog_entry(&id).is_some() {
            millis += 1;
            id = CatalogEntryId::new(format!("new-{millis}"));
        }

        let mut entry = CatalogEntry {
            id: id.clone(),
            item_type: form.item_type,
            category: form.category,
            name: form.name,
            description: form.description,
            price: form.price,
            image,
            occasions: form.occasions,
            history: Vec::new(),
        };
        entry.record_change(now, ITEM_CREATED);
        shop.add_catalog_entry(entry);

        info!(item_id = %id, "Catalog item created");
        Ok(id)
    }

    /// Apply the form to an existing entry and append an audit note.
    ///
    /// Returns the note that was recorded.
    ///
    /// # Errors
    ///
    /// Returns a validation error or `InventoryError::NotFound`.
    #[instrument(skip_all, fields(item_id = %id))]
    pub async fn update(
        &self,
        shop: &mut Shop,
        id: &CatalogEntryId,
        form: ItemForm,
        now: DateTime<Utc>,
    ) -> Result<String, InventoryError> {
        form.validate()?;
        if shop.catalog_entry(id).is_none() {
            return Err(InventoryError::NotFound(id.clone()));
        }
        let image = self.resolve_image(&form).await;

        let entry = shop
            .catalog_entry_mut(id)
            .ok_or_else(|| InventoryError::NotFound(id.clone()))?;
        let note = describe_changes(entry, &form, &image);

        entry.name = form.name;
        entry.description = form.description;
        entry.price = form.price;
        entry.item_type = form.item_type;
        entry.category = form.category;
        entry.image = image;
        entry.occasions = form.occasions;
        entry.record_change(now, note.clone());

        info!(change = %note, "Catalog item updated");
        Ok(note)
    }
}

/// Remove an entry from the catalog. Placed orders keep their snapshot.
///
/// # Errors
///
/// Returns `InventoryError::NotFound` if there is no such entry.
pub fn delete(shop: &mut Shop, id: &CatalogEntryId) -> Result<CatalogEntry, InventoryError> {
    let removed = shop
        .remove_catalog_entry(id)
        .ok_or_else(|| InventoryError::NotFound(id.clone()))?;
    info!(item_id = %id, name = %removed.name, "Catalog item removed");
    Ok(removed)
}
