//! Gemini-backed commands: stylist chat and product photos.

use std::sync::Arc;

use chrono::Utc;
use gimco_admin::{AdminConfig, InventoryService, ItemForm, access};
use gimco_core::{Category, ItemType, Kes, Shop, UserId};
use gimco_genai::{GeminiClient, StyleAdvisor};
use gimco_storefront::StorefrontConfig;
use gimco_storefront::services::stylist::StylistChat;
use tracing::{info, warn};

use super::CommandError;

/// Ask the stylist one question as `user`.
///
/// Without a configured key the stylist's canned unavailable reply is shown.
///
/// # Errors
///
/// Returns an error if configuration is malformed or the user is unknown.
pub async fn ask(shop: &Shop, user: &str, query: &str) -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env()?;
    let customer = shop
        .customer(&UserId::new(user))
        .ok_or_else(|| CommandError::NotFound(format!("customer {user}")))?;

    let advisor = match &config.gemini {
        Some(gemini) => Some(Arc::new(GeminiClient::new(gemini)?) as Arc<dyn StyleAdvisor>),
        None => None,
    };
    let mut chat = StylistChat::new(customer, advisor);
    chat.ask(customer, query).await;

    for message in chat.transcript() {
        info!("{:?}: {}", message.speaker, message.text);
    }
    Ok(())
}

/// Save a new catalog item with no image, letting the generator supply one.
///
/// # Errors
///
/// Returns an error if the acting user is not staff or the item is invalid.
pub async fn generate_image(
    shop: &mut Shop,
    acting: &UserId,
    name: String,
    category: Category,
    item_type: ItemType,
    price: u64,
) -> Result<(), CommandError> {
    access::authorize(shop, acting)?;
    let config = AdminConfig::from_env()?;
    if config.gemini.is_none() {
        warn!("GEMINI_API_KEY not set, the placeholder image will be used");
    }
    let inventory = InventoryService::from_config(&config)?;

    let form = ItemForm {
        name,
        price: Kes::new(price),
        item_type,
        category,
        ..ItemForm::default()
    };
    let id = inventory.create(shop, form, Utc::now()).await?;

    if let Some(entry) = shop.catalog_entry(&id) {
        let preview: String = entry.image.chars().take(64).collect();
        info!(
            "Created {} \"{}\" with image {preview}{}",
            entry.id.as_str(),
            entry.name,
            if entry.image.len() > 64 { "..." } else { "" }
        );
    }
    Ok(())
}
