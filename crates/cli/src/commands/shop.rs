//! Catalog, overview and customer directory commands.

use gimco_admin::access;
use gimco_admin::customers;
use gimco_admin::dashboard::Overview;
use gimco_core::{CatalogEntryId, CatalogFilter, Category, Kes, Occasion, Shop, UserId};
use gimco_storefront::recently_viewed::RecentlyViewedStore;
use gimco_storefront::services::catalog;
use gimco_storefront::{ShopperSession, StorefrontConfig};
use tracing::info;

use super::CommandError;

/// List catalog entries matching the filter.
pub fn catalog(
    shop: &Shop,
    category: Option<Category>,
    occasion: Option<Occasion>,
    max_price: Option<u64>,
) {
    let default = catalog::default_filter(shop);
    let filter = CatalogFilter {
        category,
        occasion,
        max_price: max_price.map(Kes::new).or(default.max_price),
    };

    let entries = catalog::browse(shop, &filter);
    for entry in &entries {
        info!(
            "{:<8} {:<8} {:<12} {:>12}  {}",
            entry.id.as_str(),
            entry.item_type.as_str(),
            entry.category.as_str(),
            entry.price.to_string(),
            entry.name
        );
    }
    info!(count = entries.len(), "Catalog listed");
}

/// Show an entry and the acting user's recently viewed strip.
///
/// # Errors
///
/// Returns an error if configuration is malformed or the entry is unknown.
pub fn view(shop: &Shop, acting: &UserId, id: &str) -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env()?;
    let store = RecentlyViewedStore::new(config.recently_viewed_path());
    let mut session = ShopperSession::with_store(acting.clone(), store);

    let entry = catalog::open_entry(shop, &mut session, &CatalogEntryId::new(id))?;
    info!("{} ({}) - {}", entry.name, entry.item_type, entry.price);
    info!("{}", entry.description);
    if !entry.occasions.is_empty() {
        let occasions: Vec<&str> = entry.occasions.iter().map(Occasion::as_str).collect();
        info!("Occasions: {}", occasions.join(", "));
    }

    let recent: Vec<&str> = session
        .recently_viewed()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    info!("Recently viewed: {}", recent.join(" | "));
    Ok(())
}

/// Headline figures and recent orders.
///
/// # Errors
///
/// Returns an error if the acting user is not staff.
pub fn overview(shop: &Shop, acting: &UserId) -> Result<(), CommandError> {
    access::authorize(shop, acting)?;
    let overview = Overview::compute(shop);

    info!("Total revenue:  {}", overview.total_revenue);
    info!("Total orders:   {}", overview.total_orders);
    info!("Service orders: {}", overview.service_orders);
    info!("Product orders: {}", overview.product_orders);
    for order in &overview.recent {
        info!(
            "{}  {}  {} purchased {} item(s)  {}",
            order.id,
            order.date.format("%d/%m/%Y"),
            order.customer_name_or_na(),
            order.lines.len(),
            order.total_amount
        );
    }
    Ok(())
}

/// Search the customer directory.
///
/// # Errors
///
/// Returns an error if the acting user is not staff.
pub fn customers(shop: &Shop, acting: &UserId, query: &str) -> Result<(), CommandError> {
    access::authorize(shop, acting)?;
    let results = customers::search(shop, query);
    if results.is_empty() {
        info!("No customers found.");
    }
    for card in &results {
        info!(
            "{:<6} {:<16} {:<28} {:<12} {} orders, lifetime value {}",
            card.profile.id.as_str(),
            card.profile.name,
            card.profile.email,
            card.profile.phone.as_deref().unwrap_or("N/A"),
            card.order_count,
            card.lifetime_value
        );
    }
    Ok(())
}
