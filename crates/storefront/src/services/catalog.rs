//! Catalog browsing.

use gimco_core::{CatalogEntry, CatalogEntryId, CatalogFilter, Shop, max_catalog_price};
use tracing::debug;

use crate::error::StorefrontError;
use crate::session::ShopperSession;

/// The filter a shopper starts with: everything, up to the priciest entry.
#[must_use]
pub fn default_filter(shop: &Shop) -> CatalogFilter {
    CatalogFilter {
        max_price: Some(max_catalog_price(shop.catalog())),
        ..CatalogFilter::default()
    }
}

/// Entries matching the filter, in catalog order.
#[must_use]
pub fn browse<'a>(shop: &'a Shop, filter: &CatalogFilter) -> Vec<&'a CatalogEntry> {
    let results = filter.apply(shop.catalog());
    debug!(?filter, results = results.len(), "Catalog filtered");
    results
}

/// Open an entry's detail view, recording it as recently viewed.
///
/// # Errors
///
/// Returns `StorefrontError::NotFound` if the entry does not exist.
pub fn open_entry<'a>(
    shop: &'a Shop,
    session: &mut ShopperSession,
    id: &CatalogEntryId,
) -> Result<&'a CatalogEntry, StorefrontError> {
    let entry = shop
        .catalog_entry(id)
        .ok_or_else(|| StorefrontError::NotFound(format!("catalog entry {id}")))?;
    session.view(entry);
    Ok(entry)
}

/// Wishlisted entries still present in the catalog, in catalog order.
#[must_use]
pub fn wishlist_entries<'a>(shop: &'a Shop, session: &ShopperSession) -> Vec<&'a CatalogEntry> {
    shop.catalog()
        .iter()
        .filter(|e| session.wishlist.contains(&e.id))
        .collect()
}
