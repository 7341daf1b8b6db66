//! Per-shopper state for one process session.

use gimco_core::{Cart, CatalogEntry, UserId};

use crate::recently_viewed::{RecentlyViewed, RecentlyViewedStore};
use crate::wishlist::Wishlist;

/// The signed-in shopper's cart, wishlist and browsing history.
#[derive(Debug, Clone)]
pub struct ShopperSession {
    pub user_id: UserId,
    pub cart: Cart,
    pub wishlist: Wishlist,
    recently_viewed: RecentlyViewed,
    store: Option<RecentlyViewedStore>,
}

impl ShopperSession {
    /// Start a session with no persisted history.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            cart: Cart::new(),
            wishlist: Wishlist::default(),
            recently_viewed: RecentlyViewed::default(),
            store: None,
        }
    }

    /// Start a session, restoring recently viewed entries from `store`.
    #[must_use]
    pub fn with_store(user_id: UserId, store: RecentlyViewedStore) -> Self {
        Self {
            recently_viewed: store.load(),
            store: Some(store),
            ..Self::new(user_id)
        }
    }

    /// Record that the shopper opened an entry's detail view.
    pub fn view(&mut self, entry: &CatalogEntry) {
        self.recently_viewed.record(entry.clone());
        if let Some(store) = &self.store {
            store.save(&self.recently_viewed);
        }
    }

    #[must_use]
    pub const fn recently_viewed(&self) -> &RecentlyViewed {
        &self.recently_viewed
    }
}
