//! Saved-for-later catalog entries.

use std::collections::HashSet;

use gimco_core::CatalogEntryId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    ids: HashSet<CatalogEntryId>,
}

impl Wishlist {
    /// Add the id if absent, remove it if present. Returns whether it is now saved.
    pub fn toggle(&mut self, id: &CatalogEntryId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &CatalogEntryId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores() {
        let mut wishlist = Wishlist::default();
        let id = CatalogEntryId::new("w-1");
        assert!(wishlist.toggle(&id));
        assert!(wishlist.contains(&id));
        assert!(!wishlist.toggle(&id));
        assert!(wishlist.is_empty());
    }
}
