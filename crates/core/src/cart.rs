//! The shopping cart.
//!
//! Adding the same catalog entry twice yields two cart entries with distinct
//! instance ids; each becomes exactly one order line at checkout.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CatalogEntry;
use crate::types::{CartEntryId, Kes};

/// A catalog entry copied into the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub cart_id: CartEntryId,
    pub entry: CatalogEntry,
}

/// Ordered list of entries awaiting checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Copy an entry into the cart and return its instance id.
    pub fn add(&mut self, entry: &CatalogEntry) -> CartEntryId {
        let cart_id = CartEntryId::new(Uuid::new_v4().to_string());
        self.entries.push(CartEntry {
            cart_id: cart_id.clone(),
            entry: entry.clone(),
        });
        cart_id
    }

    /// Remove one instance. Returns the removed entry, if present.
    pub fn remove(&mut self, cart_id: &CartEntryId) -> Option<CartEntry> {
        let index = self.entries.iter().position(|e| &e.cart_id == cart_id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of entry prices, before VAT.
    #[must_use]
    pub fn total(&self) -> Kes {
        self.entries.iter().map(|e| e.entry.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::catalog::fixtures::entry;
    use crate::types::ItemType;

    #[test]
    fn test_same_entry_added_twice_gets_distinct_ids() {
        let suit = entry("m-1", ItemType::Service, Category::Men, 15_000);
        let mut cart = Cart::new();
        let first = cart.add(&suit);
        let second = cart.add(&suit);
        assert_ne!(first, second);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Kes::new(30_000));
    }

    #[test]
    fn test_remove_only_that_instance() {
        let suit = entry("m-1", ItemType::Service, Category::Men, 15_000);
        let mut cart = Cart::new();
        let first = cart.add(&suit);
        cart.add(&suit);
        assert!(cart.remove(&first).is_some());
        assert!(cart.remove(&first).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(&entry("a-1", ItemType::Product, Category::Accessories, 1_800));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Kes::ZERO);
    }
}
