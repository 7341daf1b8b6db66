//! In-memory application state shared by the storefront and back office.

use crate::catalog::CatalogEntry;
use crate::order::Order;
use crate::types::{CatalogEntryId, OrderId, UserId};
use crate::user::UserProfile;

/// The shop's catalog, order ledger and customer directory.
///
/// Orders are kept newest first and are never removed.
#[derive(Debug, Clone, Default)]
pub struct Shop {
    catalog: Vec<CatalogEntry>,
    orders: Vec<Order>,
    customers: Vec<UserProfile>,
}

impl Shop {
    #[must_use]
    pub const fn new(
        catalog: Vec<CatalogEntry>,
        orders: Vec<Order>,
        customers: Vec<UserProfile>,
    ) -> Self {
        Self {
            catalog,
            orders,
            customers,
        }
    }

    // Catalog

    #[must_use]
    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    #[must_use]
    pub fn catalog_entry(&self, id: &CatalogEntryId) -> Option<&CatalogEntry> {
        self.catalog.iter().find(|e| &e.id == id)
    }

    pub fn catalog_entry_mut(&mut self, id: &CatalogEntryId) -> Option<&mut CatalogEntry> {
        self.catalog.iter_mut().find(|e| &e.id == id)
    }

    /// Append a new entry to the end of the catalog.
    pub fn add_catalog_entry(&mut self, entry: CatalogEntry) {
        self.catalog.push(entry);
    }

    /// Remove an entry. Orders keep their own snapshot of it.
    pub fn remove_catalog_entry(&mut self, id: &CatalogEntryId) -> Option<CatalogEntry> {
        let index = self.catalog.iter().position(|e| &e.id == id)?;
        Some(self.catalog.remove(index))
    }

    // Orders

    /// All orders, newest placement first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    pub fn order_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| &o.id == id)
    }

    pub fn orders_mut(&mut self) -> impl Iterator<Item = &mut Order> {
        self.orders.iter_mut()
    }

    #[must_use]
    pub fn has_order(&self, id: &OrderId) -> bool {
        self.order(id).is_some()
    }

    /// Record a freshly placed order at the front of the ledger.
    pub fn record_order(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// Orders placed by one customer, in ledger order.
    pub fn orders_for<'a>(&'a self, user_id: &'a UserId) -> impl Iterator<Item = &'a Order> + 'a {
        self.orders.iter().filter(move |o| &o.user_id == user_id)
    }

    // Customers

    #[must_use]
    pub fn customers(&self) -> &[UserProfile] {
        &self.customers
    }

    #[must_use]
    pub fn customer(&self, id: &UserId) -> Option<&UserProfile> {
        self.customers.iter().find(|c| &c.id == id)
    }

    pub fn customer_mut(&mut self, id: &UserId) -> Option<&mut UserProfile> {
        self.customers.iter_mut().find(|c| &c.id == id)
    }
}
