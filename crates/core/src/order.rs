//! Orders and order lines.
//!
//! An order is a frozen snapshot of the cart at checkout. Line statuses and
//! the payment status are the only things that change afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartEntry;
use crate::catalog::CatalogEntry;
use crate::types::{
    ItemType, Kes, LineStatus, LogisticsStage, Measurements, OrderId, OrderLineId, PaymentStatus,
    ServiceStage, UserId,
};
use crate::user::UserProfile;

/// Errors that can occur when placing or updating an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    /// A status from the other track was applied to a line.
    #[error("line {line} is a {item_type} and cannot take status {status}")]
    TrackMismatch {
        line: OrderLineId,
        item_type: ItemType,
        status: LineStatus,
    },

    /// Estimated delivery was set on a bespoke line.
    #[error("line {0} is not a product; estimated delivery does not apply")]
    NotAProduct(OrderLineId),

    /// No line with this id exists on the order.
    #[error("order line not found: {0}")]
    LineNotFound(OrderLineId),
}

/// One ordered item with its own fulfilment status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    id: OrderLineId,
    item: CatalogEntry,
    quantity: u32,
    status: LineStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    measurements: Option<Measurements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_delivery: Option<NaiveDate>,
}

impl OrderLine {
    /// Snapshot a cart entry into a fresh line.
    ///
    /// Bespoke lines copy the customer's measurements as they are now; later
    /// profile edits do not affect the order.
    #[must_use]
    pub fn from_cart_entry(id: OrderLineId, cart_entry: &CartEntry, measurements: &Measurements) -> Self {
        let item = cart_entry.entry.clone();
        let measurements = item.is_service().then(|| measurements.clone());
        Self {
            id,
            status: LineStatus::initial(item.item_type),
            item,
            quantity: 1,
            measurements,
            estimated_delivery: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &OrderLineId {
        &self.id
    }

    #[must_use]
    pub const fn item(&self) -> &CatalogEntry {
        &self.item
    }

    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        self.item.item_type
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn status(&self) -> LineStatus {
        self.status
    }

    #[must_use]
    pub const fn measurements(&self) -> Option<&Measurements> {
        self.measurements.as_ref()
    }

    #[must_use]
    pub const fn estimated_delivery(&self) -> Option<NaiveDate> {
        self.estimated_delivery
    }

    /// Whether the status belongs to the track of the item type.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.status.item_type() == self.item.item_type
            && (self.item.is_service() || self.measurements.is_none())
            && (!self.item.is_service() || self.estimated_delivery.is_none())
    }

    /// Replace the status with any stage on the line's own track.
    ///
    /// Moving backwards is allowed. Returns the previous status.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::TrackMismatch` if the status belongs to the other track.
    pub fn set_status(&mut self, status: LineStatus) -> Result<LineStatus, OrderError> {
        if status.item_type() != self.item.item_type {
            return Err(OrderError::TrackMismatch {
                line: self.id.clone(),
                item_type: self.item.item_type,
                status,
            });
        }
        Ok(std::mem::replace(&mut self.status, status))
    }

    /// Set or clear the expected delivery date of a product line.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotAProduct` for bespoke lines.
    pub fn set_estimated_delivery(&mut self, date: Option<NaiveDate>) -> Result<(), OrderError> {
        if self.item.is_service() {
            return Err(OrderError::NotAProduct(self.id.clone()));
        }
        self.estimated_delivery = date;
        Ok(())
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Captured at checkout; later profile edits do not change it.
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub date: DateTime<Utc>,
    /// Sum of line prices at checkout, before VAT.
    pub total_amount: Kes,
    pub payment_status: PaymentStatus,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Build an order from the cart contents.
    ///
    /// Lines are numbered `{order_id}-1`, `{order_id}-2`, ... in cart order.
    /// The order is marked paid; it is only placed after a successful payment.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if there is nothing to order.
    pub fn place(
        id: OrderId,
        customer: &UserProfile,
        cart: &[CartEntry],
        now: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let lines: Vec<OrderLine> = cart
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let line_id = OrderLineId::new(format!("{id}-{}", i + 1));
                OrderLine::from_cart_entry(line_id, entry, &customer.measurements)
            })
            .collect();

        Ok(Self {
            total_amount: lines.iter().map(|l| l.item.price).sum(),
            id,
            user_id: customer.id.clone(),
            customer_name: Some(customer.name.clone()),
            customer_phone: customer.phone.clone().filter(|p| !p.trim().is_empty()),
            date: now,
            payment_status: PaymentStatus::Paid,
            lines,
        })
    }

    /// Whether any line is still in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lines.iter().any(|line| !line.status.is_terminal())
    }

    /// Case-insensitive match on order id or any line's item name.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        self.id.as_str().to_lowercase().contains(&needle)
            || self
                .lines
                .iter()
                .any(|line| line.item.name.to_lowercase().contains(&needle))
    }

    #[must_use]
    pub fn has_service_lines(&self) -> bool {
        self.lines.iter().any(|l| l.item.is_service())
    }

    #[must_use]
    pub fn has_product_lines(&self) -> bool {
        self.lines.iter().any(|l| !l.item.is_service())
    }

    #[must_use]
    pub fn line(&self, line_id: &OrderLineId) -> Option<&OrderLine> {
        self.lines.iter().find(|l| &l.id == line_id)
    }

    /// # Errors
    ///
    /// Returns `OrderError::LineNotFound` if the order has no such line.
    pub fn line_mut(&mut self, line_id: &OrderLineId) -> Result<&mut OrderLine, OrderError> {
        self.lines
            .iter_mut()
            .find(|l| &l.id == line_id)
            .ok_or_else(|| OrderError::LineNotFound(line_id.clone()))
    }

    /// Move every product line to `stage`. Returns how many lines changed.
    pub fn set_product_stage(&mut self, stage: LogisticsStage) -> usize {
        self.set_track(ItemType::Product, LineStatus::Logistics(stage))
    }

    /// Move every bespoke line to `stage`. Returns how many lines changed.
    pub fn set_service_stage(&mut self, stage: ServiceStage) -> usize {
        self.set_track(ItemType::Service, LineStatus::Tailoring(stage))
    }

    fn set_track(&mut self, item_type: ItemType, status: LineStatus) -> usize {
        let mut changed = 0;
        for line in self.lines.iter_mut().filter(|l| l.item.item_type == item_type) {
            if line.status != status {
                line.status = status;
                changed += 1;
            }
        }
        changed
    }

    /// Display name, `N/A` when none was captured.
    #[must_use]
    pub fn customer_name_or_na(&self) -> &str {
        non_empty_or_na(self.customer_name.as_deref())
    }

    /// Display phone, `N/A` when none was captured.
    #[must_use]
    pub fn customer_phone_or_na(&self) -> &str {
        non_empty_or_na(self.customer_phone.as_deref())
    }
}

fn non_empty_or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "N/A",
    }
}
