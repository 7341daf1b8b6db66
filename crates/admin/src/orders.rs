//! Order desk: filtering, per-line status edits and bulk actions.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use gimco_core::{
    LineStatus, LogisticsStage, Order, OrderId, OrderLineId, PaymentStatus, ServiceStage, Shop,
};
use tracing::{info, instrument, warn};

use crate::error::AdminError;

/// Date ordering for the order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Filter and sort for the admin order list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminOrderQuery {
    /// `None` shows every payment status.
    pub payment_status: Option<PaymentStatus>,
    /// Matches customer name, phone or order id.
    pub search: String,
    pub sort: SortOrder,
}

impl AdminOrderQuery {
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = order
            .customer_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
            || order
                .customer_phone
                .as_deref()
                .is_some_and(|phone| phone.to_lowercase().contains(&needle))
            || order.id.as_str().to_lowercase().contains(&needle);

        self.payment_status.is_none_or(|s| order.payment_status == s) && matches_search
    }

    /// Matching orders, sorted by date. Orders placed at the same instant
    /// keep their ledger order.
    #[must_use]
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        let mut visible: Vec<&Order> = orders.iter().filter(|o| self.matches(o)).collect();
        match self.sort {
            SortOrder::Newest => visible.sort_by(|a, b| b.date.cmp(&a.date)),
            SortOrder::Oldest => visible.sort_by_key(|o| o.date),
        }
        visible
    }
}

/// Set one line's fulfilment status. Returns the status it replaced.
///
/// Any stage of the line's own track is accepted, including earlier ones
/// (manual corrections); those are logged.
///
/// # Errors
///
/// Returns `AdminError::NotFound` for an unknown order and
/// `AdminError::Order` for an unknown line or a status from the other track.
#[instrument(skip_all, fields(order_id = %order_id, line_id = %line_id, status = %status))]
pub fn update_line_status(
    shop: &mut Shop,
    order_id: &OrderId,
    line_id: &OrderLineId,
    status: LineStatus,
) -> Result<LineStatus, AdminError> {
    let order = shop
        .order_mut(order_id)
        .ok_or_else(|| AdminError::NotFound(format!("order {order_id}")))?;
    let previous = order.line_mut(line_id)?.set_status(status)?;

    if status.precedes(&previous) {
        warn!(from = %previous, "Line status moved backwards");
    } else {
        info!(from = %previous, "Line status updated");
    }
    Ok(previous)
}

/// Set or clear a product line's estimated delivery date.
///
/// # Errors
///
/// Returns `AdminError::NotFound` for an unknown order and
/// `AdminError::Order` for an unknown line or a bespoke line.
#[instrument(skip_all, fields(order_id = %order_id, line_id = %line_id))]
pub fn set_estimated_delivery(
    shop: &mut Shop,
    order_id: &OrderId,
    line_id: &OrderLineId,
    date: Option<NaiveDate>,
) -> Result<(), AdminError> {
    let order = shop
        .order_mut(order_id)
        .ok_or_else(|| AdminError::NotFound(format!("order {order_id}")))?;
    order.line_mut(line_id)?.set_estimated_delivery(date)?;
    info!(date = ?date, "Estimated delivery updated");
    Ok(())
}

/// Orders ticked in the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderSelection {
    ids: BTreeSet<OrderId>,
}

impl OrderSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick or untick an order. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &OrderId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    /// Select exactly the orders currently visible.
    pub fn select_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a Order>) {
        self.ids = visible.into_iter().map(|o| o.id.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &OrderId) -> bool {
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

/// Bulk operations on the selected orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    MarkPaid,
    MarkPending,
    /// Every product line to SHIPPED.
    ShipProducts,
    /// Every bespoke line to READY.
    ReadyServices,
}

impl BulkAction {
    pub const ALL: [Self; 4] = [
        Self::MarkPaid,
        Self::MarkPending,
        Self::ShipProducts,
        Self::ReadyServices,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MarkPaid => "MARK_PAID",
            Self::MarkPending => "MARK_PENDING",
            Self::ShipProducts => "SET_PRODUCTS_SHIPPED",
            Self::ReadyServices => "SET_SERVICES_READY",
        }
    }

    fn apply_to(self, order: &mut Order) -> bool {
        match self {
            Self::MarkPaid => set_payment(order, PaymentStatus::Paid),
            Self::MarkPending => set_payment(order, PaymentStatus::Pending),
            Self::ShipProducts => order.set_product_stage(LogisticsStage::Shipped) > 0,
            Self::ReadyServices => order.set_service_stage(ServiceStage::Ready) > 0,
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| format!("invalid bulk action: {s}"))
    }
}

fn set_payment(order: &mut Order, status: PaymentStatus) -> bool {
    let changed = order.payment_status != status;
    order.payment_status = status;
    changed
}

/// Result of a bulk action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkOutcome {
    /// Selected orders found in the ledger.
    pub matched: usize,
    /// Orders whose state actually changed.
    pub changed: usize,
}

/// Apply `action` to every selected order, then clear the selection.
///
/// Running the same action twice leaves the orders as after the first run.
/// An empty selection does nothing.
#[instrument(skip_all, fields(action = %action, selected = selection.len()))]
pub fn apply_bulk_action(
    shop: &mut Shop,
    selection: &mut OrderSelection,
    action: BulkAction,
) -> BulkOutcome {
    if selection.is_empty() {
        return BulkOutcome::default();
    }

    let mut outcome = BulkOutcome::default();
    for order in shop.orders_mut().filter(|o| selection.contains(&o.id)) {
        outcome.matched += 1;
        if action.apply_to(order) {
            outcome.changed += 1;
        }
    }
    selection.clear();

    info!(
        matched = outcome.matched,
        changed = outcome.changed,
        "Bulk action completed"
    );
    outcome
}
