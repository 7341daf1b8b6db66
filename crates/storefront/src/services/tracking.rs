//! The customer's "My Orders" view.

use chrono::NaiveDate;
use gimco_core::{ItemType, Order, OrderLineId, Progress, Shop, UserId};

/// Which half of the order list is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrdersTab {
    /// Orders with at least one line still in progress.
    #[default]
    Active,
    /// Orders whose every line has finished.
    History,
}

impl OrdersTab {
    #[must_use]
    pub fn includes(self, order: &Order) -> bool {
        match self {
            Self::Active => order.is_active(),
            Self::History => !order.is_active(),
        }
    }
}

/// Orders on a tab matching a free-text search, in ledger order.
///
/// `user` restricts the list to one customer's orders.
#[must_use]
pub fn customer_orders<'a>(
    shop: &'a Shop,
    user: Option<&UserId>,
    tab: OrdersTab,
    search: &str,
) -> Vec<&'a Order> {
    shop.orders()
        .iter()
        .filter(|o| user.is_none_or(|u| &o.user_id == u))
        .filter(|o| tab.includes(o))
        .filter(|o| search.trim().is_empty() || o.matches_search(search))
        .collect()
}

/// Display model for one line on the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTracking {
    pub line_id: OrderLineId,
    pub item_name: String,
    pub item_type: ItemType,
    pub status_label: String,
    pub progress: Progress,
    pub estimated_delivery: Option<NaiveDate>,
    /// Measurement snapshot for bespoke lines.
    pub measurements: Option<String>,
}

/// Tracking rows for every line of an order.
#[must_use]
pub fn track_order(order: &Order) -> Vec<LineTracking> {
    order
        .lines
        .iter()
        .map(|line| LineTracking {
            line_id: line.id().clone(),
            item_name: line.item().name.clone(),
            item_type: line.item_type(),
            status_label: line.status().label(),
            progress: Progress::for_status(line.status()),
            estimated_delivery: line.estimated_delivery(),
            measurements: line.measurements().map(ToString::to_string),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gimco_core::{OrderId, seed};

    use super::*;

    #[test]
    fn test_tabs_partition_orders() {
        let shop = seed::shop().unwrap();
        let active = customer_orders(&shop, None, OrdersTab::Active, "");
        let history = customer_orders(&shop, None, OrdersTab::History, "");
        assert_eq!(active.len() + history.len(), shop.orders().len());
        assert!(active.iter().all(|a| history.iter().all(|h| a.id != h.id)));
    }

    #[test]
    fn test_mixed_order_with_delivered_product_is_active() {
        let shop = seed::shop().unwrap();
        let active = customer_orders(&shop, None, OrdersTab::Active, "ord-5501");
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn test_search_by_item_name_and_user_filter() {
        let shop = seed::shop().unwrap();
        let kevin = UserId::new("u-101");
        let found = customer_orders(&shop, Some(&kevin), OrdersTab::Active, "executive suit");
        assert!(found.iter().all(|o| o.user_id == kevin));
        assert!(found.iter().any(|o| o.id == OrderId::new("ord-5501")));
    }

    #[test]
    fn test_track_order_rows() {
        let shop = seed::shop().unwrap();
        let order = shop.order(&OrderId::new("ord-5501")).unwrap();
        let rows = track_order(order);
        assert_eq!(rows.len(), 2);

        let suit = rows.first().unwrap();
        assert_eq!(suit.status_label, "FITTING");
        assert_eq!(suit.progress.current, 3);
        assert!(suit.measurements.as_deref().unwrap().starts_with("chest: 42"));

        let shoes = rows.get(1).unwrap();
        assert_eq!(shoes.item_type, ItemType::Product);
        assert!(shoes.estimated_delivery.is_some());
        assert!(shoes.measurements.is_none());
    }
}
