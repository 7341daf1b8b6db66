//! Overview figures for the admin landing page.

use gimco_core::{Kes, Order, Shop};

/// How many orders the "Recent Orders" panel shows.
pub const RECENT_ORDERS: usize = 5;

/// Headline numbers and the most recent orders.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview<'a> {
    /// Sum of all order totals, paid or not.
    pub total_revenue: Kes,
    pub total_orders: usize,
    /// Orders with at least one bespoke line.
    pub service_orders: usize,
    /// Orders with at least one ready-made line.
    pub product_orders: usize,
    /// Newest first.
    pub recent: Vec<&'a Order>,
}

impl<'a> Overview<'a> {
    #[must_use]
    pub fn compute(shop: &'a Shop) -> Self {
        let orders = shop.orders();
        let mut recent: Vec<&Order> = orders.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(RECENT_ORDERS);

        Self {
            total_revenue: orders.iter().map(|o| o.total_amount).sum(),
            total_orders: orders.len(),
            service_orders: orders.iter().filter(|o| o.has_service_lines()).count(),
            product_orders: orders.iter().filter(|o| o.has_product_lines()).count(),
            recent,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gimco_core::seed;

    use super::*;

    #[test]
    fn test_seed_overview() {
        let shop = seed::shop().unwrap();
        let overview = Overview::compute(&shop);

        assert_eq!(overview.total_revenue, Kes::new(18_200 + 6_500 + 22_500 + 1_800));
        assert_eq!(overview.total_orders, 4);
        assert_eq!(overview.service_orders, 2);
        assert_eq!(overview.product_orders, 3);
        assert_eq!(overview.recent.first().unwrap().id.as_str(), "ord-5504");
    }

    #[test]
    fn test_empty_shop() {
        let shop = Shop::default();
        let overview = Overview::compute(&shop);
        assert_eq!(overview.total_revenue, Kes::ZERO);
        assert_eq!(overview.total_orders, 0);
        assert!(overview.recent.is_empty());
    }
}
