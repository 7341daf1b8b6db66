//! Customer directory.

use gimco_core::{Kes, Order, Shop, UserId, UserProfile};

use crate::error::AdminError;

/// A directory card: the profile plus order totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSummary<'a> {
    pub profile: &'a UserProfile,
    pub order_count: usize,
    /// Sum of the customer's order totals.
    pub lifetime_value: Kes,
}

/// A customer's full record, orders newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetail<'a> {
    pub summary: CustomerSummary<'a>,
    pub orders: Vec<&'a Order>,
}

fn summarize<'a>(shop: &'a Shop, profile: &'a UserProfile) -> CustomerSummary<'a> {
    let orders: Vec<&Order> = shop.orders_for(&profile.id).collect();
    CustomerSummary {
        profile,
        order_count: orders.len(),
        lifetime_value: orders.iter().map(|o| o.total_amount).sum(),
    }
}

/// Customers whose name, email or phone matches `query`, in directory order.
///
/// An empty query lists everyone.
#[must_use]
pub fn search<'a>(shop: &'a Shop, query: &str) -> Vec<CustomerSummary<'a>> {
    shop.customers()
        .iter()
        .filter(|c| c.matches_search(query))
        .map(|c| summarize(shop, c))
        .collect()
}

/// # Errors
///
/// Returns `AdminError::NotFound` for an unknown id.
pub fn detail<'a>(shop: &'a Shop, id: &UserId) -> Result<CustomerDetail<'a>, AdminError> {
    let profile = shop
        .customer(id)
        .ok_or_else(|| AdminError::NotFound(format!("customer {id}")))?;
    Ok(CustomerDetail {
        summary: summarize(shop, profile),
        orders: shop.orders_for(&profile.id).collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gimco_core::seed;

    use super::*;

    #[test]
    fn test_empty_query_lists_everyone() {
        let shop = seed::shop().unwrap();
        assert_eq!(search(&shop, "").len(), shop.customers().len());
    }

    #[test]
    fn test_search_by_name_email_and_phone() {
        let shop = seed::shop().unwrap();

        let by_name = search(&shop, "njeri");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].profile.id, UserId::new("u-102"));

        let by_phone = search(&shop, "0733");
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].profile.id, UserId::new("u-103"));

        assert!(search(&shop, "nobody@nowhere").is_empty());
    }

    #[test]
    fn test_summary_totals() {
        let shop = seed::shop().unwrap();
        let kevin = search(&shop, "Kevin");
        assert_eq!(kevin[0].order_count, 2);
        assert_eq!(kevin[0].lifetime_value, Kes::new(18_200 + 6_500));

        let amina = search(&shop, "Amina");
        assert_eq!(amina[0].order_count, 0);
        assert_eq!(amina[0].lifetime_value, Kes::ZERO);
    }

    #[test]
    fn test_detail() {
        let shop = seed::shop().unwrap();
        let detail = detail(&shop, &UserId::new("u-101")).unwrap();
        let ids: Vec<&str> = detail.orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["ord-5502", "ord-5501"]);

        assert!(matches!(
            super::detail(&shop, &UserId::new("u-999")),
            Err(AdminError::NotFound(_))
        ));
    }
}
