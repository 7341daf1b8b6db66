//! Sample catalog, customers and orders bundled with the crate.

use thiserror::Error;

use crate::catalog::CatalogEntry;
use crate::order::Order;
use crate::shop::Shop;
use crate::types::{Kes, OrderId, OrderLineId};
use crate::user::UserProfile;

const CATALOG_JSON: &str = include_str!("../data/catalog.json");
const CUSTOMERS_JSON: &str = include_str!("../data/customers.json");
const ORDERS_JSON: &str = include_str!("../data/orders.json");

/// Errors that can occur when loading seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A data file failed to parse.
    #[error("invalid {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An order line's status is on the wrong track for its item.
    #[error("order {order} line {line} has an inconsistent status")]
    InconsistentLine { order: OrderId, line: OrderLineId },

    /// An order total does not equal the sum of its line prices.
    #[error("order {0} total does not match its lines")]
    TotalMismatch(OrderId),
}

fn parse<T: serde::de::DeserializeOwned>(file: &'static str, json: &str) -> Result<T, SeedError> {
    serde_json::from_str(json).map_err(|source| SeedError::Parse { file, source })
}

/// The bundled catalog.
///
/// # Errors
///
/// Returns an error if the bundled JSON is malformed.
pub fn catalog() -> Result<Vec<CatalogEntry>, SeedError> {
    parse("catalog.json", CATALOG_JSON)
}

/// The bundled customer directory.
///
/// # Errors
///
/// Returns an error if the bundled JSON is malformed.
pub fn customers() -> Result<Vec<UserProfile>, SeedError> {
    parse("customers.json", CUSTOMERS_JSON)
}

/// The bundled sample orders, newest first.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or an order breaks the line
/// status or total invariants.
pub fn orders() -> Result<Vec<Order>, SeedError> {
    let mut orders: Vec<Order> = parse("orders.json", ORDERS_JSON)?;
    for order in &orders {
        if let Some(line) = order.lines.iter().find(|l| !l.is_consistent()) {
            return Err(SeedError::InconsistentLine {
                order: order.id.clone(),
                line: line.id().clone(),
            });
        }
        let lines_total: Kes = order.lines.iter().map(|l| l.item().price).sum();
        if order.total_amount != lines_total {
            return Err(SeedError::TotalMismatch(order.id.clone()));
        }
    }
    orders.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(orders)
}

/// A shop populated with all bundled sample data.
///
/// # Errors
///
/// Returns an error if any bundled file fails to load.
pub fn shop() -> Result<Shop, SeedError> {
    Ok(Shop::new(catalog()?, orders()?, customers()?))
}
