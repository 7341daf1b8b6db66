//! Order desk and order tracking commands.

use std::path::PathBuf;

use chrono::Utc;
use gimco_admin::invoice::Invoice;
use gimco_admin::orders::apply_bulk_action;
use gimco_admin::export::export_to_dir;
use gimco_admin::{AdminConfig, AdminOrderQuery, BulkAction, OrderSelection, SortOrder, access};
use gimco_core::{Order, OrderId, PaymentStatus, Shop, UserId};
use gimco_storefront::services::tracking::{self, OrdersTab};
use tracing::info;

use super::CommandError;

fn log_order(order: &Order) {
    info!(
        "{}  {}  {:<16} {:<12} {:>12}  {}",
        order.id.as_str(),
        order.date.format("%d/%m/%Y"),
        order.customer_name_or_na(),
        order.customer_phone_or_na(),
        order.total_amount.to_string(),
        order.payment_status.as_str()
    );
    for line in &order.lines {
        info!(
            "    {} {} [{}] {}",
            line.id().as_str(),
            line.item().name,
            line.item_type().as_str(),
            line.status().label()
        );
    }
}

/// Admin order list.
///
/// # Errors
///
/// Returns an error if the acting user is not staff.
pub fn list(
    shop: &Shop,
    acting: &UserId,
    payment_status: Option<PaymentStatus>,
    search: String,
    sort: SortOrder,
) -> Result<(), CommandError> {
    access::authorize(shop, acting)?;
    let query = AdminOrderQuery {
        payment_status,
        search,
        sort,
    };
    let visible = query.apply(shop.orders());
    for order in &visible {
        log_order(order);
    }
    info!(count = visible.len(), "Orders listed");
    Ok(())
}

/// A customer's active or finished orders with progress per line.
pub fn track(shop: &Shop, user: &str, history: bool, search: &str) {
    let tab = if history {
        OrdersTab::History
    } else {
        OrdersTab::Active
    };
    let user = UserId::new(user);
    let orders = tracking::customer_orders(shop, Some(&user), tab, search);
    if orders.is_empty() {
        info!("No orders found.");
    }

    for order in orders {
        info!("Order #{} - {}", order.id.as_str(), order.date.format("%d/%m/%Y"));
        for line in tracking::track_order(order) {
            info!(
                "    {:<32} {:<22} {:>3}%",
                line.item_name,
                line.status_label,
                line.progress.percent()
            );
            if let Some(date) = line.estimated_delivery {
                info!("        Est. delivery: {date}");
            }
            if let Some(measurements) = &line.measurements {
                info!("        Measurements: {measurements}");
            }
        }
    }
}

/// Apply a bulk action to the given orders.
///
/// # Errors
///
/// Returns an error if the acting user is not staff.
pub fn bulk(
    shop: &mut Shop,
    acting: &UserId,
    action: BulkAction,
    ids: &[String],
) -> Result<(), CommandError> {
    access::authorize(shop, acting)?;

    let mut selection = OrderSelection::new();
    for id in ids {
        selection.toggle(&OrderId::new(id.as_str()));
    }
    let outcome = apply_bulk_action(shop, &mut selection, action);
    info!(
        matched = outcome.matched,
        changed = outcome.changed,
        "{action} applied"
    );

    for id in ids {
        if let Some(order) = shop.order(&OrderId::new(id.as_str())) {
            log_order(order);
        }
    }
    Ok(())
}

/// Print an invoice for one order.
///
/// # Errors
///
/// Returns an error if the acting user is not staff or the order is unknown.
pub fn invoice(shop: &Shop, acting: &UserId, id: &str) -> Result<(), CommandError> {
    access::authorize(shop, acting)?;
    let order = shop
        .order(&OrderId::new(id))
        .ok_or_else(|| CommandError::NotFound(format!("order {id}")))?;
    for line in Invoice(order).to_string().lines() {
        info!("{line}");
    }
    Ok(())
}

/// Export the filtered order list to `orders_export_{today}.csv`.
///
/// # Errors
///
/// Returns an error if the acting user is not staff, nothing matches, or the
/// file cannot be written.
pub fn export(
    shop: &Shop,
    acting: &UserId,
    payment_status: Option<PaymentStatus>,
    search: String,
    dir: Option<PathBuf>,
) -> Result<(), CommandError> {
    access::authorize(shop, acting)?;
    let config = AdminConfig::from_env()?;
    let dir = dir.unwrap_or(config.export_dir);

    let query = AdminOrderQuery {
        payment_status,
        search,
        sort: SortOrder::default(),
    };
    let path = export_to_dir(query.apply(shop.orders()), &dir, Utc::now().date_naive())?;
    info!("Wrote {}", path.display());
    Ok(())
}
