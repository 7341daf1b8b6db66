//! Order desk scenarios spanning checkout, admin edits and customer tracking.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use gimco_admin::export::{export_file_name, export_to_dir};
use gimco_admin::orders::{apply_bulk_action, update_line_status};
use gimco_admin::{AdminOrderQuery, BulkAction, OrderSelection};
use gimco_core::{
    CatalogEntryId, LineStatus, LogisticsStage, Order, OrderId, OrderLineId, PaymentStatus, ServiceStage,
    UserId,
};
use gimco_integration_tests::{TestContext, approving_gateway};
use gimco_storefront::services::checkout::pay_and_place_order;
use gimco_storefront::services::tracking::{self, OrdersTab};

fn ids(orders: &[&Order]) -> Vec<String> {
    orders.iter().map(|o| o.id.to_string()).collect()
}

#[test]
fn test_mark_paid_twice_equals_once() {
    let mut ctx = TestContext::new();
    let mut selection = OrderSelection::new();

    selection.select_all(AdminOrderQuery::default().apply(ctx.shop.orders()));
    apply_bulk_action(&mut ctx.shop, &mut selection, BulkAction::MarkPaid);
    let once = ctx.shop.orders().to_vec();

    selection.select_all(AdminOrderQuery::default().apply(ctx.shop.orders()));
    apply_bulk_action(&mut ctx.shop, &mut selection, BulkAction::MarkPaid);

    assert_eq!(ctx.shop.orders(), once.as_slice());
    assert!(ctx
        .shop
        .orders()
        .iter()
        .all(|o| o.payment_status == PaymentStatus::Paid));
}

#[test]
fn test_shipping_is_visible_to_the_customer() {
    let mut ctx = TestContext::new();
    let order_id = OrderId::new("ord-5504");
    let mut selection = OrderSelection::new();
    selection.toggle(&order_id);

    apply_bulk_action(&mut ctx.shop, &mut selection, BulkAction::ShipProducts);

    let order = ctx.shop.order(&order_id).unwrap();
    let rows = tracking::track_order(order);
    assert_eq!(rows[0].status_label, "SHIPPED");
    assert_eq!(rows[0].progress.current, 2);
}

#[test]
fn test_active_and_history_partition_the_ledger() {
    let mut ctx = TestContext::new();
    let kevin = UserId::new("u-101");

    // Boots delivered: ord-5502 is finished. ord-5501 still has a suit at FITTING.
    update_line_status(
        &mut ctx.shop,
        &OrderId::new("ord-5502"),
        &OrderLineId::new("oi-3"),
        LogisticsStage::Delivered.into(),
    )
    .unwrap();

    let active = tracking::customer_orders(&ctx.shop, Some(&kevin), OrdersTab::Active, "");
    let history = tracking::customer_orders(&ctx.shop, Some(&kevin), OrdersTab::History, "");
    assert_eq!(ids(&active), ["ord-5501"]);
    assert_eq!(ids(&history), ["ord-5502"]);

    let everyone_active = tracking::customer_orders(&ctx.shop, None, OrdersTab::Active, "");
    let everyone_history = tracking::customer_orders(&ctx.shop, None, OrdersTab::History, "");
    assert_eq!(
        everyone_active.len() + everyone_history.len(),
        ctx.shop.orders().len()
    );
    assert!(everyone_active
        .iter()
        .all(|a| everyone_history.iter().all(|h| a.id != h.id)));
}

#[test]
fn test_completing_bespoke_work_moves_order_to_history() {
    let mut ctx = TestContext::new();
    let sarah = UserId::new("u-102");
    let order_id = OrderId::new("ord-5503");
    for line in ["oi-4", "oi-5"] {
        update_line_status(
            &mut ctx.shop,
            &order_id,
            &OrderLineId::new(line),
            ServiceStage::Completed.into(),
        )
        .unwrap();
    }

    let history = tracking::customer_orders(&ctx.shop, Some(&sarah), OrdersTab::History, "");
    assert_eq!(history.len(), 1);
    let rows = tracking::track_order(history[0]);
    assert!(rows.iter().all(|r| r.progress.percent() == 100));
    assert!(rows
        .iter()
        .all(|r| r.status_label == LineStatus::Tailoring(ServiceStage::Completed).label()));
}

#[tokio::test]
async fn test_new_order_is_exported() {
    let mut ctx = TestContext::new();
    let mut session = ctx.session("u-104");
    let ring = ctx
        .shop
        .catalog_entry(&CatalogEntryId::new("a-w-4"))
        .unwrap()
        .clone();
    session.cart.add(&ring);
    let receipt = pay_and_place_order(&mut ctx.shop, &mut session, &approving_gateway(), "0711555555")
        .await
        .unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let query = AdminOrderQuery {
        search: "amina".to_string(),
        ..AdminOrderQuery::default()
    };
    let path = export_to_dir(query.apply(ctx.shop.orders()), ctx.scratch.path(), today).unwrap();

    assert!(path.ends_with(export_file_name(today)));
    let csv = std::fs::read_to_string(path).unwrap();
    let rows: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].starts_with(&format!("{},", receipt.order_id)));
    assert!(rows[0].contains(",Amina Abdi,0711555555,4500,PAID,Turquoise Statement Ring,PRODUCT,ORDER_PLACED,"));
}

#[test]
fn test_status_edit_on_wrong_track_is_rejected() {
    let mut ctx = TestContext::new();
    let before = ctx.shop.orders().to_vec();
    let result = update_line_status(
        &mut ctx.shop,
        &OrderId::new("ord-5504"),
        &OrderLineId::new("oi-6"),
        ServiceStage::Ready.into(),
    );
    assert!(result.is_err());
    assert_eq!(ctx.shop.orders(), before.as_slice());
}
