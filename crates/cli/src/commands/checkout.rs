//! Simulated shopper checkout.

use gimco_core::{CatalogEntryId, Shop, UserId, format_kes_decimal};
use gimco_storefront::services::checkout::pay_and_place_order;
use gimco_storefront::services::mpesa::MpesaSimulator;
use gimco_storefront::views::CartView;
use gimco_storefront::{PaymentConfig, ShopperSession, StorefrontConfig};
use tracing::info;

use super::CommandError;

/// Fill a cart with `items`, pay over simulated M-PESA and place the order.
///
/// # Errors
///
/// Returns an error for unknown items or shopper, an invalid number, or a
/// declined payment.
pub async fn run(
    shop: &mut Shop,
    user: &str,
    items: &[String],
    phone: &str,
    instant: bool,
) -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env()?;
    let payment = if instant {
        PaymentConfig::instant(config.payment.success_rate)
    } else {
        config.payment
    };

    let mut session = ShopperSession::new(UserId::new(user));
    for id in items {
        let entry = shop
            .catalog_entry(&CatalogEntryId::new(id.as_str()))
            .ok_or_else(|| CommandError::NotFound(format!("catalog entry {id}")))?;
        session.cart.add(entry);
    }

    let cart = CartView::from(&session.cart);
    for item in &cart.items {
        info!("{:<36} {:<10} {:>12}", item.name, item.kind, item.price);
    }
    info!("Subtotal: {}  VAT (16%): {}  Total due: {}", cart.subtotal, cart.vat, cart.total_due);
    info!("Sending M-PESA request to {phone}. Enter your PIN on your phone to confirm.");

    let receipt =
        pay_and_place_order(shop, &mut session, &MpesaSimulator::new(payment), phone).await?;

    info!(
        "Payment {} of {} from {} confirmed",
        receipt.payment.reference,
        format_kes_decimal(receipt.payment.amount),
        receipt.payment.phone
    );
    if let Some(order) = shop.order(&receipt.order_id) {
        info!("Order #{} placed, total {}", order.id.as_str(), order.total_amount);
        for line in &order.lines {
            info!("    {} - {}", line.item().name, line.status().label());
        }
    }
    Ok(())
}
