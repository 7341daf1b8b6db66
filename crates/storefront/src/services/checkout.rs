//! Checkout: turn the cart into an order after payment.

use chrono::{DateTime, Utc};
use gimco_core::{Order, OrderError, OrderId, Shop};
use rand::Rng;
use tracing::{info, instrument};

use crate::error::StorefrontError;
use crate::services::mpesa::{PaymentGateway, PaymentReceipt, normalize_phone};
use crate::session::ShopperSession;

const ORDER_NUMBER_SPACE: u32 = 10_000;
const MAX_RANDOM_ATTEMPTS: usize = 32;

/// Pick an unused `ord-NNNN` id.
///
/// Falls back to a timestamp-based id once random draws keep colliding.
pub fn next_order_id(shop: &Shop, rng: &mut impl Rng, now: DateTime<Utc>) -> OrderId {
    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let candidate = OrderId::new(format!("ord-{}", rng.random_range(0..ORDER_NUMBER_SPACE)));
        if !shop.has_order(&candidate) {
            return candidate;
        }
    }
    OrderId::new(format!("ord-{}", now.timestamp_millis()))
}

/// Place an order for everything in the session's cart.
///
/// The new order goes to the front of the ledger and the cart is emptied.
///
/// # Errors
///
/// Returns an error if the shopper is unknown or the cart is empty.
#[instrument(skip(shop, session), fields(user_id = %session.user_id))]
pub fn place_order(
    shop: &mut Shop,
    session: &mut ShopperSession,
    now: DateTime<Utc>,
) -> Result<OrderId, StorefrontError> {
    if session.cart.is_empty() {
        return Err(OrderError::EmptyCart.into());
    }
    let customer = shop
        .customer(&session.user_id)
        .ok_or_else(|| StorefrontError::NotFound(format!("customer {}", session.user_id)))?;

    let id = next_order_id(shop, &mut rand::rng(), now);
    let order = Order::place(id.clone(), customer, session.cart.entries(), now)?;

    info!(
        order_id = %order.id,
        lines = order.lines.len(),
        total = %order.total_amount,
        "Order placed"
    );
    shop.record_order(order);
    session.cart.clear();
    Ok(id)
}

/// Outcome of a paid checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub payment: PaymentReceipt,
}

/// Charge the cart total (VAT inclusive) over M-PESA, then place the order.
///
/// The cart, the shopper and the number are all checked before the gateway
/// is asked for money. Nothing is recorded if the payment fails; the cart is
/// left intact for a retry.
///
/// # Errors
///
/// Returns an error for an empty cart, an unknown shopper, an invalid number
/// or a decline.
#[instrument(skip(shop, session, gateway, phone), fields(user_id = %session.user_id))]
pub async fn pay_and_place_order(
    shop: &mut Shop,
    session: &mut ShopperSession,
    gateway: &dyn PaymentGateway,
    phone: &str,
) -> Result<CheckoutReceipt, StorefrontError> {
    if session.cart.is_empty() {
        return Err(OrderError::EmptyCart.into());
    }
    if shop.customer(&session.user_id).is_none() {
        return Err(StorefrontError::NotFound(format!("customer {}", session.user_id)));
    }
    normalize_phone(phone)?;

    let amount = session.cart.total().with_vat();
    let payment = gateway.request_payment(phone, amount).await?;
    tokio::time::sleep(gateway.confirmation_delay()).await;

    let order_id = place_order(shop, session, Utc::now())?;
    Ok(CheckoutReceipt { order_id, payment })
}
