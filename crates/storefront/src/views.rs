//! Display models for the cart and checkout summary.

use gimco_core::{Cart, CartEntryId, ItemType, format_kes_decimal};

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub cart_id: CartEntryId,
    pub name: String,
    pub kind: &'static str,
    pub price: String,
}

/// Cart display data, including the VAT breakdown shown before payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub vat: String,
    pub total_due: String,
    pub item_count: usize,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.total();
        Self {
            items: cart
                .entries()
                .iter()
                .map(|line| CartItemView {
                    cart_id: line.cart_id.clone(),
                    name: line.entry.name.clone(),
                    kind: match line.entry.item_type {
                        ItemType::Service => "Bespoke",
                        ItemType::Product => "Ready-made",
                    },
                    price: line.entry.price.to_string(),
                })
                .collect(),
            subtotal: subtotal.to_string(),
            vat: format_kes_decimal(subtotal.vat()),
            total_due: format_kes_decimal(subtotal.with_vat()),
            item_count: cart.len(),
        }
    }
}
