//! Printable plain-text invoices.

use std::fmt;

use gimco_core::{Order, format_kes_decimal};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Renders an order as an invoice via [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct Invoice<'a>(pub &'a Order);

impl fmt::Display for Invoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = self.0;
        writeln!(f, "GIMCO KE - Invoice #{}", order.id)?;
        writeln!(f, "Date: {}", order.date.format(DATE_FORMAT))?;
        writeln!(
            f,
            "Customer: {} ({})",
            order.customer_name_or_na(),
            order.customer_phone_or_na()
        )?;
        writeln!(f, "Payment: {}", order.payment_status)?;
        writeln!(f)?;
        for line in &order.lines {
            writeln!(
                f,
                "{} x{} [{}] {}",
                line.item().name,
                line.quantity(),
                line.item_type(),
                line.item().price
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Subtotal: {}", order.total_amount)?;
        writeln!(f, "VAT (16%): {}", format_kes_decimal(order.total_amount.vat()))?;
        write!(f, "Total: {}", format_kes_decimal(order.total_amount.with_vat()))
    }
}
