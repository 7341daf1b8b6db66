//! CSV export of the order list, one row per order line.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use gimco_core::Order;
use thiserror::Error;
use tracing::{info, instrument};

/// Column headers, in order.
pub const CSV_HEADERS: [&str; 10] = [
    "Order ID",
    "Date",
    "Customer Name",
    "Phone",
    "Total Amount",
    "Payment Status",
    "Item Name",
    "Item Type",
    "Item Status",
    "Est. Delivery",
];

const ORDER_DATE_FORMAT: &str = "%d/%m/%Y";

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The filtered list is empty.
    #[error("No orders to export.")]
    NoOrders,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// `orders_export_{YYYY-MM-DD}.csv`
#[must_use]
pub fn export_file_name(today: NaiveDate) -> String {
    format!("orders_export_{}.csv", today.format("%Y-%m-%d"))
}

/// Write the orders as CSV. Returns the number of data rows.
///
/// # Errors
///
/// Returns `ExportError::NoOrders` if `orders` is empty, or a write error.
pub fn write_orders_csv<'a, W: io::Write>(
    orders: impl IntoIterator<Item = &'a Order>,
    writer: W,
) -> Result<usize, ExportError> {
    let mut orders = orders.into_iter().peekable();
    if orders.peek().is_none() {
        return Err(ExportError::NoOrders);
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    let mut rows = 0;
    for order in orders {
        let date = order.date.format(ORDER_DATE_FORMAT).to_string();
        let total = order.total_amount.shillings().to_string();
        for line in &order.lines {
            let delivery = line
                .estimated_delivery()
                .map(|d| d.to_string())
                .unwrap_or_default();
            wtr.write_record([
                order.id.as_str(),
                date.as_str(),
                order.customer_name_or_na(),
                order.customer_phone_or_na(),
                total.as_str(),
                order.payment_status.as_str(),
                line.item().name.as_str(),
                line.item_type().as_str(),
                line.status().as_str(),
                delivery.as_str(),
            ])?;
            rows += 1;
        }
    }
    wtr.flush()?;
    Ok(rows)
}

/// Render the orders as a CSV string.
///
/// # Errors
///
/// Returns `ExportError::NoOrders` if `orders` is empty.
pub fn orders_to_csv<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_orders_csv(orders, &mut buf)?;
    String::from_utf8(buf).map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Write `orders_export_{today}.csv` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns `ExportError::NoOrders` if `orders` is empty (no file is
/// created), or an I/O error.
#[instrument(skip_all, fields(dir = %dir.display(), date = %today))]
pub fn export_to_dir<'a>(
    orders: impl IntoIterator<Item = &'a Order>,
    dir: &Path,
    today: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let mut orders = orders.into_iter().peekable();
    if orders.peek().is_none() {
        return Err(ExportError::NoOrders);
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(today));
    let rows = write_orders_csv(orders, File::create(&path)?)?;

    info!(path = %path.display(), rows, "Orders exported");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gimco_core::{OrderId, seed};

    use super::*;
    use crate::orders::AdminOrderQuery;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name(today()), "orders_export_2024-03-01.csv");
    }

    #[test]
    fn test_one_row_per_line() {
        let shop = seed::shop().unwrap();
        let csv = orders_to_csv(shop.orders()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Order ID,Date,Customer Name,Phone,Total Amount,Payment Status,Item Name,Item Type,Item Status,Est. Delivery"
        );
        let line_count: usize = shop.orders().iter().map(|o| o.lines.len()).sum();
        assert_eq!(lines.len(), line_count + 1);
    }

    #[test]
    fn test_row_contents() {
        let shop = seed::shop().unwrap();
        let order = shop.order(&OrderId::new("ord-5501")).unwrap();
        let csv = orders_to_csv([order]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[1..],
            [
                "ord-5501,15/10/2023,Kevin Kamau,0712345678,18200,PAID,Bespoke Executive Suit,SERVICE,FITTING,",
                "ord-5501,15/10/2023,Kevin Kamau,0712345678,18200,PAID,Suede Loafers,PRODUCT,DELIVERED,2023-10-18",
            ]
        );
    }

    #[test]
    fn test_missing_contact_is_na_and_commas_are_quoted() {
        let shop = seed::shop().unwrap();
        let mut order = shop.order(&OrderId::new("ord-5504")).unwrap().clone();
        order.customer_name = Some("Ochieng, David".to_string());
        order.customer_phone = None;

        let csv = orders_to_csv([&order]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("ord-5504,28/10/2023,\"Ochieng, David\",N/A,1800,PENDING,"));
    }

    #[test]
    fn test_empty_export_is_rejected() {
        let none: [&Order; 0] = [];
        let err = orders_to_csv(none).unwrap_err();
        assert!(matches!(err, ExportError::NoOrders));
        assert_eq!(err.to_string(), "No orders to export.");
    }

    #[test]
    fn test_export_filtered_list_to_dir() {
        let shop = seed::shop().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let query = AdminOrderQuery {
            search: "sarah".to_string(),
            ..AdminOrderQuery::default()
        };

        let path = export_to_dir(query.apply(shop.orders()), dir.path(), today()).unwrap();

        assert_eq!(path, dir.path().join("orders_export_2024-03-01.csv"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
        assert!(written.lines().skip(1).all(|l| l.starts_with("ord-5503,")));
    }

    #[test]
    fn test_empty_export_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let none: Vec<&Order> = Vec::new();
        assert!(matches!(
            export_to_dir(none, dir.path(), today()),
            Err(ExportError::NoOrders)
        ));
        assert!(!dir.path().join(export_file_name(today())).exists());
    }
}
