//! Shared test fixtures for building in-memory datasets.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::Dataset;

/// The header row of the Sales sheet, in source-sheet column order.
pub(crate) const SHEET_HEADERS: [&str; 17] = [
    "Invoice ID",
    "Branch",
    "City",
    "Customer_type",
    "Gender",
    "Product line",
    "Unit price",
    "Quantity",
    "Tax 5%",
    "Total",
    "Date",
    "Time",
    "Payment",
    "cogs",
    "gross margin percentage",
    "gross income",
    "Rating",
];

/// Builds one full sheet row, with plausible constants for the columns the
/// tests do not vary.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sale_row(
    invoice_id: &str,
    city: &str,
    customer_type: &str,
    gender: &str,
    product_line: &str,
    total: &str,
    time: &str,
    rating: &str,
) -> Vec<String> {
    vec![
        invoice_id.to_string(),
        "A".to_string(),
        city.to_string(),
        customer_type.to_string(),
        gender.to_string(),
        product_line.to_string(),
        total.to_string(),
        "1".to_string(),
        "0.00".to_string(),
        total.to_string(),
        "1/5/2019".to_string(),
        time.to_string(),
        "Cash".to_string(),
        total.to_string(),
        "4.761904762".to_string(),
        "0.00".to_string(),
        rating.to_string(),
    ]
}

fn dataset_from_rows(rows: Vec<Vec<String>>) -> Dataset {
    let mut data = vec![SHEET_HEADERS.iter().map(|s| s.to_string()).collect::<Vec<_>>()];
    data.extend(rows);
    Dataset::parse(data).unwrap()
}

/// Eight sales across three cities, two customer types and two genders.
///
/// There is deliberately no Naypyitaw/Normal/Female row, so that combination
/// is a valid selection matching nothing.
pub(crate) fn sample_dataset() -> Dataset {
    dataset_from_rows(vec![
        sale_row("001", "Yangon", "Member", "Female", "Health and beauty", "120.00", "09:15:00", "9.0"),
        sale_row("002", "Yangon", "Normal", "Male", "Electronic accessories", "80.50", "10:30:00", "7.5"),
        sale_row("003", "Mandalay", "Member", "Male", "Health and beauty", "60.25", "09:45:00", "8.0"),
        sale_row("004", "Mandalay", "Normal", "Female", "Food and beverages", "45.00", "13:05:00", "6.5"),
        sale_row("005", "Naypyitaw", "Member", "Female", "Food and beverages", "150.75", "15:20:00", "9.5"),
        sale_row("006", "Yangon", "Member", "Male", "Sports and travel", "95.10", "10:05:00", "7.0"),
        sale_row("007", "Naypyitaw", "Normal", "Male", "Electronic accessories", "30.00", "19:40:00", "5.5"),
        sale_row("008", "Mandalay", "Member", "Female", "Sports and travel", "75.00", "13:55:00", "8.5"),
    ])
}

/// Three sales small enough to check aggregate arithmetic by hand:
/// (Yangon, 10, hour 9), (Mandalay, 20, hour 9), (Yangon, 5, hour 14).
pub(crate) fn three_sale_dataset() -> Dataset {
    dataset_from_rows(vec![
        sale_row("001", "Yangon", "Member", "Female", "Food and beverages", "10.00", "09:10:00", "8.0"),
        sale_row("002", "Mandalay", "Normal", "Male", "Food and beverages", "20.00", "09:40:00", "7.0"),
        sale_row("003", "Yangon", "Member", "Male", "Health and beauty", "5.00", "14:25:00", "6.0"),
    ])
}

/// Product lines where "Beverages" and "Food" tie on total, with "Beverages"
/// appearing first in the data.
pub(crate) fn tie_dataset() -> Dataset {
    dataset_from_rows(vec![
        sale_row("001", "Yangon", "Member", "Female", "Beverages", "20.00", "09:00:00", "8.0"),
        sale_row("002", "Yangon", "Member", "Female", "Snacks", "5.00", "10:00:00", "8.0"),
        sale_row("003", "Yangon", "Member", "Female", "Food", "30.00", "11:00:00", "8.0"),
        sale_row("004", "Yangon", "Member", "Female", "Beverages", "10.00", "12:00:00", "8.0"),
    ])
}
