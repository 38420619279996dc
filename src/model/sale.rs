use crate::model::Amount;
use crate::Result;
use anyhow::{bail, Context};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Represents a single row from the Sales sheet.
///
/// The `hour` field is not a sheet column. It is derived from `time` when the
/// row is parsed and stored alongside the record so that hourly aggregation
/// never has to re-parse the time-of-sale.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Sale {
    pub(crate) invoice_id: String,
    pub(crate) branch: String,
    pub(crate) city: String,
    pub(crate) customer_type: String,
    pub(crate) gender: String,
    pub(crate) product_line: String,
    pub(crate) unit_price: Amount,
    pub(crate) quantity: u32,
    pub(crate) tax: Amount,
    pub(crate) total: Amount,
    pub(crate) date: String,
    pub(crate) time: String,
    pub(crate) payment: String,
    pub(crate) cogs: Amount,
    pub(crate) gross_margin_percentage: f64,
    pub(crate) gross_income: Amount,
    pub(crate) rating: f64,
    /// Hour of day (0-23) derived from `time`.
    pub(crate) hour: u8,
    pub(crate) other_fields: BTreeMap<String, String>,
}

impl Sale {
    pub fn new_with_sheet_headers<S1, S2, I>(headers: &[S1], values: I) -> Result<Self>
    where
        S1: AsRef<str>,
        S2: Into<String>,
        I: IntoIterator<Item = S2>,
    {
        let mut sale = Sale::default();
        for (ix, value) in values.into_iter().map(|s| s.into()).enumerate() {
            let header = headers
                .get(ix)
                .with_context(|| format!("No header found for column index {ix}"))?
                .as_ref();
            sale.set_with_header(header, value)?;
        }
        sale.hour = derive_hour(&sale.time)?;
        Ok(sale)
    }

    pub fn set_with_header<S1, S2>(&mut self, header: S1, value: S2) -> Result<()>
    where
        S1: AsRef<str>,
        S2: Into<String>,
    {
        let header = header.as_ref();
        let value = value.into();

        match SaleColumn::from_header(header) {
            Ok(col) => match col {
                SaleColumn::InvoiceId => self.invoice_id = value,
                SaleColumn::Branch => self.branch = value,
                SaleColumn::City => self.city = value,
                SaleColumn::CustomerType => self.customer_type = value,
                SaleColumn::Gender => self.gender = value,
                SaleColumn::ProductLine => self.product_line = value,
                SaleColumn::UnitPrice => self.unit_price = Amount::from_str(&value)?,
                SaleColumn::Quantity => {
                    self.quantity = value
                        .trim()
                        .parse()
                        .with_context(|| format!("Invalid quantity value '{value}'"))?
                }
                SaleColumn::Tax => self.tax = Amount::from_str(&value)?,
                SaleColumn::Total => self.total = Amount::from_str(&value)?,
                SaleColumn::Date => self.date = value,
                SaleColumn::Time => self.time = value,
                SaleColumn::Payment => self.payment = value,
                SaleColumn::Cogs => self.cogs = Amount::from_str(&value)?,
                SaleColumn::GrossMarginPercentage => {
                    self.gross_margin_percentage = value
                        .trim()
                        .parse()
                        .with_context(|| format!("Invalid gross margin value '{value}'"))?
                }
                SaleColumn::GrossIncome => self.gross_income = Amount::from_str(&value)?,
                SaleColumn::Rating => {
                    let rating: f64 = value
                        .trim()
                        .parse()
                        .with_context(|| format!("Invalid rating value '{value}'"))?;
                    if !(0.0..=10.0).contains(&rating) {
                        bail!("Rating value '{value}' is outside the range 0-10");
                    }
                    self.rating = rating;
                }
            },
            Err(_) => {
                let _ = self.other_fields.insert(header.to_string(), value);
            }
        }

        Ok(())
    }

    pub fn invoice_id(&self) -> &str {
        &self.invoice_id
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn customer_type(&self) -> &str {
        &self.customer_type
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn product_line(&self) -> &str {
        &self.product_line
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }
}

/// Parses a wall-clock time-of-sale such as `13:08:00` and returns its hour.
///
/// Sheet exports sometimes omit the seconds, so `13:08` is accepted too.
fn derive_hour(time: &str) -> Result<u8> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .with_context(|| format!("Invalid time-of-sale value '{time}'"))?;
    Ok(parsed.hour() as u8)
}

/// Represents the known columns that should be found in the Sales sheet.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleColumn {
    #[default]
    InvoiceId,
    Branch,
    City,
    CustomerType,
    Gender,
    ProductLine,
    UnitPrice,
    Quantity,
    Tax,
    Total,
    Date,
    Time,
    Payment,
    Cogs,
    GrossMarginPercentage,
    GrossIncome,
    Rating,
}

serde_plain::derive_display_from_serialize!(SaleColumn);
serde_plain::derive_fromstr_from_deserialize!(SaleColumn);

impl SaleColumn {
    pub fn from_header(header: impl AsRef<str>) -> Result<SaleColumn> {
        let header_str = header.as_ref();
        match header_str {
            INVOICE_ID_STR => Ok(SaleColumn::InvoiceId),
            BRANCH_STR => Ok(SaleColumn::Branch),
            CITY_STR => Ok(SaleColumn::City),
            CUSTOMER_TYPE_STR => Ok(SaleColumn::CustomerType),
            GENDER_STR => Ok(SaleColumn::Gender),
            PRODUCT_LINE_STR => Ok(SaleColumn::ProductLine),
            UNIT_PRICE_STR => Ok(SaleColumn::UnitPrice),
            QUANTITY_STR => Ok(SaleColumn::Quantity),
            TAX_STR => Ok(SaleColumn::Tax),
            TOTAL_STR => Ok(SaleColumn::Total),
            DATE_STR => Ok(SaleColumn::Date),
            TIME_STR => Ok(SaleColumn::Time),
            PAYMENT_STR => Ok(SaleColumn::Payment),
            COGS_STR => Ok(SaleColumn::Cogs),
            GROSS_MARGIN_PERCENTAGE_STR => Ok(SaleColumn::GrossMarginPercentage),
            GROSS_INCOME_STR => Ok(SaleColumn::GrossIncome),
            RATING_STR => Ok(SaleColumn::Rating),
            bad => bail!("Invalid sale column name '{bad}'"),
        }
    }
}

pub(super) const INVOICE_ID_STR: &str = "Invoice ID";
pub(super) const BRANCH_STR: &str = "Branch";
pub(super) const CITY_STR: &str = "City";
/// The source sheet uses an underscore in this one header.
pub(super) const CUSTOMER_TYPE_STR: &str = "Customer_type";
pub(super) const GENDER_STR: &str = "Gender";
pub(super) const PRODUCT_LINE_STR: &str = "Product line";
pub(super) const UNIT_PRICE_STR: &str = "Unit price";
pub(super) const QUANTITY_STR: &str = "Quantity";
pub(super) const TAX_STR: &str = "Tax 5%";
pub(super) const TOTAL_STR: &str = "Total";
pub(super) const DATE_STR: &str = "Date";
pub(super) const TIME_STR: &str = "Time";
pub(super) const PAYMENT_STR: &str = "Payment";
pub(super) const COGS_STR: &str = "cogs";
pub(super) const GROSS_MARGIN_PERCENTAGE_STR: &str = "gross margin percentage";
pub(super) const GROSS_INCOME_STR: &str = "gross income";
pub(super) const RATING_STR: &str = "Rating";

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<&'static str> {
        vec![
            INVOICE_ID_STR,
            CITY_STR,
            CUSTOMER_TYPE_STR,
            GENDER_STR,
            PRODUCT_LINE_STR,
            TOTAL_STR,
            TIME_STR,
            RATING_STR,
        ]
    }

    #[test]
    fn test_parse_row_with_headers() {
        let sale = Sale::new_with_sheet_headers(
            &headers(),
            vec![
                "750-67-8428",
                "Yangon",
                "Member",
                "Female",
                "Health and beauty",
                "548.9715",
                "13:08:00",
                "9.1",
            ],
        )
        .unwrap();
        assert_eq!(sale.invoice_id(), "750-67-8428");
        assert_eq!(sale.city(), "Yangon");
        assert_eq!(sale.customer_type(), "Member");
        assert_eq!(sale.gender(), "Female");
        assert_eq!(sale.product_line(), "Health and beauty");
        assert_eq!(sale.total().to_string(), "$548.97");
        assert_eq!(sale.hour(), 13);
        assert_eq!(sale.rating(), 9.1);
    }

    #[test]
    fn test_hour_from_time_without_seconds() {
        let sale = Sale::new_with_sheet_headers(
            &headers(),
            vec!["x", "Yangon", "Member", "Male", "Sports", "10.00", "20:33", "7.0"],
        )
        .unwrap();
        assert_eq!(sale.hour(), 20);
    }

    #[test]
    fn test_invalid_time_is_an_error() {
        let result = Sale::new_with_sheet_headers(
            &headers(),
            vec!["x", "Yangon", "Member", "Male", "Sports", "10.00", "banana", "7.0"],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rating_out_of_range_is_an_error() {
        let result = Sale::new_with_sheet_headers(
            &headers(),
            vec!["x", "Yangon", "Member", "Male", "Sports", "10.00", "09:00:00", "11.5"],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_header_goes_to_other_fields() {
        let mut sale = Sale::default();
        sale.set_with_header("Loyalty Tier", "Gold").unwrap();
        assert_eq!(sale.other_fields.get("Loyalty Tier").unwrap(), "Gold");
    }

    #[test]
    fn test_from_header_rejects_unknown() {
        assert!(SaleColumn::from_header("Nope").is_err());
    }
}
