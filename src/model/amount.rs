//! Amount type for handling monetary values from the Sales sheet.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! parsing cell values that may or may not include a dollar sign and commas.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents a dollar amount.
///
/// This type wraps `Decimal` and provides custom serialization/deserialization
/// so that sheet cells formatted with dollar signs or thousands separators
/// parse to the same value as plain decimal cells.
///
/// # Examples
///
/// ```
/// # use sales_dash::model::Amount;
/// # use std::str::FromStr;
/// let plain = Amount::from_str("5678.25").unwrap();
/// let fancy = Amount::from_str("$5,678.25").unwrap();
/// assert_eq!(plain, fancy);
/// assert_eq!(plain.to_string(), "$5,678.25");
/// ```
///
/// The dashboard summary cards show amounts truncated to whole dollars:
/// ```
/// # use sales_dash::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("5678.25").unwrap();
/// assert_eq!(amount.whole(), "5,678");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Renders the amount truncated to whole dollars with thousands separators,
    /// e.g. `5678.25` -> `5,678`. This is the form the dashboard summary cards
    /// use, without a currency symbol.
    pub fn whole(&self) -> String {
        format_num::format_num!(",.0f", self.value().trunc().to_f64().unwrap_or_default())
    }
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // An empty cell is a zero amount.
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        // Remove the dollar sign, which may appear after a minus sign.
        let without_dollar = if let Some(after_minus) = trimmed.strip_prefix('-') {
            if let Some(after_dollar) = after_minus.strip_prefix('$') {
                format!("-{after_dollar}")
            } else {
                trimmed.to_string()
            }
        } else if let Some(after_dollar) = trimmed.strip_prefix('$') {
            after_dollar.to_string()
        } else {
            trimmed.to_string()
        };

        // Remove commas (thousand separators).
        let without_commas = without_dollar.replace(',', "");

        let value = Decimal::from_str(&without_commas).map_err(AmountError)?;
        Ok(Amount { value })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, num) = if self.value().is_sign_negative() && !self.is_zero() {
            (String::from("-"), self.value().abs())
        } else {
            (String::new(), self.value())
        };

        write!(
            f,
            "{sign}${}",
            format_num::format_num!(",.2f", num.to_f64().unwrap_or_default())
        )
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as a plain decimal string so JSON consumers (e.g. chart
        // renderers) do not have to strip formatting.
        serializer.serialize_str(&self.value().to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("548.9715").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("548.9715").unwrap());
    }

    #[test]
    fn test_parse_with_dollar_sign() {
        let amount = Amount::from_str("$50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_with_commas() {
        let amount = Amount::from_str("$1,234,567.89").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1234567.89").unwrap());
    }

    #[test]
    fn test_parse_negative_with_dollar_sign() {
        let amount = Amount::from_str("-$50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("-50.00").unwrap());
    }

    #[test]
    fn test_parse_empty_string() {
        let amount = Amount::from_str("").unwrap();
        assert_eq!(amount.value(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  $50.00  ").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_display() {
        let amount = Amount::from_str("1234.5").unwrap();
        assert_eq!(amount.to_string(), "$1,234.50");
    }

    #[test]
    fn test_display_negative() {
        let amount = Amount::from_str("-50").unwrap();
        assert_eq!(amount.to_string(), "-$50.00");
    }

    #[test]
    fn test_display_zero() {
        let amount = Amount::new(Decimal::ZERO);
        assert_eq!(amount.to_string(), "$0.00");
    }

    #[test]
    fn test_whole_truncates() {
        let amount = Amount::from_str("5678.99").unwrap();
        assert_eq!(amount.whole(), "5,678");
    }

    #[test]
    fn test_whole_small_value() {
        let amount = Amount::from_str("322.42").unwrap();
        assert_eq!(amount.whole(), "322");
    }

    #[test]
    fn test_serialize() {
        let amount = Amount::from_str("$1,050.25").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"1050.25\"");
    }

    #[test]
    fn test_deserialize() {
        let amount: Amount = serde_json::from_str("\"$1,050.25\"").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1050.25").unwrap());
    }

    #[test]
    fn test_ordering() {
        let a1 = Amount::from_str("30.00").unwrap();
        let a2 = Amount::from_str("50.00").unwrap();
        assert!(a1 < a2);
    }

    #[test]
    fn test_is_zero() {
        assert!(Amount::from_str("0.00").unwrap().is_zero());
        assert!(!Amount::from_str("50.00").unwrap().is_zero());
    }
}
