//! The filter/aggregation pipeline behind the dashboard.
//!
//! Given the immutable [`Dataset`] and a [`Selection`] of allowed filter
//! values, [`compute_views`] produces the filtered row subset, the per-product-
//! line totals, the per-hour totals, and the summary card values, all in one
//! consistent [`Views`] snapshot. The computation is pure: it reads its inputs
//! and returns a value, nothing else.

use crate::model::{Amount, Dataset, Sale};
use crate::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fmt::{Display, Formatter};

/// The warning shown to the user when a filter selection has an empty set.
pub const EMPTY_SELECTION_WARNING: &str = "No results found. Check the filters.";

/// The error returned when one or more of the three filter sets is empty.
///
/// This is user error, not a zero-row result: the caller must keep its prior
/// state and surface [`EMPTY_SELECTION_WARNING`] instead of rendering anything.
/// A selection that is valid but matches no rows is not this condition; it
/// produces an empty [`Views`] with zeroed summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptySelection;

impl Display for EmptySelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{EMPTY_SELECTION_WARNING}")
    }
}

impl std::error::Error for EmptySelection {}

/// The three user-chosen value sets that define the filtered view.
///
/// Each set must be a subset of the values actually observed in the dataset;
/// a UI only offers observed values, and [`Selection::from_lists`] enforces it
/// for values arriving from elsewhere (e.g. command-line flags).
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Selection {
    cities: BTreeSet<String>,
    customer_types: BTreeSet<String>,
    genders: BTreeSet<String>,
}

impl Selection {
    pub fn new<S, I>(cities: I, customer_types: I, genders: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            cities: cities.into_iter().map(|s| s.into()).collect(),
            customer_types: customer_types.into_iter().map(|s| s.into()).collect(),
            genders: genders.into_iter().map(|s| s.into()).collect(),
        }
    }

    /// Every observed value in every dimension. This is the initial state of a
    /// dashboard session, and the identity case: filtering with it returns the
    /// entire dataset.
    pub fn all(dataset: &Dataset) -> Self {
        Self::new(
            dataset.cities().iter().map(String::as_str),
            dataset.customer_types().iter().map(String::as_str),
            dataset.genders().iter().map(String::as_str),
        )
    }

    /// Builds a selection from requested value lists, validating each value
    /// against the dataset's observed values. An empty list means "all
    /// observed values" for that dimension.
    pub fn from_lists(
        dataset: &Dataset,
        cities: &[String],
        customer_types: &[String],
        genders: &[String],
    ) -> Result<Self> {
        Ok(Self {
            cities: checked_set(dataset.cities(), cities, "city")?,
            customer_types: checked_set(dataset.customer_types(), customer_types, "customer type")?,
            genders: checked_set(dataset.genders(), genders, "gender")?,
        })
    }

    /// True if any of the three sets is empty.
    pub fn has_empty_set(&self) -> bool {
        self.cities.is_empty() || self.customer_types.is_empty() || self.genders.is_empty()
    }

    /// True if the sale's city, customer type and gender are each members of
    /// the corresponding set.
    pub fn matches(&self, sale: &Sale) -> bool {
        self.cities.contains(sale.city())
            && self.customer_types.contains(sale.customer_type())
            && self.genders.contains(sale.gender())
    }

    pub fn cities(&self) -> &BTreeSet<String> {
        &self.cities
    }

    pub fn customer_types(&self) -> &BTreeSet<String> {
        &self.customer_types
    }

    pub fn genders(&self) -> &BTreeSet<String> {
        &self.genders
    }
}

fn checked_set(
    observed: &[String],
    requested: &[String],
    dimension: &str,
) -> Result<BTreeSet<String>> {
    if requested.is_empty() {
        return Ok(observed.iter().cloned().collect());
    }
    for value in requested {
        if !observed.iter().any(|v| v == value) {
            anyhow::bail!("Unknown {dimension} value '{value}'");
        }
    }
    Ok(requested.iter().cloned().collect())
}

/// One row of the per-product-line aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryTotal {
    pub product_line: String,
    pub total: Amount,
}

/// One row of the per-hour aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HourTotal {
    pub hour: u8,
    pub total: Amount,
}

/// The scalar values shown on the dashboard summary cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Summary {
    pub row_count: usize,
    pub total_sales: Amount,
    pub average_sale: Amount,
    /// Mean rating over the filtered view, rounded to one decimal place.
    pub average_rating: f64,
    /// Mean rating rounded to the nearest whole star. Ratings are bounded
    /// 0-10 at the data layer, so this never exceeds 10.
    pub stars: u32,
}

impl Summary {
    fn from_rows(rows: &[Sale]) -> Self {
        let row_count = rows.len();
        let total: Decimal = rows.iter().map(|s| s.total().value()).sum();
        let average = if row_count == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(row_count)
        };
        let mean_rating = if row_count == 0 {
            0.0
        } else {
            rows.iter().map(Sale::rating).sum::<f64>() / row_count as f64
        };
        Self {
            row_count,
            total_sales: Amount::new(total),
            average_sale: Amount::new(average),
            average_rating: (mean_rating * 10.0).round() / 10.0,
            stars: mean_rating.round() as u32,
        }
    }

    /// The Total Sales card, e.g. `US $ 322,966`.
    pub fn total_sales_card(&self) -> String {
        format!("US $ {}", self.total_sales.whole())
    }

    /// The Average Sales card, e.g. `US $ 322`.
    pub fn average_sale_card(&self) -> String {
        format!("US $ {}", self.average_sale.whole())
    }

    /// The Average Rating card, e.g. `7.0⭐⭐⭐⭐⭐⭐⭐`.
    pub fn average_rating_card(&self) -> String {
        format!(
            "{:.1}{}",
            self.average_rating,
            "⭐".repeat(self.stars as usize)
        )
    }
}

/// A consistent snapshot of everything derived from one filtered view.
///
/// The three derived datasets and the summary are computed together from the
/// same row subset; replacing a `Views` value replaces all of them atomically.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Views {
    rows: Vec<Sale>,
    by_product_line: Vec<CategoryTotal>,
    by_hour: Vec<HourTotal>,
    summary: Summary,
}

impl Views {
    /// The filtered rows, in dataset order.
    pub fn rows(&self) -> &[Sale] {
        &self.rows
    }

    /// Per-product-line totals, sorted ascending by total. Product lines with
    /// no matching rows are absent.
    pub fn by_product_line(&self) -> &[CategoryTotal] {
        &self.by_product_line
    }

    /// Per-hour totals, sorted ascending by hour. Hours with no matching rows
    /// are absent.
    pub fn by_hour(&self) -> &[HourTotal] {
        &self.by_hour
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Recomputes the filtered view and both aggregates for a filter selection.
///
/// Errors with [`EmptySelection`] if any of the three sets is empty; the
/// caller must not update displayed state in that case. A selection that is
/// non-empty but matches nothing is fine and yields empty rows, empty
/// aggregates and zeroed summary values.
pub fn compute_views(dataset: &Dataset, selection: &Selection) -> Result<Views> {
    if selection.has_empty_set() {
        return Err(EmptySelection.into());
    }

    let rows: Vec<Sale> = dataset
        .sales()
        .iter()
        .filter(|sale| selection.matches(sale))
        .cloned()
        .collect();

    let by_product_line = product_line_totals(&rows);
    let by_hour = hourly_totals(&rows);
    let summary = Summary::from_rows(&rows);

    Ok(Views {
        rows,
        by_product_line,
        by_hour,
        summary,
    })
}

/// Groups the rows by product line and sums the totals, sorted ascending by
/// summed total. Ties keep the order in which the product lines first appear
/// in the filtered view, which makes the result deterministic.
fn product_line_totals(rows: &[Sale]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    for sale in rows {
        match index.get(sale.product_line()) {
            Some(&ix) => {
                let sum = totals[ix].total.value() + sale.total().value();
                totals[ix].total = Amount::new(sum);
            }
            None => {
                index.insert(sale.product_line().to_string(), totals.len());
                totals.push(CategoryTotal {
                    product_line: sale.product_line().to_string(),
                    total: sale.total(),
                });
            }
        }
    }
    // sort_by is stable, so equal totals retain first-seen order.
    totals.sort_by(|a, b| a.total.value().cmp(&b.total.value()));
    totals
}

/// Groups the rows by hour-of-day and sums the totals, sorted ascending by
/// hour.
fn hourly_totals(rows: &[Sale]) -> Vec<HourTotal> {
    let mut sums: BTreeMap<u8, Decimal> = BTreeMap::new();
    for sale in rows {
        *sums.entry(sale.hour()).or_insert(Decimal::ZERO) += sale.total().value();
    }
    sums.into_iter()
        .map(|(hour, total)| HourTotal {
            hour,
            total: Amount::new(total),
        })
        .collect()
}
