use crate::model::Sale;
use crate::Result;
use anyhow::{bail, Context};

/// The full, immutable collection of sale records, loaded once at startup.
///
/// Alongside the records, the dataset captures the distinct values observed in
/// each filter dimension (city, customer type, gender), in first-seen order.
/// These are the values a UI offers in its selectors, and the universe a
/// `Selection` is allowed to draw from.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Dataset {
    sales: Vec<Sale>,
    cities: Vec<String>,
    customer_types: Vec<String>,
    genders: Vec<String>,
}

impl Dataset {
    /// Given the rows of a Sales sheet, parse the headers and data into a
    /// `Dataset`. The first row must be the header row.
    pub fn parse<S, R, I>(sheet_data: I) -> Result<Self>
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
        I: IntoIterator<Item = R>,
    {
        let mut rows = sheet_data.into_iter();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.into_iter().map(|s| s.into()).collect(),
            None => bail!("An empty data set cannot be parsed into a Dataset"),
        };

        let len = headers.len();
        let mut sales = Vec::new();

        for (row_ix, row) in rows.enumerate() {
            let values: Vec<String> = row.into_iter().map(|s| s.into()).collect();
            if values.is_empty() {
                continue; // Skip empty rows
            }
            if values.len() > len {
                bail!(
                    "A row longer than the headers list was encountered at row {}",
                    row_ix + 2
                );
            }

            let sale = Sale::new_with_sheet_headers(&headers, values)
                .with_context(|| format!("Unable to parse the sale at row {}", row_ix + 2))?;
            sales.push(sale);
        }

        Ok(Self::from_sales(sales))
    }

    /// Creates a `Dataset` from already-typed records, capturing the observed
    /// filter values in first-seen order.
    pub fn from_sales(sales: Vec<Sale>) -> Self {
        let mut cities = Vec::new();
        let mut customer_types = Vec::new();
        let mut genders = Vec::new();
        for sale in &sales {
            push_unique(&mut cities, sale.city());
            push_unique(&mut customer_types, sale.customer_type());
            push_unique(&mut genders, sale.gender());
        }
        Self {
            sales,
            cities,
            customer_types,
            genders,
        }
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// The distinct cities observed in the data, in first-seen order.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// The distinct customer types observed in the data, in first-seen order.
    pub fn customer_types(&self) -> &[String] {
        &self.customer_types
    }

    /// The distinct genders observed in the data, in first-seen order.
    pub fn genders(&self) -> &[String] {
        &self.genders
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
