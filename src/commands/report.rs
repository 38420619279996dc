//! Report commands that load, filter and aggregate the sales data.
//!
//! This module provides:
//! - `report`: Summary cards and both aggregates over the whole dataset
//! - `filter`: The same views recomputed for a filter selection
//! - `values`: The observed filter values a UI would offer in its selectors

use crate::args::{FilterArgs, ReportArgs, ValuesArgs};
use crate::commands::{Format, Out};
use crate::model::Dataset;
use crate::pipeline::{compute_views, Selection, Views};
use crate::session::Session;
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fmt::Write;

/// Compute the unfiltered views: every observed value selected, filtered view
/// equal to the entire dataset.
pub fn report(dataset: &Dataset, args: ReportArgs) -> Result<Out<Views>> {
    let views = compute_views(dataset, &Selection::all(dataset))?;
    let message = render_views(&views, args.format())?;
    Ok(Out::new(message, views))
}

/// Apply a filter selection as a dashboard session would: start from the
/// all-values state, then apply the requested selection as one filter-change
/// event. An empty selection leaves the session untouched and is returned as
/// an error for the caller to surface.
pub fn filter(dataset: &Dataset, args: FilterArgs) -> Result<Out<Views>> {
    let selection =
        Selection::from_lists(dataset, args.cities(), args.customer_types(), args.genders())?;
    let mut session = Session::new(dataset)?;
    session.apply(dataset, selection)?;
    let message = render_views(session.views(), args.format())?;
    Ok(Out::new(message, session.views().clone()))
}

/// The distinct values observed in each filter dimension.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ObservedValues {
    cities: Vec<String>,
    customer_types: Vec<String>,
    genders: Vec<String>,
}

/// List the observed filter values per dimension.
pub fn values(dataset: &Dataset, args: ValuesArgs) -> Result<Out<ObservedValues>> {
    let observed = ObservedValues {
        cities: dataset.cities().to_vec(),
        customer_types: dataset.customer_types().to_vec(),
        genders: dataset.genders().to_vec(),
    };
    let message = render_values(&observed, args.format())?;
    Ok(Out::new(message, observed))
}

fn render_views(views: &Views, format: Format) -> Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(views).context("Unable to render JSON"),
        Format::Table => Ok(views_table(views)),
        Format::Csv => views_csv(views),
    }
}

fn views_table(views: &Views) -> String {
    let summary = views.summary();
    let mut out = String::new();
    let _ = writeln!(out, "Total Sales: {}", summary.total_sales_card());
    let _ = writeln!(out, "Average Sales: {}", summary.average_sale_card());
    let _ = writeln!(out, "Average Rating: {}", summary.average_rating_card());
    let _ = writeln!(out, "Transactions: {}", summary.row_count);

    let _ = writeln!(out, "\nSales by Product Line\n");
    let _ = writeln!(out, "| Product line | Total |");
    let _ = writeln!(out, "| --- | --- |");
    for entry in views.by_product_line() {
        let _ = writeln!(out, "| {} | {} |", entry.product_line, entry.total);
    }

    let _ = writeln!(out, "\nSales by Hour\n");
    let _ = writeln!(out, "| Hour | Total |");
    let _ = writeln!(out, "| --- | --- |");
    for entry in views.by_hour() {
        let _ = writeln!(out, "| {} | {} |", entry.hour, entry.total);
    }
    out
}

/// Two CSV sections: product-line totals, a blank line, then hourly totals.
fn views_csv(views: &Views) -> Result<String> {
    let mut product_lines = csv::Writer::from_writer(Vec::new());
    product_lines
        .write_record(["product_line", "total"])
        .context("Unable to write CSV")?;
    for entry in views.by_product_line() {
        product_lines
            .write_record([entry.product_line.clone(), entry.total.value().to_string()])
            .context("Unable to write CSV")?;
    }

    let mut hours = csv::Writer::from_writer(Vec::new());
    hours
        .write_record(["hour", "total"])
        .context("Unable to write CSV")?;
    for entry in views.by_hour() {
        hours
            .write_record([entry.hour.to_string(), entry.total.value().to_string()])
            .context("Unable to write CSV")?;
    }

    Ok(format!(
        "{}\n{}",
        csv_string(product_lines)?,
        csv_string(hours)?
    ))
}

fn render_values(observed: &ObservedValues, format: Format) -> Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(observed).context("Unable to render JSON"),
        Format::Table => {
            let mut out = String::new();
            let _ = writeln!(out, "Cities: {}", observed.cities.join(", "));
            let _ = writeln!(out, "Customer types: {}", observed.customer_types.join(", "));
            let _ = writeln!(out, "Genders: {}", observed.genders.join(", "));
            Ok(out)
        }
        Format::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .write_record(["dimension", "value"])
                .context("Unable to write CSV")?;
            for city in &observed.cities {
                writer
                    .write_record(["city", city.as_str()])
                    .context("Unable to write CSV")?;
            }
            for customer_type in &observed.customer_types {
                writer
                    .write_record(["customer_type", customer_type.as_str()])
                    .context("Unable to write CSV")?;
            }
            for gender in &observed.genders {
                writer
                    .write_record(["gender", gender.as_str()])
                    .context("Unable to write CSV")?;
            }
            csv_string(writer)
        }
    }
}

fn csv_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to flush CSV: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
