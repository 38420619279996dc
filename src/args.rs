//! These structs provide the CLI interface for the salesdash CLI.

use crate::commands::Format;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// salesdash: A command-line tool for exploring supermarket sales data.
///
/// The purpose of this program is to load a CSV export of a supermarket Sales
/// sheet and recompute the dashboard views over it: the summary cards (total
/// sales, average sale, average rating), sales by product line, and sales by
/// hour of day. The `filter` subcommand narrows the data by city, customer
/// type and gender the way the dashboard's selectors do.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the summary cards and both aggregates for the whole dataset.
    Report(ReportArgs),

    /// Recompute the views for a filter selection.
    ///
    /// Each of --city, --customer-type and --gender may be repeated. A
    /// dimension with no flags keeps all of its observed values, which is how
    /// the dashboard selectors start out. Values must be ones that actually
    /// occur in the data; use the `values` subcommand to see what is on offer.
    Filter(FilterArgs),

    /// Print the distinct filter values observed in the data.
    Values(ValuesArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate
    /// for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The path to the CSV export of the Sales sheet.
    #[arg(long, env = "SALES_DATA")]
    data: PathBuf,
}

impl Common {
    pub fn new(log_level: LevelFilter, data: PathBuf) -> Self {
        Self { log_level, data }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn data(&self) -> &Path {
        &self.data
    }
}

/// Args for the `salesdash report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The output format.
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

impl ReportArgs {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

/// Args for the `salesdash filter` command.
#[derive(Debug, Parser, Clone)]
pub struct FilterArgs {
    /// A city to include. Repeat the flag to include several.
    #[arg(long = "city")]
    cities: Vec<String>,

    /// A customer type to include. Repeat the flag to include several.
    #[arg(long = "customer-type")]
    customer_types: Vec<String>,

    /// A gender to include. Repeat the flag to include several.
    #[arg(long = "gender")]
    genders: Vec<String>,

    /// The output format.
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

impl FilterArgs {
    pub fn new(
        cities: Vec<String>,
        customer_types: Vec<String>,
        genders: Vec<String>,
        format: Format,
    ) -> Self {
        Self {
            cities,
            customer_types,
            genders,
            format,
        }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn customer_types(&self) -> &[String] {
        &self.customer_types
    }

    pub fn genders(&self) -> &[String] {
        &self.genders
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

/// Args for the `salesdash values` command.
#[derive(Debug, Parser, Clone)]
pub struct ValuesArgs {
    /// The output format.
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

impl ValuesArgs {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn format(&self) -> Format {
        self.format
    }
}
