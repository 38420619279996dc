use clap::Parser;
use sales_dash::args::{Args, Command};
use sales_dash::{commands, load_csv, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");

    // The dataset is loaded once and never mutated; every command computes
    // over this one read-only value.
    let dataset = load_csv(args.common().data())?;
    debug!("Loaded {} sales records", dataset.len());

    let _: () = match args.command() {
        Command::Report(report_args) => {
            commands::report(&dataset, report_args.clone())?.print()
        }

        Command::Filter(filter_args) => {
            commands::filter(&dataset, filter_args.clone())?.print()
        }

        Command::Values(values_args) => {
            commands::values(&dataset, values_args.clone())?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for the library
            // and this binary only.
            EnvFilter::new(format!(
                "sales_dash={},{}={}",
                level,
                env!("CARGO_CRATE_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
