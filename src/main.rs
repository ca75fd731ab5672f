//! CLI entry point for the expense checker.
//!
//! Provides subcommands for validating an extracted expense-table snapshot
//! and for inspecting the resolved holiday set for a year.

use anyhow::Result;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use expense_checker::checks::check_all;
use expense_checker::holidays::{ApiHolidaySource, HolidayCalendar};
use expense_checker::{
    fetch::{BasicClient, fetch_bytes},
    input::parse_tables,
    output::{TableSummary, append_summary, print_json, print_pretty},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "expense_checker")]
#[command(about = "A tool to validate travel-expense submissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an expense-table snapshot from a file or URL
    Check {
        /// Path to a JSON snapshot file or URL to fetch it from
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append per-table summary rows to
        #[arg(short, long, default_value = "results.csv")]
        output: String,
    },
    /// Resolve and list the holiday set for a year
    Holidays {
        /// Four-digit year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/expense_checker.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("expense_checker.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { source, output } => {
            check_snapshot(&source, &output).await?;
        }
        Commands::Holidays { year } => {
            let year = year.unwrap_or_else(|| chrono::Local::now().year());
            let calendar = HolidayCalendar::new(ApiHolidaySource::new(BasicClient::new()));

            let holidays = calendar.holidays_for(year).await;
            let mut dates: Vec<_> = holidays.into_iter().collect();
            dates.sort();

            for date in &dates {
                info!(%date, "Holiday");
            }
            info!(year, total = dates.len(), "Holiday set resolved");
        }
    }

    Ok(())
}

/// Runs the full validation over a snapshot and reports the outcome.
///
/// A snapshot that cannot be read or parsed produces a report with zero
/// tables and the failure message set, never a partial result.
#[tracing::instrument(skip(output), fields(source = %source))]
async fn check_snapshot(source: &str, output: &str) -> Result<()> {
    let tables = match fetcher(source).await.and_then(|bytes| parse_tables(&bytes)) {
        Ok(tables) => tables,
        Err(e) => {
            error!(error = %e, "Snapshot could not be loaded");
            let failed = expense_checker::checks::OverallResult::failure(e.to_string());
            print_json(&failed)?;
            return Ok(());
        }
    };

    let calendar = HolidayCalendar::new(ApiHolidaySource::new(BasicClient::new()));
    let result = check_all(&calendar, &tables).await;

    print_pretty(&result);
    print_json(&result)?;

    for table_result in &result.tables {
        append_summary(output, &TableSummary::from_result(table_result))?;
    }

    info!(
        tables = result.tables.len(),
        errors = result.total_errors,
        warnings = result.total_warnings,
        overall_success = result.overall_success,
        "Validation complete"
    );
    Ok(())
}

/// Loads snapshot data from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %url))]
async fn fetcher(url: &str) -> Result<Vec<u8>> {
    let bytes = if url.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, url).await?
    } else {
        std::fs::read(url)?
    };
    Ok(bytes)
}
