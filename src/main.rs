//! # Shop Log
//!
//! Generates blank weekly "shop log" documents for a calendar year, one
//! `.docx` per ISO week, filed into year and month folders.
//!
//! ## Usage
//!
//! ```sh
//! shop_log --year 2020 --output-dir ./output
//! ```
//!
//! ## Architecture
//!
//! A run is a single sequential pass:
//! 1. **Calendar**: Map every ISO week of the year to the month of its Monday
//! 2. **Folders**: Create `<output>/<year>/<n> - <Mon>/` for all twelve months
//! 3. **Documents**: Write one shop log per week, skipping files that exist
//!
//! Re-running only fills in missing weeks; nothing is ever overwritten.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod calendar;
mod cli;
mod error;
mod models;
mod outputs;
mod pipeline;
mod utils;

use cli::Cli;
use models::ShopLogTemplate;
use pipeline::generate_year;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(version = env!("CARGO_PKG_VERSION"), "shop_log starting up");

    let args = Cli::parse();
    debug!(year = args.year, output_dir = ?args.output_dir, "Parsed CLI arguments");

    let template = ShopLogTemplate::default();
    let report = generate_year(&args.output_dir, args.year, &template).await?;

    if !report.folders.failed.is_empty() || !report.failed.is_empty() {
        warn!(
            folder_failures = report.folders.failed.len(),
            document_failures = report.failed.len(),
            "Some outputs could not be written"
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        year = report.year,
        generated = report.generated().count(),
        skipped = report.skipped().count(),
        "Execution complete"
    );

    Ok(())
}
