//! Command-line interface definitions for the shop log generator.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every argument has a default, so a bare `shop_log` run generates 2020 into
//! `./output`.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the shop log generator.
///
/// # Examples
///
/// ```sh
/// # Generate the default year into ./output
/// shop_log
///
/// # Another year and output root, with a JSON report on stdout
/// shop_log --year 2024 --output-dir /srv/shop-logs --json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Calendar year to generate weekly shop logs for
    #[arg(
        short,
        long,
        env = "SHOP_LOG_YEAR",
        default_value_t = 2020,
        value_parser = clap::value_parser!(i32).range(1..=9999)
    )]
    pub year: i32,

    /// Root directory that receives the `<year>/<month>/` folders
    #[arg(short, long, env = "SHOP_LOG_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Print the generation report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
