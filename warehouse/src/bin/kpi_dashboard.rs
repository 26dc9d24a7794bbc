//! Print one KPI and the two breakdown charts from the warehouse.
//!
//! # Examples
//! ```sh
//! cargo run -p warehouse --bin kpi-dashboard -- --kpi "Total Revenue"
//! cargo run -p warehouse --bin kpi-dashboard -- --kpi total-clients --format json
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use warehouse::domain::{Kpi, KpiDashboard};
use warehouse::render::{DEFAULT_BAR_WIDTH, OutputFormat};
use warehouse::settings::WarehouseSettings;
use warehouse::telemetry::init_tracing;

const PROGRAM: &str = "kpi-dashboard";
const MAX_BAR_WIDTH: usize = 200;

/// `kpi-dashboard` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "kpi-dashboard",
    about = "Compute a warehouse KPI and chart transactions per product and revenue per client",
    version
)]
struct CliArgs {
    /// KPI label such as "Total Revenue", or its kebab name such as total-revenue.
    #[arg(
        long,
        value_name = "kpi",
        default_value = "Total Transactions",
        value_parser = parse_kpi
    )]
    kpi: Kpi,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Width in blocks of the longest bar in text output.
    #[arg(
        long = "bar-width",
        value_name = "blocks",
        default_value_t = DEFAULT_BAR_WIDTH,
        value_parser = parse_bar_width
    )]
    bar_width: usize,
    /// Database connection URL. Falls back to `WAREHOUSE_URL`, then
    /// `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    run(CliArgs::parse())
}

fn run(args: CliArgs) -> Result<()> {
    let CliArgs {
        kpi,
        format,
        bar_width,
        database_url,
    } = args;

    let settings = WarehouseSettings::load_from_iter([OsString::from(PROGRAM)])
        .map_err(|error| eyre!("failed to load warehouse settings: {error}"))?;
    let connector = settings
        .connector(database_url)
        .with_context(|| "invalid warehouse configuration")?;

    let dashboard = KpiDashboard::new(Arc::new(connector));
    let report = dashboard
        .report(kpi)
        .with_context(|| format!("failed to compute {kpi}"))?;

    let mut stdout = io::stdout().lock();
    format
        .renderer(bar_width)
        .render(&report, &mut stdout)
        .with_context(|| "failed to write dashboard")?;
    Ok(())
}

fn parse_kpi(raw: &str) -> Result<Kpi, String> {
    raw.parse::<Kpi>().map_err(|error| error.to_string())
}

fn parse_bar_width(raw: &str) -> Result<usize, String> {
    let width = raw
        .trim()
        .parse::<usize>()
        .map_err(|error| format!("failed to parse bar width: {error}"))?;
    if width == 0 || width > MAX_BAR_WIDTH {
        return Err(format!("bar width must be between 1 and {MAX_BAR_WIDTH}"));
    }
    Ok(width)
}
