//! Seed the warehouse with a synthetic dataset.
//!
//! Row failures are logged and skipped; only configuration errors and a
//! failed connection stop the run. Without a seed or plan a fresh seed is
//! drawn and logged, so the run can be repeated with `--seed`.
//!
//! # Examples
//! ```sh
//! cargo run -p warehouse --bin warehouse-seed -- --plan smoke --database-url postgres://localhost/warehouse
//! cargo run -p warehouse --bin warehouse-seed -- --seed 7 --clients 3 --dry-run
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use warehouse::domain::{SeedOutcome, WarehouseSeeder};
use warehouse::settings::{SeederSettings, WarehouseSettings};
use warehouse::telemetry::init_tracing;

const PROGRAM: &str = "warehouse-seed";

/// `warehouse-seed` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "warehouse-seed",
    about = "Insert synthetic clients, products, transactions and suppliers into the warehouse",
    version
)]
struct CliArgs {
    /// Named plan to load from the registry.
    #[arg(long, value_name = "name")]
    plan: Option<String>,
    /// Plan registry JSON file.
    #[arg(long = "registry", value_name = "path")]
    registry_path: Option<PathBuf>,
    /// RNG seed; the same seed always produces the same rows.
    #[arg(long, value_name = "u64")]
    seed: Option<u64>,
    /// Number of clients (and paired products and transactions).
    #[arg(long = "clients", value_name = "count")]
    client_count: Option<usize>,
    /// Number of suppliers.
    #[arg(long = "suppliers", value_name = "count")]
    supplier_count: Option<usize>,
    /// Generate and report the dataset without connecting to the warehouse.
    #[arg(long = "dry-run")]
    dry_run: bool,
    /// Database connection URL. Falls back to `WAREHOUSE_URL`, then
    /// `DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

impl CliArgs {
    /// Flags override whatever the environment configured.
    fn overlay(&self, settings: SeederSettings) -> SeederSettings {
        SeederSettings {
            dry_run: self.dry_run || settings.dry_run,
            plan: self.plan.clone().or(settings.plan),
            registry_path: self.registry_path.clone().or(settings.registry_path),
            seed: self.seed.or(settings.seed),
            client_count: self.client_count.or(settings.client_count),
            supplier_count: self.supplier_count.or(settings.supplier_count),
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    run(CliArgs::parse())
}

fn run(args: CliArgs) -> Result<()> {
    let seeder_settings = SeederSettings::load_from_iter([OsString::from(PROGRAM)])
        .map_err(|error| eyre!("failed to load seeder settings: {error}"))?;
    let settings = args.overlay(seeder_settings);
    let plan = settings
        .resolve_plan()
        .with_context(|| "failed to resolve dataset plan")?;

    let outcome = if settings.dry_run {
        SeedOutcome::preview(&plan)
            .with_context(|| format!("generating with seed {} failed", plan.seed()))?
    } else {
        let warehouse_settings = WarehouseSettings::load_from_iter([OsString::from(PROGRAM)])
            .map_err(|error| eyre!("failed to load warehouse settings: {error}"))?;
        let connector = warehouse_settings
            .connector(args.database_url)
            .with_context(|| "invalid warehouse configuration")?;
        WarehouseSeeder::new(Arc::new(connector))
            .seed_plan(&plan)
            .with_context(|| format!("seeding with seed {} failed", plan.seed()))?
    };

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "{}seed={} clients={} products={} transactions={} suppliers={}",
        if settings.dry_run { "dry-run " } else { "" },
        plan.seed(),
        outcome.client_ids.len(),
        outcome.product_ids.len(),
        outcome.transactions.len(),
        outcome.supplier_ids.len()
    )?;
    Ok(())
}
