//! Configuration for the warehouse binaries, loaded via `OrthoConfig`.
//!
//! Values come from the environment (and optional config files) and are then
//! overridden by command-line flags in each binary.

mod seeder;
mod warehouse;

use std::path::PathBuf;

use synthetic_data::RegistryError;
use thiserror::Error;

use crate::outbound::persistence::IdentifierError;

pub use seeder::SeederSettings;
pub use warehouse::{DEFAULT_CONNECT_TIMEOUT_SECS, WarehouseSettings};

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No connection URL was configured anywhere.
    #[error("database URL missing: set --database-url, WAREHOUSE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    /// A connection URL was configured but blank.
    #[error("{origin} must not be empty when provided")]
    EmptyDatabaseUrl {
        /// Where the blank value came from.
        origin: &'static str,
    },
    /// A table qualifier or role is not a plain identifier.
    #[error("invalid {setting}: {source}")]
    InvalidIdentifier {
        /// Setting being validated.
        setting: &'static str,
        /// Validation failure.
        #[source]
        source: IdentifierError,
    },
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing or lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Plan name must not be blank.
    #[error("plan name must not be empty")]
    EmptyPlanName,
}
