//! `PostgreSQL` persistence adapter for the warehouse.
//!
//! One [`PostgresWarehouse`] connector opens one blocking connection per
//! command. Statements are rendered once from a validated [`TableLayout`]:
//! table names are interpolated only after identifier validation, and every
//! value travels as a bound `$n` parameter.
//!
//! # Example
//!
//! ```no_run
//! use warehouse::domain::{Kpi, KpiDashboard};
//! use warehouse::outbound::persistence::{PostgresWarehouse, TableLayout};
//! use std::sync::Arc;
//!
//! let connector = PostgresWarehouse::new("postgres://localhost/warehouse", TableLayout::default());
//! let dashboard = KpiDashboard::new(Arc::new(connector));
//! let report = dashboard.report(Kpi::TotalRevenue)?;
//! # Ok::<(), warehouse::domain::DashboardError>(())
//! ```

mod postgres_warehouse;
mod statements;
mod table_layout;

pub use postgres_warehouse::{PostgresSession, PostgresWarehouse};
pub use table_layout::{
    IDENTIFIER_MAX_LEN, Identifier, IdentifierError, QualifiedTable, TableLayout,
};
