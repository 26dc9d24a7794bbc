//! Domain primitives, services and ports.
//!
//! Purpose: define the warehouse entities, the fixed KPI catalogue and the
//! two use cases (seeding and dashboard reporting). Services depend only on
//! the traits in [`ports`]; adapters live under `crate::outbound`.
//!
//! Public surface:
//! - [`Client`], [`Product`], [`Supplier`], [`Transaction`] and their ids.
//! - [`Kpi`] and [`KpiDefinition`]: the KPI enumeration and its catalogue.
//! - [`KpiDashboard`]: runs one scalar KPI and both breakdowns.
//! - [`WarehouseSeeder`]: inserts a generated dataset row by row.

pub mod dashboard;
pub mod entities;
pub mod kpi;
pub mod ports;
pub mod seeding;

pub use self::dashboard::{DashboardError, DashboardReport, KpiDashboard, KpiMetric, build_report};
pub use self::entities::{
    Client, ClientId, Entity, Product, ProductId, Supplier, SupplierId, Transaction, TransactionId,
};
pub use self::kpi::{
    ClientRevenue, KPI_CATALOGUE, Kpi, KpiDefinition, KpiParseError, KpiValue,
    ProductTransactionCount, ScalarQuery, ValueShape,
};
pub use self::seeding::{SeedBatch, SeedOutcome, SeedingError, TransactionRef, WarehouseSeeder};
