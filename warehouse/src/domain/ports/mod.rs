//! Domain ports: the session traits services depend on.
//!
//! A [`WarehouseConnector`] opens one scoped session per command. The
//! session implements [`KpiReader`] for the dashboard and [`SeedWriter`] for
//! the seeder, and releases its connection when dropped.

mod macros;

mod kpi_reader;
mod seed_writer;
mod warehouse_connector;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use kpi_reader::MockKpiReader;
pub use kpi_reader::{KpiQueryError, KpiReader};
#[cfg(test)]
pub use seed_writer::MockSeedWriter;
pub use seed_writer::{SeedWriteError, SeedWriter};
pub use warehouse_connector::{WarehouseConnectionError, WarehouseConnector};
