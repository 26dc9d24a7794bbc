//! Warehouse seeding and KPI dashboard library.
//!
//! The crate is laid out in hexagonal style:
//!
//! - [`domain`] holds the entities, the KPI catalogue, the seeding and
//!   dashboard services, and the ports they depend on.
//! - [`outbound`] holds the `PostgreSQL` adapter implementing those ports.
//! - [`render`] turns a dashboard report into console text or JSON.
//! - [`settings`] loads configuration for the two binaries.

pub mod domain;
pub mod outbound;
pub mod render;
pub mod settings;
pub mod telemetry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
