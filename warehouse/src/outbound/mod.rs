//! Outbound adapters implementing the domain ports.
//!
//! - **persistence**: `PostgreSQL` warehouse sessions over the blocking
//!   `postgres` client.
//!
//! Adapters translate between domain types and SQL. They contain no
//! business logic.

pub mod persistence;
