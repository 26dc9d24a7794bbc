//! Port for inserting seed rows one statement at a time.

use crate::domain::entities::{Client, Product, Supplier, Transaction};

use super::define_port_error;

define_port_error! {
    /// Errors raised by a single row insert.
    pub enum SeedWriteError {
        /// The session lost its connection.
        Connection {
            /// Qualified table name.
            table: String,
            /// Driver error text.
            message: String,
        } => "insert into {table} failed to reach the warehouse: {message}",
        /// The statement was rejected, e.g. by a constraint.
        Query {
            /// Qualified table name.
            table: String,
            /// Driver error text.
            message: String,
        } => "insert into {table} failed: {message}",
    }
}

/// Row-at-a-time writes for the seeder.
///
/// Each call is independent and autocommitted; a failed insert leaves the
/// session usable for the next one.
#[cfg_attr(test, mockall::automock)]
pub trait SeedWriter {
    /// Insert one client row.
    fn insert_client(&mut self, client: &Client) -> Result<(), SeedWriteError>;

    /// Insert one product row.
    fn insert_product(&mut self, product: &Product) -> Result<(), SeedWriteError>;

    /// Insert one transaction row.
    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), SeedWriteError>;

    /// Insert one supplier row.
    fn insert_supplier(&mut self, supplier: &Supplier) -> Result<(), SeedWriteError>;
}
