//! Port for opening scoped warehouse sessions.

use super::define_port_error;
use super::{KpiReader, SeedWriter};

define_port_error! {
    /// Errors raised while opening a session.
    pub enum WarehouseConnectionError {
        /// The warehouse could not be reached or refused the login.
        Connection {
            /// Driver error text.
            message: String,
        } => "warehouse connection failed: {message}",
        /// The session was opened but its setup statement failed.
        Setup {
            /// Driver error text.
            message: String,
        } => "warehouse session setup failed: {message}",
    }
}

/// Opens sessions against the warehouse.
///
/// Each command opens exactly one session and uses it serially. Dropping the
/// session closes the connection, so it is released once on every exit path.
pub trait WarehouseConnector: Send + Sync {
    /// Session type handed to the services.
    type Session: KpiReader + SeedWriter;

    /// Open a new session.
    ///
    /// # Errors
    ///
    /// Returns [`WarehouseConnectionError`] when the connection or its setup
    /// fails.
    fn connect(&self) -> Result<Self::Session, WarehouseConnectionError>;
}
