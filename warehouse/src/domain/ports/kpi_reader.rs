//! Port for the read-only KPI queries issued by the dashboard.

use crate::domain::kpi::{ClientRevenue, KpiValue, ProductTransactionCount, ScalarQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised while running KPI queries.
    pub enum KpiQueryError {
        /// The session lost its connection.
        Connection {
            /// Driver error text.
            message: String,
        } => "kpi query connection failed: {message}",
        /// The query itself failed.
        Query {
            /// Driver error text.
            message: String,
        } => "kpi query failed: {message}",
        /// The query succeeded but its result could not be decoded.
        Decode {
            /// Result column that failed to decode.
            column: String,
            /// Decoder error text.
            message: String,
        } => "kpi query returned an undecodable `{column}`: {message}",
    }
}

/// Read access to the warehouse aggregates.
///
/// Every method issues exactly one statement on the session's connection.
#[cfg_attr(test, mockall::automock)]
pub trait KpiReader {
    /// Run one scalar KPI query.
    ///
    /// Row counts return [`KpiValue::Count`]; revenue returns
    /// [`KpiValue::Amount`], zero when no transactions join.
    fn scalar(&mut self, query: ScalarQuery) -> Result<KpiValue, KpiQueryError>;

    /// Transaction count grouped by product name, largest first and ties by
    /// name ascending.
    fn transactions_per_product(&mut self) -> Result<Vec<ProductTransactionCount>, KpiQueryError>;

    /// Revenue grouped by client name, largest first and ties by name
    /// ascending.
    fn revenue_per_client(&mut self) -> Result<Vec<ClientRevenue>, KpiQueryError>;
}
