//! KPI dashboard service.
//!
//! A report is one scalar KPI followed by the two fixed breakdowns. All three
//! queries run on one session; the first failure aborts the report.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::kpi::{ClientRevenue, Kpi, KpiValue, ProductTransactionCount, ValueShape};
use super::ports::{KpiQueryError, KpiReader, WarehouseConnectionError, WarehouseConnector};

/// The scalar half of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiMetric {
    /// Selected KPI, serialized as its label.
    pub kpi: Kpi,
    /// Computed value.
    pub value: KpiValue,
}

/// Everything the dashboard displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// The selected KPI and its value.
    pub metric: KpiMetric,
    /// Transactions grouped by product name.
    pub transactions_per_product: Vec<ProductTransactionCount>,
    /// Revenue grouped by client name.
    pub revenue_per_client: Vec<ClientRevenue>,
}

/// Errors raised while building a report.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// No session could be opened.
    #[error(transparent)]
    Connection(#[from] WarehouseConnectionError),
    /// A query failed.
    #[error(transparent)]
    Query(#[from] KpiQueryError),
    /// The reader answered a scalar query with the wrong shape.
    #[error("{kpi} expected a {expected:?} result but the reader returned {actual:?}")]
    ShapeMismatch {
        /// KPI being computed.
        kpi: Kpi,
        /// Shape fixed by the catalogue.
        expected: ValueShape,
        /// Shape actually returned.
        actual: ValueShape,
    },
}

/// Builds dashboard reports from warehouse sessions.
pub struct KpiDashboard<C> {
    connector: Arc<C>,
}

impl<C> KpiDashboard<C>
where
    C: WarehouseConnector,
{
    /// Create a dashboard over the given connector.
    pub const fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    /// Open a session, build the report for `kpi`, and release the session.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] when the session cannot be opened or any
    /// of the three queries fails.
    pub fn report(&self, kpi: Kpi) -> Result<DashboardReport, DashboardError> {
        let mut session = self.connector.connect()?;
        debug!(kpi = %kpi, "dashboard session opened");
        build_report(&mut session, kpi)
    }
}

/// Run the scalar query for `kpi`, then both breakdowns, on one reader.
///
/// # Errors
///
/// Returns [`DashboardError::Query`] on the first failing query and
/// [`DashboardError::ShapeMismatch`] if the scalar has the wrong shape.
pub fn build_report<R>(reader: &mut R, kpi: Kpi) -> Result<DashboardReport, DashboardError>
where
    R: KpiReader + ?Sized,
{
    let definition = kpi.definition();
    let value = reader.scalar(definition.query)?;
    let expected = definition.query.shape();
    if value.shape() != expected {
        return Err(DashboardError::ShapeMismatch {
            kpi,
            expected,
            actual: value.shape(),
        });
    }
    info!(kpi = %kpi, value = %value, "kpi computed");

    let transactions_per_product = reader.transactions_per_product()?;
    let revenue_per_client = reader.revenue_per_client()?;
    debug!(
        products = transactions_per_product.len(),
        clients = revenue_per_client.len(),
        "breakdowns computed"
    );

    Ok(DashboardReport {
        metric: KpiMetric { kpi, value },
        transactions_per_product,
        revenue_per_client,
    })
}
