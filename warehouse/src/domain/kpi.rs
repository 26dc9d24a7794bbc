//! The fixed KPI catalogue and the values it produces.
//!
//! Each [`Kpi`] maps to a static [`KpiDefinition`] naming its display label
//! and the single scalar query that computes it. The query also fixes the
//! result shape: row counts are integers, revenue is an exact decimal.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::entities::Entity;

/// One of the five predefined business metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kpi {
    /// Row count of the transactions table.
    TotalTransactions,
    /// Row count of the clients table.
    TotalClients,
    /// Row count of the products table.
    TotalProducts,
    /// Row count of the suppliers table.
    TotalSuppliers,
    /// Sum of `amount * price` over joined transactions.
    TotalRevenue,
}

/// Scalar query backing a KPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarQuery {
    /// `COUNT(*)` over one entity table.
    RowCount(Entity),
    /// `SUM(amount * price)` over transactions joined to products and
    /// clients; zero when nothing joins.
    Revenue,
}

/// Shape of a scalar result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueShape {
    /// Integer count.
    Count,
    /// Exact decimal amount.
    Amount,
}

impl ScalarQuery {
    /// Shape of the value this query returns.
    #[must_use]
    pub const fn shape(self) -> ValueShape {
        match self {
            Self::RowCount(_) => ValueShape::Count,
            Self::Revenue => ValueShape::Amount,
        }
    }
}

/// Static description of a KPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiDefinition {
    /// The KPI this entry describes.
    pub kpi: Kpi,
    /// Display label, e.g. `Total Revenue`.
    pub label: &'static str,
    /// Kebab-case name accepted on the command line.
    pub slug: &'static str,
    /// Query computing the KPI.
    pub query: ScalarQuery,
}

const TOTAL_TRANSACTIONS: KpiDefinition = KpiDefinition {
    kpi: Kpi::TotalTransactions,
    label: "Total Transactions",
    slug: "total-transactions",
    query: ScalarQuery::RowCount(Entity::Transaction),
};

const TOTAL_CLIENTS: KpiDefinition = KpiDefinition {
    kpi: Kpi::TotalClients,
    label: "Total Clients",
    slug: "total-clients",
    query: ScalarQuery::RowCount(Entity::Client),
};

const TOTAL_PRODUCTS: KpiDefinition = KpiDefinition {
    kpi: Kpi::TotalProducts,
    label: "Total Products",
    slug: "total-products",
    query: ScalarQuery::RowCount(Entity::Product),
};

const TOTAL_SUPPLIERS: KpiDefinition = KpiDefinition {
    kpi: Kpi::TotalSuppliers,
    label: "Total Suppliers",
    slug: "total-suppliers",
    query: ScalarQuery::RowCount(Entity::Supplier),
};

const TOTAL_REVENUE: KpiDefinition = KpiDefinition {
    kpi: Kpi::TotalRevenue,
    label: "Total Revenue",
    slug: "total-revenue",
    query: ScalarQuery::Revenue,
};

/// Every KPI definition in menu order.
pub const KPI_CATALOGUE: [KpiDefinition; 5] = [
    TOTAL_TRANSACTIONS,
    TOTAL_CLIENTS,
    TOTAL_PRODUCTS,
    TOTAL_SUPPLIERS,
    TOTAL_REVENUE,
];

impl Kpi {
    /// Catalogue entry for this KPI.
    #[must_use]
    pub const fn definition(self) -> KpiDefinition {
        match self {
            Self::TotalTransactions => TOTAL_TRANSACTIONS,
            Self::TotalClients => TOTAL_CLIENTS,
            Self::TotalProducts => TOTAL_PRODUCTS,
            Self::TotalSuppliers => TOTAL_SUPPLIERS,
            Self::TotalRevenue => TOTAL_REVENUE,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.definition().label
    }

    /// Scalar query computing this KPI.
    #[must_use]
    pub const fn query(self) -> ScalarQuery {
        self.definition().query
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Kpi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Error returned when a KPI name is not in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown KPI `{value}`; expected one of: {expected}")]
pub struct KpiParseError {
    value: String,
    expected: String,
}

impl KpiParseError {
    fn unknown(value: &str) -> Self {
        let expected = KPI_CATALOGUE
            .iter()
            .map(|definition| definition.label)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            value: value.to_owned(),
            expected,
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for Kpi {
    type Err = KpiParseError;

    /// Accepts the display label or the kebab-case slug, ignoring ASCII case
    /// and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        KPI_CATALOGUE
            .iter()
            .find(|definition| {
                definition.label.eq_ignore_ascii_case(needle)
                    || definition.slug.eq_ignore_ascii_case(needle)
            })
            .map(|definition| definition.kpi)
            .ok_or_else(|| KpiParseError::unknown(s))
    }
}

/// A scalar KPI result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum KpiValue {
    /// Integer count.
    Count(i64),
    /// Exact decimal amount.
    Amount(Decimal),
}

impl KpiValue {
    /// Shape of this value.
    #[must_use]
    pub const fn shape(&self) -> ValueShape {
        match self {
            Self::Count(_) => ValueShape::Count,
            Self::Amount(_) => ValueShape::Amount,
        }
    }
}

impl fmt::Display for KpiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Amount(amount) => write!(f, "{amount}"),
        }
    }
}

/// One bar of the transactions-per-product chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTransactionCount {
    /// Product name the transactions are grouped by.
    pub product_name: String,
    /// Number of transactions for that name.
    pub transaction_count: i64,
}

/// One bar of the revenue-per-client chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRevenue {
    /// Client name the revenue is grouped by.
    pub client_name: String,
    /// Sum of `amount * price` for that name.
    pub total_revenue: Decimal,
}
