//! Test utilities for the warehouse crate.
//!
//! [`InMemoryWarehouse`] is a connector whose sessions store rows in shared
//! memory and answer KPI queries with the same join, grouping and ordering
//! rules as the SQL statements. It can refuse connections, fail chosen row
//! inserts or queries, and counts opened and closed sessions.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::ports::{
    KpiQueryError, KpiReader, SeedWriteError, SeedWriter, WarehouseConnectionError,
    WarehouseConnector,
};
use crate::domain::{
    Client, ClientRevenue, Entity, KpiValue, Product, ProductTransactionCount, ScalarQuery,
    Supplier, Transaction,
};

/// Read queries a session can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Any scalar KPI query.
    Scalar,
    /// The transactions-per-product breakdown.
    TransactionsPerProduct,
    /// The revenue-per-client breakdown.
    RevenuePerClient,
}

/// Everything the in-memory warehouse has recorded.
#[derive(Debug, Clone, Default)]
pub struct WarehouseState {
    /// Stored clients in insertion order.
    pub clients: Vec<Client>,
    /// Stored products in insertion order.
    pub products: Vec<Product>,
    /// Stored suppliers in insertion order.
    pub suppliers: Vec<Supplier>,
    /// Stored transactions in insertion order.
    pub transactions: Vec<Transaction>,
    /// Entity of every insert attempt, in call order.
    pub insert_attempts: Vec<Entity>,
    /// Every read query issued, in call order.
    pub queries: Vec<QueryKind>,
    /// Every scalar query issued, in call order.
    pub scalar_queries: Vec<ScalarQuery>,
    /// Sessions opened so far.
    pub sessions_opened: usize,
    /// Sessions dropped so far.
    pub sessions_closed: usize,
    failing_rows: HashSet<Uuid>,
    failing_queries: HashSet<QueryKind>,
    refuse_connections: bool,
}

/// Shared-memory warehouse connector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWarehouse {
    state: Arc<Mutex<WarehouseState>>,
}

impl InMemoryWarehouse {
    /// Create an empty warehouse.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the insert of the row with `id` fail.
    pub fn fail_insert_of(&self, id: Uuid) {
        self.lock().failing_rows.insert(id);
    }

    /// Make every `kind` query fail.
    pub fn fail_query(&self, kind: QueryKind) {
        self.lock().failing_queries.insert(kind);
    }

    /// Make every `connect` call fail.
    pub fn refuse_connections(&self) {
        self.lock().refuse_connections = true;
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> WarehouseState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, WarehouseState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WarehouseConnector for InMemoryWarehouse {
    type Session = InMemorySession;

    fn connect(&self) -> Result<InMemorySession, WarehouseConnectionError> {
        let mut state = self.lock();
        if state.refuse_connections {
            return Err(WarehouseConnectionError::connection(
                "connection refused by in-memory warehouse",
            ));
        }
        state.sessions_opened += 1;
        Ok(InMemorySession {
            state: Arc::clone(&self.state),
        })
    }
}

/// One session on an [`InMemoryWarehouse`]. Dropping it counts as a close.
#[derive(Debug)]
pub struct InMemorySession {
    state: Arc<Mutex<WarehouseState>>,
}

impl InMemorySession {
    fn lock(&self) -> MutexGuard<'_, WarehouseState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert<T>(
        &self,
        entity: Entity,
        id: Uuid,
        row: &T,
        store: impl FnOnce(&mut WarehouseState) -> &mut Vec<T>,
    ) -> Result<(), SeedWriteError>
    where
        T: Clone,
    {
        let mut state = self.lock();
        state.insert_attempts.push(entity);
        if state.failing_rows.contains(&id) {
            return Err(SeedWriteError::query(
                entity.as_str(),
                format!("simulated failure for row {id}"),
            ));
        }
        store(&mut *state).push(row.clone());
        Ok(())
    }

    fn record_query(&self, kind: QueryKind) -> Result<MutexGuard<'_, WarehouseState>, KpiQueryError> {
        let mut state = self.lock();
        state.queries.push(kind);
        if state.failing_queries.contains(&kind) {
            return Err(KpiQueryError::query(format!("simulated {kind:?} failure")));
        }
        Ok(state)
    }
}

impl Drop for InMemorySession {
    fn drop(&mut self) {
        self.lock().sessions_closed += 1;
    }
}

/// Transactions joined to their product and client, as `(client, product, amount)`.
fn joined_rows(state: &WarehouseState) -> impl Iterator<Item = (&Client, &Product, i64)> {
    state.transactions.iter().filter_map(|transaction| {
        let product = state
            .products
            .iter()
            .find(|product| product.id == transaction.product_id)?;
        let client = state
            .clients
            .iter()
            .find(|client| client.id == transaction.client_id)?;
        Some((client, product, transaction.amount))
    })
}

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

impl KpiReader for InMemorySession {
    fn scalar(&mut self, query: ScalarQuery) -> Result<KpiValue, KpiQueryError> {
        let mut state = self.record_query(QueryKind::Scalar)?;
        state.scalar_queries.push(query);
        let value = match query {
            ScalarQuery::RowCount(Entity::Client) => KpiValue::Count(count(state.clients.len())),
            ScalarQuery::RowCount(Entity::Product) => KpiValue::Count(count(state.products.len())),
            ScalarQuery::RowCount(Entity::Supplier) => {
                KpiValue::Count(count(state.suppliers.len()))
            }
            ScalarQuery::RowCount(Entity::Transaction) => {
                KpiValue::Count(count(state.transactions.len()))
            }
            ScalarQuery::Revenue => KpiValue::Amount(
                joined_rows(&state)
                    .map(|(_, product, amount)| Decimal::from(amount) * product.price)
                    .sum(),
            ),
        };
        Ok(value)
    }

    fn transactions_per_product(&mut self) -> Result<Vec<ProductTransactionCount>, KpiQueryError> {
        let state = self.record_query(QueryKind::TransactionsPerProduct)?;
        let mut grouped: BTreeMap<&str, i64> = BTreeMap::new();
        for transaction in &state.transactions {
            if let Some(product) = state
                .products
                .iter()
                .find(|product| product.id == transaction.product_id)
            {
                *grouped.entry(product.name.as_str()).or_default() += 1;
            }
        }
        let mut rows: Vec<ProductTransactionCount> = grouped
            .into_iter()
            .map(|(name, transaction_count)| ProductTransactionCount {
                product_name: name.to_owned(),
                transaction_count,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.transaction_count
                .cmp(&a.transaction_count)
                .then_with(|| a.product_name.cmp(&b.product_name))
        });
        Ok(rows)
    }

    fn revenue_per_client(&mut self) -> Result<Vec<ClientRevenue>, KpiQueryError> {
        let state = self.record_query(QueryKind::RevenuePerClient)?;
        let mut grouped: BTreeMap<&str, Decimal> = BTreeMap::new();
        for (client, product, amount) in joined_rows(&state) {
            *grouped.entry(client.name.as_str()).or_default() += Decimal::from(amount) * product.price;
        }
        let mut rows: Vec<ClientRevenue> = grouped
            .into_iter()
            .map(|(name, total_revenue)| ClientRevenue {
                client_name: name.to_owned(),
                total_revenue,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.total_revenue
                .cmp(&a.total_revenue)
                .then_with(|| a.client_name.cmp(&b.client_name))
        });
        Ok(rows)
    }
}

impl SeedWriter for InMemorySession {
    fn insert_client(&mut self, client: &Client) -> Result<(), SeedWriteError> {
        self.insert(Entity::Client, *client.id.as_uuid(), client, |state| &mut state.clients)
    }

    fn insert_product(&mut self, product: &Product) -> Result<(), SeedWriteError> {
        self.insert(Entity::Product, *product.id.as_uuid(), product, |state| {
            &mut state.products
        })
    }

    fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), SeedWriteError> {
        self.insert(
            Entity::Transaction,
            *transaction.id.as_uuid(),
            transaction,
            |state| &mut state.transactions,
        )
    }

    fn insert_supplier(&mut self, supplier: &Supplier) -> Result<(), SeedWriteError> {
        self.insert(Entity::Supplier, *supplier.id.as_uuid(), supplier, |state| {
            &mut state.suppliers
        })
    }
}
