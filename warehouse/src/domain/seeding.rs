//! Seeding service: inserts a generated dataset into the warehouse.
//!
//! Rows are inserted one statement at a time in a fixed order: every client,
//! then every transaction, then every product, then every supplier. A failed
//! insert is logged with its table and error and the loop moves on; there is
//! no retry and no rollback, and re-running the seeder adds more rows.

use std::sync::Arc;

use serde::Serialize;
use synthetic_data::{DatasetPlan, GenerationError, SyntheticDataset, generate_dataset};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::entities::{
    Client, ClientId, Entity, Product, ProductId, Supplier, SupplierId, Transaction, TransactionId,
};
use super::ports::{SeedWriteError, SeedWriter, WarehouseConnectionError, WarehouseConnector};

/// Domain rows ready for insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedBatch {
    /// Clients in generation order.
    pub clients: Vec<Client>,
    /// Products, one per client.
    pub products: Vec<Product>,
    /// Transactions, one per client.
    pub transactions: Vec<Transaction>,
    /// Suppliers.
    pub suppliers: Vec<Supplier>,
}

impl From<SyntheticDataset> for SeedBatch {
    fn from(dataset: SyntheticDataset) -> Self {
        Self {
            clients: dataset.clients.into_iter().map(Client::from).collect(),
            products: dataset.products.into_iter().map(Product::from).collect(),
            transactions: dataset
                .transactions
                .into_iter()
                .map(Transaction::from)
                .collect(),
            suppliers: dataset.suppliers.into_iter().map(Supplier::from).collect(),
        }
    }
}

/// The references carried by one seeded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRef {
    /// Transaction id.
    pub id: TransactionId,
    /// Referenced client.
    pub client_id: ClientId,
    /// Referenced product.
    pub product_id: ProductId,
}

/// Identifiers generated by one seeding run.
///
/// The ids are reported whether or not their row was accepted; failed rows
/// appear only in the logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedOutcome {
    /// Client ids in insertion order.
    pub client_ids: Vec<ClientId>,
    /// Product ids in insertion order.
    pub product_ids: Vec<ProductId>,
    /// Transaction ids and their references in insertion order.
    pub transactions: Vec<TransactionRef>,
    /// Supplier ids in insertion order.
    pub supplier_ids: Vec<SupplierId>,
}

impl SeedOutcome {
    fn from_batch(batch: &SeedBatch) -> Self {
        Self {
            client_ids: batch.clients.iter().map(|client| client.id).collect(),
            product_ids: batch.products.iter().map(|product| product.id).collect(),
            transactions: batch
                .transactions
                .iter()
                .map(|transaction| TransactionRef {
                    id: transaction.id,
                    client_id: transaction.client_id,
                    product_id: transaction.product_id,
                })
                .collect(),
            supplier_ids: batch.suppliers.iter().map(|supplier| supplier.id).collect(),
        }
    }

    /// Ids a run of `plan` would insert, without opening a session.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError::Generation`] if the dataset cannot be
    /// generated.
    pub fn preview(plan: &DatasetPlan) -> Result<Self, SeedingError> {
        let batch = SeedBatch::from(generate_dataset(plan)?);
        Ok(Self::from_batch(&batch))
    }

    /// Returns `true` when every transaction references a client and a
    /// product seeded in this run.
    #[must_use]
    pub fn references_are_consistent(&self) -> bool {
        self.transactions.iter().all(|transaction| {
            self.client_ids.contains(&transaction.client_id)
                && self.product_ids.contains(&transaction.product_id)
        })
    }
}

/// Errors that stop a seeding run before any row is written.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// The dataset could not be generated.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The warehouse session could not be opened.
    #[error(transparent)]
    Connection(#[from] WarehouseConnectionError),
}

/// Per-entity insert counts, logged once the run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InsertTally {
    entity: Entity,
    inserted: usize,
    failed: usize,
}

/// Seeds the warehouse through a connector.
pub struct WarehouseSeeder<C> {
    connector: Arc<C>,
}

impl<C> WarehouseSeeder<C>
where
    C: WarehouseConnector,
{
    /// Create a seeder over the given connector.
    pub const fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    /// Generate a dataset from `plan` and seed it.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError`] if generation fails or the session cannot be
    /// opened. Individual row failures are logged, not returned.
    pub fn seed_plan(&self, plan: &DatasetPlan) -> Result<SeedOutcome, SeedingError> {
        let dataset = generate_dataset(plan)?;
        info!(
            seed = plan.seed(),
            clients = plan.client_count(),
            suppliers = plan.supplier_count(),
            "generated synthetic dataset"
        );
        self.seed(&SeedBatch::from(dataset))
    }

    /// Open one session and insert every row of `batch`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError::Connection`] if the session cannot be opened.
    pub fn seed(&self, batch: &SeedBatch) -> Result<SeedOutcome, SeedingError> {
        let mut session = self.connector.connect()?;
        Ok(insert_batch(&mut session, batch))
    }
}

/// Insert every row of `batch` through `writer`, continuing past failures.
pub fn insert_batch<W>(writer: &mut W, batch: &SeedBatch) -> SeedOutcome
where
    W: SeedWriter + ?Sized,
{
    let tallies = [
        insert_rows(Entity::Client, &batch.clients, |client| *client.id.as_uuid(), |client| {
            writer.insert_client(client)
        }),
        insert_rows(
            Entity::Transaction,
            &batch.transactions,
            |transaction| *transaction.id.as_uuid(),
            |transaction| writer.insert_transaction(transaction),
        ),
        insert_rows(Entity::Product, &batch.products, |product| *product.id.as_uuid(), |product| {
            writer.insert_product(product)
        }),
        insert_rows(
            Entity::Supplier,
            &batch.suppliers,
            |supplier| *supplier.id.as_uuid(),
            |supplier| writer.insert_supplier(supplier),
        ),
    ];

    for tally in tallies {
        info!(
            entity = %tally.entity,
            inserted = tally.inserted,
            failed = tally.failed,
            "seeding finished for entity"
        );
    }

    SeedOutcome::from_batch(batch)
}

fn insert_rows<T>(
    entity: Entity,
    rows: &[T],
    row_id: impl Fn(&T) -> Uuid,
    mut insert: impl FnMut(&T) -> Result<(), SeedWriteError>,
) -> InsertTally {
    let mut tally = InsertTally {
        entity,
        inserted: 0,
        failed: 0,
    };
    for row in rows {
        match insert(row) {
            Ok(()) => tally.inserted += 1,
            Err(error) => {
                tally.failed += 1;
                warn!(entity = %entity, row_id = %row_id(row), error = %error, "row insert failed");
            }
        }
    }
    tally
}
