//! Generated record types.
//!
//! These are plain data carriers, independent of any persistence layer. The
//! warehouse crate maps them into its own domain entities.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Person name.
    pub name: String,
    /// Single-line postal address.
    pub address: String,
}

/// A generated product, paired one-to-one with a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Product name.
    pub name: String,
    /// Single-line description.
    pub description: String,
    /// Unit price with two fractional digits.
    pub price: Decimal,
}

/// A generated supplier. Suppliers are not referenced by any other record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Company name.
    pub name: String,
    /// Single-line postal address.
    pub address: String,
}

/// A generated transaction linking one client to one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Client that made the purchase.
    pub client_id: Uuid,
    /// Product that was purchased.
    pub product_id: Uuid,
    /// Calendar date of the transaction.
    pub date: NaiveDate,
    /// Unit count purchased.
    pub amount: i64,
}

/// The full output of one generation run.
///
/// `clients`, `products`, and `transactions` have equal length; the
/// transaction at index `i` references the client and product at index `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticDataset {
    /// Generated clients, in generation order.
    pub clients: Vec<ClientRecord>,
    /// Generated products, one per client.
    pub products: Vec<ProductRecord>,
    /// Generated transactions, one per client.
    pub transactions: Vec<TransactionRecord>,
    /// Generated suppliers.
    pub suppliers: Vec<SupplierRecord>,
}

impl SyntheticDataset {
    /// Returns the client identifiers in generation order.
    #[must_use]
    pub fn client_ids(&self) -> Vec<Uuid> {
        self.clients.iter().map(|client| client.id).collect()
    }

    /// Returns the product identifiers in generation order.
    #[must_use]
    pub fn product_ids(&self) -> Vec<Uuid> {
        self.products.iter().map(|product| product.id).collect()
    }

    /// Returns `true` when every transaction references a client and a
    /// product generated in this dataset.
    #[must_use]
    pub fn references_are_consistent(&self) -> bool {
        let clients: HashSet<Uuid> = self.clients.iter().map(|client| client.id).collect();
        let products: HashSet<Uuid> = self.products.iter().map(|product| product.id).collect();

        self.transactions.iter().all(|transaction| {
            clients.contains(&transaction.client_id) && products.contains(&transaction.product_id)
        })
    }
}
