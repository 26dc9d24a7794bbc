//! Warehouse entities and their identifiers.
//!
//! Each entity is a flat record stored in its own table. Rows are created
//! once by the seeder and never updated; the dashboard only reads them.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use synthetic_data::{ClientRecord, ProductRecord, SupplierRecord, TransactionRecord};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Borrow the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

entity_id! {
    /// Stable client identifier.
    ClientId
}

entity_id! {
    /// Stable product identifier.
    ProductId
}

entity_id! {
    /// Stable supplier identifier.
    SupplierId
}

entity_id! {
    /// Stable transaction identifier.
    TransactionId
}

/// The four warehouse entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Entity {
    /// Purchasing party.
    Client,
    /// Item sold to a client.
    Product,
    /// Vendor; not referenced by any other entity.
    Supplier,
    /// One purchase of one product by one client.
    Transaction,
}

impl Entity {
    /// Every entity in seeding order.
    pub const ALL: [Self; 4] = [
        Self::Client,
        Self::Transaction,
        Self::Product,
        Self::Supplier,
    ];

    /// Lower-case plural name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "clients",
            Self::Product => "products",
            Self::Supplier => "suppliers",
            Self::Transaction => "transactions",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchasing client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Primary key.
    pub id: ClientId,
    /// Person name.
    pub name: String,
    /// Single-line postal address.
    pub address: String,
}

/// A product with a unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Primary key.
    pub id: ProductId,
    /// Display name; breakdowns group by it.
    pub name: String,
    /// Single-line description.
    pub description: String,
    /// Unit price, two fractional digits.
    pub price: Decimal,
}

/// A supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Primary key.
    pub id: SupplierId,
    /// Company name.
    pub name: String,
    /// Single-line postal address.
    pub address: String,
}

/// One purchase. Revenue is `amount * product.price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Primary key.
    pub id: TransactionId,
    /// Purchasing client.
    pub client_id: ClientId,
    /// Purchased product.
    pub product_id: ProductId,
    /// Calendar date of the purchase.
    pub date: NaiveDate,
    /// Units purchased.
    pub amount: i64,
}

impl From<ClientRecord> for Client {
    fn from(record: ClientRecord) -> Self {
        Self {
            id: ClientId::from_uuid(record.id),
            name: record.name,
            address: record.address,
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: ProductId::from_uuid(record.id),
            name: record.name,
            description: record.description,
            price: record.price,
        }
    }
}

impl From<SupplierRecord> for Supplier {
    fn from(record: SupplierRecord) -> Self {
        Self {
            id: SupplierId::from_uuid(record.id),
            name: record.name,
            address: record.address,
        }
    }
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: TransactionId::from_uuid(record.id),
            client_id: ClientId::from_uuid(record.client_id),
            product_id: ProductId::from_uuid(record.product_id),
            date: record.date,
            amount: record.amount,
        }
    }
}
