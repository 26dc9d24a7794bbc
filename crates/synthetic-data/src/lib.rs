//! Deterministic synthetic business data for seeding a KPI warehouse.
//!
//! This crate generates believable, reproducible clients, products,
//! suppliers, and transactions from a dataset plan. It knows nothing about
//! databases; the warehouse crate converts the generated records into rows.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading named dataset plans from a JSON registry
//! - Deterministic dataset generation from an RNG seed
//! - One paired product and transaction per generated client
//! - Single-line text normalisation for free-text fields
//!
//! # Example
//!
//! ```
//! use synthetic_data::{DatasetPlan, generate_dataset};
//!
//! let plan = DatasetPlan::new(42, 3, 2);
//! let dataset = generate_dataset(&plan).expect("generation succeeds");
//!
//! assert_eq!(dataset.clients.len(), 3);
//! assert_eq!(dataset.products.len(), 3);
//! assert_eq!(dataset.transactions.len(), 3);
//! assert_eq!(dataset.suppliers.len(), 2);
//! assert!(dataset.references_are_consistent());
//! ```

mod error;
mod generator;
mod plan;
mod records;
mod registry;
mod text;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_dataset;
pub use plan::{
    DEFAULT_CLIENT_COUNT, DEFAULT_SEED, DEFAULT_SUPPLIER_COUNT, DatasetPlan, MAX_ROWS_PER_ENTITY,
};
pub use records::{
    ClientRecord, ProductRecord, SupplierRecord, SyntheticDataset, TransactionRecord,
};
pub use registry::{PlanDefinition, PlanRegistry};
pub use text::{TEXT_FIELD_MAX, is_single_line_text, normalize_single_line};
