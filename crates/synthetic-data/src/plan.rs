//! Dataset plans: the inputs to deterministic generation.

use serde::{Deserialize, Serialize};

/// Number of clients generated when no count is supplied.
pub const DEFAULT_CLIENT_COUNT: usize = 100;

/// Number of suppliers generated when no count is supplied.
pub const DEFAULT_SUPPLIER_COUNT: usize = 50;

/// RNG seed used when no seed is supplied.
pub const DEFAULT_SEED: u64 = 2024;

/// Upper bound on rows per entity for a single generation run.
pub const MAX_ROWS_PER_ENTITY: usize = 1_000_000;

/// Parameters for one deterministic generation run.
///
/// The same plan always produces the same dataset.
///
/// # Example
///
/// ```
/// use synthetic_data::{DEFAULT_CLIENT_COUNT, DEFAULT_SUPPLIER_COUNT, DatasetPlan};
///
/// let plan = DatasetPlan::default();
/// assert_eq!(plan.client_count(), DEFAULT_CLIENT_COUNT);
/// assert_eq!(plan.supplier_count(), DEFAULT_SUPPLIER_COUNT);
///
/// let small = plan.with_client_count(3);
/// assert_eq!(small.client_count(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetPlan {
    seed: u64,
    client_count: usize,
    supplier_count: usize,
}

impl DatasetPlan {
    /// Creates a plan from explicit values.
    #[must_use]
    pub const fn new(seed: u64, client_count: usize, supplier_count: usize) -> Self {
        Self {
            seed,
            client_count,
            supplier_count,
        }
    }

    /// Returns the RNG seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of clients (and therefore products and
    /// transactions) to generate.
    #[must_use]
    pub const fn client_count(&self) -> usize {
        self.client_count
    }

    /// Returns the number of suppliers to generate.
    #[must_use]
    pub const fn supplier_count(&self) -> usize {
        self.supplier_count
    }

    /// Returns a copy of the plan with a different seed.
    #[must_use]
    pub const fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Returns a copy of the plan with a different client count.
    #[must_use]
    pub const fn with_client_count(self, client_count: usize) -> Self {
        Self {
            client_count,
            ..self
        }
    }

    /// Returns a copy of the plan with a different supplier count.
    #[must_use]
    pub const fn with_supplier_count(self, supplier_count: usize) -> Self {
        Self {
            supplier_count,
            ..self
        }
    }
}

impl Default for DatasetPlan {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_CLIENT_COUNT, DEFAULT_SUPPLIER_COUNT)
    }
}
