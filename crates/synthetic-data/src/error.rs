//! Error types for the synthetic-data crate.
//!
//! Registry parsing and dataset generation each get a semantic error enum
//! built with `thiserror`.

use thiserror::Error;

/// Errors that can occur when parsing or querying a plan registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry JSON is malformed or missing required fields.
    #[error("invalid plan registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported plan registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no plan definitions.
    #[error("plan registry contains no plans")]
    EmptyPlans,

    /// A plan name is blank.
    #[error("plan at index {index} has a blank name")]
    BlankPlanName {
        /// Index of the offending plan.
        index: usize,
    },

    /// Two plans share the same name.
    #[error("plan '{name}' is defined more than once")]
    DuplicatePlan {
        /// The repeated plan name.
        name: String,
    },

    /// The requested plan was not found in the registry.
    #[error("plan '{name}' not found in registry")]
    PlanNotFound {
        /// The plan name that was not found.
        name: String,
    },
}

/// Errors that can occur while generating a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A free-text field stayed invalid after the maximum number of retries.
    #[error("failed to generate a valid {field} after {max_attempts} attempts")]
    TextGenerationFailed {
        /// Name of the field being generated.
        field: &'static str,
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The plan asks for more rows than a single run may produce.
    #[error("requested {requested} {entity} rows, at most {max} are allowed")]
    CountTooLarge {
        /// Entity whose count is out of range.
        entity: &'static str,
        /// Requested row count.
        requested: usize,
        /// Maximum supported row count.
        max: usize,
    },

    /// The transaction date window could not be constructed.
    #[error("transaction date is out of range")]
    DateOutOfRange,
}
