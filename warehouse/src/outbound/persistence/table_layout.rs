//! Validated table names for the warehouse layout.
//!
//! Identifiers cannot be bound as statement parameters, so every part of a
//! table name is checked against `[A-Za-z_][A-Za-z0-9_]*` before it is
//! interpolated into SQL.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::Entity;

/// Longest identifier `PostgreSQL` keeps without truncation.
pub const IDENTIFIER_MAX_LEN: usize = 63;

/// Errors raised for invalid identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The identifier was empty.
    #[error("identifier must not be empty")]
    Empty,
    /// The identifier was longer than [`IDENTIFIER_MAX_LEN`].
    #[error("identifier `{value}` exceeds {IDENTIFIER_MAX_LEN} characters")]
    TooLong {
        /// Rejected identifier.
        value: String,
    },
    /// The identifier contained a character outside `[A-Za-z0-9_]` or
    /// started with a digit.
    #[error("identifier `{value}` must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidCharacter {
        /// Rejected identifier.
        value: String,
    },
}

/// A validated, unquoted SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate `value` as an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] if `value` is empty, too long, or contains
    /// anything other than ASCII letters, digits and underscores.
    ///
    /// # Examples
    ///
    /// ```
    /// use warehouse::outbound::persistence::Identifier;
    ///
    /// assert!(Identifier::new("clients_schema").is_ok());
    /// assert!(Identifier::new("clients; DROP TABLE x").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = value.into();
        let mut chars = raw.chars();
        let Some(first) = chars.next() else {
            return Err(IdentifierError::Empty);
        };
        if raw.len() > IDENTIFIER_MAX_LEN {
            return Err(IdentifierError::TooLong { value: raw });
        }
        let valid_start = first.is_ascii_alphabetic() || first == '_';
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(IdentifierError::InvalidCharacter { value: raw });
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `[database.]schema.table` name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedTable {
    database: Option<Identifier>,
    schema: Identifier,
    table: Identifier,
}

impl QualifiedTable {
    /// Build a qualified name from validated parts.
    #[must_use]
    pub const fn new(database: Option<Identifier>, schema: Identifier, table: Identifier) -> Self {
        Self {
            database,
            schema,
            table,
        }
    }
}

impl fmt::Display for QualifiedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(database) = &self.database {
            write!(f, "{database}.")?;
        }
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// Where each entity lives in the warehouse.
///
/// The default layout keeps each entity in its own schema
/// (`clients_schema.clients_table` and so on) without a database qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    clients: QualifiedTable,
    products: QualifiedTable,
    suppliers: QualifiedTable,
    transactions: QualifiedTable,
}

impl TableLayout {
    /// The default layout, optionally qualified with a database name.
    ///
    /// # Examples
    ///
    /// ```
    /// use warehouse::domain::Entity;
    /// use warehouse::outbound::persistence::{Identifier, TableLayout};
    ///
    /// let database = Identifier::new("analytics").expect("valid identifier");
    /// let layout = TableLayout::standard(Some(database));
    /// assert_eq!(
    ///     layout.table(Entity::Client).to_string(),
    ///     "analytics.clients_schema.clients_table"
    /// );
    /// ```
    #[must_use]
    pub fn standard(database: Option<Identifier>) -> Self {
        let table = |prefix: &str| {
            QualifiedTable::new(
                database.clone(),
                Identifier(format!("{prefix}_schema")),
                Identifier(format!("{prefix}_table")),
            )
        };
        Self {
            clients: table("clients"),
            products: table("products"),
            suppliers: table("suppliers"),
            transactions: table("transactions"),
        }
    }

    /// Table holding `entity`.
    #[must_use]
    pub const fn table(&self, entity: Entity) -> &QualifiedTable {
        match entity {
            Entity::Client => &self.clients,
            Entity::Product => &self.products,
            Entity::Supplier => &self.suppliers,
            Entity::Transaction => &self.transactions,
        }
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::standard(None)
    }
}
