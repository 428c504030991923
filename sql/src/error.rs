//! Errors raised while building or repairing SQL actions.

use thiserror::Error;

/// Result type for SQL action construction.
pub type SqlResult<T> = Result<T, SqlError>;

#[derive(Debug, Error)]
pub enum SqlError {
    /// A database-dependent operation ran with no executor configured.
    #[error("No database executor available")]
    ExecutorUnavailable,

    #[error("No column called {column} in table {table}")]
    UnknownColumn { table: String, column: String },

    /// The wildcard column spec must be the only entry.
    #[error("Invalid column specification for table {table}: {reason}")]
    InvalidColumnSpec { table: String, reason: String },

    /// Non-nullable foreign keys form a cycle, so no insertion order exists.
    #[error("Cyclic foreign-key chain detected at table {0}")]
    CyclicSchema(String),

    #[error("Expected exactly one row in table {table} for the given key, found {found}")]
    RowNotFound { table: String, found: usize },

    #[error(transparent)]
    Schema(#[from] restgen_schema::SchemaError),
}

impl SqlError {
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn invalid_column_spec(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColumnSpec {
            table: table.into(),
            reason: reason.into(),
        }
    }
}
