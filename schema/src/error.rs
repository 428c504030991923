//! Schema validation errors.

use thiserror::Error;

/// Result type for schema construction and lookups.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while validating a schema description. All of these are
/// fatal at construction time.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Undefined database type")]
    MissingDatabaseType,

    #[error("Undefined schema name")]
    MissingSchemaName,

    #[error("Column in different table: {column_table} != {table}")]
    ColumnInDifferentTable { table: String, column_table: String },

    #[error("Duplicate column {column} in table {table}")]
    DuplicateColumn { table: String, column: String },

    #[error("Foreign key of table {table} references non-existent table {target}")]
    ForeignKeyToMissingTable { table: String, target: String },

    #[error("Foreign key of table {table} uses non-existent source column {column}")]
    ForeignKeyFromMissingColumn { table: String, column: String },

    #[error("Unknown column data type: {0}")]
    UnknownDataType(String),

    #[error("No table called {0}")]
    UnknownTable(String),
}

impl SchemaError {
    pub fn column_in_different_table(
        table: impl Into<String>,
        column_table: impl Into<String>,
    ) -> Self {
        Self::ColumnInDifferentTable {
            table: table.into(),
            column_table: column_table.into(),
        }
    }

    pub fn duplicate_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::DuplicateColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn fk_to_missing_table(table: impl Into<String>, target: impl Into<String>) -> Self {
        Self::ForeignKeyToMissingTable {
            table: table.into(),
            target: target.into(),
        }
    }

    pub fn fk_from_missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::ForeignKeyFromMissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}
