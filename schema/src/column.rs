//! Column model and data types.

use std::str::FromStr;

use crate::error::SchemaError;

/// Supported column data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDataType {
    Boolean,
    Integer,
    Bigint,
    Smallint,
    Serial,
    Real,
    Double,
    Decimal,
    Char,
    Varchar,
    Text,
    Timestamp,
    Date,
    Uuid,
}

impl ColumnDataType {
    /// Whether values of this type are printed in quotes in generated SQL.
    pub fn should_print_in_quotes(&self) -> bool {
        matches!(
            self,
            ColumnDataType::Char
                | ColumnDataType::Varchar
                | ColumnDataType::Text
                | ColumnDataType::Timestamp
                | ColumnDataType::Date
                | ColumnDataType::Uuid
        )
    }

    /// Whether this type holds numeric data.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnDataType::Integer
                | ColumnDataType::Bigint
                | ColumnDataType::Smallint
                | ColumnDataType::Serial
                | ColumnDataType::Real
                | ColumnDataType::Double
                | ColumnDataType::Decimal
        )
    }
}

impl FromStr for ColumnDataType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BOOL" | "BOOLEAN" => Ok(ColumnDataType::Boolean),
            "INT" | "INT4" | "INTEGER" => Ok(ColumnDataType::Integer),
            "INT8" | "BIGINT" | "BIGSERIAL" => Ok(ColumnDataType::Bigint),
            "INT2" | "SMALLINT" => Ok(ColumnDataType::Smallint),
            "SERIAL" => Ok(ColumnDataType::Serial),
            "REAL" | "FLOAT4" => Ok(ColumnDataType::Real),
            "DOUBLE" | "FLOAT8" | "FLOAT" => Ok(ColumnDataType::Double),
            "DECIMAL" | "NUMERIC" => Ok(ColumnDataType::Decimal),
            "CHAR" | "CHARACTER" => Ok(ColumnDataType::Char),
            "VARCHAR" | "CHARACTER VARYING" => Ok(ColumnDataType::Varchar),
            "TEXT" | "CLOB" => Ok(ColumnDataType::Text),
            "TIMESTAMP" | "DATETIME" => Ok(ColumnDataType::Timestamp),
            "DATE" => Ok(ColumnDataType::Date),
            "UUID" => Ok(ColumnDataType::Uuid),
            other => Err(SchemaError::UnknownDataType(other.to_string())),
        }
    }
}

/// One column of a table. Immutable after schema construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub size: usize,
    pub data_type: ColumnDataType,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub foreign_key_to_auto_increment: bool,
    pub nullable: bool,
    pub unique: bool,
    /// Inclusive lower bound from check constraints, if any.
    pub lower_bound: Option<i64>,
    /// Inclusive upper bound from check constraints, if any.
    pub upper_bound: Option<i64>,
    /// Enumerated allowed values from check constraints, if any.
    pub enum_values: Option<Vec<String>>,
}

impl Column {
    /// Case-insensitive name comparison, matching how databases report
    /// column names back from the schema.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
