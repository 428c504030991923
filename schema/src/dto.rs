//! Wire representation of a database schema, as supplied by the driver.

use serde::Deserialize;

/// Top-level schema description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaDto {
    pub database_type: Option<String>,
    pub name: Option<String>,
    pub tables: Vec<TableDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableDto {
    pub name: String,
    pub columns: Vec<ColumnDto>,
    pub foreign_keys: Vec<ForeignKeyDto>,
    pub table_check_expressions: Vec<CheckExpressionDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnDto {
    /// Name of the table this column claims to belong to; must match the
    /// declaring table.
    pub table: String,
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub size: usize,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub foreign_key_to_auto_increment: bool,
    pub nullable: bool,
    pub unique: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForeignKeyDto {
    pub source_columns: Vec<String>,
    pub target_table: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckExpressionDto {
    pub sql_check_expression: String,
}
