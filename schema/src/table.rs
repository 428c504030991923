//! Tables, foreign keys, and the validated schema container.

use std::collections::BTreeMap;

use crate::column::{Column, ColumnDataType};
use crate::constraint::{
    enum_values_for, lower_bound_for, parse_check_expression, upper_bound_for, TableConstraint,
};
use crate::dto::SchemaDto;
use crate::error::{SchemaError, SchemaResult};

/// A foreign key: one or more source columns referencing `target_table`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub source_columns: Vec<String>,
    pub target_table: String,
}

/// One database table. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Case-insensitive column lookup.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_named(name))
    }

    pub fn primary_keys(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.primary_key).collect()
    }

    /// Whether any foreign key of this table points at `target`.
    pub fn references(&self, target: &str) -> bool {
        self.foreign_keys
            .iter()
            .any(|fk| fk.target_table.eq_ignore_ascii_case(target))
    }
}

/// The validated, immutable set of tables for one schema.
#[derive(Debug, Clone)]
pub struct DbSchema {
    pub name: String,
    pub database_type: String,
    tables: BTreeMap<String, Table>,
}

impl DbSchema {
    /// Validate the wire description and build the immutable table set.
    pub fn from_dto(dto: &SchemaDto) -> SchemaResult<Self> {
        let database_type = dto
            .database_type
            .clone()
            .ok_or(SchemaError::MissingDatabaseType)?;
        let name = dto.name.clone().ok_or(SchemaError::MissingSchemaName)?;

        let mut tables = BTreeMap::new();

        for t in &dto.tables {
            let constraints: Vec<TableConstraint> = t
                .table_check_expressions
                .iter()
                .filter_map(|e| parse_check_expression(&e.sql_check_expression))
                .collect();

            let mut columns: Vec<Column> = Vec::new();
            for c in &t.columns {
                if !c.table.eq_ignore_ascii_case(&t.name) {
                    return Err(SchemaError::column_in_different_table(&t.name, &c.table));
                }
                if columns.iter().any(|existing| existing.is_named(&c.name)) {
                    return Err(SchemaError::duplicate_column(&t.name, &c.name));
                }
                let data_type: ColumnDataType = c.data_type.parse()?;
                columns.push(Column {
                    name: c.name.clone(),
                    size: c.size,
                    data_type,
                    primary_key: c.primary_key,
                    auto_increment: c.auto_increment,
                    foreign_key_to_auto_increment: c.foreign_key_to_auto_increment,
                    nullable: c.nullable,
                    unique: c.unique,
                    lower_bound: lower_bound_for(&constraints, &c.name),
                    upper_bound: upper_bound_for(&constraints, &c.name),
                    enum_values: enum_values_for(&constraints, &c.name),
                });
            }

            tables.insert(
                t.name.clone(),
                Table {
                    name: t.name.clone(),
                    columns,
                    foreign_keys: Vec::new(),
                },
            );
        }

        // Foreign keys are attached in a second pass so that references to
        // tables declared later in the description still resolve.
        for t in &dto.tables {
            let mut fks = Vec::new();
            for f in &t.foreign_keys {
                if !tables
                    .keys()
                    .any(|k| k.eq_ignore_ascii_case(&f.target_table))
                {
                    return Err(SchemaError::fk_to_missing_table(&t.name, &f.target_table));
                }
                for source in &f.source_columns {
                    let owned = tables
                        .get(&t.name)
                        .map_or(false, |owner| owner.column(source).is_some());
                    if !owned {
                        return Err(SchemaError::fk_from_missing_column(&t.name, source));
                    }
                }
                fks.push(ForeignKey {
                    source_columns: f.source_columns.clone(),
                    target_table: f.target_table.clone(),
                });
            }
            if let Some(table) = tables.get_mut(&t.name) {
                table.foreign_keys = fks;
            }
        }

        Ok(Self {
            name,
            database_type,
            tables,
        })
    }

    /// Case-insensitive table lookup.
    pub fn table(&self, name: &str) -> SchemaResult<&Table> {
        self.tables
            .values()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }

    pub fn tables(&self) -> &BTreeMap<String, Table> {
        &self.tables
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{CheckExpressionDto, ColumnDto, ForeignKeyDto, TableDto};
    use pretty_assertions::assert_eq;

    fn column(table: &str, name: &str, data_type: &str) -> ColumnDto {
        ColumnDto {
            table: table.to_string(),
            name: name.to_string(),
            data_type: data_type.to_string(),
            size: 10,
            nullable: true,
            ..Default::default()
        }
    }

    fn user_order_dto() -> SchemaDto {
        let mut id = column("USER", "ID", "INTEGER");
        id.primary_key = true;
        id.nullable = false;

        let mut order_id = column("ORDER", "ID", "INTEGER");
        order_id.primary_key = true;
        order_id.nullable = false;
        let mut user_ref = column("ORDER", "USER_ID", "INTEGER");
        user_ref.nullable = false;

        SchemaDto {
            database_type: Some("H2".to_string()),
            name: Some("public".to_string()),
            tables: vec![
                TableDto {
                    name: "USER".to_string(),
                    columns: vec![id, column("USER", "NAME", "VARCHAR")],
                    ..Default::default()
                },
                TableDto {
                    name: "ORDER".to_string(),
                    columns: vec![order_id, user_ref],
                    foreign_keys: vec![ForeignKeyDto {
                        source_columns: vec!["USER_ID".to_string()],
                        target_table: "USER".to_string(),
                    }],
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn builds_valid_schema() {
        let schema = DbSchema::from_dto(&user_order_dto()).unwrap();
        let order = schema.table("order").unwrap();
        assert!(order.references("user"));
        assert_eq!(order.primary_keys().len(), 1);

        // Primary keys are a subset of columns; FK sources belong to owner.
        for table in schema.tables().values() {
            for pk in table.primary_keys() {
                assert!(table.column(&pk.name).is_some());
            }
            for fk in &table.foreign_keys {
                for source in &fk.source_columns {
                    assert!(table.column(source).is_some());
                }
            }
        }
    }

    #[test]
    fn rejects_missing_database_type() {
        let mut dto = user_order_dto();
        dto.database_type = None;
        assert!(matches!(
            DbSchema::from_dto(&dto),
            Err(SchemaError::MissingDatabaseType)
        ));
    }

    #[test]
    fn rejects_column_claiming_other_table() {
        let mut dto = user_order_dto();
        dto.tables[0].columns[1].table = "ORDER".to_string();
        assert!(matches!(
            DbSchema::from_dto(&dto),
            Err(SchemaError::ColumnInDifferentTable { .. })
        ));
    }

    #[test]
    fn rejects_fk_to_unknown_table() {
        let mut dto = user_order_dto();
        dto.tables[1].foreign_keys[0].target_table = "NOPE".to_string();
        assert!(matches!(
            DbSchema::from_dto(&dto),
            Err(SchemaError::ForeignKeyToMissingTable { .. })
        ));
    }

    #[test]
    fn rejects_fk_from_unknown_column() {
        let mut dto = user_order_dto();
        dto.tables[1].foreign_keys[0].source_columns = vec!["GHOST".to_string()];
        assert!(matches!(
            DbSchema::from_dto(&dto),
            Err(SchemaError::ForeignKeyFromMissingColumn { .. })
        ));
    }

    #[test]
    fn attaches_check_constraints_to_columns() {
        let mut dto = user_order_dto();
        dto.tables[0].columns.push({
            let mut age = column("USER", "AGE", "INTEGER");
            age.nullable = false;
            age
        });
        dto.tables[0].table_check_expressions = vec![
            CheckExpressionDto {
                sql_check_expression: "(AGE >= -100)".to_string(),
            },
            CheckExpressionDto {
                sql_check_expression: "(AGE BETWEEN 0 AND 120)".to_string(),
            },
        ];
        let schema = DbSchema::from_dto(&dto).unwrap();
        let age = schema.table("USER").unwrap().column("AGE").unwrap();
        // The tighter range constraint wins over the broad lower bound.
        assert_eq!(age.lower_bound, Some(0));
        assert_eq!(age.upper_bound, Some(120));
    }
}
