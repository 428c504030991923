//! A small web-shop fixture: USER/ORDERS schema, the matching REST
//! cluster, and an in-memory database executor.

use std::collections::HashMap;

use restgen_resource::{HttpVerb, ResourceCluster, RestCallAction, RestParam, RestPath};
use restgen_schema::{ColumnDto, DbSchema, ForeignKeyDto, SchemaDto, TableDto};
use restgen_sql::{DataRow, DatabaseExecutor, QueryResult};

fn column(table: &str, name: &str, data_type: &str) -> ColumnDto {
    ColumnDto {
        table: table.to_string(),
        name: name.to_string(),
        data_type: data_type.to_string(),
        size: 16,
        nullable: false,
        ..Default::default()
    }
}

fn pk(table: &str) -> ColumnDto {
    ColumnDto {
        primary_key: true,
        ..column(table, "ID", "INTEGER")
    }
}

/// `USER(id PK, name)` and `ORDERS(id PK, user_id FK -> USER.id NOT NULL)`.
pub fn user_orders_schema() -> DbSchema {
    DbSchema::from_dto(&SchemaDto {
        database_type: Some("H2".to_string()),
        name: Some("public".to_string()),
        tables: vec![
            TableDto {
                name: "USER".to_string(),
                columns: vec![pk("USER"), column("USER", "NAME", "VARCHAR")],
                ..Default::default()
            },
            TableDto {
                name: "ORDERS".to_string(),
                columns: vec![pk("ORDERS"), column("ORDERS", "USER_ID", "INTEGER")],
                foreign_keys: vec![ForeignKeyDto {
                    source_columns: vec!["USER_ID".to_string()],
                    target_table: "USER".to_string(),
                }],
                ..Default::default()
            },
        ],
    })
    .expect("fixture schema is valid")
}

/// REST actions for `/users`, `/users/{userId}` and `/orders`.
pub fn shop_cluster() -> ResourceCluster {
    ResourceCluster::from_actions(vec![
        RestCallAction::new(
            HttpVerb::Post,
            RestPath::parse("/users"),
            vec![RestParam::body(Some("User"), &["name"])],
        ),
        RestCallAction::new(HttpVerb::Get, RestPath::parse("/users"), vec![]),
        RestCallAction::new(
            HttpVerb::Get,
            RestPath::parse("/users/{userId}"),
            vec![RestParam::path("userId")],
        ),
        RestCallAction::new(
            HttpVerb::Post,
            RestPath::parse("/orders"),
            vec![RestParam::body(Some("Order"), &["userId"])],
        ),
        RestCallAction::new(HttpVerb::Get, RestPath::parse("/orders"), vec![]),
    ])
}

/// A canned executor serving fixed rows per table, keyed by the `FROM`
/// clause of the select.
pub struct TableExecutor {
    pub rows: HashMap<String, Vec<Vec<String>>>,
}

impl TableExecutor {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    pub fn with_rows(table: &str, rows: Vec<Vec<&str>>) -> Self {
        let mut executor = Self::new();
        executor.set_rows(table, rows);
        executor
    }

    pub fn set_rows(&mut self, table: &str, rows: Vec<Vec<&str>>) {
        self.rows.insert(
            table.to_uppercase(),
            rows.into_iter()
                .map(|r| r.into_iter().map(str::to_string).collect())
                .collect(),
        );
    }
}

impl Default for TableExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseExecutor for TableExecutor {
    fn execute_query(&mut self, select: &str) -> Option<QueryResult> {
        let table = select
            .split(" FROM ")
            .nth(1)?
            .split_whitespace()
            .next()?
            .to_uppercase();
        let rows = self.rows.get(&table)?.clone();

        // A keyed lookup narrows to the matching first-column value.
        let rows = match select.split(" WHERE ").nth(1) {
            Some(clause) => {
                let key = clause.split('=').nth(1)?.trim().trim_matches('\'');
                rows.into_iter().filter(|r| r[0] == key).collect()
            }
            None => rows,
        };

        // PK-only selects project just the first column.
        let project_all = select.contains(", ") || select.starts_with("SELECT *");
        Some(QueryResult {
            rows: rows
                .into_iter()
                .map(|r| DataRow {
                    column_data: if project_all { r } else { vec![r[0].clone()] },
                })
                .collect(),
        })
    }
}
