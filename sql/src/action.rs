//! Database actions: one INSERT (or snapshot of an existing row) per action.

use restgen_core::{Gene, GeneKind, GeneValue};
use restgen_schema::Table;

/// One SQL insertion, or a wrapper over a row that already exists in the
/// database (`represents_existing_data`). Existing-data actions are never
/// executed; they only lend their primary-key values to foreign keys of
/// real insertions.
#[derive(Debug, Clone, PartialEq)]
pub struct DbAction {
    /// Unique per builder instance; foreign-key genes point at these ids.
    pub id: u64,
    pub table: Table,
    pub genes: Vec<Gene>,
    pub represents_existing_data: bool,
}

impl DbAction {
    pub fn table_name(&self) -> &str {
        &self.table.name
    }

    pub fn gene(&self, column: &str) -> Option<&Gene> {
        self.genes.iter().find(|g| g.name.eq_ignore_ascii_case(column))
    }

    /// The primary-key value of this action, if it has a single-column key
    /// with a concrete value.
    pub fn primary_key_value(&self) -> Option<&GeneValue> {
        self.genes.iter().find_map(|g| match g.kind {
            GeneKind::PrimaryKey { .. } | GeneKind::ImmutableData
                if self.table.column(&g.name).is_some_and(|c| c.primary_key) =>
            {
                Some(&g.value)
            }
            _ => None,
        })
    }

    /// Render as an INSERT statement. Auto-increment slots and unresolved
    /// foreign keys print as NULL.
    pub fn to_insert_sql(&self) -> String {
        let columns: Vec<&str> = self.genes.iter().map(|g| g.name.as_str()).collect();
        let values: Vec<String> = self
            .genes
            .iter()
            .map(|g| g.value.as_sql_literal(g.quote))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table.name,
            columns.join(", "),
            values.join(", ")
        )
    }

    /// Tables referenced by foreign-key genes of this action.
    pub fn referenced_tables(&self) -> Vec<&str> {
        self.genes
            .iter()
            .filter_map(|g| g.foreign_key_target())
            .collect()
    }
}
