//! Construction of SQL insertion chains and extraction of existing rows.

use std::collections::HashMap;

use restgen_core::{Gene, GeneValue};
use restgen_schema::{Column, ColumnDataType, DbSchema};

use crate::action::DbAction;
use crate::error::{SqlError, SqlResult};
use crate::executor::DatabaseExecutor;

/// Column selector for [`SqlInsertBuilder::create_insertion_action`]: the
/// wildcard `"*"` selects every column and must be the only entry.
pub const ALL_COLUMNS: &str = "*";

/// Builds executable insertion chains for tables of one schema, pulling in
/// foreign-key precursors as needed, and extracts rows already present in
/// the database through an optional [`DatabaseExecutor`].
pub struct SqlInsertBuilder {
    schema: DbSchema,
    executor: Option<Box<dyn DatabaseExecutor>>,
    counter: u64,
}

impl SqlInsertBuilder {
    pub fn new(schema: DbSchema) -> Self {
        Self {
            schema,
            executor: None,
            counter: 0,
        }
    }

    pub fn attach_executor(&mut self, executor: Box<dyn DatabaseExecutor>) {
        self.executor = Some(executor);
    }

    /// Whether database-dependent operations are available.
    pub fn has_db_handler(&self) -> bool {
        self.executor.is_some()
    }

    pub fn schema(&self) -> &DbSchema {
        &self.schema
    }

    fn next_id(&mut self) -> u64 {
        let id = self.counter;
        self.counter += 1;
        id
    }

    /// Build the insertion chain for `table_name`: one action for the table
    /// itself, preceded by insertions for every foreign-key target it needs.
    /// Precursors are pulled in only through non-nullable foreign keys; a
    /// selected nullable reference stays NULL.
    ///
    /// `columns` selects which mutable columns to include. Primary-key and
    /// non-nullable columns are always included regardless of the selection.
    pub fn create_insertion_action(
        &mut self,
        table_name: &str,
        columns: &[&str],
    ) -> SqlResult<Vec<DbAction>> {
        let wildcard = columns.iter().any(|c| *c == ALL_COLUMNS);
        if wildcard && columns.len() > 1 {
            return Err(SqlError::invalid_column_spec(
                table_name,
                "wildcard must be the only entry",
            ));
        }

        let table = self.schema.table(table_name)?;
        if !wildcard {
            for requested in columns {
                if table.column(requested).is_none() {
                    return Err(SqlError::unknown_column(&table.name, *requested));
                }
            }
        }

        let selection = if wildcard { None } else { Some(columns) };
        let mut path = Vec::new();
        let mut created = HashMap::new();
        self.insert_chain(table_name, selection, &mut path, &mut created)
    }

    /// Recursive worker. `path` is the current chain of tables being built
    /// and guards against foreign-key cycles; `created` reuses a precursor
    /// when two foreign keys of the chain target the same table.
    fn insert_chain(
        &mut self,
        table_name: &str,
        selection: Option<&[&str]>,
        path: &mut Vec<String>,
        created: &mut HashMap<String, u64>,
    ) -> SqlResult<Vec<DbAction>> {
        let key = table_name.to_uppercase();
        if path.contains(&key) {
            return Err(SqlError::CyclicSchema(table_name.to_string()));
        }
        path.push(key.clone());

        let table = self.schema.table(table_name)?.clone();
        let id = self.next_id();

        let included: Vec<&Column> = table
            .columns
            .iter()
            .filter(|c| {
                c.primary_key
                    || !c.nullable
                    || selection.map_or(true, |cols| cols.iter().any(|s| c.is_named(s)))
            })
            .collect();

        // Foreign-key source columns map to their target tables.
        let mut fk_targets: HashMap<String, String> = HashMap::new();
        for fk in &table.foreign_keys {
            for source in &fk.source_columns {
                fk_targets.insert(source.to_uppercase(), fk.target_table.clone());
            }
        }

        let mut actions = Vec::new();
        let mut genes = Vec::new();
        for column in included {
            if let Some(target) = fk_targets.get(&column.name.to_uppercase()) {
                let mut gene = Gene::foreign_key(column.name.as_str(), target.clone());
                if column.nullable {
                    // Optional reference; stays NULL, no precursor needed.
                    genes.push(gene);
                    continue;
                }
                let target_id = match created.get(&target.to_uppercase()) {
                    Some(existing) => *existing,
                    None => {
                        let precursors = self.insert_chain(target, Some(&[]), path, created)?;
                        let target_id = precursors.last().map(|a| a.id).unwrap_or(id);
                        actions.extend(precursors);
                        target_id
                    }
                };
                gene.bind_foreign_key(target_id);
                genes.push(gene);
            } else if column.auto_increment || column.foreign_key_to_auto_increment {
                genes.push(Gene::auto_increment(column.name.as_str()));
            } else if column.primary_key {
                genes.push(Gene::primary_key(
                    &column.name,
                    id,
                    seed_value(column),
                    column.data_type.should_print_in_quotes(),
                ));
            } else {
                genes.push(Gene::mutable(
                    &column.name,
                    seed_value(column),
                    column.data_type.should_print_in_quotes(),
                ));
            }
        }

        created.insert(key.clone(), id);
        actions.push(DbAction {
            id,
            table,
            genes,
            represents_existing_data: false,
        });

        path.pop();
        Ok(actions)
    }

    /// SELECT retrieving the primary-key columns of `table_name`. Tables
    /// without a declared key fall back to selecting every column.
    pub fn generate_select_for_keys(&self, table_name: &str) -> SqlResult<String> {
        let table = self.schema.table(table_name)?;
        let pks = table.primary_keys();
        let projection = if pks.is_empty() {
            "*".to_string()
        } else {
            pks.iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        Ok(format!("SELECT {} FROM {}", projection, table.name))
    }

    /// Wrap every primary-key row currently in `table_name` as an
    /// existing-data action. Tables without a primary key yield nothing.
    pub fn extract_existing_primary_keys(&mut self, table_name: &str) -> SqlResult<Vec<DbAction>> {
        if self.executor.is_none() {
            return Err(SqlError::ExecutorUnavailable);
        }
        let table = self.schema.table(table_name)?.clone();
        let pk_names: Vec<String> = table
            .primary_keys()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        if pk_names.is_empty() {
            return Ok(Vec::new());
        }

        let select = self.generate_select_for_keys(&table.name)?;
        let executor = self.executor.as_mut().ok_or(SqlError::ExecutorUnavailable)?;
        let Some(result) = executor.execute_query(&select) else {
            // Transient driver failure, treated as an empty table.
            return Ok(Vec::new());
        };

        let mut actions = Vec::new();
        for row in result.rows {
            let id = self.next_id();
            let genes = pk_names
                .iter()
                .zip(row.column_data.iter())
                .map(|(name, raw)| {
                    let quote = table
                        .column(name)
                        .map(|c| c.data_type.should_print_in_quotes())
                        .unwrap_or(false);
                    Gene::immutable(name.clone(), GeneValue::Text(raw.clone()), quote)
                })
                .collect();
            actions.push(DbAction {
                id,
                table: table.clone(),
                genes,
                represents_existing_data: true,
            });
        }
        Ok(actions)
    }

    /// Fetch the single row of `table_name` whose primary key equals `key`
    /// and wrap it as an existing-data action with every column included.
    pub fn extract_existing_row_by_key(
        &mut self,
        table_name: &str,
        key: &GeneValue,
    ) -> SqlResult<DbAction> {
        if self.executor.is_none() {
            return Err(SqlError::ExecutorUnavailable);
        }
        let table = self.schema.table(table_name)?.clone();
        let pk = table
            .primary_keys()
            .first()
            .map(|c| (c.name.clone(), c.data_type.should_print_in_quotes()))
            .ok_or_else(|| SqlError::invalid_column_spec(&table.name, "table has no primary key"))?;

        let select = format!(
            "SELECT {} FROM {} WHERE {} = {}",
            table
                .columns
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            table.name,
            pk.0,
            key.as_sql_literal(pk.1),
        );
        let executor = self.executor.as_mut().ok_or(SqlError::ExecutorUnavailable)?;
        let rows = executor
            .execute_query(&select)
            .map(|r| r.rows)
            .unwrap_or_default();
        if rows.len() != 1 {
            return Err(SqlError::RowNotFound {
                table: table.name.clone(),
                found: rows.len(),
            });
        }

        let id = self.next_id();
        let genes = table
            .columns
            .iter()
            .zip(rows[0].column_data.iter())
            .map(|(column, raw)| {
                Gene::immutable(
                    column.name.clone(),
                    GeneValue::Text(raw.clone()),
                    column.data_type.should_print_in_quotes(),
                )
            })
            .collect();
        Ok(DbAction {
            id,
            table,
            genes,
            represents_existing_data: true,
        })
    }

    /// Refresh the full per-table cache of existing primary keys.
    pub fn snapshot_all_primary_keys(&mut self) -> SqlResult<HashMap<String, Vec<DbAction>>> {
        if self.executor.is_none() {
            return Err(SqlError::ExecutorUnavailable);
        }
        let names: Vec<String> = self
            .schema
            .table_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        let mut out = HashMap::new();
        for name in names {
            let rows = self.extract_existing_primary_keys(&name)?;
            out.insert(name, rows);
        }
        Ok(out)
    }
}

/// Deterministic starting value for a freshly built gene, respecting check
/// constraints. The search randomizes these later.
fn seed_value(column: &Column) -> GeneValue {
    if let Some(values) = &column.enum_values {
        if let Some(first) = values.first() {
            return GeneValue::Text(first.clone());
        }
    }
    match column.data_type {
        ColumnDataType::Boolean => GeneValue::Bool(false),
        t if t.is_numeric() => {
            let mut v = column.lower_bound.unwrap_or(0);
            if let Some(upper) = column.upper_bound {
                v = v.min(upper);
            }
            GeneValue::Int(v)
        }
        ColumnDataType::Timestamp => GeneValue::Text("1970-01-01 00:00:00".to_string()),
        ColumnDataType::Date => GeneValue::Text("1970-01-01".to_string()),
        ColumnDataType::Uuid => {
            GeneValue::Text("00000000-0000-0000-0000-000000000000".to_string())
        }
        _ => GeneValue::Text("a".to_string()),
    }
}
