//! Regeneration of the database actions backing a sequence after a
//! structural mutation.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use restgen_binding::{select_bindings, BindingStore};
use restgen_core::SearchConfig;
use restgen_resource::ResourceSequence;
use restgen_sql::repair::{repair_fk, repair_fk_order, shrink_duplicates};
use restgen_sql::{DbAction, SqlInsertBuilder, SqlResult, ALL_COLUMNS};

/// Rebuild the db actions of every call group in the sequence.
///
/// The insert-vs-reuse decision per bound table works off a fresh snapshot
/// of existing primary keys: a row count below `min_rows_per_table` forces
/// an insertion, otherwise reuse of an existing row happens with
/// `select_from_db_prob`. Parameter bindings chosen from the derived
/// candidates decide which optional columns an inserted row carries, so
/// every bound parameter gets a concrete column value to share. The
/// resulting chains get a foreign-key order pass and duplicate shrinking.
pub fn regenerate_db_actions(
    builder: &mut SqlInsertBuilder,
    sequence: &mut ResourceSequence,
    store: &BindingStore,
    config: &SearchConfig,
    rng: &mut impl Rng,
) -> SqlResult<()> {
    // Full refresh, never incremental: mutation may have shifted which
    // rows exist since the last decision.
    let existing: HashMap<String, Vec<DbAction>> = if builder.has_db_handler() {
        builder.snapshot_all_primary_keys()?
    } else {
        HashMap::new()
    };

    for call in &mut sequence.calls {
        let Some(record) = store.get(&call.resource_key) else {
            call.db_actions.clear();
            continue;
        };
        let mut tables: Vec<&str> = record.confirmed_tables();
        if tables.is_empty() {
            tables = record.candidate_tables();
        }
        tables.sort_unstable();
        let bindings = select_bindings(record, rng);

        let mut actions = Vec::new();
        for table in tables {
            let rows = existing.get(table).map(Vec::as_slice).unwrap_or(&[]);
            let must_insert = rows.len() < config.min_rows_per_table;
            if !must_insert && rng.gen_bool(config.select_from_db_prob) {
                if let Some(row) = rows.choose(rng) {
                    actions.push(row.clone());
                    continue;
                }
            }
            let mut bound: Vec<&str> = bindings
                .iter()
                .filter(|b| b.table.eq_ignore_ascii_case(table))
                .map(|b| b.column.as_str())
                .collect();
            bound.sort_unstable();
            bound.dedup();
            if bound.is_empty() {
                bound.push(ALL_COLUMNS);
            }
            actions.extend(builder.create_insertion_action(table, &bound)?);
        }

        repair_fk_order(&mut actions);
        shrink_duplicates(&mut actions);
        repair_fk(&mut actions);
        call.db_actions = actions;
    }
    Ok(())
}
