//! Derivation of resource-to-table and parameter-to-column bindings from
//! name similarity.

use std::collections::HashMap;

use restgen_resource::{ResourceCluster, ResourceNode, RestParam};
use restgen_schema::{DbSchema, Table};

use crate::matched::{ColumnRef, MatchSource, MatchedInfo, ParamToTable, ResourceToTable};
use crate::similarity::{similarity, SIMILARITY_THRESHOLD};
use crate::store::BindingStore;

/// Column names too generic to score on their own; they are additionally
/// scored table-qualified and the higher score kept.
const GENERIC_COLUMN_NAMES: [&str; 4] = ["id", "name", "key", "value"];

/// Derive table associations for one resource from its path tokens and
/// body type names. All tables at or above threshold are kept, ties
/// included. Idempotent: duplicate matches are not recorded twice.
pub fn derive_resource_to_table(
    node: &ResourceNode,
    schema: &DbSchema,
    record: &mut ResourceToTable,
) {
    for (position, token) in node.path.tokens().iter().enumerate() {
        for table in schema.tables().values() {
            let score = similarity(token, &table.name);
            if score >= SIMILARITY_THRESHOLD {
                record.record_match(MatchedInfo {
                    input: token.clone(),
                    matched: table.name.clone(),
                    similarity: score,
                    source: MatchSource::PathSegment,
                    position,
                });
            }
        }
    }

    for action in &node.actions {
        let Some(RestParam::Body {
            type_name: Some(type_name),
            ..
        }) = action.body_param()
        else {
            continue;
        };
        for table in schema.tables().values() {
            let score = similarity(type_name, &table.name);
            if score >= SIMILARITY_THRESHOLD {
                record.record_match(MatchedInfo {
                    input: type_name.clone(),
                    matched: table.name.clone(),
                    similarity: score,
                    source: MatchSource::BodyType,
                    position: 0,
                });
            }
        }
    }
}

/// Derive parameter-to-column bindings against the tables already
/// associated with the resource. Body objects resolve per-field.
pub fn derive_params_to_table(
    node: &ResourceNode,
    schema: &DbSchema,
    record: &mut ResourceToTable,
) {
    let tables: Vec<Table> = record
        .candidate_tables()
        .iter()
        .filter_map(|name| schema.table(name).ok().cloned())
        .collect();
    if tables.is_empty() {
        return;
    }

    for action in &node.actions {
        for param in &action.params {
            match param {
                RestParam::Path { name } | RestParam::Query { name } => {
                    let candidates = score_against_tables(name, &tables);
                    if !candidates.is_empty() {
                        record.param_to_table.insert(
                            name.clone(),
                            ParamToTable::Simple {
                                param: name.clone(),
                                candidates,
                            },
                        );
                    }
                }
                RestParam::Body { type_name, fields } => {
                    let param = type_name.clone().unwrap_or_else(|| "body".to_string());
                    let mut resolved: HashMap<String, Vec<ColumnRef>> = HashMap::new();
                    for field in fields {
                        let candidates = score_against_tables(field, &tables);
                        if !candidates.is_empty() {
                            resolved.insert(field.clone(), candidates);
                        }
                    }
                    if !resolved.is_empty() {
                        record.param_to_table.insert(
                            param.clone(),
                            ParamToTable::Body {
                                param,
                                fields: resolved,
                            },
                        );
                    }
                }
            }
        }
    }
}

/// Run both derivation passes for every node of the cluster.
pub fn derive_all(cluster: &ResourceCluster, schema: &DbSchema, store: &mut BindingStore) {
    for node in cluster.nodes() {
        let record = store.record(&node.key());
        derive_resource_to_table(node, schema, record);
        derive_params_to_table(node, schema, record);
    }
}

/// Score one parameter name against every column of the candidate tables.
/// Generic column names are also scored with the table name prefixed,
/// keeping the higher score. All matches at or above threshold are kept.
fn score_against_tables(param: &str, tables: &[Table]) -> Vec<ColumnRef> {
    let mut candidates = Vec::new();
    for table in tables {
        for column in &table.columns {
            let mut score = similarity(param, &column.name);
            if GENERIC_COLUMN_NAMES
                .iter()
                .any(|g| column.name.eq_ignore_ascii_case(g))
            {
                let qualified = format!("{}{}", table.name, column.name);
                score = score.max(similarity(param, &qualified));
            }
            if score >= SIMILARITY_THRESHOLD {
                candidates.push(ColumnRef {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    score,
                });
            }
        }
    }
    candidates
}
