//! Selection of concrete table+column bindings from the derived ties.
//!
//! Derivation keeps every candidate at or above threshold; the random pick
//! among equals happens here, at the point of consumption.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::matched::{ColumnRef, ParamToTable, ResourceToTable};

/// One concrete binding chosen for a parameter (or body field).
#[derive(Debug, Clone, PartialEq)]
pub struct ParamBindMap {
    pub param: String,
    /// Body field the binding applies to, when the parameter is a body
    /// object.
    pub field: Option<String>,
    pub table: String,
    pub column: String,
}

/// Pick one concrete binding per parameter of the record. Confirmed tables
/// are preferred over derived-only ones; among the remaining candidates the
/// best score wins and exact ties are broken randomly. Body objects vote
/// across their fields for a single table first, then each field resolves
/// its column within it.
pub fn select_bindings(
    record: &ResourceToTable,
    rng: &mut impl Rng,
) -> Vec<ParamBindMap> {
    let mut out = Vec::new();
    let mut params: Vec<&ParamToTable> = record.param_to_table.values().collect();
    params.sort_by(|a, b| a.param().cmp(b.param()));

    for binding in params {
        match binding {
            ParamToTable::Simple { param, candidates } => {
                if let Some(chosen) = pick(candidates, record, rng) {
                    out.push(ParamBindMap {
                        param: param.clone(),
                        field: None,
                        table: chosen.table.clone(),
                        column: chosen.column.clone(),
                    });
                }
            }
            ParamToTable::Body { param, fields } => {
                let Some(table) = vote_table(fields, record, rng) else {
                    continue;
                };
                let mut field_names: Vec<&String> = fields.keys().collect();
                field_names.sort();
                for field in field_names {
                    let in_table: Vec<ColumnRef> = fields[field]
                        .iter()
                        .filter(|c| c.table == table)
                        .cloned()
                        .collect();
                    if let Some(chosen) = pick(&in_table, record, rng) {
                        out.push(ParamBindMap {
                            param: param.clone(),
                            field: Some(field.clone()),
                            table: chosen.table.clone(),
                            column: chosen.column.clone(),
                        });
                    }
                }
            }
        }
    }
    out
}

fn pick<'a>(
    candidates: &'a [ColumnRef],
    record: &ResourceToTable,
    rng: &mut impl Rng,
) -> Option<&'a ColumnRef> {
    let confirmed: Vec<&ColumnRef> = candidates
        .iter()
        .filter(|c| record.is_confirmed(&c.table))
        .collect();
    let pool: Vec<&ColumnRef> = if confirmed.is_empty() {
        candidates.iter().collect()
    } else {
        confirmed
    };
    let best = pool
        .iter()
        .map(|c| c.score)
        .fold(f64::NEG_INFINITY, f64::max);
    let top: Vec<&ColumnRef> = pool.into_iter().filter(|c| c.score >= best).collect();
    top.choose(rng).copied()
}

/// Majority vote across body fields for the table the object maps to.
fn vote_table(
    fields: &HashMap<String, Vec<ColumnRef>>,
    record: &ResourceToTable,
    rng: &mut impl Rng,
) -> Option<String> {
    let mut votes: HashMap<&str, usize> = HashMap::new();
    for candidates in fields.values() {
        for candidate in candidates {
            *votes.entry(candidate.table.as_str()).or_default() += 1;
            if record.is_confirmed(&candidate.table) {
                *votes.entry(candidate.table.as_str()).or_default() += 1;
            }
        }
    }
    let best = *votes.values().max()?;
    let mut top: Vec<&str> = votes
        .iter()
        .filter(|(_, v)| **v == best)
        .map(|(t, _)| *t)
        .collect();
    top.sort();
    top.choose(rng).map(|t| t.to_string())
}
