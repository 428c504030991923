//! Repair of database action lists after structural edits.
//!
//! Mutations copy, delete, and reorder resource calls freely; the db actions
//! they carry can end up referencing insertions that moved behind them or
//! were removed. These helpers restore the two list invariants: every
//! foreign key points at an action earlier in the list, and no existing-data
//! row appears twice.

use std::collections::HashMap;

use restgen_core::GeneKind;

use crate::action::DbAction;

/// Re-bind foreign-key genes that are unresolved or point at an action no
/// longer in the list, using the nearest preceding insertion into the target
/// table. Returns the target-table names that could not be resolved.
pub fn repair_fk(actions: &mut [DbAction]) -> Vec<String> {
    let mut unresolved = Vec::new();
    for i in 0..actions.len() {
        let preceding_ids: Vec<u64> = actions[..i].iter().map(|a| a.id).collect();
        let mut rebinds: Vec<(usize, u64)> = Vec::new();
        for (g, gene) in actions[i].genes.iter().enumerate() {
            let GeneKind::ForeignKeyRef {
                target_table,
                bound_to,
            } = &gene.kind
            else {
                continue;
            };
            let valid = bound_to.map_or(false, |id| preceding_ids.contains(&id));
            if valid {
                continue;
            }
            match actions[..i]
                .iter()
                .rev()
                .find(|a| a.table_name().eq_ignore_ascii_case(target_table))
            {
                Some(target) => rebinds.push((g, target.id)),
                None => unresolved.push(target_table.clone()),
            }
        }
        for (g, id) in rebinds {
            actions[i].genes[g].bind_foreign_key(id);
        }
    }
    unresolved
}

/// Reorder the list so that every foreign key points backwards. Bubbles the
/// referenced action in front of its referrer until the list is stable;
/// terminates because validated schemas carry no foreign-key cycles.
pub fn repair_fk_order(actions: &mut Vec<DbAction>) {
    let max_passes = actions.len() * actions.len() + 1;
    for _ in 0..max_passes {
        let mut moved = false;
        'scan: for i in 0..actions.len() {
            for gene in &actions[i].genes {
                let GeneKind::ForeignKeyRef {
                    bound_to: Some(id), ..
                } = gene.kind
                else {
                    continue;
                };
                if let Some(j) = actions.iter().position(|a| a.id == id) {
                    if j > i {
                        let target = actions.remove(j);
                        actions.insert(i, target);
                        moved = true;
                        break 'scan;
                    }
                }
            }
        }
        if !moved {
            return;
        }
    }
}

/// Remove duplicated existing-data rows (same table, same gene values),
/// re-pointing foreign keys bound to a removed duplicate at the kept copy.
/// Returns the number of actions removed.
pub fn shrink_duplicates(actions: &mut Vec<DbAction>) -> usize {
    let mut kept: HashMap<(String, String), u64> = HashMap::new();
    let mut remap: HashMap<u64, u64> = HashMap::new();

    actions.retain(|action| {
        if !action.represents_existing_data {
            return true;
        }
        let fingerprint = (
            action.table_name().to_uppercase(),
            action
                .genes
                .iter()
                .map(|g| g.value.as_sql_literal(g.quote))
                .collect::<Vec<_>>()
                .join("|"),
        );
        match kept.get(&fingerprint) {
            Some(original) => {
                remap.insert(action.id, *original);
                false
            }
            None => {
                kept.insert(fingerprint, action.id);
                true
            }
        }
    });

    for action in actions.iter_mut() {
        for gene in &mut action.genes {
            if let GeneKind::ForeignKeyRef {
                bound_to: Some(id), ..
            } = &mut gene.kind
            {
                if let Some(target) = remap.get(id) {
                    *id = *target;
                }
            }
        }
    }
    remap.len()
}
