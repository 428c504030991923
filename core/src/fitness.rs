//! Fitness snapshots and runtime execution feedback.
//!
//! The search engine evaluates one sequence at a time and hands the core two
//! kinds of evidence: a [`FitnessView`] (per-target coverage distance, keyed
//! by target id and the index of the action that reached it) and an
//! [`ExecutionFeedback`] (which tables each action touched, per SQL verb).
//! Both are immutable snapshots; the dependency engine only reads them.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

/// Fitness of one target as reached by one action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetFitness {
    /// Index of the action (within the flattened action list of the
    /// sequence) that produced this heuristic value.
    pub action_index: usize,
    /// Distance to covering the target; lower is better, 0.0 is covered.
    pub distance: f64,
}

/// Snapshot of all fitness targets reached by one evaluated sequence.
///
/// If execution stopped prematurely (e.g. an HTTP timeout), actions past the
/// failure simply have no entries here.
#[derive(Debug, Clone, Default)]
pub struct FitnessView {
    targets: HashMap<u64, TargetFitness>,
}

impl FitnessView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the heuristic value for `target`. Keeps the better (lower
    /// distance) entry when a target is reached by several actions.
    pub fn record(&mut self, target: u64, action_index: usize, distance: f64) {
        match self.targets.get(&target) {
            Some(existing) if existing.distance <= distance => {}
            _ => {
                self.targets.insert(
                    target,
                    TargetFitness {
                        action_index,
                        distance,
                    },
                );
            }
        }
    }

    pub fn view(&self) -> &HashMap<u64, TargetFitness> {
        &self.targets
    }

    /// All targets reached by any of the given action indices.
    pub fn of_actions(&self, indices: &[usize]) -> HashMap<u64, TargetFitness> {
        self.targets
            .iter()
            .filter(|(_, t)| indices.contains(&t.action_index))
            .map(|(k, v)| (*k, *v))
            .collect()
    }
}

/// Structural snapshot of one resource call inside an evaluated sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSnapshot {
    /// Path of the resource node this call belongs to.
    pub resource_key: String,
    /// Identity of the concrete sampled instance (resource key plus the
    /// sampled values); two calls on the same resource with different
    /// values have different instance keys.
    pub instance_key: String,
    /// Name of the verb template the call was sampled from.
    pub template: String,
    /// Names of the REST actions of this call, in order.
    pub action_names: Vec<String>,
}

/// Immutable snapshot of an evaluated test sequence, used to diff the state
/// before and after a structural mutation.
#[derive(Debug, Clone, Default)]
pub struct EvaluatedSequence {
    pub calls: Vec<CallSnapshot>,
    pub fitness: FitnessView,
}

impl EvaluatedSequence {
    /// Number of REST actions in calls `0..=call_index`.
    pub fn actions_through(&self, call_index: usize) -> usize {
        self.calls
            .iter()
            .take(call_index + 1)
            .map(|c| c.action_names.len())
            .sum()
    }

    pub fn total_actions(&self) -> usize {
        self.calls.iter().map(|c| c.action_names.len()).sum()
    }

    /// Indices (in the flattened action list) of every action with `name`.
    pub fn action_indices_named(&self, name: &str) -> Vec<usize> {
        let mut out = Vec::new();
        let mut index = 0;
        for call in &self.calls {
            for a in &call.action_names {
                if a == name {
                    out.push(index);
                }
                index += 1;
            }
        }
        out
    }
}

/// What one executed action did to the database, keyed by table name
/// (lower-cased by the driver). Column sets may contain `"*"` when the
/// driver could not narrow the touched columns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionExecutionInfo {
    pub inserted: HashMap<String, HashSet<String>>,
    pub updated: HashMap<String, HashSet<String>>,
    pub deleted: HashSet<String>,
    pub queried: HashMap<String, HashSet<String>>,
}

/// Per-evaluation database feedback, one entry per executed action.
///
/// May be shorter than the action list when execution stopped early.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutionFeedback {
    pub per_action: Vec<ActionExecutionInfo>,
}
