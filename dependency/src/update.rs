//! Runtime confirmation of bindings from per-evaluation database feedback.

use restgen_binding::BindingStore;
use restgen_core::{ActionExecutionInfo, EvaluatedSequence, ExecutionFeedback};

use crate::graph::DependencyGraph;
use crate::init::init_shared_table_relations;

/// Probability of a relation backed by execution evidence.
pub const CONFIRMED_PROBABILITY: f64 = 1.0;

/// Correlate the database activity of each executed action with its HTTP
/// verb, promoting the touched tables to confirmed bindings of the owning
/// resource and regrouping mutual relations with the new evidence.
///
/// The feedback may be shorter than the action list when execution stopped
/// early; the remaining actions are simply skipped.
pub fn update_resource_tables(
    store: &mut BindingStore,
    graph: &mut DependencyGraph,
    sequence: &EvaluatedSequence,
    feedback: &ExecutionFeedback,
) {
    let mut index = 0;
    for call in &sequence.calls {
        for action_name in &call.action_names {
            let Some(info) = feedback.per_action.get(index) else {
                return;
            };
            index += 1;
            let verb = action_name.split(':').next().unwrap_or("");
            confirm_tables(store, graph, &call.resource_key, verb, info);
        }
    }
}

fn confirm_tables(
    store: &mut BindingStore,
    graph: &mut DependencyGraph,
    resource: &str,
    verb: &str,
    info: &ActionExecutionInfo,
) {
    let mut touched: Vec<&String> = Vec::new();
    if matches!(verb, "POST" | "PUT") {
        touched.extend(info.inserted.keys());
    }
    if matches!(verb, "PATCH" | "PUT") {
        touched.extend(info.updated.keys());
    }
    if verb == "DELETE" {
        touched.extend(info.deleted.iter());
    }
    if verb == "GET" {
        touched.extend(info.queried.keys());
    }
    if touched.is_empty() {
        return;
    }

    for table in touched {
        store.record(resource).confirm(table);
        let members = store.resources_bound_to(table);
        graph.record_mutual(
            table,
            &members,
            CONFIRMED_PROBABILITY,
            format!("runtime:{table}"),
        );
    }
    // Pick up any group changes caused by the new confirmations.
    init_shared_table_relations(graph, store);
}
