//! Initial dependency signals: shared tables and textual similarity.

use restgen_binding::{similarity, BindingStore, SIMILARITY_THRESHOLD};
use restgen_resource::ResourceCluster;

use crate::graph::DependencyGraph;

/// Initial probability for heuristically derived relations; runtime
/// evidence later raises it towards 1.0.
pub const DERIVED_PROBABILITY: f64 = SIMILARITY_THRESHOLD;

/// Shared-table signal: every set of two or more resources bound to the
/// same table becomes a mutual relation tagged with that table. Re-running
/// after new bindings merges groups rather than duplicating them.
pub fn init_shared_table_relations(graph: &mut DependencyGraph, store: &BindingStore) {
    for table in store.known_tables() {
        let members = store.resources_bound_to(&table);
        graph.record_mutual(&table, &members, DERIVED_PROBABILITY, table.clone());
    }
}

/// Textual signal: tokens of each POST body definition compared against
/// the direct type tokens of every other resource. Matches at or above
/// threshold create a bidirectional pair relation, with the matching token
/// as provenance.
pub fn init_textual_relations(graph: &mut DependencyGraph, cluster: &ResourceCluster) {
    for node in cluster.nodes() {
        let body_tokens = node.body_definition_tokens();
        if body_tokens.is_empty() {
            continue;
        }
        for other in cluster.nodes() {
            if other.key() == node.key() {
                continue;
            }
            for token in &body_tokens {
                for type_token in other.direct_type_tokens() {
                    let score = similarity(token, &type_token);
                    if score >= SIMILARITY_THRESHOLD {
                        let provenance = format!("token:{token}");
                        graph.record_pair(&node.key(), &other.key(), score, provenance.clone());
                        graph.record_pair(&other.key(), &node.key(), score, provenance);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restgen_binding::{MatchSource, MatchedInfo};
    use restgen_resource::{HttpVerb, ResourceCluster, RestCallAction, RestParam, RestPath};

    fn bind(store: &mut BindingStore, resource: &str, table: &str) {
        store.record(resource).record_match(MatchedInfo {
            input: resource.trim_start_matches('/').to_string(),
            matched: table.to_string(),
            similarity: 1.0,
            source: MatchSource::PathSegment,
            position: 0,
        });
    }

    #[test]
    fn shared_table_groups_resources() {
        let mut store = BindingStore::new();
        bind(&mut store, "/users", "USER");
        bind(&mut store, "/users/{id}", "USER");
        bind(&mut store, "/orders", "ORDERS");

        let mut graph = DependencyGraph::new();
        init_shared_table_relations(&mut graph, &store);

        assert!(graph.probability_of("/users", "/users/{id}").is_some());
        // No shared table, no mutual relation.
        assert!(graph.probability_of("/users", "/orders").is_none());
        assert!(graph.relations_of("/orders").is_empty());
    }

    #[test]
    fn textual_signal_is_bidirectional() {
        let users_path = RestPath::parse("/users");
        let profiles_path = RestPath::parse("/profiles");
        let cluster = ResourceCluster::from_actions(vec![
            RestCallAction::new(
                HttpVerb::Post,
                users_path,
                vec![RestParam::body(Some("User"), &["profileName"])],
            ),
            RestCallAction::new(
                HttpVerb::Post,
                profiles_path,
                vec![RestParam::body(Some("Profile"), &["bio"])],
            ),
        ]);

        let mut graph = DependencyGraph::new();
        init_textual_relations(&mut graph, &cluster);

        assert!(graph.probability_of("/users", "/profiles").is_some());
        assert!(graph.probability_of("/profiles", "/users").is_some());
    }
}
