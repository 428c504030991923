//! Dependency inference end to end: init signals, runtime confirmation,
//! and post-mutation detection over sampled sequences.

use restgen_binding::{derive_all, BindingStore};
use restgen_core::{ExecutionFeedback, FitnessView};
use restgen_dependency::{
    detect_after_structure_mutation, init_shared_table_relations, init_textual_relations,
    update_resource_tables, DependencyGraph, CONFIRMED_PROBABILITY,
};
use restgen_resource::ResourceSequence;
use restgen_tests::prelude::*;

#[test]
fn textual_signal_links_orders_to_users() {
    let cluster = shop_cluster();
    let mut graph = DependencyGraph::new();
    init_textual_relations(&mut graph, &cluster);

    // The "user" token of the Order body matches the User type name.
    assert!(graph.probability_of("/orders", "/users").is_some());
    assert!(graph.probability_of("/users", "/orders").is_some());
}

#[test]
fn runtime_feedback_confirms_bindings_and_raises_probability() {
    let schema = user_orders_schema();
    let cluster = shop_cluster();
    let mut store = BindingStore::new();
    derive_all(&cluster, &schema, &mut store);

    let mut graph = DependencyGraph::new();
    init_shared_table_relations(&mut graph, &store);
    let before = graph.probability_of("/users", "/users/{userId}").unwrap();
    assert!(before < CONFIRMED_PROBABILITY);

    let mut rng = StdRng::seed_from_u64(42);
    let calls = cluster
        .node("/users")
        .unwrap()
        .sample_template("POST", &mut rng)
        .unwrap();
    let sequence = ResourceSequence::new(vec![calls]).snapshot(FitnessView::new());
    // Feedback as it arrives from the driver.
    let feedback: ExecutionFeedback =
        serde_json::from_str(r#"{ "perAction": [ { "inserted": { "USER": ["*"] } } ] }"#).unwrap();
    update_resource_tables(&mut store, &mut graph, &sequence, &feedback);

    assert!(store.get("/users").unwrap().is_confirmed("USER"));
    assert_eq!(
        graph.probability_of("/users", "/users/{userId}"),
        Some(CONFIRMED_PROBABILITY)
    );
}

#[test]
fn probabilities_stay_monotonic_under_weaker_evidence() {
    let mut graph = DependencyGraph::new();
    graph.record_pair("/orders", "/users", CONFIRMED_PROBABILITY, "runtime");
    graph.record_pair("/orders", "/users", 0.6, "textual");
    assert_eq!(
        graph.probability_of("/orders", "/users"),
        Some(CONFIRMED_PROBABILITY)
    );
}

#[test]
fn deleting_an_irrelevant_call_marks_downstream_uncorrelated() {
    let cluster = shop_cluster();
    let mut rng = StdRng::seed_from_u64(42);

    let users = cluster
        .node("/users")
        .unwrap()
        .sample_template("GET", &mut rng)
        .unwrap();
    let orders = cluster
        .node("/orders")
        .unwrap()
        .sample_template("GET", &mut rng)
        .unwrap();
    let mut sequence = ResourceSequence::new(vec![users, orders]);

    let mut fitness = FitnessView::new();
    fitness.record(7, 1, 0.25);
    let before = sequence.snapshot(fitness);

    sequence.remove(0);
    let mut fitness = FitnessView::new();
    fitness.record(7, 0, 0.25);
    let after = sequence.snapshot(fitness);

    let mut graph = DependencyGraph::new();
    detect_after_structure_mutation(&mut graph, &before, &after).unwrap();

    assert!(graph.is_uncorrelated("/users", "/orders"));
    assert!(graph.probability_of("/orders", "/users").is_none());
}

#[test]
fn replacement_that_helps_downstream_implicates_the_new_resource() {
    let cluster = shop_cluster();
    let mut rng = StdRng::seed_from_u64(42);

    let detail = cluster
        .node("/users/{userId}")
        .unwrap()
        .sample_template("GET", &mut rng)
        .unwrap();
    let users = cluster
        .node("/users")
        .unwrap()
        .sample_template("POST", &mut rng)
        .unwrap();
    let orders = cluster
        .node("/orders")
        .unwrap()
        .sample_template("GET", &mut rng)
        .unwrap();

    let mut sequence = ResourceSequence::new(vec![detail, orders]);
    let mut fitness = FitnessView::new();
    fitness.record(7, 1, 0.8);
    let before = sequence.snapshot(fitness);

    // Replace the detail call with a user-creating one; /orders improves.
    sequence.replace(0, users);
    let mut fitness = FitnessView::new();
    fitness.record(7, 1, 0.1);
    let after = sequence.snapshot(fitness);

    let mut graph = DependencyGraph::new();
    detect_after_structure_mutation(&mut graph, &before, &after).unwrap();

    assert_eq!(
        graph.probability_of("/orders", "/users"),
        Some(CONFIRMED_PROBABILITY)
    );
    assert!(graph.probability_of("/orders", "/users/{userId}").is_none());
}
