//! Structural mutation plus database-action regeneration over the
//! web-shop fixture.

use restgen_binding::{derive_all, BindingStore};
use restgen_core::SearchConfig;
use restgen_dependency::DependencyGraph;
use restgen_mutation::{regenerate_db_actions, MutationType, StructureMutator};
use restgen_resource::ResourceSequence;
use restgen_sql::SqlInsertBuilder;
use restgen_tests::prelude::*;

fn orders_only(rng: &mut StdRng) -> ResourceSequence {
    let cluster = shop_cluster();
    let calls = cluster
        .node("/orders")
        .unwrap()
        .sample_template("GET", rng)
        .unwrap();
    ResourceSequence::new(vec![calls])
}

#[test]
fn gating_reflects_the_fixture_sequence() {
    let cluster = shop_cluster();
    let config = SearchConfig::default();
    let mutator = StructureMutator::new(&cluster, &config);
    let mut rng = StdRng::seed_from_u64(42);

    let seq = orders_only(&mut rng);
    let types = mutator.applicable_types(&seq);
    assert!(types.contains(&MutationType::Add));
    assert!(types.contains(&MutationType::Replace));
    assert!(types.contains(&MutationType::Modify));
    assert!(!types.contains(&MutationType::Delete));
    assert!(!types.contains(&MutationType::Swap));
}

#[test]
fn mutations_never_leave_the_cluster() {
    let cluster = shop_cluster();
    let config = SearchConfig::default();
    let mutator = StructureMutator::new(&cluster, &config);
    let graph = DependencyGraph::new();
    let mut rng = StdRng::seed_from_u64(42);

    let mut seq = orders_only(&mut rng);
    for _ in 0..30 {
        mutator.mutate(&mut seq, &graph, &mut rng);
        assert!(!seq.is_empty());
        for key in seq.resource_keys() {
            assert!(cluster.keys().contains(&key.as_str()), "unknown resource {key}");
        }
    }
}

#[test]
fn dependency_guided_add_places_the_provider_first() {
    let cluster = shop_cluster();
    // minimal() always takes the dependency-guided branch.
    let config = SearchConfig::minimal();
    let mutator = StructureMutator::new(&cluster, &config);
    let mut rng = StdRng::seed_from_u64(42);

    let mut graph = DependencyGraph::new();
    graph.record_pair("/orders", "/users", 1.0, "runtime");

    for _ in 0..50 {
        let mut seq = orders_only(&mut rng);
        if mutator.mutate(&mut seq, &graph, &mut rng) == Some(MutationType::Add) {
            assert_eq!(seq.calls[0].resource_key, "/users");
            assert_eq!(seq.calls[0].should_be_before, vec!["/orders".to_string()]);
            return;
        }
    }
    panic!("ADD never chosen across 50 attempts");
}

#[test]
fn regenerated_db_actions_satisfy_foreign_keys() {
    let schema = user_orders_schema();
    let cluster = shop_cluster();
    let mut store = BindingStore::new();
    derive_all(&cluster, &schema, &mut store);

    let mut builder = SqlInsertBuilder::new(schema);
    let config = SearchConfig::minimal();
    let mut rng = StdRng::seed_from_u64(42);

    let mut seq = orders_only(&mut rng);
    regenerate_db_actions(&mut builder, &mut seq, &store, &config, &mut rng).unwrap();

    let actions = &seq.calls[0].db_actions;
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].table_name(), "USER");
    assert_eq!(actions[1].table_name(), "ORDERS");
    assert_eq!(
        actions[1].gene("USER_ID").unwrap().foreign_key_target(),
        Some("USER")
    );
    assert!(actions.iter().all(|a| !a.represents_existing_data));
}

#[test]
fn populated_database_allows_row_reuse() {
    let schema = user_orders_schema();
    let cluster = shop_cluster();
    let mut store = BindingStore::new();
    derive_all(&cluster, &schema, &mut store);

    let mut builder = SqlInsertBuilder::new(schema);
    let mut executor = TableExecutor::with_rows("USER", vec![vec!["1", "a"], vec!["2", "b"]]);
    executor.set_rows("ORDERS", vec![vec!["10", "1"], vec!["11", "2"]]);
    builder.attach_executor(Box::new(executor));

    let config = SearchConfig::minimal();
    let mut rng = StdRng::seed_from_u64(42);

    let mut reused = false;
    for _ in 0..20 {
        let mut seq = orders_only(&mut rng);
        regenerate_db_actions(&mut builder, &mut seq, &store, &config, &mut rng).unwrap();
        if seq.calls[0]
            .db_actions
            .iter()
            .any(|a| a.represents_existing_data)
        {
            reused = true;
            break;
        }
    }
    assert!(reused);
}
