//! Binding derivation over the web-shop fixture.

use restgen_binding::{derive_all, select_bindings, BindingStore};
use restgen_dependency::{init_shared_table_relations, DependencyGraph};
use restgen_tests::prelude::*;

#[test]
fn resources_bind_to_their_own_tables_only() {
    let schema = user_orders_schema();
    let cluster = shop_cluster();
    let mut store = BindingStore::new();
    derive_all(&cluster, &schema, &mut store);

    assert!(store.get("/users").unwrap().is_bound_to("USER"));
    assert!(!store.get("/users").unwrap().is_bound_to("ORDERS"));
    assert!(store.get("/orders").unwrap().is_bound_to("ORDERS"));
    assert!(!store.get("/orders").unwrap().is_bound_to("USER"));

    // Nothing is confirmed before execution evidence arrives.
    for resource in store.resources() {
        assert!(store.get(resource).unwrap().confirmed_tables().is_empty());
    }
}

#[test]
fn derivation_is_idempotent_across_runs() {
    let schema = user_orders_schema();
    let cluster = shop_cluster();
    let mut store = BindingStore::new();

    derive_all(&cluster, &schema, &mut store);
    let derived_once = store.get("/users").unwrap().derived_map.clone();
    derive_all(&cluster, &schema, &mut store);
    assert_eq!(store.get("/users").unwrap().derived_map, derived_once);
}

#[test]
fn disjoint_tables_create_no_mutual_relation() {
    let schema = user_orders_schema();
    let cluster = shop_cluster();
    let mut store = BindingStore::new();
    derive_all(&cluster, &schema, &mut store);

    let mut graph = DependencyGraph::new();
    init_shared_table_relations(&mut graph, &store);

    // The two /users paths share USER and are grouped.
    assert!(graph.probability_of("/users", "/users/{userId}").is_some());
    // /users and /orders share no table, so no mutual relation exists.
    assert!(graph.probability_of("/users", "/orders").is_none());
    assert!(graph.probability_of("/orders", "/users").is_none());
}

#[test]
fn order_body_fields_resolve_to_order_columns() {
    let schema = user_orders_schema();
    let cluster = shop_cluster();
    let mut store = BindingStore::new();
    derive_all(&cluster, &schema, &mut store);

    let mut rng = StdRng::seed_from_u64(42);
    let bindings = select_bindings(store.get("/orders").unwrap(), &mut rng);
    assert!(bindings
        .iter()
        .any(|b| b.param == "Order" && b.table == "ORDERS" && b.column == "USER_ID"));
}
