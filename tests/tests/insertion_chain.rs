//! Insertion-chain scenarios against the USER/ORDERS schema.

use restgen_core::GeneValue;
use restgen_sql::{SqlInsertBuilder, ALL_COLUMNS};
use restgen_tests::prelude::*;

#[test]
fn order_insertion_pulls_in_its_user() {
    let mut builder = SqlInsertBuilder::new(user_orders_schema());
    let chain = builder
        .create_insertion_action("ORDERS", &[ALL_COLUMNS])
        .unwrap();

    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].table_name(), "USER");
    assert_eq!(chain[1].table_name(), "ORDERS");

    let fk = chain[1].gene("USER_ID").unwrap();
    assert_eq!(fk.foreign_key_target(), Some("USER"));
}

#[test]
fn precursors_always_come_first() {
    let mut builder = SqlInsertBuilder::new(user_orders_schema());
    for table in ["USER", "ORDERS"] {
        let chain = builder.create_insertion_action(table, &[]).unwrap();
        for (position, action) in chain.iter().enumerate() {
            for referenced in action.referenced_tables() {
                let target = chain
                    .iter()
                    .position(|a| a.table_name().eq_ignore_ascii_case(referenced))
                    .expect("referenced table is in the chain");
                assert!(target < position, "{referenced} must precede its referrer");
            }
        }
    }
}

#[test]
fn primary_keys_round_trip_through_row_extraction() {
    let mut builder = SqlInsertBuilder::new(user_orders_schema());
    builder.attach_executor(Box::new(TableExecutor::with_rows(
        "USER",
        vec![vec!["1", "alice"], vec!["2", "bob"]],
    )));

    let keys = builder.extract_existing_primary_keys("USER").unwrap();
    assert_eq!(keys.len(), 2);
    assert!(keys.iter().all(|a| a.represents_existing_data));

    for key_action in keys {
        let key = key_action.gene("ID").unwrap().value.clone();
        let row = builder.extract_existing_row_by_key("USER", &key).unwrap();
        assert_eq!(row.gene("ID").unwrap().value, key);
        let GeneValue::Text(id) = key else {
            panic!("extracted keys are raw strings");
        };
        let expected_name = if id == "1" { "alice" } else { "bob" };
        assert_eq!(
            row.gene("NAME").unwrap().value,
            GeneValue::Text(expected_name.to_string())
        );
    }
}

#[test]
fn snapshot_covers_every_table_with_rows() {
    let mut builder = SqlInsertBuilder::new(user_orders_schema());
    let mut executor = TableExecutor::with_rows("USER", vec![vec!["1", "alice"]]);
    executor.set_rows("ORDERS", vec![vec!["10", "1"]]);
    builder.attach_executor(Box::new(executor));

    let snapshot = builder.snapshot_all_primary_keys().unwrap();
    assert_eq!(snapshot["USER"].len(), 1);
    assert_eq!(snapshot["ORDERS"].len(), 1);
}
