//! Property-based tests for protodb-storage using proptest.

use protodb_core::schema::{ColumnDescriptor, Schema};
use protodb_core::{DataType, Row};
use protodb_storage::{MemoryStore, RecordKey, RecordStore, Table};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn schema() -> Schema {
    Schema::builder()
        .add_column(ColumnDescriptor::new("a", DataType::Integer).primary_key(true))
        .add_column(ColumnDescriptor::new("b", DataType::Long).primary_key(true))
        .add_column(ColumnDescriptor::new("v", DataType::Double).nullable(true))
        .build()
        .unwrap()
}

fn row(a: i32, b: i64) -> Row {
    let mut row = Row::new();
    row.set_int("a", a);
    row.set_long("b", b);
    row
}

proptest! {
    /// Test that key order matches native tuple order.
    #[test]
    fn key_order_matches_tuples(
        x in (any::<i32>(), any::<i64>()),
        y in (any::<i32>(), any::<i64>())
    ) {
        let schema = schema();
        let kx = RecordKey::from_row(&schema, &row(x.0, x.1)).unwrap();
        let ky = RecordKey::from_row(&schema, &row(y.0, y.1)).unwrap();
        prop_assert_eq!(kx.cmp(&ky), x.cmp(&y));
    }

    /// Test that the store scans in key order and rejects duplicates.
    #[test]
    fn store_scan_is_sorted(pairs in prop::collection::vec((-50i32..50, -50i64..50), 1..100)) {
        let schema = schema();
        let mut store = MemoryStore::new();
        let mut expected = BTreeSet::new();
        for &(a, b) in &pairs {
            let key = RecordKey::from_row(&schema, &row(a, b)).unwrap();
            let fresh = expected.insert((a, b));
            prop_assert_eq!(store.insert(key, Vec::new()), fresh);
        }
        let keys: Vec<(i32, i64)> = store
            .iter()
            .map(|(k, _)| (k.fields()[0].as_i32().unwrap(), k.fields()[1].as_i64().unwrap()))
            .collect();
        prop_assert_eq!(keys, expected.into_iter().collect::<Vec<_>>());
    }

    /// Test that prefix search returns exactly the records of one leading value.
    #[test]
    fn prefix_search_is_exact(
        pairs in prop::collection::vec((-5i32..5, any::<i64>()), 1..60),
        wanted in -5i32..5
    ) {
        let mut table = Table::in_memory("t", schema());
        let mut expected = BTreeSet::new();
        for &(a, b) in &pairs {
            if table.add_record(&row(a, b)).unwrap() && a == wanted {
                expected.insert(b);
            }
        }
        let mut prefix = Row::new();
        prefix.set_int("a", wanted);
        let found: Vec<i64> = table
            .get_records(&prefix)
            .unwrap()
            .iter()
            .map(|r| r.get_long("b").unwrap().unwrap())
            .collect();
        prop_assert_eq!(found, expected.into_iter().collect::<Vec<_>>());
    }
}
