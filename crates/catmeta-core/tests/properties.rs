//! Property tests for foreign key decoding and snapshot re-encoding.

use catmeta_core::{ColumnMapping, ColumnName, ForeignKey, FromJson, ToJson};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeSet;

fn arb_column() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// Two equal-length lists of column names, the local list free of repeats.
fn arb_column_pairs() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    prop::collection::btree_set(arb_column(), 1..6).prop_flat_map(|local: BTreeSet<String>| {
        let local: Vec<String> = local.into_iter().collect();
        let len = local.len();
        (
            Just(local).prop_shuffle(),
            prop::collection::vec(arb_column(), len),
        )
    })
}

fn foreign_key(columns: &[String], foreign_columns: &[String]) -> Value {
    json!({
        "constraint": "fk",
        "foreign_table": {"schema": "public", "name": "parent"},
        "columns": columns,
        "foreign_columns": foreign_columns,
    })
}

proptest! {
    #[test]
    fn prop_mapping_is_positional_zip((local, remote) in arb_column_pairs()) {
        let fk = ForeignKey::from_json(&foreign_key(&local, &remote)).unwrap();

        let pairs: Vec<(String, String)> = fk
            .column_mapping
            .iter()
            .map(|(l, r)| (l.to_string(), r.to_string()))
            .collect();
        let expected: Vec<(String, String)> =
            local.iter().cloned().zip(remote.iter().cloned()).collect();
        prop_assert_eq!(pairs, expected);
    }

    #[test]
    fn prop_length_mismatch_rejected(
        local in prop::collection::vec(arb_column(), 0..6),
        remote in prop::collection::vec(arb_column(), 0..6),
    ) {
        prop_assume!(local.len() != remote.len());

        let err = ForeignKey::from_json(&foreign_key(&local, &remote)).unwrap_err();
        prop_assert!(err.is_invariant());
        prop_assert!(err.to_string().contains("differ in length"));
    }

    #[test]
    fn prop_foreign_key_round_trip((local, remote) in arb_column_pairs()) {
        let fk = ForeignKey::from_json(&foreign_key(&local, &remote)).unwrap();
        let reencoded = fk.to_json();

        prop_assert_eq!(&reencoded, &foreign_key(&local, &remote));
        prop_assert_eq!(ForeignKey::from_json(&reencoded).unwrap(), fk);
    }

    #[test]
    fn prop_try_zip_matches_decode((local, remote) in arb_column_pairs()) {
        let to_names = |names: &[String]| -> Vec<ColumnName> {
            names.iter().map(|n| ColumnName::new(n.as_str()).unwrap()).collect()
        };
        let mapping = ColumnMapping::try_zip(to_names(&local), to_names(&remote)).unwrap();
        let fk = ForeignKey::from_json(&foreign_key(&local, &remote)).unwrap();

        prop_assert_eq!(mapping, fk.column_mapping);
    }
}
