use mesh_values::{Value, diff, merge, prune};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z.{} ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Seq),
            prop::collection::btree_map("[a-zA-Z-]{1,8}", inner, 0..5).prop_map(Value::Map),
        ]
    })
}

fn arb_map() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-zA-Z-]{1,8}", arb_value(), 0..6).prop_map(Value::Map)
}

proptest! {
    #[test]
    fn merge_with_empty_map_is_identity(tree in arb_map()) {
        prop_assert_eq!(merge(&tree, &Value::map()), tree);
    }

    #[test]
    fn merge_with_itself_is_identity(tree in arb_value()) {
        prop_assert_eq!(merge(&tree, &tree), tree.clone());
    }

    #[test]
    fn overlay_leaves_always_win(base in arb_map(), overlay in arb_map()) {
        let merged = merge(&base, &overlay);
        // merging the overlay again changes nothing
        prop_assert_eq!(merge(&merged, &overlay), merged);
    }

    #[test]
    fn pruning_never_changes_the_merged_result(baseline in arb_map(), delta in arb_map()) {
        let pruned = prune(&delta, &baseline);
        prop_assert_eq!(merge(&baseline, &pruned), merge(&baseline, &delta));
    }

    #[test]
    fn diff_is_empty_exactly_when_equal(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(diff(&a, &b).is_empty(), a == b);
    }
}
