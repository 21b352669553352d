//! Property-based tests for list reordering
//!
//! - A successful move is a permutation of the input
//! - The moved element lands at the target index
//! - Out-of-range indices are rejected without modifying the list
//! - Row keys follow their values through any sequence of events

use crate::error::{FormError, IndexError};
use crate::ids::SequentialIds;
use crate::list::{RowAction, RowPolicy, move_item, row_actions};
use crate::path::FieldPath;
use crate::state::{FormEvent, FormState};
use proptest::prelude::*;
use serde_json::{Value, json};

fn list_and_indices() -> impl Strategy<Value = (Vec<u32>, usize, usize)> {
    prop::collection::vec(any::<u32>(), 1..20).prop_flat_map(|items| {
        let len = items.len();
        (Just(items), 0..len, 0..len)
    })
}

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove(usize),
    Move(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0usize..8).prop_map(Op::Remove),
        (0usize..8, 0usize..8).prop_map(|(from, to)| Op::Move(from, to)),
    ]
}

#[test]
fn test_move_first_to_third() {
    let mut items = vec![1, 2, 3, 4];
    move_item(&mut items, 0, 2).unwrap();
    assert_eq!(items, [2, 3, 1, 4]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Moving never adds or drops elements
    #[test]
    fn prop_move_is_permutation((items, from, to) in list_and_indices()) {
        let mut moved = items.clone();
        move_item(&mut moved, from, to).unwrap();

        let mut expected = items.clone();
        expected.sort_unstable();
        let mut actual = moved.clone();
        actual.sort_unstable();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(moved[to], items[from]);
    }

    /// Elements other than the moved one keep their relative order
    #[test]
    fn prop_move_keeps_relative_order((items, from, to) in list_and_indices()) {
        let tagged: Vec<(usize, u32)> = items.into_iter().enumerate().collect();
        let mut moved = tagged.clone();
        move_item(&mut moved, from, to).unwrap();

        let rest: Vec<usize> = moved.iter().map(|(i, _)| *i).filter(|i| *i != from).collect();
        let expected: Vec<usize> = (0..tagged.len()).filter(|i| *i != from).collect();
        prop_assert_eq!(rest, expected);
    }

    /// Out-of-range indices fail and leave the list untouched
    #[test]
    fn prop_move_out_of_range_rejected(
        items in prop::collection::vec(any::<u8>(), 0..10),
        extra in 0usize..5,
        from_is_bad in any::<bool>(),
    ) {
        let len = items.len();
        let bad = len + extra;
        let (from, to) = if from_is_bad || len == 0 { (bad, 0) } else { (0, bad) };
        let mut moved = items.clone();
        let err = move_item(&mut moved, from, to).unwrap_err();
        prop_assert!(err.index >= len);
        prop_assert_eq!(err.len, len);
        prop_assert_eq!(moved, items);
    }

    /// Up is never offered on the first row nor down on the last
    #[test]
    fn prop_row_actions_respect_edges(len in 1usize..10, index in 0usize..10) {
        prop_assume!(index < len);
        let actions = row_actions(index, len, RowPolicy::default());
        prop_assert_eq!(actions.contains(&RowAction::Up), index > 0);
        prop_assert_eq!(actions.contains(&RowAction::Down), index + 1 < len);
        prop_assert_eq!(actions.first(), Some(&RowAction::Remove));
    }

    /// Each row keeps the key it was first given, wherever it moves
    #[test]
    fn prop_keys_follow_rows(ops in prop::collection::vec(op(), 0..30)) {
        let ids = SequentialIds::new("k");
        let path = FieldPath::root().field("rows");
        let mut state = FormState::new(json!({ "rows": [] }));
        // Row values are their own keys, so alignment is directly checkable.
        let mut next = 0;

        for op in ops {
            let event = match op {
                Op::Add => FormEvent::Add { path: path.clone() },
                Op::Remove(index) => FormEvent::Remove { path: path.clone(), index },
                Op::Move(from, to) => FormEvent::Move { path: path.clone(), from, to },
            };
            let len = state.get(&path).and_then(Value::as_array).map_or(0, Vec::len);
            match state.apply(&event, &ids) {
                Ok(()) => {
                    if matches!(event, FormEvent::Add { .. }) {
                        let rows = state.value["rows"].as_array_mut().unwrap();
                        let last = rows.len() - 1;
                        rows[last] = Value::String(format!("k{}", next));
                        next += 1;
                    }
                }
                Err(FormError::Index(IndexError { len: reported, .. })) => {
                    prop_assert_eq!(reported, len);
                }
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }

            let rows: Vec<String> = state.value["rows"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap().to_string())
                .collect();
            let keys: Vec<String> = state.keys.get("rows").map(<[String]>::to_vec).unwrap_or_default();
            prop_assert_eq!(rows, keys);
        }
    }
}
