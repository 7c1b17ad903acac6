use chartline_core::{ChartlineError, MatchWindow, Record, merge_by, merge_by_key};
use proptest::prelude::*;
use serde_json::json;

fn keyed(keys: &[i64], field: &str, tag: &str) -> Vec<Record> {
    keys.iter()
        .map(|k| Record::new().with("k", *k).with(field, format!("{tag}{k}")))
        .collect()
}

#[test]
fn side_fields_overlay_matching_spine_records() {
    let a = vec![
        Record::new().with("k", 1).with("a", "x"),
        Record::new().with("k", 2).with("a", "y"),
    ];
    let b = vec![Record::new().with("k", 2).with("b", "z")];

    let merged = merge_by_key(&[a, b], "k").unwrap();
    assert_eq!(
        merged,
        vec![
            Record::new().with("k", 1).with("a", "x"),
            Record::new().with("k", 2).with("a", "y").with("b", "z"),
        ]
    );
}

#[test]
fn subset_series_enriches_only_matching_positions() {
    let a = keyed(&[1, 2, 3, 4, 5], "a", "a");
    let b = keyed(&[2, 3, 5], "b", "b");

    let merged = merge_by_key(&[b.clone(), a.clone()], "k").unwrap();
    assert_eq!(merged.len(), 5);
    for (out, spine) in merged.iter().zip(&a) {
        let k = spine.get("k").and_then(serde_json::Value::as_i64).unwrap();
        match b.iter().find(|r| r.get("k") == Some(&json!(k))) {
            Some(side) => assert_eq!(out, &spine.overlay(side)),
            None => assert_eq!(out, spine),
        }
    }
}

#[test]
fn disjoint_series_are_dropped_not_appended() {
    let a = keyed(&[1, 2, 3, 4, 5], "a", "a");
    let c = keyed(&[0, 6], "c", "c");

    let merged = merge_by_key(&[a.clone(), c], "k").unwrap();
    assert_eq!(merged, a);
}

#[test]
fn side_record_right_of_a_miss_is_lost_with_the_window() {
    // 6 has no home: the window sweeps the whole spine looking for it, so the
    // matchable 2 that precedes it is dropped too.
    let a = keyed(&[1, 2, 3], "a", "a");
    let side = keyed(&[2, 6], "s", "s");

    let merged = merge_by_key(&[a.clone(), side], "k").unwrap();
    assert_eq!(merged, a);
}

#[test]
fn single_series_is_returned_unchanged() {
    let a = keyed(&[1, 2, 3], "a", "a");
    assert_eq!(merge_by_key(&[a.clone()], "k").unwrap(), a);
}

#[test]
fn empty_series_list_is_invalid_input() {
    let none: [Vec<Record>; 0] = [];
    assert!(matches!(
        merge_by_key(&none, "k"),
        Err(ChartlineError::InvalidInput(_))
    ));
}

#[test]
fn longest_series_is_the_spine_and_first_wins_ties() {
    let short = keyed(&[2], "s", "s");
    let long = keyed(&[1, 2, 3], "l", "l");
    let merged = merge_by_key(&[short.clone(), long.clone()], "k").unwrap();
    assert_eq!(merged.len(), 3);
    assert_eq!(merged[1], long[1].overlay(&short[0]));

    let left = keyed(&[1, 2], "x", "x");
    let right = keyed(&[1, 2], "y", "y");
    let merged = merge_by_key(&[left.clone(), right.clone()], "k").unwrap();
    // `left` is the spine, so `right`'s fields are layered on top
    assert_eq!(merged[0], left[0].overlay(&right[0]));
}

#[test]
fn caller_series_are_not_mutated() {
    let a = keyed(&[1, 2, 3], "a", "a");
    let b = keyed(&[2, 3], "b", "b");
    let (a0, b0) = (a.clone(), b.clone());
    let series = vec![a, b];
    let _ = merge_by_key(&series, "k").unwrap();
    assert_eq!(series[0], a0);
    assert_eq!(series[1], b0);
}

#[test]
fn tied_keys_consume_rightmost_candidates_first() {
    let spine = vec![
        Record::new().with("k", 1).with("n", 0),
        Record::new().with("k", 1).with("n", 1),
        Record::new().with("k", 2).with("n", 2),
    ];
    let side = vec![
        Record::new().with("k", 1).with("s", "first"),
        Record::new().with("k", 1).with("s", "second"),
    ];

    let merged = merge_by_key(&[spine, side], "k").unwrap();
    assert_eq!(merged[2].get("s"), None);
    assert_eq!(merged[1].get("s"), Some(&json!("second")));
    assert_eq!(merged[0].get("s"), Some(&json!("first")));
}

#[test]
fn integer_and_float_keys_match_by_value() {
    let spine = keyed(&[1, 2], "a", "x");
    let side: Vec<Record> = vec![serde_json::from_str(r#"{"k": 2.0, "b": "z"}"#).unwrap()];

    let merged = merge_by_key(&[spine, side], "k").unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[1].get("b"), Some(&json!("z")));
    assert_eq!(merged[0].get("b"), None);
}

#[test]
fn side_values_win_on_field_collision() {
    let spine = vec![Record::new().with("k", 1).with("v", "spine")];
    let side = vec![Record::new().with("k", 1).with("v", "side")];
    let merged = merge_by_key(&[spine, side], "k").unwrap();
    assert_eq!(merged[0].get("v"), Some(&json!("side")));
}

#[test]
fn records_without_merge_key_never_match() {
    let spine = vec![Record::new().with("a", 1), Record::new().with("k", 2)];
    let side = vec![Record::new().with("b", 1)];
    let merged = merge_by_key(&[spine.clone(), side], "k").unwrap();
    assert_eq!(merged, spine);
}

#[test]
fn several_side_series_all_contribute() {
    let a = keyed(&[1, 2, 3, 4], "a", "a");
    let b = keyed(&[2, 4], "b", "b");
    let c = keyed(&[1, 3], "c", "c");

    let merged = merge_by_key(&[b, a, c], "k").unwrap();
    assert_eq!(merged[0].get("c"), Some(&json!("c1")));
    assert_eq!(merged[1].get("b"), Some(&json!("b2")));
    assert_eq!(merged[2].get("c"), Some(&json!("c3")));
    assert_eq!(merged[3].get("b"), Some(&json!("b4")));
    assert_eq!(merged[3].get("c"), None);
}

#[test]
fn generic_merge_over_plain_tuples() {
    let spine = vec![(1, 10), (2, 20), (3, 30)];
    let side = vec![(2, 2), (3, 3)];
    let merged = merge_by(
        &[spine, side],
        |a: &(i32, i32), b: &(i32, i32)| a.0 == b.0,
        |a, b| (a.0, a.1 + b.1),
    )
    .unwrap();
    assert_eq!(merged, vec![(1, 10), (2, 22), (3, 33)]);
}

#[test]
fn window_seek_moves_boundary_past_match() {
    let mut w = MatchWindow::new(5);
    assert_eq!(w.boundary(), Some(4));

    assert_eq!(w.seek(|idx| idx == 2), Some(2));
    assert_eq!(w.boundary(), Some(1));
    assert_eq!(w.remaining(), 2);

    assert_eq!(w.seek(|_| false), None);
    assert!(w.is_exhausted());
    assert_eq!(w.boundary(), None);
    assert_eq!(w.seek(|_| true), None);
}

#[test]
fn empty_window_is_exhausted() {
    let mut w = MatchWindow::new(0);
    assert!(w.is_exhausted());
    assert_eq!(w.seek(|_| true), None);
}

proptest! {
    #[test]
    fn window_boundary_never_increases(
        len in 0usize..100,
        targets in proptest::collection::vec(0usize..120, 0..50),
    ) {
        let mut w = MatchWindow::new(len);
        let mut last = w.remaining();
        for target in targets {
            let hit = w.seek(|idx| idx == target);
            if let Some(idx) = hit {
                prop_assert_eq!(idx, target);
                prop_assert_eq!(w.remaining(), idx);
            }
            prop_assert!(w.remaining() <= last);
            last = w.remaining();
        }
    }

    #[test]
    fn subset_merge_matches_lookup_oracle(
        spine_keys in proptest::collection::btree_set(0i64..500, 1..120),
        pick in proptest::collection::vec(any::<bool>(), 120),
    ) {
        let spine_keys: Vec<i64> = spine_keys.into_iter().collect();
        let side_keys: Vec<i64> = spine_keys
            .iter()
            .zip(pick.iter())
            .filter_map(|(k, keep)| keep.then_some(*k))
            .collect();
        let spine = keyed(&spine_keys, "a", "a");
        let side = keyed(&side_keys, "b", "b");

        let merged = merge_by_key(&[spine.clone(), side.clone()], "k").unwrap();
        prop_assert_eq!(merged.len(), spine.len());
        for (out, base) in merged.iter().zip(&spine) {
            match side.iter().find(|r| r.get("k") == base.get("k")) {
                Some(s) => prop_assert_eq!(out, &base.overlay(s)),
                None => prop_assert_eq!(out, base),
            }
        }
    }

    #[test]
    fn merge_identity_no_op(keys in proptest::collection::vec(0i64..1_000, 0..100)) {
        let mut keys = keys;
        keys.sort_unstable();
        let a = keyed(&keys, "a", "a");
        prop_assert_eq!(merge_by_key(&[a.clone()], "k").unwrap(), a);
    }
}
