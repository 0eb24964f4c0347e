#![cfg(feature = "collection")]
//! Integration tests for the collection helpers.

use std::collections::HashMap;

use rstest::rstest;
use xo::collection::{compact, filter, find, find_index, find_key, flatten, map, reduce};
use xo::value::Value;

#[derive(Clone, Debug, PartialEq)]
struct Item {
    name: &'static str,
    id: &'static str,
}

fn items() -> Vec<Item> {
    vec![
        Item { name: "a", id: "001" },
        Item { name: "b", id: "003" },
        Item { name: "c", id: "003" },
    ]
}

#[rstest]
fn test_filter_keeps_order() {
    let names: Vec<_> = filter(&items(), |item| item.id == "003")
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(names, ["b", "c"]);
}

#[rstest]
fn test_find_and_find_index_agree() {
    let items = items();
    let index = find_index(&items, |item| item.id == "003");
    let found = find(&items, |item| item.id == "003");

    assert_eq!(index, Some(1));
    assert_eq!(found, index.map(|index| &items[index]));
    assert_eq!(find(&items, |item| item.id == "999"), None);
}

#[rstest]
fn test_find_key_over_a_hash_map() {
    let stock = HashMap::from([("apples", 0), ("pears", 4)]);
    assert_eq!(find_key(&stock, |count| *count > 0), Some(&"pears"));
    assert_eq!(find_key(&stock, |count| *count > 10), None);
}

#[rstest]
fn test_flatten_nested_json() {
    let nested = Value::from(serde_json::json!([0, 1, [2, 3], [4, [5, 6]], 7, [8, [9]]]));
    let flat = flatten(nested.as_array().unwrap());
    assert_eq!(flat, (0..10).map(Value::from).collect::<Vec<_>>());
}

#[rstest]
fn test_compact_then_map_then_reduce() {
    let raw = Value::from(serde_json::json!([1, null, 0, 2, "", 3, false]));
    let present = compact(raw.as_array().unwrap());
    let doubled = map(&present, |value| value.as_number().unwrap_or_default() * 2.0);
    let total = reduce(&doubled, |total, value| total + value, 0.0);

    assert_eq!(doubled, vec![2.0, 4.0, 6.0]);
    assert!((total - 12.0).abs() < f64::EPSILON);
}

#[rstest]
fn test_helpers_on_empty_input() {
    let empty: [i32; 0] = [];
    assert!(filter(&empty, |_| true).is_empty());
    assert_eq!(find_index(&empty, |_| true), None);
    assert_eq!(reduce(&empty, |total, item| total + item, 7), 7);
    assert!(flatten(&[]).is_empty());
}
