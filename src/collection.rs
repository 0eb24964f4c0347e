//! Collection helpers.
//!
//! Generic helpers over slices and key/value entries, plus the two helpers
//! that only make sense for dynamic values: [`flatten`] (nested arrays) and
//! [`compact`] (truthiness).
//!
//! Searches return `Option` instead of sentinel values.
//!
//! # Examples
//!
//! ```rust
//! use xo::collection::{filter, find_index};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Item {
//!     name: &'static str,
//!     id: &'static str,
//! }
//!
//! let items = [
//!     Item { name: "a", id: "001" },
//!     Item { name: "b", id: "003" },
//!     Item { name: "c", id: "003" },
//! ];
//!
//! let matching = filter(&items, |item| item.id == "003");
//! assert_eq!(matching.len(), 2);
//! assert_eq!(find_index(&items, |item| item.id == "003"), Some(1));
//! ```

use crate::value::Value;

/// Recursively flattens nested arrays into a single level.
///
/// ```rust
/// use xo::collection::flatten;
/// use xo::value::Value;
///
/// let nested = Value::from(serde_json::json!([0, 1, [2, 3], [4, [5, 6]], 7, [8, [9]]]));
/// let flat = flatten(nested.as_array().unwrap_or_default());
/// assert_eq!(flat, (0..10).map(Value::from).collect::<Vec<_>>());
/// ```
pub fn flatten(items: &[Value]) -> Vec<Value> {
    let mut output = Vec::with_capacity(items.len());
    flatten_into(items, &mut output);
    output
}

fn flatten_into(items: &[Value], output: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Array(inner) => flatten_into(inner, output),
            other => output.push(other.clone()),
        }
    }
}

/// Returns the elements that satisfy `predicate`, in order.
pub fn filter<T, P>(items: &[T], predicate: P) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    items.iter().filter(|item| predicate(item)).cloned().collect()
}

/// Returns the truthy elements.
///
/// ```rust
/// use xo::collection::compact;
/// use xo::value::Value;
///
/// let values = [Value::from(1), Value::Undefined, Value::from(false), Value::from(2)];
/// assert_eq!(compact(&values), vec![Value::from(1), Value::from(2)]);
/// ```
pub fn compact(items: &[Value]) -> Vec<Value> {
    filter(items, Value::is_truthy)
}

/// Returns the index of the first element that satisfies `predicate`.
pub fn find_index<T, P>(items: &[T], predicate: P) -> Option<usize>
where
    P: Fn(&T) -> bool,
{
    items.iter().position(predicate)
}

/// Returns the first element that satisfies `predicate`.
pub fn find<T, P>(items: &[T], predicate: P) -> Option<&T>
where
    P: Fn(&T) -> bool,
{
    items.iter().find(|item| predicate(item))
}

/// Returns the key of the first entry whose value satisfies `predicate`.
///
/// Works with anything that iterates `(&K, &V)` pairs, such as a reference to
/// a `BTreeMap` or `HashMap`; "first" follows that iteration order.
///
/// ```rust
/// use std::collections::BTreeMap;
/// use xo::collection::find_key;
///
/// let ages = BTreeMap::from([("alice", 31), ("bob", 17), ("carol", 12)]);
/// assert_eq!(find_key(&ages, |age| *age < 18), Some(&"bob"));
/// assert_eq!(find_key(&ages, |age| *age > 90), None);
/// ```
pub fn find_key<'a, K, V, I, P>(entries: I, predicate: P) -> Option<&'a K>
where
    K: 'a,
    V: 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
    P: Fn(&V) -> bool,
{
    entries
        .into_iter()
        .find(|(_, value)| predicate(value))
        .map(|(key, _)| key)
}

/// Applies `function` to every element.
pub fn map<T, U, F>(items: &[T], function: F) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    items.iter().map(function).collect()
}

/// Folds the elements from the left, starting with `initial`.
///
/// ```rust
/// use xo::collection::reduce;
///
/// assert_eq!(reduce(&[1, 2, 3, 4], |total, item| total + item, 0), 10);
/// ```
pub fn reduce<T, A, F>(items: &[T], function: F, initial: A) -> A
where
    F: Fn(A, &T) -> A,
{
    items.iter().fold(initial, function)
}
