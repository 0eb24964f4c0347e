#![cfg(feature = "memoize")]
//! Integration tests for memoization.
//!
//! Covers the typed memoizers (`memoize`, `try_memoize`), the shared
//! `Cache`, and memoized dynamic functions.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use proptest::prelude::*;
use rstest::rstest;
use serde::Serialize;
use xo::error::{Error, InvalidArgumentError};
use xo::memoize::{CacheKey, memoize, memoize_function, try_memoize};
use xo::predicate::{is_null, is_undefined};
use xo::value::{Function, Value};

// =============================================================================
// Typed memoizers
// =============================================================================

#[rstest]
fn test_upper_case_is_computed_once() {
    let runs = Cell::new(0);
    let upper = memoize(|text: String| {
        runs.set(runs.get() + 1);
        text.to_uppercase()
    });

    assert_eq!(upper.call("foo".to_owned()).unwrap(), "FOO");
    assert_eq!(upper.call("foo".to_owned()).unwrap(), "FOO");
    assert_eq!(runs.get(), 1);

    assert_eq!(upper.call("bar".to_owned()).unwrap(), "BAR");
    assert_eq!(runs.get(), 2);
}

#[derive(Serialize)]
struct Query {
    table: &'static str,
    filters: BTreeMap<&'static str, i32>,
}

#[rstest]
fn test_structurally_equal_arguments_share_an_entry() {
    let runs = Cell::new(0);
    let describe = memoize(|query: Query| {
        runs.set(runs.get() + 1);
        format!("{} with {} filters", query.table, query.filters.len())
    });

    let first = Query {
        table: "users",
        filters: BTreeMap::from([("age", 30), ("id", 1)]),
    };
    let second = Query {
        table: "users",
        filters: BTreeMap::from([("id", 1), ("age", 30)]),
    };

    assert_eq!(describe.call(first).unwrap(), "users with 2 filters");
    assert_eq!(describe.call(second).unwrap(), "users with 2 filters");
    assert_eq!(runs.get(), 1);
}

#[rstest]
fn test_falsy_results_are_cached() {
    let runs = Cell::new(0);
    let is_even = memoize(|n: u32| {
        runs.set(runs.get() + 1);
        n % 2 == 0
    });

    assert!(!is_even.call(3).unwrap());
    assert!(!is_even.call(3).unwrap());
    assert_eq!(runs.get(), 1);
}

#[rstest]
fn test_failures_are_not_cached() {
    let runs = Cell::new(0);
    let parse = try_memoize(|text: &str| -> Result<i32, Error> {
        runs.set(runs.get() + 1);
        text.parse::<i32>()
            .map_err(|error| Error::raised(error.to_string()))
    });

    assert!(parse.call("nope").is_err());
    assert!(parse.call("nope").is_err());
    assert_eq!(runs.get(), 2);

    assert_eq!(parse.call("42"), Ok(42));
    assert_eq!(parse.call("42"), Ok(42));
    assert_eq!(runs.get(), 3);
}

#[rstest]
fn test_unrepresentable_arguments_are_rejected() {
    let runs = Cell::new(0);
    let count = memoize(|map: BTreeMap<(i32, i32), i32>| {
        runs.set(runs.get() + 1);
        map.len()
    });

    let error: InvalidArgumentError = count.call(BTreeMap::from([((1, 2), 3)])).unwrap_err();
    assert_eq!(error.operation, "memoize");
    assert_eq!(runs.get(), 0);
}

#[rstest]
fn test_missing_and_not_a_number_stay_apart() {
    let runs = Cell::new(0);
    let describe = memoize(|value: Option<f64>| {
        runs.set(runs.get() + 1);
        value.map_or_else(|| "none".to_owned(), |number| number.to_string())
    });

    assert_eq!(describe.call(None).unwrap(), "none");
    assert_eq!(describe.call(Some(f64::NAN)).unwrap(), "NaN");
    assert_eq!(describe.call(Some(f64::INFINITY)).unwrap(), "inf");
    assert_eq!(describe.call(None).unwrap(), "none");
    assert_eq!(runs.get(), 3);
}

#[rstest]
#[case((1, "a"), (1, "a"), true)]
#[case((1, "a"), (1, "b"), false)]
#[case((1, "a"), (2, "a"), false)]
fn test_cache_key_equality(
    #[case] left: (i32, &str),
    #[case] right: (i32, &str),
    #[case] equal: bool,
) {
    let left = CacheKey::derive(&left).unwrap();
    let right = CacheKey::derive(&right).unwrap();
    assert_eq!(left == right, equal);
}

// =============================================================================
// Dynamic functions
// =============================================================================

fn counting_upper(runs: &Rc<Cell<u32>>) -> Function {
    let runs = Rc::clone(runs);
    Function::new(1, move |arguments| {
        runs.set(runs.get() + 1);
        let text = arguments[0].as_str().unwrap_or_default();
        Ok(Value::from(text.to_uppercase()))
    })
}

#[rstest]
fn test_memoized_function_runs_once_per_argument_list() {
    let runs = Rc::new(Cell::new(0));
    let upper = memoize_function(counting_upper(&runs));

    assert_eq!(upper.call(&[Value::from("foo")]), Ok(Value::from("FOO")));
    assert_eq!(upper.call(&[Value::from("foo")]), Ok(Value::from("FOO")));
    assert_eq!(runs.get(), 1);
}

#[rstest]
fn test_memoized_function_keys_objects_by_content() {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let size = memoize_function(Function::new(1, move |arguments| {
        counter.set(counter.get() + 1);
        Ok(Value::from(arguments[0].as_object().map_or(0, BTreeMap::len)))
    }));

    let first = Value::from(serde_json::json!({ "a": 1, "b": [1, 2] }));
    let second = Value::from(serde_json::json!({ "b": [1, 2], "a": 1 }));

    assert_eq!(size.call(&[first]), Ok(Value::from(2)));
    assert_eq!(size.call(&[second]), Ok(Value::from(2)));
    assert_eq!(runs.get(), 1);
}

#[rstest]
fn test_memoized_function_does_not_cache_raised_errors() {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let failing = memoize_function(Function::new(1, move |_| {
        counter.set(counter.get() + 1);
        Err(Error::raised("boom"))
    }));

    assert_eq!(failing.call(&[Value::from(1)]), Err(Error::raised("boom")));
    assert_eq!(failing.call(&[Value::from(1)]), Err(Error::raised("boom")));
    assert_eq!(runs.get(), 2);
}

#[rstest]
fn test_memoized_function_rejects_function_arguments() {
    let runs = Rc::new(Cell::new(0));
    let upper = memoize_function(counting_upper(&runs));
    let argument = Value::from(Function::new(0, |_| Ok(Value::Null)));

    assert!(matches!(upper.call(&[argument]), Err(Error::InvalidArgument(_))));
    assert_eq!(runs.get(), 0);
}

#[rstest]
#[case(Value::Undefined, false, true)]
#[case(Value::Null, true, false)]
#[case(Value::from(f64::NAN), false, false)]
#[case(Value::from(f64::INFINITY), false, false)]
#[case(Value::from(f64::NEG_INFINITY), false, false)]
fn test_memoized_predicates_tell_empty_values_apart(
    #[case] value: Value,
    #[case] null: bool,
    #[case] undefined: bool,
) {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let memoized_is_null = memoize_function(Function::new(1, move |arguments| {
        counter.set(counter.get() + 1);
        Ok(Value::from(is_null(&arguments[0])))
    }));
    let memoized_is_undefined =
        memoize_function(Function::new(1, |arguments| Ok(Value::from(is_undefined(&arguments[0])))));

    // Warm the cache with every other empty value first.
    for other in [Value::Undefined, Value::Null, Value::from(f64::NAN), Value::from(f64::INFINITY)] {
        memoized_is_null.call(&[other.clone()]).unwrap();
        memoized_is_undefined.call(&[other]).unwrap();
    }

    assert_eq!(memoized_is_null.call(&[value.clone()]), Ok(Value::from(null)));
    assert_eq!(memoized_is_undefined.call(&[value]), Ok(Value::from(undefined)));
    assert!((4..=5).contains(&runs.get()));
}

// =============================================================================
// Laws
// =============================================================================

fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-50i32..50).prop_map(Value::from),
        Just(Value::from(f64::NAN)),
        Just(Value::from(f64::INFINITY)),
        Just(Value::from(f64::NEG_INFINITY)),
        "[a-z$]{0,3}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z$]{0,3}", inner, 0..4).prop_map(Value::Object),
        ]
    })
}

fn argument_list() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(value(), 0..4)
}

/// Structural equality where every `NaN` equals every other `NaN`.
fn same(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => {
            left == right || (left.is_nan() && right.is_nan())
        }
        (Value::Array(left), Value::Array(right)) => same_list(left, right),
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|((left_key, left), (right_key, right))| left_key == right_key && same(left, right))
        }
        _ => left == right,
    }
}

fn same_list(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(left, right)| same(left, right))
}

/// A memoized echo of its arguments and the number of times it really ran.
fn counting_echo() -> (Function, Rc<Cell<u32>>) {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let echo = memoize_function(Function::variadic(move |arguments| {
        counter.set(counter.get() + 1);
        Ok(Value::Array(arguments.to_vec()))
    }));
    (echo, runs)
}

proptest! {
    /// memoize(f)(a) == f(a), however often it is asked
    #[test]
    fn prop_memoize_is_idempotent(arguments in argument_list(), repeats in 1usize..4) {
        let (echo, runs) = counting_echo();
        let expected = Value::Array(arguments.clone());

        for _ in 0..repeats {
            let result = echo.call(&arguments).unwrap();
            prop_assert!(same(&result, &expected));
        }
        prop_assert_eq!(runs.get(), 1);
    }

    /// Distinct argument lists never share an entry.
    #[test]
    fn prop_memoize_discriminates_distinct_arguments(
        (first, second) in (argument_list(), argument_list())
            .prop_filter("lists must differ", |(first, second)| !same_list(first, second)),
    ) {
        let (echo, runs) = counting_echo();

        for _ in 0..2 {
            let result = echo.call(&first).unwrap();
            prop_assert!(same(&result, &Value::Array(first.clone())));
            let result = echo.call(&second).unwrap();
            prop_assert!(same(&result, &Value::Array(second.clone())));
        }
        prop_assert_eq!(runs.get(), 2);
    }
}
