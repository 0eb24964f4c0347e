#![cfg(feature = "derive")]
//! Tests for the `#[memoize]` attribute and the `curry!` macro.

use std::cell::Cell;
use std::collections::BTreeMap;

use rstest::rstest;
use xo::curry::curry;
use xo::memoize::memoize;

// =============================================================================
// #[memoize]
// =============================================================================

thread_local! {
    static FIBONACCI_RUNS: Cell<u32> = const { Cell::new(0) };
    static LABEL_RUNS: Cell<u32> = const { Cell::new(0) };
}

#[memoize]
fn fibonacci(n: u64) -> u64 {
    FIBONACCI_RUNS.with(|runs| runs.set(runs.get() + 1));
    if n < 2 { n } else { fibonacci(n - 1) + fibonacci(n - 2) }
}

/// Joins a label and a count.
#[memoize]
pub fn label(prefix: String, mut count: u32) -> String {
    LABEL_RUNS.with(|runs| runs.set(runs.get() + 1));
    count += 1;
    format!("{prefix}-{count}")
}

#[memoize]
fn entry_count(entries: BTreeMap<(u8, u8), u8>) -> usize {
    entries.len()
}

#[rstest]
fn test_recursive_calls_hit_the_cache() {
    assert_eq!(fibonacci(50), 12_586_269_025);
    assert_eq!(FIBONACCI_RUNS.with(Cell::get), 51);

    assert_eq!(fibonacci(50), 12_586_269_025);
    assert_eq!(FIBONACCI_RUNS.with(Cell::get), 51);
}

#[rstest]
fn test_every_argument_is_part_of_the_key() {
    assert_eq!(label("a".to_owned(), 1), "a-2");
    assert_eq!(label("a".to_owned(), 1), "a-2");
    assert_eq!(label("a".to_owned(), 2), "a-3");
    assert_eq!(label("b".to_owned(), 1), "b-2");
    assert_eq!(LABEL_RUNS.with(Cell::get), 3);
}

#[rstest]
fn test_unkeyable_arguments_run_uncached() {
    let entries = BTreeMap::from([((1, 2), 3), ((4, 5), 6)]);
    assert_eq!(entry_count(entries.clone()), 2);
    assert_eq!(entry_count(entries), 2);
}

// =============================================================================
// curry!
// =============================================================================

fn volume(width: u32, height: u32, depth: u32) -> u32 {
    width * height * depth
}

#[rstest]
fn test_curry_closure() {
    let add = curry!(|a: i32, b: i32| a + b);
    let add_five = add(5);
    assert_eq!(add_five(3), 8);
    assert_eq!(add_five(10), 15);
}

#[rstest]
fn test_curry_function_with_arity() {
    let curried = curry!(volume, 3);
    let flat = curried(2)(3);
    assert_eq!(flat(1), 6);
    assert_eq!(flat(4), 24);
    assert_eq!(curried(1)(1)(1), 1);
}

#[rstest]
fn test_curry_clones_captured_values() {
    let join = curry!(|left: String, middle: String, right: String| format!("{left}{middle}{right}"));
    let prefixed = join("<".to_owned());
    let wrapped = prefixed("-".to_owned());

    assert_eq!(wrapped(">".to_owned()), "<->");
    assert_eq!(wrapped("|".to_owned()), "<-|");
    assert_eq!(prefixed("+".to_owned())(">".to_owned()), "<+>");
}
