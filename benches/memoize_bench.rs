//! Benchmark for memoization: key derivation, cache hits and misses.
//!
//! Measures the typed memoizer against the plain function and the dynamic
//! `memoize_function` wrapper.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;
use xo::memoize::{CacheKey, memoize, memoize_function};
use xo::value::{Function, Value};

// =============================================================================
// Key derivation
// =============================================================================

fn benchmark_cache_key(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("cache_key");

    group.bench_function("scalar_tuple", |bencher| {
        bencher.iter(|| CacheKey::derive(black_box(&(42_u64, "label", true))));
    });

    for size in [10, 100, 1000] {
        let map: BTreeMap<String, u64> = (0..size).map(|index| (format!("k{index}"), index)).collect();
        group.bench_with_input(BenchmarkId::new("map_entries", size), &map, |bencher, map| {
            bencher.iter(|| CacheKey::derive(black_box(map)));
        });
    }

    group.finish();
}

// =============================================================================
// Typed memoizer
// =============================================================================

fn slow_sum(limit: u64) -> u64 {
    (0..limit).fold(0, |total, value| total.wrapping_add(value * value))
}

fn benchmark_memoized_call(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("memoized_call");

    group.bench_function("uncached", |bencher| {
        bencher.iter(|| slow_sum(black_box(10_000)));
    });

    let memoized = memoize(slow_sum);
    let _ = memoized.call(10_000);
    group.bench_function("cache_hit", |bencher| {
        bencher.iter(|| memoized.call(black_box(10_000)));
    });

    group.bench_function("cache_miss", |bencher| {
        bencher.iter(|| {
            let fresh = memoize(slow_sum);
            fresh.call(black_box(10_000))
        });
    });

    group.finish();
}

// =============================================================================
// Dynamic memoizer
// =============================================================================

fn benchmark_memoized_function(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("memoized_function");

    let upper = Function::new(1, |arguments| {
        Ok(Value::from(arguments[0].to_string().to_uppercase()))
    });
    let memoized = memoize_function(upper.clone());
    let arguments = [Value::from("a fairly ordinary sentence")];

    group.bench_function("plain", |bencher| {
        bencher.iter(|| upper.call(black_box(&arguments)));
    });
    group.bench_function("cache_hit", |bencher| {
        bencher.iter(|| memoized.call(black_box(&arguments)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_cache_key,
    benchmark_memoized_call,
    benchmark_memoized_function
);

criterion_main!(benches);
