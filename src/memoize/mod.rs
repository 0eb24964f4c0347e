//! Memoization: caching results by a canonical serialization of the
//! arguments.
//!
//! # Overview
//!
//! - [`memoize`]: wrap an infallible closure in a [`Memoized`]
//! - [`try_memoize`]: wrap a fallible closure in a [`TryMemoized`]; errors
//!   are never cached
//! - [`memoize_function`]: memoize a dynamic [`Function`](crate::value::Function)
//! - `SyncMemoized` (feature `sync`): a memoizer shared between threads
//! - `#[memoize]` (feature `derive`): memoize a free function in place
//!
//! Keys are derived by [`CacheKey::derive`], which is structural: equal
//! arguments share a key, whatever their identity. Caches are unbounded and
//! live as long as the wrapper that owns them.
//!
//! # Examples
//!
//! ```rust
//! use std::cell::Cell;
//! use xo::memoize::memoize;
//!
//! let runs = Cell::new(0);
//! let add = memoize(|(left, right): (i64, i64)| {
//!     runs.set(runs.get() + 1);
//!     left + right
//! });
//!
//! assert_eq!(add.call((1, 2)).unwrap(), 3);
//! assert_eq!(add.call((1, 2)).unwrap(), 3);
//! assert_eq!(add.call((2, 1)).unwrap(), 3);
//! assert_eq!(runs.get(), 2);
//! ```

mod cache;
mod canonical;
mod dynamic;
mod key;
mod memoized;
#[cfg(feature = "sync")]
mod sync;

pub use cache::Cache;
pub use dynamic::memoize_function;
pub use key::CacheKey;
pub use memoized::{Memoized, TryMemoized};
#[cfg(feature = "sync")]
pub use sync::SyncMemoized;

#[cfg(feature = "derive")]
pub use xo_derive::memoize;

use serde::Serialize;

use crate::error::InvalidArgumentError;

/// Returns a memoized version of `function`.
///
/// See [`Memoized`]. The attribute form `#[memoize]` (feature `derive`)
/// shares this name in the macro namespace.
pub fn memoize<F, A, R>(function: F) -> Memoized<F, A, R>
where
    F: Fn(A) -> R,
    A: Serialize,
    R: Clone,
{
    Memoized::new(function)
}

/// Returns a memoized version of the fallible `function`.
///
/// See [`TryMemoized`].
pub fn try_memoize<F, A, R, E>(function: F) -> TryMemoized<F, A, R, E>
where
    F: Fn(A) -> Result<R, E>,
    A: Serialize,
    R: Clone,
    E: From<InvalidArgumentError>,
{
    TryMemoized::new(function)
}
