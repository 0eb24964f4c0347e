//! # xo
//!
//! A small functional utility library: memoization, currying, partial
//! application, composition and a handful of collection helpers.
//!
//! ## Overview
//!
//! The library works at two levels.
//!
//! - **Typed**: ordinary Rust closures. [`memoize::memoize`] caches by a
//!   structural key derived from the arguments, `compose!` and `pipe!` chain
//!   closures, `curry!` curries a closure of known arity, and the
//!   [`collection`] helpers are generic over element types.
//! - **Dynamic**: a loosely typed [`value::Value`] and callable
//!   [`value::Function`], for code that has to mirror a loosely typed host.
//!   [`curry::curry`] and [`curry::partial`] accumulate arguments across
//!   calls, [`memoize::memoize_function`] memoizes a `Function`, and
//!   [`namespace::library`] gathers everything into one object that can be
//!   installed and withdrawn with [`namespace::Namespace`].
//!
//! ## Feature Flags
//!
//! - `compose`: composition macros and dynamic `compose`/`pipe`/`maybe`
//! - `memoize`: memoizers and cache keys
//! - `curry`: currying and partial application of dynamic functions
//! - `collection`: collection helpers
//! - `namespace`: the library object and `noConflict`
//! - `derive`: the `#[memoize]` attribute and `curry!` macro
//! - `sync`: `SyncMemoized`, a memoizer shared between threads
//! - `fxhash`: FxHash for cache tables
//! - `full`: everything above except `fxhash`
//!
//! ## Example
//!
//! ```rust
//! use xo::prelude::*;
//!
//! let square_then_add_one = pipe!(|x: i64| x * x, |x| x + 1);
//! let cached = memoize(square_then_add_one);
//!
//! assert_eq!(cached.call(4).unwrap(), 17);
//! assert_eq!(cached.cache().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the typed entry points and the dynamic value types.
///
/// # Usage
///
/// ```rust
/// use xo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::value::{Arity, Function, Value};

    #[cfg(feature = "compose")]
    pub use crate::compose::identity;
    #[cfg(feature = "compose")]
    pub use crate::{compose, pipe};

    #[cfg(feature = "memoize")]
    pub use crate::memoize::{memoize, try_memoize, CacheKey, Memoized, TryMemoized};

    #[cfg(feature = "sync")]
    pub use crate::memoize::SyncMemoized;

    #[cfg(feature = "curry")]
    pub use crate::curry::{Application, Curried, Partial};

    #[cfg(feature = "collection")]
    pub use crate::collection::*;
}

/// The library version, as published in the library object.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod predicate;
pub mod value;

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "memoize")]
pub mod memoize;

#[cfg(feature = "curry")]
pub mod curry;

#[cfg(feature = "collection")]
pub mod collection;

#[cfg(feature = "namespace")]
pub mod namespace;

static_assertions::assert_not_impl_any!(value::Value: Send, Sync);
static_assertions::assert_impl_all!(error::Error: Send, Sync, Clone);
