//! Memoized wrappers around typed closures.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use super::{Cache, CacheKey};
use crate::error::InvalidArgumentError;

/// A function whose results are cached by argument.
///
/// Created by [`memoize`](super::memoize). Functions of several arguments
/// take them as a tuple.
///
/// # Examples
///
/// ```rust
/// use std::cell::Cell;
/// use xo::memoize::memoize;
///
/// let runs = Cell::new(0);
/// let upper = memoize(|text: String| {
///     runs.set(runs.get() + 1);
///     text.to_uppercase()
/// });
///
/// assert_eq!(upper.call("foo".to_owned()).unwrap(), "FOO");
/// assert_eq!(upper.call("foo".to_owned()).unwrap(), "FOO");
/// assert_eq!(runs.get(), 1);
/// ```
pub struct Memoized<F, A, R> {
    function: F,
    cache: Cache<R>,
    marker: PhantomData<fn(A) -> R>,
}

impl<F, A, R> Memoized<F, A, R>
where
    F: Fn(A) -> R,
    A: Serialize,
    R: Clone,
{
    /// Wraps `function` with an empty cache.
    pub fn new(function: F) -> Self {
        Self {
            function,
            cache: Cache::new(),
            marker: PhantomData,
        }
    }

    /// Returns the cached result for `arguments`, calling the wrapped
    /// function on the first occurrence.
    ///
    /// # Errors
    ///
    /// Fails, without calling the wrapped function, when the arguments
    /// cannot be serialized into a cache key.
    pub fn call(&self, arguments: A) -> Result<R, InvalidArgumentError> {
        let key = CacheKey::derive(&arguments)?;
        Ok(self
            .cache
            .get_or_insert_with(key, || (self.function)(arguments)))
    }
}

impl<F, A, R> Memoized<F, A, R> {
    /// Returns the underlying cache.
    pub const fn cache(&self) -> &Cache<R> {
        &self.cache
    }

    /// Discards the cache and returns the wrapped function.
    pub fn into_inner(self) -> F {
        self.function
    }
}

impl<F, A, R> fmt::Debug for Memoized<F, A, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Memoized")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// A memoized fallible function.
///
/// Only successful results are cached; an error is returned to the caller
/// and the next call with the same arguments runs the function again. Key
/// derivation failures are converted into the function's own error type.
///
/// # Examples
///
/// ```rust
/// use xo::error::InvalidArgumentError;
/// use xo::memoize::try_memoize;
///
/// #[derive(Debug, PartialEq)]
/// enum ParseError {
///     Invalid,
///     Key,
/// }
///
/// impl From<InvalidArgumentError> for ParseError {
///     fn from(_: InvalidArgumentError) -> Self {
///         Self::Key
///     }
/// }
///
/// let parse = try_memoize(|text: String| text.parse::<i32>().map_err(|_| ParseError::Invalid));
///
/// assert_eq!(parse.call("42".to_owned()), Ok(42));
/// assert_eq!(parse.call("nope".to_owned()), Err(ParseError::Invalid));
/// assert_eq!(parse.cache().len(), 1);
/// ```
pub struct TryMemoized<F, A, R, E> {
    function: F,
    cache: Cache<R>,
    marker: PhantomData<fn(A) -> Result<R, E>>,
}

impl<F, A, R, E> TryMemoized<F, A, R, E>
where
    F: Fn(A) -> Result<R, E>,
    A: Serialize,
    R: Clone,
    E: From<InvalidArgumentError>,
{
    /// Wraps `function` with an empty cache.
    pub fn new(function: F) -> Self {
        Self {
            function,
            cache: Cache::new(),
            marker: PhantomData,
        }
    }

    /// Returns the cached result for `arguments`, calling the wrapped
    /// function until it succeeds once.
    ///
    /// # Errors
    ///
    /// Returns the wrapped function's error, or the converted key error when
    /// the arguments cannot be serialized.
    pub fn call(&self, arguments: A) -> Result<R, E> {
        let key = CacheKey::derive(&arguments)?;
        self.cache
            .try_get_or_insert_with(key, || (self.function)(arguments))
    }
}

impl<F, A, R, E> TryMemoized<F, A, R, E> {
    /// Returns the underlying cache.
    pub const fn cache(&self) -> &Cache<R> {
        &self.cache
    }
}

impl<F, A, R, E> fmt::Debug for TryMemoized<F, A, R, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TryMemoized")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::collections::HashMap;

    #[rstest]
    fn test_multiple_arguments_as_tuple() {
        let join = Memoized::new(|(first, second, third): (&str, &str, &str)| {
            [first, second, third].join(", ")
        });
        assert_eq!(join.call(("foo", "bar", "baz")).unwrap(), "foo, bar, baz");
    }

    #[rstest]
    fn test_repeated_and_interleaved_calls() {
        let runs = Cell::new(0);
        let upper = Memoized::new(|text: &str| {
            runs.set(runs.get() + 1);
            text.to_uppercase()
        });

        let hello = upper.call("hello").unwrap();
        upper.call("hello").unwrap();
        let world = upper.call("world").unwrap();
        upper.call("world").unwrap();
        upper.call("hello").unwrap();

        assert_eq!(format!("{hello} {world} {}", runs.get()), "HELLO WORLD 2");
    }

    #[rstest]
    fn test_falsy_results_are_cached() {
        let runs = Cell::new(0);
        let zero = Memoized::new(|_: i32| {
            runs.set(runs.get() + 1);
            0
        });

        zero.call(1).unwrap();
        zero.call(1).unwrap();
        assert_eq!(runs.get(), 1);
    }

    #[rstest]
    fn test_unserializable_arguments_do_not_call_function() {
        let runs = Cell::new(0);
        let count = Memoized::new(|map: HashMap<(i32, i32), i32>| {
            runs.set(runs.get() + 1);
            map.len()
        });

        assert!(count.call(HashMap::from([((1, 2), 3)])).is_err());
        assert_eq!(runs.get(), 0);
    }

    #[rstest]
    fn test_try_memoized_retries_after_failure() {
        let runs = Cell::new(0);
        let flaky = TryMemoized::new(|value: i32| -> Result<i32, crate::error::Error> {
            runs.set(runs.get() + 1);
            if runs.get() == 1 {
                Err(crate::error::Error::raised("first attempt fails"))
            } else {
                Ok(value * 2)
            }
        });

        assert!(flaky.call(4).is_err());
        assert_eq!(flaky.call(4), Ok(8));
        assert_eq!(flaky.call(4), Ok(8));
        assert_eq!(runs.get(), 2);
    }
}
