//! A memoizer that can be shared between threads.

use std::fmt;
use std::marker::PhantomData;

use parking_lot::Mutex;
use serde::Serialize;

use super::CacheKey;
use super::cache::CacheMap;
use crate::error::InvalidArgumentError;

/// A memoized function guarded by a mutex.
///
/// The lock covers cache reads and inserts only; the wrapped function runs
/// unlocked. If two threads miss on the same key at once, both compute, the
/// first insert wins and both callers receive the stored result.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use xo::memoize::SyncMemoized;
///
/// let square = Arc::new(SyncMemoized::new(|value: u64| value * value));
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let square = Arc::clone(&square);
///         thread::spawn(move || square.call(12).unwrap())
///     })
///     .collect();
///
/// for handle in handles {
///     assert_eq!(handle.join().unwrap(), 144);
/// }
/// assert_eq!(square.len(), 1);
/// ```
pub struct SyncMemoized<F, A, R> {
    function: F,
    entries: Mutex<CacheMap<R>>,
    marker: PhantomData<fn(A) -> R>,
}

impl<F, A, R> SyncMemoized<F, A, R>
where
    F: Fn(A) -> R,
    A: Serialize,
    R: Clone,
{
    /// Wraps `function` with an empty cache.
    pub fn new(function: F) -> Self {
        Self {
            function,
            entries: Mutex::new(CacheMap::default()),
            marker: PhantomData,
        }
    }

    /// Returns the cached result for `arguments`, calling the wrapped
    /// function on a miss.
    ///
    /// # Errors
    ///
    /// Fails when the arguments cannot be serialized into a cache key.
    pub fn call(&self, arguments: A) -> Result<R, InvalidArgumentError> {
        let key = CacheKey::derive(&arguments)?;
        if let Some(cached) = self.entries.lock().get(&key).cloned() {
            log::trace!("memoize: cache hit for {key}");
            return Ok(cached);
        }
        log::trace!("memoize: cache miss for {key}");
        let computed = (self.function)(arguments);
        Ok(self.entries.lock().entry(key).or_insert(computed).clone())
    }
}

impl<F, A, R> SyncMemoized<F, A, R> {
    /// Returns the number of cached results.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<F, A, R> fmt::Debug for SyncMemoized<F, A, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SyncMemoized")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(SyncMemoized<fn(u32) -> u32, u32, u32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[rstest]
    fn test_each_key_computed_once_per_thread_group() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&runs);
        let double = Arc::new(SyncMemoized::new(move |value: u32| {
            counted.fetch_add(1, Ordering::SeqCst);
            value * 2
        }));

        for value in 0..10 {
            assert_eq!(double.call(value).unwrap(), value * 2);
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let double = Arc::clone(&double);
                thread::spawn(move || (0..10).map(|value| double.call(value).unwrap()).sum::<u32>())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 90);
        }
        assert_eq!(runs.load(Ordering::SeqCst), 10);
        assert_eq!(double.len(), 10);
    }
}
