//! The single-threaded result cache.

use std::cell::RefCell;
use std::fmt;

use super::CacheKey;

#[cfg(feature = "fxhash")]
pub(crate) type CacheMap<V> = rustc_hash::FxHashMap<CacheKey, V>;

#[cfg(not(feature = "fxhash"))]
pub(crate) type CacheMap<V> = std::collections::HashMap<CacheKey, V>;

/// Maps cache keys to previously computed results.
///
/// There is no eviction: entries live as long as the cache. The map is never
/// borrowed while a computation runs, so a memoized function may call itself
/// recursively through the same cache.
///
/// This type is NOT thread-safe. See `SyncMemoized` (feature `sync`) for a
/// guarded variant.
///
/// # Examples
///
/// ```rust
/// use xo::memoize::{Cache, CacheKey};
///
/// let cache = Cache::new();
/// let key = CacheKey::derive(&("foo",)).unwrap();
///
/// assert_eq!(cache.get_or_insert_with(key.clone(), || "FOO".to_owned()), "FOO");
/// assert_eq!(cache.get(&key), Some("FOO".to_owned()));
/// assert_eq!(cache.len(), 1);
/// ```
pub struct Cache<R> {
    entries: RefCell<CacheMap<R>>,
}

impl<R> Cache<R> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(CacheMap::default()),
        }
    }

    /// Returns the number of cached results.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns `true` if a result is cached for `key`.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl<R: Clone> Cache<R> {
    /// Returns a copy of the result cached for `key`.
    pub fn get(&self, key: &CacheKey) -> Option<R> {
        self.entries.borrow().get(key).cloned()
    }

    /// Stores `value` under `key` unless a result is already present, and
    /// returns the stored result.
    pub fn insert(&self, key: CacheKey, value: R) -> R {
        self.entries
            .borrow_mut()
            .entry(key)
            .or_insert(value)
            .clone()
    }

    /// Returns the cached result for `key`, computing and storing it first on
    /// a miss.
    pub fn get_or_insert_with<F>(&self, key: CacheKey, compute: F) -> R
    where
        F: FnOnce() -> R,
    {
        if let Some(cached) = self.get(&key) {
            log::trace!("memoize: cache hit for {key}");
            return cached;
        }
        log::trace!("memoize: cache miss for {key}");
        let computed = compute();
        self.insert(key, computed)
    }

    /// Like [`Cache::get_or_insert_with`] for fallible computations.
    ///
    /// A failed computation stores nothing, so the next call with the same
    /// key runs the computation again.
    ///
    /// # Errors
    ///
    /// Returns the computation's error unchanged.
    pub fn try_get_or_insert_with<F, E>(&self, key: CacheKey, compute: F) -> Result<R, E>
    where
        F: FnOnce() -> Result<R, E>,
    {
        if let Some(cached) = self.get(&key) {
            log::trace!("memoize: cache hit for {key}");
            return Ok(cached);
        }
        log::trace!("memoize: cache miss for {key}");
        let computed = compute().inspect_err(|_| {
            log::debug!("memoize: computation for {key} failed, nothing cached");
        })?;
        Ok(self.insert(key, computed))
    }
}

impl<R> Default for Cache<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Cache<R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Cache")
            .field("len", &self.len())
            .finish()
    }
}
