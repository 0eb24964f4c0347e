//! Plain combinators.

/// Returns the value unchanged.
///
/// The unit of composition: `compose!(identity, f)` and `compose!(f, identity)`
/// both behave like `f`.
///
/// ```
/// use xo::compose::identity;
///
/// assert_eq!(identity(42), 42);
/// assert_eq!(identity("hello"), "hello");
/// ```
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}
