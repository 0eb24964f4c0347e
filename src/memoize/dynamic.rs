//! Memoization of dynamic [`Function`]s.

use super::{Cache, CacheKey};
use crate::value::{Function, Value};

/// Wraps a dynamic function so that repeated argument lists are answered
/// from a private cache.
///
/// The key covers the arguments only; the receiver is passed through to the
/// wrapped function on a miss but does not take part in the lookup. The
/// returned function keeps the arity and name of the original. Raised errors
/// are propagated and never cached, and arguments containing functions fail
/// with an invalid-argument error before anything is called.
///
/// # Examples
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use xo::memoize::memoize_function;
/// use xo::value::{Function, Value};
///
/// let runs = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&runs);
/// let upper = memoize_function(Function::new(1, move |arguments| {
///     counter.set(counter.get() + 1);
///     Ok(Value::from(arguments[0].to_string().to_uppercase()))
/// }));
///
/// assert_eq!(upper.call(&[Value::from("foo")]), Ok(Value::from("FOO")));
/// assert_eq!(upper.call(&[Value::from("foo")]), Ok(Value::from("FOO")));
/// assert_eq!(runs.get(), 1);
/// ```
pub fn memoize_function(function: Function) -> Function {
    let cache: Cache<Value> = Cache::new();
    let arity = function.arity();
    let name = function.name().map(str::to_owned);

    let memoized = Function::with_receiver(arity, move |receiver, arguments| {
        let key = CacheKey::derive(arguments)?;
        cache.try_get_or_insert_with(key, || function.call_with(receiver, arguments))
    });

    match name {
        Some(name) => memoized.named(&name),
        None => memoized,
    }
}
