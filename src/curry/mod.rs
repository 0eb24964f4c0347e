//! Currying and partial application.
//!
//! # Overview
//!
//! - [`partial`] / [`Partial`]: bind a prefix of arguments; every call runs
//!   the target immediately
//! - [`curry`] / [`curry_n`] / [`Curried`]: accumulate arguments over any
//!   number of calls until the arity is reached
//! - `curry!` (feature `derive`): compile-time currying of typed closures
//!
//! # Laws
//!
//! For a target of arity `n` and any split of `n` arguments into groups
//! `A1, A2, ..., Ak`:
//!
//! ```text
//! curry(f)(A1)(A2)...(Ak) == f(A1 ++ A2 ++ ... ++ Ak)
//! partial(f, a)(b)        == f(a, b)
//! ```
//!
//! # Arity
//!
//! [`curry`] reads the declared arity of the target once. Variadic targets
//! have no declared arity and are rejected; pass the arity explicitly with
//! [`curry_n`].
//!
//! # Examples
//!
//! ```rust
//! use xo::curry::{curry, partial};
//! use xo::value::{Function, Value};
//!
//! let add = Value::from(Function::new(2, |arguments| {
//!     let total: f64 = arguments.iter().filter_map(Value::as_number).sum();
//!     Ok(Value::from(total))
//! }));
//!
//! let add_five = partial(&add, [Value::from(5)]).unwrap();
//! assert_eq!(add_five.call(&[Value::from(3)]), Ok(Value::from(8)));
//!
//! let curried = curry(&add, []).unwrap();
//! let result = curried.call(&[Value::from(5)]).unwrap().call(&[Value::from(3)]).unwrap();
//! assert_eq!(result.complete(), Some(Value::from(8)));
//! ```

mod curried;
mod partial;

pub use curried::{Application, Curried};
pub use partial::Partial;

#[cfg(feature = "derive")]
pub use xo_derive::curry;

use crate::error::Error;
use crate::value::Value;

/// Binds `initial` in front of every call of `target`.
///
/// # Errors
///
/// Fails with [`Error::NotCallable`] when `target` is not a function.
pub fn partial(target: &Value, initial: impl IntoIterator<Item = Value>) -> Result<Partial, Error> {
    let function = target.callable("partial")?;
    Ok(Partial::new(function.clone(), initial))
}

/// Curries `target` using its declared arity.
///
/// # Errors
///
/// Fails with [`Error::NotCallable`] when `target` is not a function and
/// with [`Error::InvalidArgument`] when it is variadic.
pub fn curry(target: &Value, initial: impl IntoIterator<Item = Value>) -> Result<Curried, Error> {
    let function = target.callable("curry")?;
    Curried::new(function.clone(), initial)
}

/// Curries `target`, waiting for `arity` arguments.
///
/// # Errors
///
/// Fails with [`Error::NotCallable`] when `target` is not a function.
pub fn curry_n(
    target: &Value,
    arity: usize,
    initial: impl IntoIterator<Item = Value>,
) -> Result<Curried, Error> {
    let function = target.callable("curry")?;
    Ok(Curried::with_arity(function.clone(), arity, initial))
}
