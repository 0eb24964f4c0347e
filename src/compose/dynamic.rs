//! Composition of dynamic [`Function`]s.

use crate::error::Error;
use crate::value::{Function, Value};

/// Composes `functions` right to left.
///
/// The last function receives the call's receiver and all of its
/// arguments; every other function receives the previous result as its only
/// argument. The composed function has the arity of the last function.
///
/// # Errors
///
/// Fails with [`Error::InvalidArgument`] when `functions` is empty.
///
/// # Examples
///
/// ```rust
/// use xo::compose::compose;
/// use xo::value::{Function, Value};
///
/// let add = Function::new(2, |arguments| {
///     Ok(Value::from(arguments.iter().filter_map(Value::as_number).sum::<f64>()))
/// });
/// let double = Function::new(1, |arguments| {
///     Ok(Value::from(arguments[0].as_number().unwrap_or_default() * 2.0))
/// });
///
/// let double_sum = compose(vec![double, add]).unwrap();
/// assert_eq!(double_sum.call(&[Value::from(2), Value::from(3)]), Ok(Value::from(10)));
/// ```
pub fn compose(functions: Vec<Function>) -> Result<Function, Error> {
    chain("compose", functions.into_iter().rev())
}

/// Composes `functions` left to right.
///
/// The first function receives the call's receiver and all of its
/// arguments; the composed function has its arity.
///
/// # Errors
///
/// Fails with [`Error::InvalidArgument`] when `functions` is empty.
pub fn pipe(functions: Vec<Function>) -> Result<Function, Error> {
    chain("pipe", functions.into_iter())
}

fn chain(
    operation: &'static str,
    functions: impl Iterator<Item = Function>,
) -> Result<Function, Error> {
    let mut functions = functions;
    let Some(first) = functions.next() else {
        return Err(Error::invalid_argument(
            operation,
            "at least one function is required",
        ));
    };
    let rest: Vec<Function> = functions.collect();

    Ok(Function::with_receiver(first.arity(), move |receiver, arguments| {
        let initial = first.call_with(receiver, arguments)?;
        rest.iter().try_fold(initial, |value: Value, next| {
            next.call_with(receiver, std::slice::from_ref(&value))
        })
    }))
}
