//! Null-guarded invocation.

use crate::value::{Function, Value};

/// Wraps `function` so that it only runs when every argument is present.
///
/// The returned function yields `Undefined` without calling `function` when
/// it receives no arguments or any `Null`/`Undefined` argument. Otherwise
/// the receiver and arguments are forwarded unchanged. Arity and name are
/// kept.
///
/// # Examples
///
/// ```rust
/// use xo::compose::maybe;
/// use xo::value::{Function, Value};
///
/// let sum = maybe(Function::new(2, |arguments| {
///     Ok(Value::from(arguments.iter().filter_map(Value::as_number).sum::<f64>()))
/// }));
///
/// assert_eq!(sum.call(&[Value::from(2), Value::from(3)]), Ok(Value::from(5)));
/// assert_eq!(sum.call(&[Value::Null, Value::from(3)]), Ok(Value::Undefined));
/// ```
pub fn maybe(function: Function) -> Function {
    let name = function.name().map(str::to_owned);
    let guarded = Function::with_receiver(function.arity(), move |receiver, arguments| {
        if arguments.is_empty() || arguments.iter().any(Value::is_nullish) {
            log::trace!("maybe: skipped call with missing arguments");
            return Ok(Value::Undefined);
        }
        function.call_with(receiver, arguments)
    });
    match name {
        Some(name) => guarded.named(&name),
        None => guarded,
    }
}
