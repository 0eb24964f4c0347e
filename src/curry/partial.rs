//! Prefix binding.

use std::rc::Rc;

use crate::error::Error;
use crate::value::{Arity, Function, Value};

/// A function with a fixed prefix of arguments.
///
/// Every call runs the target at once with the bound prefix followed by the
/// call's own arguments, whether or not that satisfies the target's arity.
///
/// # Examples
///
/// ```rust
/// use xo::curry::Partial;
/// use xo::value::{Function, Value};
///
/// let greet = Function::new(2, |arguments| {
///     Ok(Value::from(format!("{} {}", arguments[0], arguments[1])))
/// });
/// let hi = Partial::new(greet, [Value::from("hi")]);
///
/// assert_eq!(hi.call(&[Value::from("Bob")]), Ok(Value::from("hi Bob")));
/// ```
#[derive(Debug, Clone)]
pub struct Partial {
    function: Function,
    bound: Rc<[Value]>,
}

impl Partial {
    /// Binds `initial` in front of every future call of `function`.
    pub fn new(function: Function, initial: impl IntoIterator<Item = Value>) -> Self {
        Self {
            function,
            bound: initial.into_iter().collect(),
        }
    }

    /// The bound prefix.
    #[inline]
    pub fn bound_arguments(&self) -> &[Value] {
        &self.bound
    }

    /// Runs the target with the prefix and `arguments`.
    ///
    /// # Errors
    ///
    /// Whatever the target raises.
    pub fn call(&self, arguments: &[Value]) -> Result<Value, Error> {
        self.call_with(&Value::Undefined, arguments)
    }

    /// Runs the target against `receiver` with the prefix and `arguments`.
    ///
    /// # Errors
    ///
    /// Whatever the target raises.
    pub fn call_with(&self, receiver: &Value, arguments: &[Value]) -> Result<Value, Error> {
        let mut all = Vec::with_capacity(self.bound.len() + arguments.len());
        all.extend_from_slice(&self.bound);
        all.extend_from_slice(arguments);
        self.function.call_with(receiver, &all)
    }

    /// Turns the binding into a variadic dynamic [`Function`] that forwards
    /// its receiver.
    pub fn into_function(self) -> Function {
        let name = self.function.name().map(str::to_owned);
        let function = Function::with_receiver(Arity::Variadic, move |receiver, arguments| {
            self.call_with(receiver, arguments)
        });
        match name {
            Some(name) => function.named(&name),
            None => function,
        }
    }
}
