//! Callable values for the dynamic layer.

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::error::Error;

type Body = dyn Fn(&Value, &[Value]) -> Result<Value, Error>;

/// The number of parameters a [`Function`] declares.
///
/// Curry uses the declared arity to decide when enough arguments have been
/// collected. Variadic functions have no such number and must be curried with
/// an explicit arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly this many parameters.
    Fixed(usize),
    /// Any number of parameters.
    Variadic,
}

impl Arity {
    /// Returns the parameter count of a fixed arity.
    #[inline]
    pub const fn fixed(self) -> Option<usize> {
        match self {
            Self::Fixed(count) => Some(count),
            Self::Variadic => None,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(count) => write!(formatter, "{count}"),
            Self::Variadic => formatter.write_str("variadic"),
        }
    }
}

/// A reference-counted dynamic function.
///
/// A `Function` receives a receiver value (the calling context, `Undefined`
/// when called plainly) and a slice of arguments, and either returns a
/// [`Value`] or raises an [`Error`]. Cloning a `Function` is cheap and yields
/// the same function: equality is identity.
///
/// # Examples
///
/// ```rust
/// use xo::value::{Function, Value};
///
/// let upper = Function::new(1, |arguments| {
///     let text = arguments.first().and_then(Value::as_str).unwrap_or_default();
///     Ok(Value::from(text.to_uppercase()))
/// });
///
/// assert_eq!(upper.call(&[Value::from("foo")]), Ok(Value::from("FOO")));
/// ```
#[derive(Clone)]
pub struct Function {
    body: Rc<Body>,
    arity: Arity,
    name: Option<Rc<str>>,
}

impl Function {
    /// Creates a function with a fixed arity that ignores its receiver.
    pub fn new<F>(arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Error> + 'static,
    {
        Self::with_receiver(Arity::Fixed(arity), move |_, arguments| body(arguments))
    }

    /// Creates a variadic function that ignores its receiver.
    pub fn variadic<F>(body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Error> + 'static,
    {
        Self::with_receiver(Arity::Variadic, move |_, arguments| body(arguments))
    }

    /// Creates a function that observes the receiver it is called against.
    ///
    /// ```rust
    /// use xo::value::{Arity, Function, Value};
    ///
    /// let describe = Function::with_receiver(Arity::Fixed(0), |receiver, _| {
    ///     Ok(Value::from(format!("called on {receiver}")))
    /// });
    /// let result = describe.call_with(&Value::from("bob"), &[]);
    /// assert_eq!(result, Ok(Value::from("called on bob")));
    /// ```
    pub fn with_receiver<F>(arity: Arity, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, Error> + 'static,
    {
        Self {
            body: Rc::new(body),
            arity,
            name: None,
        }
    }

    /// Attaches a display name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(Rc::from(name));
        self
    }

    /// Returns the display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the declared arity.
    #[inline]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Calls the function with an `Undefined` receiver.
    ///
    /// # Errors
    ///
    /// Whatever the function body raises.
    #[inline]
    pub fn call(&self, arguments: &[Value]) -> Result<Value, Error> {
        (self.body)(&Value::Undefined, arguments)
    }

    /// Calls the function against `receiver`.
    ///
    /// # Errors
    ///
    /// Whatever the function body raises.
    #[inline]
    pub fn call_with(&self, receiver: &Value, arguments: &[Value]) -> Result<Value, Error> {
        (self.body)(receiver, arguments)
    }

    /// Returns `true` when both handles refer to the same function.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Function")
            .field("name", &self.name())
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "function {}/{}",
            self.name().unwrap_or("anonymous"),
            self.arity
        )
    }
}
