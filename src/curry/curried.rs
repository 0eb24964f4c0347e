//! Arity-driven argument accumulation.

use smallvec::SmallVec;

use crate::error::Error;
use crate::value::{Arity, Function, Value};

type BoundArguments = SmallVec<[Value; 4]>;

/// A function collecting arguments until its arity is reached.
///
/// Each call appends its arguments to the ones already bound. While fewer
/// than `arity` arguments are bound the call yields
/// [`Application::Pending`] with a new `Curried`; once enough are present the
/// target runs with every bound argument (extra ones included) and the call
/// yields [`Application::Complete`]. A `Curried` is never modified by a
/// call, so every link of a chain can be reused.
///
/// The receiver given to [`Curried::call_with`] is remembered by the pending
/// links it produces and used when the target finally runs.
///
/// # Examples
///
/// ```rust
/// use xo::curry::Curried;
/// use xo::value::{Function, Value};
///
/// let sum = Function::new(3, |arguments| {
///     Ok(Value::from(arguments.iter().filter_map(Value::as_number).sum::<f64>()))
/// });
/// let curried = Curried::new(sum, []).unwrap();
///
/// let bulk = curried.call(&[Value::from(1), Value::from(2), Value::from(3)]).unwrap();
/// let stepwise = curried
///     .call(&[Value::from(1)])
///     .and_then(|application| application.call(&[Value::from(2)]))
///     .and_then(|application| application.call(&[Value::from(3)]))
///     .unwrap();
///
/// assert_eq!(bulk.complete(), Some(Value::from(6)));
/// assert_eq!(stepwise.complete(), Some(Value::from(6)));
/// ```
#[derive(Debug, Clone)]
pub struct Curried {
    function: Function,
    arity: usize,
    bound: BoundArguments,
    receiver: Option<Value>,
}

/// Outcome of calling a [`Curried`].
#[derive(Debug, Clone)]
pub enum Application {
    /// Still short of the arity; holds the next link of the chain.
    Pending(Curried),
    /// The target ran and returned this value.
    Complete(Value),
}

impl Curried {
    /// Curries `function` using its declared arity.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidArgument`] when `function` is variadic,
    /// since it has no parameter count to wait for. Use
    /// [`Curried::with_arity`] to supply one.
    pub fn new(function: Function, initial: impl IntoIterator<Item = Value>) -> Result<Self, Error> {
        let Some(arity) = function.arity().fixed() else {
            return Err(Error::invalid_argument(
                "curry",
                "variadic function needs an explicit arity",
            ));
        };
        Ok(Self::with_arity(function, arity, initial))
    }

    /// Curries `function`, waiting for `arity` arguments.
    pub fn with_arity(
        function: Function,
        arity: usize,
        initial: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self {
            function,
            arity,
            bound: initial.into_iter().collect(),
            receiver: None,
        }
    }

    /// The number of arguments the target waits for.
    #[inline]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// The number of arguments still missing.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.arity.saturating_sub(self.bound.len())
    }

    /// The arguments bound so far, in order.
    #[inline]
    pub fn bound_arguments(&self) -> &[Value] {
        &self.bound
    }

    /// Appends `arguments` and either returns the next link or runs the
    /// target.
    ///
    /// # Errors
    ///
    /// Whatever the target raises when it runs.
    pub fn call(&self, arguments: &[Value]) -> Result<Application, Error> {
        self.apply(self.receiver.clone(), arguments)
    }

    /// Like [`Curried::call`], binding `receiver` as the calling context for
    /// the rest of the chain.
    ///
    /// # Errors
    ///
    /// Whatever the target raises when it runs.
    pub fn call_with(&self, receiver: &Value, arguments: &[Value]) -> Result<Application, Error> {
        self.apply(Some(receiver.clone()), arguments)
    }

    fn apply(&self, receiver: Option<Value>, arguments: &[Value]) -> Result<Application, Error> {
        let mut bound = self.bound.clone();
        bound.extend(arguments.iter().cloned());

        if bound.len() < self.arity {
            log::trace!("curry: {} of {} arguments bound", bound.len(), self.arity);
            return Ok(Application::Pending(Self {
                function: self.function.clone(),
                arity: self.arity,
                bound,
                receiver,
            }));
        }

        log::trace!("curry: saturated with {} arguments", bound.len());
        self.function
            .call_with(&receiver.unwrap_or_default(), &bound)
            .map(Application::Complete)
    }

    /// Turns the chain into a dynamic [`Function`] whose arity is the number
    /// of missing arguments.
    ///
    /// Calling it returns a `Value::Function` for the next link until the
    /// target runs. A plain call reuses the remembered receiver; calling it
    /// against a receiver binds that one instead. An explicit
    /// `Value::Undefined` receiver counts as no receiver, so it cannot clear
    /// one remembered earlier in the chain.
    pub fn into_function(self) -> Function {
        let remaining = self.remaining();
        let name = self.function.name().map(str::to_owned);
        let function = Function::with_receiver(Arity::Fixed(remaining), move |receiver, arguments| {
            let application = if matches!(receiver, Value::Undefined) {
                self.call(arguments)
            } else {
                self.call_with(receiver, arguments)
            };
            application.map(Application::into_value)
        });
        match name {
            Some(name) => function.named(&name),
            None => function,
        }
    }
}

impl Application {
    /// Returns `true` if the target ran.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Returns the target's result, or `None` while pending.
    pub fn complete(self) -> Option<Value> {
        match self {
            Self::Complete(value) => Some(value),
            Self::Pending(_) => None,
        }
    }

    /// Returns the next link, or `None` once complete.
    pub fn pending(self) -> Option<Curried> {
        match self {
            Self::Pending(curried) => Some(curried),
            Self::Complete(_) => None,
        }
    }

    /// Collapses the outcome into a value; a pending link becomes a
    /// `Value::Function`.
    pub fn into_value(self) -> Value {
        match self {
            Self::Complete(value) => value,
            Self::Pending(curried) => Value::Function(curried.into_function()),
        }
    }

    /// Continues the chain with `arguments`.
    ///
    /// A pending link is called; a complete result is called as a function,
    /// so curried functions returning functions keep chaining.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotCallable`] when a complete result is not a
    /// function, otherwise whatever the target raises.
    pub fn call(self, arguments: &[Value]) -> Result<Self, Error> {
        match self {
            Self::Pending(curried) => curried.call(arguments),
            Self::Complete(value) => value
                .callable("curry")?
                .call(arguments)
                .map(Self::Complete),
        }
    }
}
