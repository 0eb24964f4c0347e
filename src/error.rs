//! Error types for the dynamic layer and for cache key derivation.
//!
//! The library introduces very few failures of its own: a dynamic target
//! that turns out not to be callable, and arguments that cannot be turned
//! into a canonical cache key. Everything else is raised by the wrapped
//! functions and propagated unchanged.

/// A dynamic target was expected to be a function but was not.
///
/// # Examples
///
/// ```rust
/// use xo::error::NotCallableError;
///
/// let error = NotCallableError {
///     operation: "curry",
///     found: "number",
/// };
/// assert_eq!(format!("{error}"), "curry: expected a function, found number");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotCallableError {
    /// The operation that required a callable.
    pub operation: &'static str,
    /// The kind of value that was supplied instead.
    pub found: &'static str,
}

impl std::fmt::Display for NotCallableError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}: expected a function, found {}",
            self.operation, self.found
        )
    }
}

impl std::error::Error for NotCallableError {}

/// Arguments were rejected before any wrapped function ran.
///
/// Raised when arguments cannot be serialized into a cache key, when a
/// variadic function is curried without an explicit arity, and when a
/// dynamic export receives values of the wrong kind.
///
/// # Examples
///
/// ```rust
/// use xo::error::InvalidArgumentError;
///
/// let error = InvalidArgumentError::new("memoize", "functions cannot be serialized");
/// assert_eq!(
///     format!("{error}"),
///     "memoize: invalid argument: functions cannot be serialized"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgumentError {
    /// The operation that rejected its arguments.
    pub operation: &'static str,
    /// Human readable reason.
    pub reason: String,
}

impl InvalidArgumentError {
    /// Creates a new error for `operation`.
    pub fn new(operation: &'static str, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for InvalidArgumentError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}: invalid argument: {}",
            self.operation, self.reason
        )
    }
}

impl std::error::Error for InvalidArgumentError {}

/// Unified error type of the dynamic layer.
///
/// Dynamic functions signal their own failures with [`Error::Raised`]; the
/// binders and the memoizer pass such errors through untouched.
///
/// # Examples
///
/// ```rust
/// use xo::error::Error;
///
/// let error = Error::raised("division by zero");
/// assert_eq!(format!("{error}"), "division by zero");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A non-function value was used where a function was required.
    NotCallable(NotCallableError),
    /// Arguments were rejected before invocation.
    InvalidArgument(InvalidArgumentError),
    /// A failure raised by a wrapped function.
    Raised {
        /// The message supplied by the raising function.
        message: String,
    },
}

impl Error {
    /// Creates a [`Error::Raised`] carrying `message`.
    pub fn raised(message: impl Into<String>) -> Self {
        Self::Raised {
            message: message.into(),
        }
    }

    /// Creates a [`Error::InvalidArgument`] for `operation`.
    pub fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument(InvalidArgumentError::new(operation, reason))
    }

    /// Creates a [`Error::NotCallable`] for `operation`.
    pub const fn not_callable(operation: &'static str, found: &'static str) -> Self {
        Self::NotCallable(NotCallableError { operation, found })
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotCallable(error) => write!(formatter, "{error}"),
            Self::InvalidArgument(error) => write!(formatter, "{error}"),
            Self::Raised { message } => formatter.write_str(message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotCallable(error) => Some(error),
            Self::InvalidArgument(error) => Some(error),
            Self::Raised { .. } => None,
        }
    }
}

impl From<NotCallableError> for Error {
    fn from(error: NotCallableError) -> Self {
        Self::NotCallable(error)
    }
}

impl From<InvalidArgumentError> for Error {
    fn from(error: InvalidArgumentError) -> Self {
        Self::InvalidArgument(error)
    }
}
