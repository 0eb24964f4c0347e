//! Procedural macros for `xo`.
//!
//! # Available Attribute Macros
//!
//! - [`macro@memoize`]: caches a free function's results by its arguments
//!
//! # Available Function-like Macros
//!
//! - [`curry!`]: converts a multi-argument closure or function into curried
//!   form
//!
//! Both are re-exported by `xo` (`xo::memoize::memoize` and
//! `xo::curry::curry`), and the generated code refers to `::xo`, so depend on
//! them through that crate.
//!
//! # Example: Memoizing
//!
//! ```rust,ignore
//! use xo::memoize::memoize;
//!
//! #[memoize]
//! fn fibonacci(n: u64) -> u64 {
//!     if n < 2 { n } else { fibonacci(n - 1) + fibonacci(n - 2) }
//! }
//!
//! assert_eq!(fibonacci(80), 23_416_728_348_467_685);
//! ```
//!
//! # Example: Currying
//!
//! ```rust,ignore
//! use xo::curry::curry;
//!
//! let add = curry!(|a: i32, b: i32| a + b);
//! let add_five = add(5);
//! assert_eq!(add_five(10), 15);
//! assert_eq!(add_five(20), 25);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod curry;
mod memoize;

use proc_macro::TokenStream;

/// Memoizes a free function.
///
/// Results are cached per thread, keyed by a JSON rendering of the
/// arguments, so every parameter type must implement `serde::Serialize` and
/// the return type must implement `Clone`. Calls whose arguments cannot be
/// rendered (for example maps keyed by tuples) run uncached.
///
/// # Restrictions
///
/// - No `self` receiver, generics, or `async`
/// - Every parameter must be a plain identifier (`mut` is allowed)
///
/// # Example
///
/// ```rust,ignore
/// use xo::memoize::memoize;
///
/// #[memoize]
/// fn slow_square(n: u32) -> u32 {
///     std::thread::sleep(std::time::Duration::from_millis(50));
///     n * n
/// }
///
/// assert_eq!(slow_square(12), 144);
/// assert_eq!(slow_square(12), 144); // cached
/// ```
#[proc_macro_attribute]
pub fn memoize(attribute: TokenStream, item: TokenStream) -> TokenStream {
    memoize::expand(attribute.into(), item.into()).into()
}

/// Converts a multi-argument closure or function into curried form.
///
/// # Syntax
///
/// ```text
/// curry!(|a, b, ...| body)   // closure form
/// curry!(function_name, N)   // function name + arity form
/// ```
///
/// # Behavior
///
/// `curry!(|a, b, c| body)` yields a closure taking `a` that returns a
/// closure taking `b` that returns a closure taking `c` that runs `body`.
/// Every intermediate closure is `Fn`, so partial applications can be reused.
/// Captured arguments are cloned out for each final call and must be
/// `Clone`.
///
/// # Errors
///
/// Fails to compile when the arity is below 2 or the input is neither a
/// closure nor a path followed by an integer literal.
///
/// # Example
///
/// ```rust,ignore
/// use xo::curry::curry;
///
/// fn volume(width: u32, height: u32, depth: u32) -> u32 {
///     width * height * depth
/// }
///
/// let curried = curry!(volume, 3);
/// let flat = curried(2)(3);
/// assert_eq!(flat(1), 6);
/// assert_eq!(flat(4), 24);
/// ```
#[proc_macro]
pub fn curry(input: TokenStream) -> TokenStream {
    curry::expand(input.into()).into()
}
