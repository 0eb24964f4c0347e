//! Function composition utilities.
//!
//! # Overview
//!
//! Typed composition of ordinary Rust functions and closures:
//!
//! - [`compose!`]: compose right-to-left (mathematical composition)
//! - [`pipe!`]: compose left-to-right (data flow order)
//! - [`identity`]: the unit of composition
//!
//! Composition of dynamic [`Function`](crate::value::Function)s:
//!
//! - [`compose`] / [`pipe`]: the same orders over a list of functions
//! - [`maybe`]: skip the call when an argument is missing
//!
//! # Examples
//!
//! ```
//! use xo::{compose, pipe};
//!
//! fn add_one(x: i32) -> i32 { x + 1 }
//! fn double(x: i32) -> i32 { x * 2 }
//!
//! // compose!(f, g)(x) = f(g(x))
//! assert_eq!(compose!(add_one, double)(5), 11);
//!
//! // pipe!(f, g)(x) = g(f(x))
//! assert_eq!(pipe!(add_one, double)(5), 12);
//! ```
//!
//! # Laws
//!
//! - **Associativity**: `compose!(f, compose!(g, h)) == compose!(compose!(f, g), h)`
//! - **Left Identity**: `compose!(identity, f) == f`
//! - **Right Identity**: `compose!(f, identity) == f`
//! - **Pipe is reversed compose**: `pipe!(f, g) == compose!(g, f)`

mod compose_macro;
mod dynamic;
mod maybe;
mod pipe_macro;
mod utils;

pub use dynamic::{compose, pipe};
pub use maybe::maybe;
pub use utils::identity;
