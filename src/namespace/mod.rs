//! The library namespace and its `noConflict` accessor.
//!
//! A host environment is modelled as an explicit [`Root`] binding table
//! instead of ambient global state. [`Namespace::install`] binds the library
//! object under [`NAME`], remembering whatever was bound there before;
//! [`Namespace::no_conflict`] puts that previous binding back and hands the
//! library object to the caller, so it can live under another name.
//!
//! # Examples
//!
//! ```rust
//! use xo::namespace::{NAME, Namespace, Root};
//! use xo::value::Value;
//!
//! let mut root = Root::new();
//! root.set(NAME, Value::from("someone else's xo"));
//!
//! let namespace = Namespace::install(&mut root);
//! assert!(root.get(NAME).and_then(|xo| xo.get("memoize")).is_some());
//!
//! let ox = namespace.no_conflict(&mut root);
//! assert_eq!(root.get(NAME), Some(&Value::from("someone else's xo")));
//! assert!(ox.get("flatten").is_some());
//! ```

mod exports;

pub use exports::library;

use std::collections::BTreeMap;

use crate::value::Value;

/// The name the library binds itself under.
pub const NAME: &str = "xo";

/// A table of named bindings standing in for a host's global scope.
#[derive(Debug, Clone, Default)]
pub struct Root {
    bindings: BTreeMap<String, Value>,
}

impl Root {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Binds `value` to `name`, returning the previous binding.
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        self.bindings.insert(name.to_owned(), value)
    }

    /// Removes the binding for `name`, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }
}

/// An installed library together with the binding it displaced.
#[derive(Debug, Clone)]
pub struct Namespace {
    library: Value,
    previous: Option<Value>,
}

impl Namespace {
    /// Binds a fresh library object under [`NAME`] in `root`.
    ///
    /// The binding found there beforehand is captured once, now, and is what
    /// [`Namespace::no_conflict`] restores later.
    pub fn install(root: &mut Root) -> Self {
        let library = library();
        let previous = root.set(NAME, library.clone());
        log::debug!(
            "namespace: installed {NAME} (previous binding: {})",
            previous.as_ref().map_or("none", |value| value.kind().name())
        );
        Self { library, previous }
    }

    /// The library object.
    pub const fn library(&self) -> &Value {
        &self.library
    }

    /// The binding captured at install time.
    pub const fn previous(&self) -> Option<&Value> {
        self.previous.as_ref()
    }

    /// Restores the captured binding of [`NAME`] in `root` and returns the
    /// library object.
    ///
    /// When nothing was bound at install time the name is removed.
    pub fn no_conflict(&self, root: &mut Root) -> Value {
        match &self.previous {
            Some(previous) => {
                root.set(NAME, previous.clone());
            }
            None => {
                root.remove(NAME);
            }
        }
        log::debug!("namespace: restored previous binding of {NAME}");
        self.library.clone()
    }
}
