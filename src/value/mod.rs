//! The dynamic value model.
//!
//! [`Value`] is a tagged union covering everything the dynamic layer passes
//! around: primitives, arrays, string-keyed objects and callable
//! [`Function`]s. Type inspection is a variant check (see
//! [`crate::predicate`]) rather than duck typing.
//!
//! Objects are stored in a [`BTreeMap`], so iteration and serialization order
//! is the key order. Two structurally equal values always serialize to the
//! same text, which is what the memoizer relies on for its cache keys.
//!
//! # Examples
//!
//! ```rust
//! use xo::value::{Kind, Value};
//!
//! let value = Value::from(vec![Value::from(1), Value::from("two")]);
//! assert_eq!(value.kind(), Kind::Array);
//! assert_eq!(value.to_string(), "1,two");
//! ```

mod function;

pub use function::{Arity, Function};

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Error;

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// [`Value::Undefined`]
    Undefined,
    /// [`Value::Null`]
    Null,
    /// [`Value::Boolean`]
    Boolean,
    /// [`Value::Number`]
    Number,
    /// [`Value::String`]
    String,
    /// [`Value::Array`]
    Array,
    /// [`Value::Object`]
    Object,
    /// [`Value::Function`]
    Function,
}

impl Kind {
    /// Lower-case name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// A boolean.
    Boolean(bool),
    /// A double precision number.
    Number(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    Array(Vec<Value>),
    /// A string-keyed map of values.
    Object(BTreeMap<String, Value>),
    /// A callable.
    Function(Function),
}

impl Value {
    /// Returns the variant tag.
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Undefined => Kind::Undefined,
            Self::Null => Kind::Null,
            Self::Boolean(_) => Kind::Boolean,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
            Self::Function(_) => Kind::Function,
        }
    }

    /// JavaScript-style truthiness.
    ///
    /// `false`, `0`, `NaN`, the empty string, `null` and `undefined` are
    /// falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Boolean(flag) => *flag,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::String(text) => !text.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Function(_) => true,
        }
    }

    /// Returns `true` for `Null` and `Undefined`.
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Returns the boolean payload.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the numeric payload.
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the array payload.
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the object payload.
    pub const fn as_object(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the function payload.
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the function payload or a [`Error::NotCallable`] naming
    /// `operation`.
    ///
    /// # Errors
    ///
    /// Fails when the value is not a function.
    pub fn callable(&self, operation: &'static str) -> Result<&Function, Error> {
        self.as_function()
            .ok_or_else(|| Error::not_callable(operation, self.kind().name()))
    }

    /// Calls the value with an `Undefined` receiver.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotCallable`] when the value is not a function,
    /// otherwise whatever the function raises.
    pub fn call(&self, arguments: &[Self]) -> Result<Self, Error> {
        self.callable("call")?.call(arguments)
    }

    /// Looks up `key` in an object. Missing keys and non-objects yield `None`.
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|entries| entries.get(key))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => formatter.write_str("undefined"),
            Self::Null => formatter.write_str("null"),
            Self::Boolean(flag) => write!(formatter, "{flag}"),
            Self::Number(number) if number.is_infinite() => {
                let sign = if number.is_sign_negative() { "-" } else { "" };
                write!(formatter, "{sign}Infinity")
            }
            Self::Number(number) => write!(formatter, "{number}"),
            Self::String(text) => formatter.write_str(text),
            Self::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(",")?;
                    }
                    if !item.is_nullish() {
                        write!(formatter, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Object(_) => formatter.write_str("[object Object]"),
            Self::Function(function) => write!(formatter, "{function}"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Boolean(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

#[allow(clippy::cast_precision_loss)]
impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Number(number as f64)
    }
}

#[allow(clippy::cast_precision_loss)]
impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Self::Number(number as f64)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(entries: BTreeMap<String, Self>) -> Self {
        Self::Object(entries)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterator: I) -> Self {
        Self::Array(iterator.into_iter().collect())
    }
}

impl FromIterator<(String, Self)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Self)>>(iterator: I) -> Self {
        Self::Object(iterator.into_iter().collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Boolean(flag),
            serde_json::Value::Number(number) => Self::Number(number.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(text) => Self::String(text),
            serde_json::Value::Array(items) => items.into_iter().map(Self::from).collect(),
            serde_json::Value::Object(entries) => entries
                .into_iter()
                .map(|(key, value)| (key, Self::from(value)))
                .collect(),
        }
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// Unit-struct name under which [`Value::Undefined`] serializes.
///
/// Plain JSON renders it as `null`; cache keys recognise the name and keep
/// it apart from [`Value::Null`].
pub(crate) const UNDEFINED: &str = "$undefined";

/// `Undefined` serializes as the unit struct `UNDEFINED` and `Null` as
/// unit. Functions refuse to serialize so that they can never become part of
/// a cache key.
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{Error as _, SerializeMap, SerializeSeq};

        match self {
            Self::Undefined => serializer.serialize_unit_struct(UNDEFINED),
            Self::Null => serializer.serialize_unit(),
            Self::Boolean(flag) => serializer.serialize_bool(*flag),
            Self::Number(number) => serializer.serialize_f64(*number),
            Self::String(text) => serializer.serialize_str(text),
            Self::Array(items) => {
                let mut sequence = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    sequence.serialize_element(item)?;
                }
                sequence.end()
            }
            Self::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Function(function) => Err(S::Error::custom(format!(
                "{function} cannot be serialized"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Undefined, false)]
    #[case(Value::Null, false)]
    #[case(Value::from(false), false)]
    #[case(Value::from(0), false)]
    #[case(Value::from(f64::NAN), false)]
    #[case(Value::from(""), false)]
    #[case(Value::from(true), true)]
    #[case(Value::from(-1), true)]
    #[case(Value::from("0"), true)]
    #[case(Value::Array(Vec::new()), true)]
    #[case(Value::Object(BTreeMap::new()), true)]
    fn test_truthiness(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    #[case(Value::from(42), "42")]
    #[case(Value::from(1.5), "1.5")]
    #[case(Value::from(f64::NEG_INFINITY), "-Infinity")]
    #[case(Value::from(vec![Value::from(1), Value::Null, Value::from("a")]), "1,,a")]
    #[case(Value::Object(BTreeMap::new()), "[object Object]")]
    fn test_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    fn test_callable_on_non_function_names_kind() {
        let error = Value::from(3).callable("curry").unwrap_err();
        assert_eq!(error, Error::not_callable("curry", "number"));
    }

    #[rstest]
    fn test_from_json_preserves_structure() {
        let json = serde_json::json!({ "a": [1, "x", null], "b": { "c": true } });
        let value = Value::from(json);

        assert_eq!(value.get("a").map(Value::kind), Some(Kind::Array));
        assert_eq!(
            value.get("b").and_then(|inner| inner.get("c")),
            Some(&Value::from(true))
        );
    }

    #[rstest]
    fn test_serialize_object_is_key_ordered() {
        let value: Value = [
            ("b".to_owned(), Value::from(2)),
            ("a".to_owned(), Value::from(1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"a":1.0,"b":2.0}"#);
    }

    #[rstest]
    fn test_serialize_function_fails() {
        let value = Value::from(Function::new(0, |_| Ok(Value::Null)));
        assert!(serde_json::to_string(&value).is_err());
    }
}
