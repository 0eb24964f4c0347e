//! Canonical cache keys.

use std::fmt;

use serde::Serialize;

use super::canonical;
use crate::error::InvalidArgumentError;

/// The canonical serialization of an argument list.
///
/// Keys are structural: the arguments are converted into a JSON document
/// whose object keys are ordered, then rendered compactly. Two argument lists
/// that are structurally equal always produce the same key, regardless of
/// identity or of the insertion order of map entries. Distinct lists never
/// share one: values JSON has no room for (`Value::Undefined`, `NaN`,
/// infinities, `Some(None)`) are written as tagged objects instead of
/// `null`.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use xo::memoize::CacheKey;
///
/// let first = HashMap::from([("a", 1), ("b", 2)]);
/// let second = HashMap::from([("b", 2), ("a", 1)]);
///
/// assert_eq!(CacheKey::derive(&first).unwrap(), CacheKey::derive(&second).unwrap());
/// assert_eq!(CacheKey::derive(&("foo", 1)).unwrap().as_str(), r#"["foo",1]"#);
/// assert_ne!(CacheKey::derive(&f64::NAN).unwrap(), CacheKey::derive(&()).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for `arguments`.
    ///
    /// # Errors
    ///
    /// Fails when the arguments cannot be represented as JSON, for example a
    /// map keyed by tuples or a dynamic [`Function`](crate::value::Function).
    pub fn derive<A>(arguments: &A) -> Result<Self, InvalidArgumentError>
    where
        A: Serialize + ?Sized,
    {
        canonical::to_json(arguments)
            .map(|document| Self(document.to_string()))
            .map_err(|error| InvalidArgumentError::new("memoize", error.to_string()))
    }

    /// Returns the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Serialize;
    use crate::value::Value;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Serialize)]
    struct Nested {
        a: &'static str,
        b: Inner,
    }

    #[derive(Serialize)]
    struct Inner {
        c: i32,
        d: &'static str,
    }

    #[rstest]
    fn test_struct_and_equal_map_share_a_key() {
        let nested = Nested {
            a: "foo",
            b: Inner { c: 1, d: "baz" },
        };
        let map = serde_json::json!({ "b": { "d": "baz", "c": 1 }, "a": "foo" });

        assert_eq!(CacheKey::derive(&nested), CacheKey::derive(&map));
    }

    #[rstest]
    fn test_distinct_arguments_have_distinct_keys() {
        assert_ne!(CacheKey::derive(&("hello",)), CacheKey::derive(&("world",)));
        assert_ne!(CacheKey::derive(&(1, 2)), CacheKey::derive(&(2, 1)));
    }

    #[rstest]
    #[case(Value::Undefined, Value::Null)]
    #[case(Value::Null, Value::from(f64::NAN))]
    #[case(Value::from(f64::NAN), Value::from(f64::INFINITY))]
    #[case(Value::from(f64::INFINITY), Value::from(f64::NEG_INFINITY))]
    #[case(Value::Undefined, Value::from(f64::NEG_INFINITY))]
    fn test_values_without_json_form_stay_apart(#[case] left: Value, #[case] right: Value) {
        assert_ne!(CacheKey::derive(&[left]), CacheKey::derive(&[right]));
    }

    #[rstest]
    fn test_optional_float_keys() {
        assert_ne!(CacheKey::derive(&None::<f64>), CacheKey::derive(&Some(f64::NAN)));
        assert_eq!(CacheKey::derive(&Some(2.5)), CacheKey::derive(&2.5));
    }

    #[rstest]
    fn test_tuple_keyed_map_is_rejected() {
        let map = HashMap::from([((1, 2), "pair")]);
        let error = CacheKey::derive(&map).unwrap_err();
        assert_eq!(error.operation, "memoize");
    }

    #[rstest]
    fn test_integer_keys_are_accepted() {
        let map = BTreeMap::from([(1, "one"), (2, "two")]);
        assert_eq!(
            CacheKey::derive(&map).unwrap().as_str(),
            r#"{"1":"one","2":"two"}"#
        );
    }
}
