//! Type predicates over [`Value`].
//!
//! Each predicate is a plain variant check. They are generated from a single
//! table so that the family stays in step with [`Kind`].
//!
//! ```rust
//! use xo::predicate::{is_boolean, is_string};
//! use xo::value::Value;
//!
//! assert!(is_boolean(&Value::from(true)));
//! assert!(!is_boolean(&Value::from("true")));
//! assert!(is_string(&Value::from("true")));
//! ```

use crate::value::{Kind, Value};

macro_rules! define_predicates {
    ($($kind:ident),+ $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Returns `true` when the value is a [`Value::" $kind "`]."]
                #[inline]
                pub fn [<is_ $kind:snake>](value: &Value) -> bool {
                    value.kind() == Kind::$kind
                }
            )+
        }
    };
}

define_predicates!(Undefined, Null, Boolean, Number, String, Array, Object, Function);
