//! The library object: every export adapted to dynamic arguments.

use std::collections::BTreeMap;

use crate::collection;
use crate::compose;
use crate::curry::{Curried, Partial};
use crate::error::Error;
use crate::memoize::memoize_function;
use crate::predicate;
use crate::value::{Function, Value};

/// Builds the library as an object of named functions plus `VERSION`.
///
/// Entry names are camelCase (`isBoolean`, `findIndex`, ...). Callbacks
/// passed to the collection entries are called with the element as their
/// only argument, and their results are judged by truthiness.
///
/// ```rust
/// use xo::namespace::library;
/// use xo::value::Value;
///
/// let xo = library();
/// let compact = xo.get("compact").unwrap();
/// let values = Value::from(vec![Value::from(1), Value::Null, Value::from(2)]);
///
/// assert_eq!(compact.call(&[values]), Ok(Value::from(vec![1, 2])));
/// ```
pub fn library() -> Value {
    let mut entries = BTreeMap::new();
    entries.insert("VERSION".to_owned(), Value::from(crate::VERSION));

    let predicates: [(&str, fn(&Value) -> bool); 8] = [
        ("isUndefined", predicate::is_undefined),
        ("isNull", predicate::is_null),
        ("isBoolean", predicate::is_boolean),
        ("isNumber", predicate::is_number),
        ("isString", predicate::is_string),
        ("isObject", predicate::is_object),
        ("isArray", predicate::is_array),
        ("isFunction", predicate::is_function),
    ];
    for (name, test) in predicates {
        export(
            &mut entries,
            name,
            Function::new(1, move |arguments| Ok(Value::from(test(&argument(arguments, 0))))),
        );
    }

    export(&mut entries, "partial", Function::variadic(partial));
    export(&mut entries, "curry", Function::variadic(curry));
    export(&mut entries, "memoize", Function::new(1, memoize));
    export(&mut entries, "maybe", Function::new(1, maybe));
    export(&mut entries, "compose", Function::variadic(|arguments| {
        compose::compose(functions("compose", arguments)?).map(Value::from)
    }));
    export(&mut entries, "pipe", Function::variadic(|arguments| {
        compose::pipe(functions("pipe", arguments)?).map(Value::from)
    }));
    export(&mut entries, "flatten", Function::new(1, |arguments| {
        Ok(Value::Array(collection::flatten(array("flatten", arguments, 0)?)))
    }));
    export(&mut entries, "compact", Function::new(1, |arguments| {
        Ok(Value::Array(collection::compact(array("compact", arguments, 0)?)))
    }));
    export(&mut entries, "filter", Function::new(2, filter));
    export(&mut entries, "find", Function::new(2, find));
    export(&mut entries, "findIndex", Function::new(2, find_index));
    export(&mut entries, "findKey", Function::new(2, find_key));
    export(&mut entries, "map", Function::new(2, map));
    export(&mut entries, "reduce", Function::new(3, reduce));

    Value::Object(entries)
}

fn export(entries: &mut BTreeMap<String, Value>, name: &str, function: Function) {
    entries.insert(name.to_owned(), Value::Function(function.named(name)));
}

// =============================================================================
// Argument access
// =============================================================================

fn argument(arguments: &[Value], index: usize) -> Value {
    arguments.get(index).cloned().unwrap_or_default()
}

fn array<'a>(
    operation: &'static str,
    arguments: &'a [Value],
    index: usize,
) -> Result<&'a [Value], Error> {
    match arguments.get(index) {
        Some(Value::Array(items)) => Ok(items),
        found => Err(Error::invalid_argument(
            operation,
            format!(
                "argument {index} must be an array, found {}",
                found.map_or("undefined", |value| value.kind().name())
            ),
        )),
    }
}

fn callback<'a>(
    operation: &'static str,
    arguments: &'a [Value],
    index: usize,
) -> Result<&'a Function, Error> {
    match arguments.get(index) {
        Some(value) => value.callable(operation),
        None => Err(Error::not_callable(operation, "undefined")),
    }
}

fn functions(operation: &'static str, arguments: &[Value]) -> Result<Vec<Function>, Error> {
    arguments
        .iter()
        .map(|value| value.callable(operation).cloned())
        .collect()
}

fn passes(predicate: &Function, item: &Value) -> Result<bool, Error> {
    predicate
        .call(std::slice::from_ref(item))
        .map(|result| result.is_truthy())
}

// =============================================================================
// Exports
// =============================================================================

fn partial(arguments: &[Value]) -> Result<Value, Error> {
    let function = callback("partial", arguments, 0)?.clone();
    let initial = arguments.iter().skip(1).cloned();
    Ok(Value::from(Partial::new(function, initial).into_function()))
}

fn curry(arguments: &[Value]) -> Result<Value, Error> {
    let function = callback("curry", arguments, 0)?.clone();
    let initial = arguments.iter().skip(1).cloned();
    Ok(Value::from(Curried::new(function, initial)?.into_function()))
}

fn memoize(arguments: &[Value]) -> Result<Value, Error> {
    let function = callback("memoize", arguments, 0)?.clone();
    Ok(Value::from(memoize_function(function)))
}

fn maybe(arguments: &[Value]) -> Result<Value, Error> {
    let function = callback("maybe", arguments, 0)?.clone();
    Ok(Value::from(compose::maybe(function)))
}

fn filter(arguments: &[Value]) -> Result<Value, Error> {
    let items = array("filter", arguments, 0)?;
    let predicate = callback("filter", arguments, 1)?;
    let mut kept = Vec::new();
    for item in items {
        if passes(predicate, item)? {
            kept.push(item.clone());
        }
    }
    Ok(Value::Array(kept))
}

fn find(arguments: &[Value]) -> Result<Value, Error> {
    let items = array("find", arguments, 0)?;
    let predicate = callback("find", arguments, 1)?;
    for item in items {
        if passes(predicate, item)? {
            return Ok(item.clone());
        }
    }
    Ok(Value::Undefined)
}

fn find_index(arguments: &[Value]) -> Result<Value, Error> {
    let items = array("findIndex", arguments, 0)?;
    let predicate = callback("findIndex", arguments, 1)?;
    for (index, item) in items.iter().enumerate() {
        if passes(predicate, item)? {
            return Ok(Value::from(index));
        }
    }
    Ok(Value::from(-1))
}

fn find_key(arguments: &[Value]) -> Result<Value, Error> {
    let found = argument(arguments, 0);
    let entries = found.as_object().ok_or_else(|| {
        Error::invalid_argument(
            "findKey",
            format!("argument 0 must be an object, found {}", found.kind()),
        )
    })?;
    let predicate = callback("findKey", arguments, 1)?;
    for (key, value) in entries {
        if passes(predicate, value)? {
            return Ok(Value::from(key.as_str()));
        }
    }
    Ok(Value::Undefined)
}

fn map(arguments: &[Value]) -> Result<Value, Error> {
    let items = array("map", arguments, 0)?;
    let function = callback("map", arguments, 1)?;
    items
        .iter()
        .map(|item| function.call(std::slice::from_ref(item)))
        .collect()
}

fn reduce(arguments: &[Value]) -> Result<Value, Error> {
    let items = array("reduce", arguments, 0)?;
    let function = callback("reduce", arguments, 1)?;
    items.iter().try_fold(argument(arguments, 2), |accumulator, item| {
        function.call(&[accumulator, item.clone()])
    })
}
