//! Rendering of arguments into an injective JSON document.
//!
//! `serde_json::to_value` collapses several values onto `null`: unit,
//! `None`, non-finite floats. Keys built from it would let distinct argument
//! lists share a cache entry, so keys are rendered by `Canonical` instead.
//! It produces the same document as `serde_json` for everything JSON can
//! represent, and a tagged object for the rest:
//!
//! | value                               | rendering                  |
//! |-------------------------------------|----------------------------|
//! | `Value::Undefined`                  | `{"$undefined":null}`      |
//! | `NaN`, `inf`, `-inf`                | `{"$number":"NaN"}`, ...   |
//! | `Some(x)` where `x` renders as null | `{"$some":null}`           |
//!
//! Tags start with a single `$`. Map keys and field names that start with
//! `$` get a second one, so no tag can be forged by the data.

use serde::ser::{self, Error as _, Serializer as _};
use serde::Serialize;
use serde_json::{Map, Value as Json};

use crate::value::UNDEFINED;

const NUMBER: &str = "$number";
const SOME: &str = "$some";

/// Renders `value` into its canonical document.
pub(crate) fn to_json<T>(value: &T) -> Result<Json, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    value.serialize(Canonical)
}

fn tagged(tag: &str, value: Json) -> Json {
    Json::Object(Map::from_iter([(tag.to_owned(), value)]))
}

fn escape(key: &str) -> String {
    if key.starts_with('$') {
        format!("${key}")
    } else {
        key.to_owned()
    }
}

fn non_finite(number: f64) -> Json {
    let text = if number.is_nan() {
        "NaN"
    } else if number.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    };
    tagged(NUMBER, Json::from(text))
}

fn map_key(key: Json) -> Result<String, serde_json::Error> {
    match key {
        Json::String(text) => Ok(text),
        Json::Number(number) => Ok(number.to_string()),
        Json::Bool(flag) => Ok(flag.to_string()),
        other => Err(serde_json::Error::custom(format!(
            "map key must be a string, found {other}"
        ))),
    }
}

struct Canonical;

impl ser::Serializer for Canonical {
    type Ok = Json;
    type Error = serde_json::Error;
    type SerializeSeq = Sequence;
    type SerializeTuple = Sequence;
    type SerializeTupleStruct = Sequence;
    type SerializeTupleVariant = Sequence;
    type SerializeMap = Entries;
    type SerializeStruct = Entries;
    type SerializeStructVariant = Entries;

    fn serialize_bool(self, value: bool) -> Result<Json, Self::Error> {
        Ok(Json::Bool(value))
    }

    fn serialize_i8(self, value: i8) -> Result<Json, Self::Error> {
        self.serialize_i64(i64::from(value))
    }

    fn serialize_i16(self, value: i16) -> Result<Json, Self::Error> {
        self.serialize_i64(i64::from(value))
    }

    fn serialize_i32(self, value: i32) -> Result<Json, Self::Error> {
        self.serialize_i64(i64::from(value))
    }

    fn serialize_i64(self, value: i64) -> Result<Json, Self::Error> {
        Ok(Json::from(value))
    }

    fn serialize_i128(self, value: i128) -> Result<Json, Self::Error> {
        i64::try_from(value)
            .map(Json::from)
            .or_else(|_| u64::try_from(value).map(Json::from))
            .map_err(|_| serde_json::Error::custom("number out of range"))
    }

    fn serialize_u8(self, value: u8) -> Result<Json, Self::Error> {
        self.serialize_u64(u64::from(value))
    }

    fn serialize_u16(self, value: u16) -> Result<Json, Self::Error> {
        self.serialize_u64(u64::from(value))
    }

    fn serialize_u32(self, value: u32) -> Result<Json, Self::Error> {
        self.serialize_u64(u64::from(value))
    }

    fn serialize_u64(self, value: u64) -> Result<Json, Self::Error> {
        Ok(Json::from(value))
    }

    fn serialize_u128(self, value: u128) -> Result<Json, Self::Error> {
        u64::try_from(value)
            .map(Json::from)
            .map_err(|_| serde_json::Error::custom("number out of range"))
    }

    fn serialize_f32(self, value: f32) -> Result<Json, Self::Error> {
        if value.is_finite() {
            Ok(Json::from(value))
        } else {
            Ok(non_finite(f64::from(value)))
        }
    }

    fn serialize_f64(self, value: f64) -> Result<Json, Self::Error> {
        if value.is_finite() {
            Ok(Json::from(value))
        } else {
            Ok(non_finite(value))
        }
    }

    fn serialize_char(self, value: char) -> Result<Json, Self::Error> {
        Ok(Json::String(value.to_string()))
    }

    fn serialize_str(self, value: &str) -> Result<Json, Self::Error> {
        Ok(Json::from(value))
    }

    fn serialize_bytes(self, value: &[u8]) -> Result<Json, Self::Error> {
        Ok(Json::Array(value.iter().copied().map(Json::from).collect()))
    }

    fn serialize_none(self) -> Result<Json, Self::Error> {
        Ok(Json::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Json, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        let inner = value.serialize(self)?;
        if inner.is_null() {
            Ok(tagged(SOME, inner))
        } else {
            Ok(inner)
        }
    }

    fn serialize_unit(self) -> Result<Json, Self::Error> {
        Ok(Json::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Json, Self::Error> {
        if name == UNDEFINED {
            Ok(tagged(UNDEFINED, Json::Null))
        } else {
            Ok(Json::Null)
        }
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<Json, Self::Error> {
        Ok(Json::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Json, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Json, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        let inner = value.serialize(self)?;
        Ok(Json::Object(Map::from_iter([(escape(variant), inner)])))
    }

    fn serialize_seq(self, length: Option<usize>) -> Result<Sequence, Self::Error> {
        Ok(Sequence::new(length.unwrap_or_default(), None))
    }

    fn serialize_tuple(self, length: usize) -> Result<Sequence, Self::Error> {
        Ok(Sequence::new(length, None))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        length: usize,
    ) -> Result<Sequence, Self::Error> {
        Ok(Sequence::new(length, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        length: usize,
    ) -> Result<Sequence, Self::Error> {
        Ok(Sequence::new(length, Some(variant)))
    }

    fn serialize_map(self, _length: Option<usize>) -> Result<Entries, Self::Error> {
        Ok(Entries::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _length: usize) -> Result<Entries, Self::Error> {
        Ok(Entries::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _length: usize,
    ) -> Result<Entries, Self::Error> {
        Ok(Entries::new(Some(variant)))
    }
}

/// Wraps `value` as `{variant: value}` for enum variants with content.
fn within(variant: Option<&'static str>, value: Json) -> Json {
    match variant {
        Some(variant) => Json::Object(Map::from_iter([(escape(variant), value)])),
        None => value,
    }
}

struct Sequence {
    items: Vec<Json>,
    variant: Option<&'static str>,
}

impl Sequence {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<(), serde_json::Error>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(Canonical)?);
        Ok(())
    }

    fn finish(self) -> Json {
        within(self.variant, Json::Array(self.items))
    }
}

impl ser::SerializeSeq for Sequence {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Json, Self::Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for Sequence {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Json, Self::Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for Sequence {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Json, Self::Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for Sequence {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Json, Self::Error> {
        Ok(self.finish())
    }
}

struct Entries {
    entries: Map<String, Json>,
    key: Option<String>,
    variant: Option<&'static str>,
}

impl Entries {
    fn new(variant: Option<&'static str>) -> Self {
        Self {
            entries: Map::new(),
            key: None,
            variant,
        }
    }

    fn insert<T>(&mut self, key: &str, value: &T) -> Result<(), serde_json::Error>
    where
        T: ?Sized + Serialize,
    {
        let value = value.serialize(Canonical)?;
        self.entries.insert(escape(key), value);
        Ok(())
    }

    fn finish(self) -> Json {
        within(self.variant, Json::Object(self.entries))
    }
}

impl ser::SerializeMap for Entries {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(map_key(key.serialize(Canonical)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| serde_json::Error::custom("map value without a key"))?;
        self.insert(&key, value)
    }

    fn end(self) -> Result<Json, Self::Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for Entries {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key, value)
    }

    fn end(self) -> Result<Json, Self::Error> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for Entries {
    type Ok = Json;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key, value)
    }

    fn end(self) -> Result<Json, Self::Error> {
        Ok(self.finish())
    }
}
