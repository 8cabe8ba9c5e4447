//! JSON value model and serializer.
//!
//! # Design
//! `Value` is a closed sum over the seven JSON shapes, and `stringify` matches
//! on it exhaustively, so every representable value serializes. Objects are
//! backed by a `BTreeMap`, which makes key order ascending regardless of the
//! order the handler inserted them in.
//!
//! JSON only flows outward from this crate: there is no parser here.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Key-ordered JSON object body.
pub type Object = BTreeMap<String, Value>;

/// A JSON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    /// Build an object from key/value pairs. A repeated key keeps the last value.
    pub fn object<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build an array from anything convertible into values.
    pub fn array<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Serialize to compact JSON text. Never fails.
    pub fn stringify(&self) -> String {
        let mut out = String::new();
        write_value(self, &mut out);
        out
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as `f64`; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

/// Serialize a value to compact JSON text. Same output as [`Value::stringify`].
pub fn stringify(value: &Value) -> String {
    value.stringify()
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Double(d) => write_double(*d, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_value(item, out);
            }
            out.push('}');
        }
    }
}

/// `f64`'s `Display` is the shortest round-trip decimal and never uses an
/// exponent. NaN and the infinities have no JSON spelling and become `null`.
fn write_double(d: f64, out: &mut String) {
    if d.is_finite() {
        let _ = write!(out, "{d}");
    } else {
        out.push_str("null");
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Double(d) if d.is_finite() => serializer.serialize_f64(*d),
            Value::Double(_) => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k, v)?;
                }
                m.end()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Double),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items),
            serde_json::Value::Object(map) => Value::object(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert_eq!(Value::Null.stringify(), "null");
        assert_eq!(Value::Bool(true).stringify(), "true");
        assert_eq!(Value::Bool(false).stringify(), "false");
        assert_eq!(Value::Int(-42).stringify(), "-42");
        assert_eq!(Value::Double(1.5).stringify(), "1.5");
        assert_eq!(Value::Double(-0.25).stringify(), "-0.25");
    }

    #[test]
    fn non_finite_double_is_null() {
        assert_eq!(Value::Double(f64::NAN).stringify(), "null");
        assert_eq!(Value::Double(f64::INFINITY).stringify(), "null");
    }

    #[test]
    fn large_double_has_no_exponent() {
        assert_eq!(Value::Double(1e21).stringify(), "1000000000000000000000");
    }

    #[test]
    fn empty_containers() {
        assert_eq!(Value::Array(Vec::new()).stringify(), "[]");
        assert_eq!(Value::Object(Object::new()).stringify(), "{}");
    }

    #[test]
    fn array_is_comma_joined_without_whitespace() {
        let v = Value::array([Value::Int(1), Value::Null, "x".into()]);
        assert_eq!(v.stringify(), r#"[1,null,"x"]"#);
    }

    #[test]
    fn object_keys_sorted_regardless_of_insertion_order() {
        let a = Value::object([("b", 1), ("a", 2)]);
        let b = Value::object([("a", 2), ("b", 1)]);
        assert_eq!(a.stringify(), r#"{"a":2,"b":1}"#);
        assert_eq!(a.stringify(), b.stringify());
    }

    #[test]
    fn object_duplicate_key_keeps_last() {
        let v = Value::object([("k", 1), ("k", 2)]);
        assert_eq!(v.stringify(), r#"{"k":2}"#);
    }

    #[test]
    fn nested_containers() {
        let v = Value::object([
            ("list", Value::array([Value::object([("z", true)])])),
            ("empty", Value::Object(Object::new())),
        ]);
        assert_eq!(v.stringify(), r#"{"empty":{},"list":[{"z":true}]}"#);
    }

    #[test]
    fn named_escapes() {
        let v = Value::from("q\" b\\ \x08\x0C\n\r\t");
        assert_eq!(v.stringify(), r#""q\" b\\ \b\f\n\r\t""#);
    }

    #[test]
    fn other_control_chars_use_hex_escape() {
        assert_eq!(Value::from("\x00").stringify(), r#""\u0000""#);
        assert_eq!(Value::from("\x0B").stringify(), r#""\u000b""#);
        assert_eq!(Value::from("\x1F").stringify(), r#""\u001f""#);
    }

    #[test]
    fn non_ascii_passes_through() {
        assert_eq!(Value::from("héllo \u{7f}").stringify(), "\"héllo \u{7f}\"");
    }

    #[test]
    fn object_keys_are_escaped() {
        let v = Value::object([("a\"b", Value::Null)]);
        assert_eq!(v.stringify(), r#"{"a\"b":null}"#);
    }

    #[test]
    fn display_matches_stringify() {
        let v = Value::object([("n", 1)]);
        assert_eq!(v.to_string(), v.stringify());
        assert_eq!(stringify(&v), v.stringify());
    }

    #[test]
    fn option_converts_to_null() {
        let none: Option<i32> = None;
        assert_eq!(Value::from(none), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
        assert_eq!(Value::from(()), Value::Null);
    }

    #[test]
    fn from_serde_json_value() {
        let v: Value = serde_json::json!({"b": [1, 2.5, null], "a": "s", "big": u64::MAX}).into();
        assert_eq!(v.as_object().unwrap()["a"].as_str(), Some("s"));
        assert_eq!(v.as_object().unwrap()["big"].as_f64(), Some(u64::MAX as f64));
        let arr = v.as_object().unwrap()["b"].as_array().unwrap();
        assert_eq!(arr[0], Value::Int(1));
        assert_eq!(arr[1], Value::Double(2.5));
        assert!(arr[2].is_null());
    }

    #[test]
    fn predicates_and_accessors_per_shape() {
        let shapes = [
            Value::Null,
            Value::Bool(true),
            Value::Int(3),
            Value::Double(0.5),
            Value::from("s"),
            Value::array([1]),
            Value::object([("k", 1)]),
        ];
        let flags: Vec<[bool; 6]> = shapes
            .iter()
            .map(|v| {
                [
                    v.is_null(),
                    v.is_bool(),
                    v.is_number(),
                    v.is_string(),
                    v.is_array(),
                    v.is_object(),
                ]
            })
            .collect();
        assert_eq!(
            flags,
            vec![
                [true, false, false, false, false, false],
                [false, true, false, false, false, false],
                [false, false, true, false, false, false],
                [false, false, true, false, false, false],
                [false, false, false, true, false, false],
                [false, false, false, false, true, false],
                [false, false, false, false, false, true],
            ]
        );

        assert_eq!(shapes[1].as_bool(), Some(true));
        assert_eq!(shapes[0].as_bool(), None);
        assert_eq!(shapes[2].as_i64(), Some(3));
        assert_eq!(shapes[3].as_i64(), None);
        assert_eq!(shapes[2].as_f64(), Some(3.0));
        assert_eq!(shapes[3].as_f64(), Some(0.5));
        assert_eq!(shapes[4].as_str(), Some("s"));
        assert_eq!(shapes[4].as_f64(), None);
        assert_eq!(shapes[5].as_array(), Some(&[Value::Int(1)][..]));
        assert_eq!(shapes[6].as_object().map(Object::len), Some(1));
        assert_eq!(shapes[6].as_array(), None);
    }

    #[test]
    fn serde_serialize_agrees_with_stringify() {
        let v = Value::object([
            ("s", Value::from("tab\there")),
            ("n", Value::Int(7)),
            ("arr", Value::array([true, false])),
        ]);
        let via_serde = serde_json::to_string(&v).unwrap();
        assert_eq!(via_serde, v.stringify());
    }
}
