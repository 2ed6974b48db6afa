use std::collections::BTreeMap;

use indexmap::IndexMap;

/// The output of a comprehension: property name to value.
///
/// Number keys are stored in their canonical string form, so `1` and `"1"`
/// name the same entry.
pub type Mapping = BTreeMap<String, Value>;

/// A dynamic value flowing through a comprehension.
///
/// Mirrors JSON with two additions: integers and floats are kept apart, and
/// `Undefined` marks an absent value (a missing member, a destructuring
/// position past the end of an entry) as distinct from an explicit `Null`.
///
/// # Examples
///
/// ```
/// use objcomp::Value;
/// use serde_json::json;
///
/// let person = Value::from(json!({"name": "Aidan", "age": 20}));
/// assert_eq!(person.member("age"), Some(&Value::Integer(20)));
/// assert_eq!(person.member("email"), None);
///
/// assert!(Value::Array(vec![]).is_array());
/// assert!(!Value::Null.is_array());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Undefined,

    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Object with string keys, in insertion order
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// `Null` or `Undefined`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Looks up an object member. Any other value has no members.
    pub fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(name),
            _ => None,
        }
    }

    /// Renders the value as a mapping key.
    ///
    /// Only strings and numbers qualify. Floats follow the host's number
    /// formatting: integral values drop their fraction (`2.0` → `"2"`),
    /// magnitudes outside `[1e-6, 1e21)` use exponent form (`1e+21`,
    /// `1.5e-7`), non-finite values use their names (`NaN`, `Infinity`,
    /// `-Infinity`).
    pub fn as_key(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(n) => Some(n.to_string()),
            Value::Float(n) => Some(float_key(*n)),
            _ => None,
        }
    }

    /// Returns a human-readable type name for the value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

fn float_key(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let name = if n > 0.0 { "Infinity" } else { "-Infinity" };
        name.to_string()
    } else if n == 0.0 {
        // -0 and 0 are the same property
        "0".to_string()
    } else if (1e-6..1e21).contains(&n.abs()) {
        n.to_string()
    } else {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{mantissa}e+{power}")
            }
            _ => exp,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
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

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Object(map.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_and_integer_keys() {
        assert_eq!(Value::from("a").as_key(), Some("a".to_string()));
        assert_eq!(Value::Integer(-3).as_key(), Some("-3".to_string()));
    }

    #[test]
    fn test_float_keys() {
        assert_eq!(Value::Float(2.0).as_key(), Some("2".to_string()));
        assert_eq!(Value::Float(1.5).as_key(), Some("1.5".to_string()));
        assert_eq!(Value::Float(-0.0).as_key(), Some("0".to_string()));
        assert_eq!(Value::Float(f64::NAN).as_key(), Some("NaN".to_string()));
        assert_eq!(
            Value::Float(f64::NEG_INFINITY).as_key(),
            Some("-Infinity".to_string())
        );
    }

    #[test]
    fn test_float_keys_exponent_form() {
        assert_eq!(Value::Float(1e21).as_key(), Some("1e+21".to_string()));
        assert_eq!(Value::Float(-2.5e22).as_key(), Some("-2.5e+22".to_string()));
        assert_eq!(Value::Float(1.5e-7).as_key(), Some("1.5e-7".to_string()));
        assert_eq!(Value::Float(1e20).as_key(), Some("100000000000000000000".to_string()));
        assert_eq!(Value::Float(1e-6).as_key(), Some("0.000001".to_string()));
    }

    #[test]
    fn test_from_json_keeps_member_order() {
        let v = Value::from(serde_json::json!({"b": 1, "a": 2}));
        match v {
            Value::Object(map) => assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]),
            other => panic!("expected an object, got {:?}", other),
        }
    }

    #[test]
    fn test_non_key_values() {
        assert_eq!(Value::Undefined.as_key(), None);
        assert_eq!(Value::Null.as_key(), None);
        assert_eq!(Value::Boolean(true).as_key(), None);
        assert_eq!(Value::Array(vec![]).as_key(), None);
    }

    #[test]
    fn test_member_on_non_object() {
        assert_eq!(Value::from("name").member("len"), None);
        assert_eq!(Value::Null.member("x"), None);
    }

    #[test]
    fn test_from_json_keeps_number_kinds() {
        let v = Value::from(serde_json::json!([1, 1.5, null]));
        assert_eq!(
            v,
            Value::Array(vec![Value::Integer(1), Value::Float(1.5), Value::Null])
        );
    }
}
