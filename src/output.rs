//! JSON rendering of comprehension results.
//!
//! Output is deterministic: object keys come out sorted. `Undefined` has no
//! JSON form, so undefined object members are left out and undefined array
//! items print as `null`. Non-finite floats also print as `null`.
//!
//! # Examples
//!
//! ```
//! use objcomp::{Mapping, Value};
//! use objcomp::output::{mapping_to_json, to_json};
//!
//! assert_eq!(to_json(&Value::Integer(42)), "42");
//!
//! let mut result = Mapping::new();
//! result.insert("a".to_string(), Value::Integer(1));
//! result.insert("b".to_string(), Value::Undefined);
//! assert_eq!(mapping_to_json(&result, false), r#"{"a":1}"#);
//! ```

use crate::value::{Mapping, Value};

pub struct JsonPrinter {
    pretty: bool,
}

impl JsonPrinter {
    pub fn new(pretty: bool) -> Self {
        JsonPrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Undefined | Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) if n.is_finite() => n.to_string(),
            Value::Float(_) => "null".to_string(),
            Value::String(s) => format!("\"{}\"", self.escape_string(s)),
            Value::Array(arr) => self.print_array(arr, indent),
            Value::Object(obj) => self.print_object(obj.iter(), indent),
        }
    }

    fn print_array(&self, arr: &[Value], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        if self.pretty {
            let items: Vec<String> = arr
                .iter()
                .map(|v| {
                    format!(
                        "{}{}",
                        self.indent(indent + 1),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            format!("[\n{}\n{}]", items.join(",\n"), self.indent(indent))
        } else {
            let items: Vec<String> = arr.iter().map(|v| self.print_value(v, indent)).collect();
            format!("[{}]", items.join(","))
        }
    }

    fn print_object<'v>(
        &self,
        members: impl Iterator<Item = (&'v String, &'v Value)>,
        indent: usize,
    ) -> String {
        // Sort keys for deterministic output
        let mut members: Vec<(&String, &Value)> =
            members.filter(|(_, v)| !v.is_undefined()).collect();
        members.sort_by(|a, b| a.0.cmp(b.0));

        if members.is_empty() {
            return "{}".to_string();
        }

        if self.pretty {
            let items: Vec<String> = members
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}\"{}\": {}",
                        self.indent(indent + 1),
                        self.escape_string(k),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            format!("{{\n{}\n{}}}", items.join(",\n"), self.indent(indent))
        } else {
            let items: Vec<String> = members
                .iter()
                .map(|(k, v)| {
                    format!(
                        "\"{}\":{}",
                        self.escape_string(k),
                        self.print_value(v, indent)
                    )
                })
                .collect();
            format!("{{{}}}", items.join(","))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }

    fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '"' => vec!['\\', '"'],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                c if c.is_control() => format!("\\u{:04x}", c as u32).chars().collect(),
                c => vec![c],
            })
            .collect()
    }
}

/// Converts a Value to compact JSON.
pub fn to_json(value: &Value) -> String {
    JsonPrinter::new(false).print(value)
}

/// Converts a Value to JSON with 2-space indentation.
pub fn to_json_pretty(value: &Value) -> String {
    JsonPrinter::new(true).print(value)
}

/// Renders a comprehension result as a JSON object.
pub fn mapping_to_json(mapping: &Mapping, pretty: bool) -> String {
    JsonPrinter::new(pretty).print_object(mapping.iter(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_undefined_in_array_is_null() {
        let v = Value::Array(vec![Value::Integer(1), Value::Undefined]);
        assert_eq!(to_json(&v), "[1,null]");
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert_eq!(to_json(&Value::Float(f64::NAN)), "null");
        assert_eq!(to_json(&Value::Float(2.5)), "2.5");
    }

    #[test]
    fn test_pretty_object_sorted() {
        let v = Value::from(json!({"b": [true], "a": "x\"y"}));
        assert_eq!(
            to_json_pretty(&v),
            "{\n  \"a\": \"x\\\"y\",\n  \"b\": [\n    true\n  ]\n}"
        );
    }

    #[test]
    fn test_empty_after_dropping_undefined() {
        let mut m = Mapping::new();
        m.insert("gone".to_string(), Value::Undefined);
        assert_eq!(mapping_to_json(&m, true), "{}");
    }
}
