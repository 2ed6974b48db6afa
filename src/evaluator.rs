use thiserror::Error;
use tracing::trace;

use crate::{
    output::to_json,
    parser::ParsedExpression,
    value::Mapping,
};

/// Errors that can occur while evaluating entries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Several names were bound but the entry is not an array
    #[error("cannot unpack {entry} into fields [{}]", .names.join(", "))]
    CannotUnpack { entry: String, names: Vec<String> },

    /// The computed key is neither a string nor a number
    #[error("key must be either a string or a number, not a(n) {0}")]
    InvalidKeyType(&'static str),

    /// An interpolated function rejected an entry
    #[error("interpolated function failed: {0}")]
    Callback(String),
}

/// Builds the result mapping of a parsed comprehension.
///
/// # Examples
///
/// ```
/// use objcomp::{parser::Parser, template, Evaluator, Value};
/// use serde_json::json;
///
/// let people = Value::from(json!([{"name": "Aidan", "age": 20}]));
/// let template = template!("{it.name: it.age over " { people } "}");
/// let parsed = Parser::new(&template).parse().unwrap();
///
/// let result = Evaluator::new().evaluate(&parsed).unwrap();
/// assert_eq!(result["Aidan"], Value::Integer(20));
/// ```
#[derive(Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates every entry in source order.
    ///
    /// Duplicate keys are not detected: the last entry producing a key wins.
    pub fn evaluate(&self, parsed: &ParsedExpression<'_>) -> Result<Mapping, EvalError> {
        let unpack = parsed.fields.is_destructuring() && parsed.fields.kind().iterates_items();
        let mut result = Mapping::new();

        for entry in parsed.iterable.entries() {
            if unpack && !entry.is_array() {
                return Err(EvalError::CannotUnpack {
                    entry: to_json(entry),
                    names: parsed.fields.names().to_vec(),
                });
            }

            let key = parsed.key.provide(entry)?;
            let key = key
                .as_key()
                .ok_or_else(|| EvalError::InvalidKeyType(key.type_name()))?;
            let value = parsed.value.provide(entry)?;

            if let Some(previous) = result.insert(key, value) {
                trace!(previous = %to_json(&previous), "duplicate key overwritten");
            }
        }

        Ok(result)
    }
}
