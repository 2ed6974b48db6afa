//! Per-entry computations for the key and value of a comprehension.
//!
//! A [`Provider`] is bound once per parse: references are resolved to the
//! index of their bound name up front, so evaluating an entry never looks a
//! name up.

use crate::{
    ast::{Expression, Fields, IterationKind, Reference},
    evaluator::EvalError,
    parser::ParseError,
    template::Callback,
    value::Value,
};

#[derive(Clone)]
pub enum Provider<'t> {
    /// Calls an interpolated function with the entry
    Function(&'t Callback),

    /// Returns the same interpolated value for every entry
    Constant(&'t Value),

    /// Reads a field path starting at a bound name
    Field {
        reference: Reference,
        /// Position of the bound name among the declared names
        index: usize,
        /// Whether the entry is split across several names
        destructure: bool,
    },
}

impl<'t> Provider<'t> {
    /// Resolves an expression against the names bound by the iteration clause.
    pub fn bind(expr: Expression<'t>, fields: &Fields) -> Result<Self, ParseError> {
        match expr {
            Expression::Function(f) => Ok(Provider::Function(f)),
            Expression::Literal(v) => Ok(Provider::Constant(v)),
            Expression::Reference(reference) => {
                let index = fields
                    .position(reference.head())
                    .ok_or_else(|| ParseError::UnknownFieldName {
                        name: reference.head().to_string(),
                        bound: fields.names().to_vec(),
                    })?;

                // Keys are plain strings, nothing to traverse into
                if fields.kind() == IterationKind::In && !reference.tail().is_empty() {
                    return Err(ParseError::IllegalKeyTraversal(reference.raw().to_string()));
                }

                Ok(Provider::Field {
                    reference,
                    index,
                    destructure: fields.is_destructuring(),
                })
            }
        }
    }

    /// Computes the provided value for one entry.
    pub fn provide(&self, entry: &Value) -> Result<Value, EvalError> {
        match self {
            Provider::Function(f) => f(entry).map_err(EvalError::Callback),
            Provider::Constant(v) => Ok((*v).clone()),
            Provider::Field {
                reference,
                index,
                destructure,
            } => {
                let base = if *destructure {
                    match entry {
                        Value::Array(items) => items.get(*index),
                        _ => None,
                    }
                } else {
                    Some(entry)
                };

                Ok(traverse(base, reference.tail())
                    .cloned()
                    .unwrap_or(Value::Undefined))
            }
        }
    }
}

/// Walks `path` through object members, stopping at the first absent step.
fn traverse<'v>(base: Option<&'v Value>, path: &[String]) -> Option<&'v Value> {
    path.iter()
        .try_fold(base?, |current, part| current.member(part))
}

impl std::fmt::Debug for Provider<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Function(_) => f.write_str("Function(..)"),
            Provider::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Provider::Field {
                reference,
                index,
                destructure,
            } => f
                .debug_struct("Field")
                .field("reference", reference)
                .field("index", index)
                .field("destructure", destructure)
                .finish(),
        }
    }
}
