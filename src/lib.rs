//! Object comprehensions over dynamic values.
//!
//! A comprehension reads like `{key: value for name of source}` and builds a
//! [`Mapping`] from a source array (or the keys of a source mapping). The
//! static grammar is written as text; functions, static values and the
//! source are interpolated as slots.
//!
//! ```
//! use objcomp::{to_obj, Slot, Value};
//! use serde_json::json;
//!
//! let people = Value::from(json!([
//!     {"name": "Aidan", "age": 20},
//!     {"name": "Becca", "age": 21},
//! ]));
//!
//! let ages = to_obj!("{person.name: person.age for person of " { people.clone() } "}").unwrap();
//! assert_eq!(ages["Becca"], Value::Integer(21));
//!
//! let greeting = Slot::func(|p| match p.member("name") {
//!     Some(Value::String(name)) => Value::String(format!("{name}-san")),
//!     _ => Value::Undefined,
//! });
//! let by_greeting = to_obj!({ greeting } ": p.age for p of " { people }).unwrap();
//! assert_eq!(by_greeting["Aidan-san"], Value::Integer(20));
//! ```

#[cfg(feature = "cli")]
pub mod cli;

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod output;
pub mod parser;
pub mod provider;
pub mod template;
pub mod util;
pub mod value;

pub use ast::{Expression, Fields, IterationKind, Iterable, Reference};
pub use error::Error;
pub use evaluator::{EvalError, Evaluator};
pub use output::{mapping_to_json, to_json, to_json_pretty};
pub use parser::{ParseError, ParsedExpression, Parser};
pub use provider::Provider;
pub use template::{Callback, Slot, Template};
pub use value::{Mapping, Value};

use tracing::debug;

/// Parses and evaluates a comprehension.
///
/// Fails with the first grammar or evaluation error encountered.
pub fn to_obj(template: &Template) -> Result<Mapping, Error> {
    let parsed = Parser::new(template).parse()?;
    Ok(Evaluator::new().evaluate(&parsed)?)
}

/// Like [`to_obj`], but any failure yields `None`.
pub fn to_obj_safe(template: &Template) -> Option<Mapping> {
    match to_obj(template) {
        Ok(result) => Some(result),
        Err(e) => {
            debug!(error = %e, "comprehension failed, no result");
            None
        }
    }
}
