use thiserror::Error;

use crate::{evaluator::EvalError, parser::ParseError};

/// Any failure of [`to_obj`](crate::to_obj).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}
