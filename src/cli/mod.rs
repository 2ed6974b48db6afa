//! CLI support for objcomp
//!
//! Exposes the `objcomp` subcommands as functions so they can be driven
//! from tests or embedded in other tools.

mod eval;
mod grammar;

pub use eval::{execute_eval, EvalOptions, EvalOutcome, SLOT_MARKER};
pub use grammar::get_grammar_reference;

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No source provided. Use --input or pipe JSON to stdin.")]
    NoInput,
}

impl From<crate::Error> for CliError {
    fn from(e: crate::Error) -> Self {
        match e {
            crate::Error::Parse(e) => CliError::Parse(e),
            crate::Error::Eval(e) => CliError::Eval(e),
        }
    }
}
