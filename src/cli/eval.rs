//! Evaluate a comprehension given on the command line

use tracing::debug;

use super::CliError;
use crate::{output::mapping_to_json, to_obj, Slot, Template, Value};

/// Placeholder for an interpolated value in command-line expressions
pub const SLOT_MARKER: &str = "${}";

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The comprehension, with `${}` marking each slot
    pub expression: String,
    /// JSON values for the leading slots, in order
    pub slots: Vec<String>,
    /// JSON source filling the last slot
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Print `null` instead of failing
    pub safe: bool,
}

/// Result of an eval operation
#[derive(Debug, PartialEq)]
pub enum EvalOutcome {
    /// The result mapping rendered as JSON
    Success(String),
    /// The comprehension failed under `--safe`
    NoResult,
}

impl EvalOptions {
    /// Whether a slot is left over for the input to fill.
    pub fn needs_input(&self) -> bool {
        self.expression.matches(SLOT_MARKER).count() > self.slots.len()
    }
}

fn parse_slot(json: &str) -> Result<Slot, CliError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(Slot::Value(Value::from(value)))
}

/// Execute an eval operation
///
/// Under `safe`, any failure along the way (bad slot JSON, missing input,
/// slot count mismatch, parse or evaluation errors) yields `NoResult`.
pub fn execute_eval(options: &EvalOptions) -> Result<EvalOutcome, CliError> {
    match evaluate(options) {
        Ok(json) => Ok(EvalOutcome::Success(json)),
        Err(e) if options.safe => {
            debug!(error = %e, "no result");
            Ok(EvalOutcome::NoResult)
        }
        Err(e) => Err(e),
    }
}

fn evaluate(options: &EvalOptions) -> Result<String, CliError> {
    let mut slots = options
        .slots
        .iter()
        .map(|s| parse_slot(s))
        .collect::<Result<Vec<_>, _>>()?;

    if options.needs_input() {
        let input = options.input.as_deref().ok_or(CliError::NoInput)?;
        slots.push(parse_slot(input)?);
    }

    debug!(slots = slots.len(), "evaluating expression");

    let template = Template::split(&options.expression, SLOT_MARKER, slots)?;
    let result = to_obj(&template)?;
    Ok(mapping_to_json(&result, options.pretty))
}
