use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Expression, Fields, IterationKind, Iterable, Position, Reference},
    provider::Provider,
    template::{Slot, Template},
    util::ltrim,
    value::Value,
};

/// Property chains, e.g. `anObject.subObject.property`
static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9\-_$]*(?:\.[A-Za-z_$][A-Za-z0-9\-_$]*)*")
        .expect("field pattern compiles")
});

/// `for name1, name2, ... of|in`, capturing the names and the keyword
static FOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^for\s+([A-Za-z_$][A-Za-z0-9\-_$]*(?:\s*,\s*[A-Za-z_$][A-Za-z0-9\-_$]*)*)\s+(of|in)$",
    )
    .expect("for pattern compiles")
});

const OVER: &str = "over";

/// Errors raised while reading the grammar of a template.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expecting a key")]
    MissingKey,

    #[error("expecting a value")]
    MissingValue,

    #[error("invalid {position} reference format: '{found}'")]
    InvalidReference { position: Position, found: String },

    #[error("missing ':' before '{found}'")]
    MissingColon { found: String },

    #[error("invalid iteration operator, expecting 'over', 'for ... of' or 'for ... in', found '{0}'")]
    InvalidIterationOperator(String),

    #[error("'in' iterates keys and binds a single name, found [{}]", .0.join(", "))]
    MultiNameNotAllowedForIn(Vec<String>),

    #[error("invalid source for '{keyword}': expected {expected}, found {found}")]
    InvalidSource {
        keyword: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown field name '{name}', bound names are [{}]", .bound.join(", "))]
    UnknownFieldName { name: String, bound: Vec<String> },

    #[error("cannot traverse '{0}': keys iterated with 'in' are plain strings")]
    IllegalKeyTraversal(String),

    #[error("unexpected input after the source: '{0}'")]
    TrailingInput(String),

    #[error("a template needs one more text segment than slots, got {segments} segments and {slots} slots")]
    SegmentMismatch { segments: usize, slots: usize },
}

/// A template read into providers and a source, ready to evaluate.
#[derive(Debug, Clone)]
pub struct ParsedExpression<'t> {
    pub key: Provider<'t>,
    pub value: Provider<'t>,
    pub fields: Fields,
    pub iterable: Iterable<'t>,
}

/// Reads the comprehension grammar across the segments of a [`Template`].
///
/// The parser walks the text one segment at a time; whenever a key or value
/// position is empty it takes the next slot instead and moves on to the
/// segment after it.
pub struct Parser<'t> {
    template: &'t Template,
    /// Index of the next unconsumed slot (and of the current segment)
    slot: usize,
    /// Unconsumed text of the current segment
    rest: &'t str,
}

impl<'t> Parser<'t> {
    pub fn new(template: &'t Template) -> Self {
        let first = template.segments().first().map(String::as_str).unwrap_or("");
        Parser {
            template,
            slot: 0,
            rest: ltrim(first.trim(), '{').trim(),
        }
    }

    /// Parses `key : value <iteration clause> <source>`.
    pub fn parse(mut self) -> Result<ParsedExpression<'t>, ParseError> {
        let key = self.parse_position(Position::Key)?;
        self.expect_colon()?;
        let value = self.parse_position(Position::Value)?;
        let fields = self.parse_fields()?;
        let iterable = self.parse_source(&fields)?;
        self.expect_end()?;

        let parsed = ParsedExpression {
            key: Provider::bind(key, &fields)?,
            value: Provider::bind(value, &fields)?,
            fields,
            iterable,
        };

        debug!(
            kind = parsed.fields.kind().keyword(),
            names = ?parsed.fields.names(),
            entries = parsed.iterable.len(),
            "parsed comprehension"
        );

        Ok(parsed)
    }

    /// Takes the next slot and moves to the segment that follows it.
    fn next_slot(&mut self) -> Option<&'t Slot> {
        let slot = self.template.slots().get(self.slot)?;
        self.slot += 1;
        self.rest = self
            .template
            .segments()
            .get(self.slot)
            .map(|s| s.trim())
            .unwrap_or("");
        Some(slot)
    }

    fn parse_position(&mut self, position: Position) -> Result<Expression<'t>, ParseError> {
        if self.rest.is_empty() {
            let missing = match position {
                Position::Key => ParseError::MissingKey,
                Position::Value => ParseError::MissingValue,
            };
            let slot = self.next_slot().ok_or(missing.clone())?;

            if position == Position::Key && slot.as_value().is_some_and(Value::is_nullish) {
                return Err(missing);
            }
            return Ok(Expression::from_slot(slot));
        }

        let reference = parse_reference(self.rest).ok_or_else(|| ParseError::InvalidReference {
            position,
            found: self.rest.to_string(),
        })?;
        self.rest = self.rest[reference.raw().len()..].trim_start();
        Ok(Expression::Reference(reference))
    }

    fn expect_colon(&mut self) -> Result<(), ParseError> {
        match self.rest.strip_prefix(':') {
            Some(after) => {
                self.rest = after.trim_start();
                Ok(())
            }
            None => Err(ParseError::MissingColon {
                found: self.rest.to_string(),
            }),
        }
    }

    fn parse_fields(&mut self) -> Result<Fields, ParseError> {
        let clause = self.rest.trim();
        self.rest = "";

        if clause == OVER {
            return Ok(Fields::implicit());
        }

        let captures = FOR_REGEX
            .captures(clause)
            .ok_or_else(|| ParseError::InvalidIterationOperator(clause.to_string()))?;

        let names = captures[1]
            .split(',')
            .map(|name| name.trim().to_string())
            .collect();
        let kind = match &captures[2] {
            "in" => IterationKind::In,
            _ => IterationKind::Of,
        };

        Fields::new(kind, names)
    }

    fn parse_source(&mut self, fields: &Fields) -> Result<Iterable<'t>, ParseError> {
        let kind = fields.kind();
        let invalid = |expected, found| ParseError::InvalidSource {
            keyword: kind.keyword(),
            expected,
            found,
        };

        let slot = self.next_slot().ok_or(invalid("a slot", "nothing"))?;
        let source = slot.as_value().ok_or(invalid("a value", slot.type_name()))?;

        match (kind.iterates_items(), source) {
            (true, Value::Array(items)) => Ok(Iterable::Items(items)),
            (true, other) => Err(invalid("an array", other.type_name())),
            (false, Value::Object(map)) => Ok(Iterable::Keys(
                map.keys().map(|k| Value::String(k.clone())).collect(),
            )),
            (false, Value::Array(items)) => Ok(Iterable::Keys(
                (0..items.len()).map(|i| Value::String(i.to_string())).collect(),
            )),
            (false, other) => Err(invalid("an object or an array", other.type_name())),
        }
    }

    /// Only closing braces may follow the source.
    fn expect_end(&mut self) -> Result<(), ParseError> {
        let trailing = self.rest.trim_start_matches(|c: char| c == '}' || c.is_whitespace());
        if !trailing.is_empty() {
            return Err(ParseError::TrailingInput(trailing.to_string()));
        }
        if let Some(extra) = self.next_slot() {
            return Err(ParseError::TrailingInput(format!(
                "an extra {} slot",
                extra.type_name()
            )));
        }
        Ok(())
    }
}

/// Matches a leading field reference in `text`.
pub fn parse_reference(text: &str) -> Option<Reference> {
    FIELD_REGEX.find(text).map(|m| Reference::new(m.as_str()))
}

#[test]
fn test_reference_pattern() {
    let r = parse_reference("person.address.city: x").unwrap();
    assert_eq!(r.raw(), "person.address.city");
    assert_eq!(r.parts(), ["person", "address", "city"]);

    assert_eq!(parse_reference("$a-b_c").unwrap().raw(), "$a-b_c");
    assert!(parse_reference(": it").is_none());
    assert!(parse_reference("1abc").is_none());
}

#[test]
fn test_for_pattern() {
    let caps = FOR_REGEX.captures("for key ,a , b, c of").unwrap();
    assert_eq!(&caps[1], "key ,a , b, c");
    assert_eq!(&caps[2], "of");

    assert!(FOR_REGEX.is_match("for k in"));
    assert!(!FOR_REGEX.is_match("for k of x"));
    assert!(!FOR_REGEX.is_match("for of"));
}
