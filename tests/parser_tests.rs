// tests/parser_tests.rs

use objcomp::ast::{Fields, IterationKind, Iterable, Position};
use objcomp::parser::{parse_reference, ParseError, Parser};
use objcomp::provider::Provider;
use objcomp::{template, Slot, Template, Value};
use serde_json::json;

fn people() -> Value {
    Value::from(json!([{"name": "Aidan", "age": 20}]))
}

fn parse_err(template: &Template) -> ParseError {
    Parser::new(template).parse().unwrap_err()
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_reference_key_and_value() {
    let t = template!("{person.name: person.age for person of " { people() } "}");
    let parsed = Parser::new(&t).parse().unwrap();

    match &parsed.key {
        Provider::Field {
            reference,
            index,
            destructure,
        } => {
            assert_eq!(reference.parts(), ["person", "name"]);
            assert_eq!(*index, 0);
            assert!(!destructure);
        }
        other => panic!("expected a field key, got {:?}", other),
    }
    assert!(matches!(&parsed.value, Provider::Field { reference, .. } if reference.raw() == "person.age"));
    assert_eq!(parsed.fields.kind(), IterationKind::Of);
    assert_eq!(parsed.fields.names(), ["person"]);
    assert_eq!(parsed.iterable.len(), 1);
}

#[test]
fn test_slot_key_and_value() {
    let t = template!({ Slot::func(|v| v.clone()) } ": " { 7 } " over " { people() });
    let parsed = Parser::new(&t).parse().unwrap();

    assert!(matches!(parsed.key, Provider::Function(_)));
    assert!(matches!(parsed.value, Provider::Constant(Value::Integer(7))));
    assert_eq!(parsed.fields, Fields::implicit());
}

#[test]
fn test_falsy_value_slots_are_values() {
    for v in [Value::Null, Value::Boolean(false), Value::Integer(0), Value::from("")] {
        let t = template!("{it.name: " { v.clone() } " over " { people() });
        let parsed = Parser::new(&t).parse().unwrap();
        assert!(matches!(parsed.value, Provider::Constant(c) if *c == v));
    }
}

#[test]
fn test_missing_key_slot() {
    let t = Template::from_parts(vec!["{".into()], vec![]).unwrap();
    assert_eq!(parse_err(&t), ParseError::MissingKey);

    let t = template!("{" { Value::Null } ": it over " { people() });
    assert_eq!(parse_err(&t), ParseError::MissingKey);
}

#[test]
fn test_missing_value_slot() {
    let t = Template::new("{it.name: ");
    assert_eq!(parse_err(&t), ParseError::MissingValue);
}

#[test]
fn test_invalid_reference() {
    let t = template!("{1abc: it over " { people() });
    assert_eq!(
        parse_err(&t),
        ParseError::InvalidReference {
            position: Position::Key,
            found: "1abc: it over".to_string(),
        }
    );

    let t = template!("{it.name: #x over " { people() });
    assert!(matches!(
        parse_err(&t),
        ParseError::InvalidReference {
            position: Position::Value,
            ..
        }
    ));
}

#[test]
fn test_missing_colon() {
    let t = template!("{it.name it over " { people() });
    assert_eq!(
        parse_err(&t),
        ParseError::MissingColon {
            found: "it over".to_string()
        }
    );
}

// ============================================================================
// Iteration clause
// ============================================================================

#[test]
fn test_over_is_exact() {
    let t = template!("{it: it overt " { people() });
    assert!(matches!(parse_err(&t), ParseError::InvalidIterationOperator(_)));

    let t = template!("{it: it OVER " { people() });
    assert!(matches!(parse_err(&t), ParseError::InvalidIterationOperator(_)));
}

#[test]
fn test_for_names_with_whitespace() {
    let list = Value::from(json!([["a", 1, 2, 3]]));
    let t = template!("key: key for   key ,a , b,c   of " { list });
    let parsed = Parser::new(&t).parse().unwrap();
    assert_eq!(parsed.fields.names(), ["key", "a", "b", "c"]);
    assert!(parsed.fields.is_destructuring());
}

#[test]
fn test_for_in_binds_keys_in_source_order() {
    let source = Value::from(json!({"b": 2, "a": 1}));
    let t = template!("k: k for k in " { source });
    let parsed = Parser::new(&t).parse().unwrap();

    assert_eq!(parsed.fields.kind(), IterationKind::In);
    assert_eq!(
        parsed.iterable,
        Iterable::Keys(vec![Value::from("b"), Value::from("a")])
    );
}

#[test]
fn test_unknown_clause() {
    let t = template!("{it: it while " { people() });
    assert_eq!(
        parse_err(&t),
        ParseError::InvalidIterationOperator("while".to_string())
    );
}

#[test]
fn test_multi_name_in() {
    let t = template!("i: j for i, j in " { people() });
    assert_eq!(
        parse_err(&t),
        ParseError::MultiNameNotAllowedForIn(vec!["i".to_string(), "j".to_string()])
    );
}

#[test]
fn test_explicit_fields_arity() {
    assert!(Fields::new(IterationKind::Of, vec!["a".into(), "b".into()]).is_ok());
    assert!(matches!(
        Fields::new(IterationKind::In, vec!["a".into(), "b".into()]),
        Err(ParseError::MultiNameNotAllowedForIn(_))
    ));
}

// ============================================================================
// Source
// ============================================================================

#[test]
fn test_source_must_be_array() {
    let t = template!("{it: it over " { "abc" });
    assert_eq!(
        parse_err(&t),
        ParseError::InvalidSource {
            keyword: "over",
            expected: "an array",
            found: "string",
        }
    );
}

#[test]
fn test_source_missing() {
    let t = Template::new("{it: it over ");
    assert!(matches!(
        parse_err(&t),
        ParseError::InvalidSource { found: "nothing", .. }
    ));
}

#[test]
fn test_source_function_rejected() {
    let t = template!("{it: it over " { Slot::func(|v| v.clone()) });
    assert!(matches!(
        parse_err(&t),
        ParseError::InvalidSource { found: "function", .. }
    ));
}

#[test]
fn test_in_source_must_be_collection() {
    let t = template!("k: k for k in " { 5 });
    assert!(matches!(
        parse_err(&t),
        ParseError::InvalidSource {
            keyword: "in",
            found: "integer",
            ..
        }
    ));
}

// ============================================================================
// Trailing input
// ============================================================================

#[test]
fn test_trailing_text_rejected() {
    let t = template!("{it.name: it over " { people() } "} extra");
    assert_eq!(parse_err(&t), ParseError::TrailingInput("extra".to_string()));
}

#[test]
fn test_trailing_slot_rejected() {
    let t = template!("{it.name: it over " { people() } " " { 1 });
    assert!(matches!(parse_err(&t), ParseError::TrailingInput(_)));
}

#[test]
fn test_unbalanced_closing_braces_tolerated() {
    let t = template!("it.name: it over " { people() } "}}}");
    assert!(Parser::new(&t).parse().is_ok());
}

// ============================================================================
// References
// ============================================================================

#[test]
fn test_reference_parts() {
    let r = parse_reference("a.b_c.$d-e rest").unwrap();
    assert_eq!(r.head(), "a");
    assert_eq!(r.tail(), ["b_c", "$d-e"]);
    assert_eq!(r.to_string(), "a.b_c.$d-e");
}

#[test]
fn test_reference_stops_at_trailing_dot() {
    let r = parse_reference("it.name.: x").unwrap();
    assert_eq!(r.raw(), "it.name");
}

#[test]
fn test_split_template() {
    let t = Template::split("{it: it over ${}}", "${}", vec![Slot::from(json!([1]))]).unwrap();
    assert!(Parser::new(&t).parse().is_ok());

    let err = Template::split("{it: it over ${}}", "${}", vec![]).unwrap_err();
    assert_eq!(err, ParseError::SegmentMismatch { segments: 2, slots: 0 });
}
