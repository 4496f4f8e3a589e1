//! Integration tests for inline literals taken from real query documents.
//!
//! Documents are parsed with `async-graphql-parser`, and the argument values
//! are handed to the registry exactly as a query engine would.

use async_graphql_parser::parse_query;
use async_graphql_parser::types::{DocumentOperations, Selection};
use async_graphql_value::Value;
use gqlkit_scalars::{LiteralKind, ScalarValue, registry};
use serde_json::json;

/// Collects `(argument name, literal)` pairs from the root fields of a
/// single-operation document.
fn root_arguments(query: &str) -> Vec<(String, Value)> {
    let document = parse_query(query).expect("query should parse");
    let operation = match document.operations {
        DocumentOperations::Single(operation) => operation,
        DocumentOperations::Multiple(_) => panic!("expected a single operation"),
    };

    let mut arguments = Vec::new();
    for selection in &operation.node.selection_set.node.items {
        if let Selection::Field(field) = &selection.node {
            for (name, value) in &field.node.arguments {
                arguments.push((name.node.to_string(), value.node.clone()));
            }
        }
    }
    arguments
}

fn argument(query: &str, name: &str) -> Value {
    root_arguments(query)
        .into_iter()
        .find(|(arg, _)| arg == name)
        .map(|(_, value)| value)
        .unwrap_or_else(|| panic!("argument {name} not found"))
}

// =============================================================================
// Literal kinds
// =============================================================================

#[test]
fn test_parser_literal_kinds() {
    let query = r#"{ f(s: "x", i: 10, n: -3, fl: 1.5, e: 2e3, b: true, en: ASC, l: [1], o: {a: 1}, z: null) }"#;
    let kinds: Vec<_> = root_arguments(query)
        .iter()
        .map(|(name, value)| (name.clone(), LiteralKind::of_literal(value)))
        .collect();

    assert_eq!(
        kinds,
        vec![
            ("s".to_string(), LiteralKind::String),
            ("i".to_string(), LiteralKind::Int),
            ("n".to_string(), LiteralKind::Int),
            ("fl".to_string(), LiteralKind::Float),
            ("e".to_string(), LiteralKind::Float),
            ("b".to_string(), LiteralKind::Boolean),
            ("en".to_string(), LiteralKind::Enum),
            ("l".to_string(), LiteralKind::List),
            ("o".to_string(), LiteralKind::Object),
            ("z".to_string(), LiteralKind::Null),
        ]
    );
}

// =============================================================================
// Scalar literals
// =============================================================================

#[test]
fn test_multi_format_date_literals() {
    let registry = registry();
    let query = r#"{ events(since: 1000, until: "2021-01-01T00:00:00Z") }"#;

    assert_eq!(
        registry
            .parse_literal("MultiFormatDate", &argument(query, "since"))
            .unwrap(),
        ScalarValue::Int(1000)
    );
    assert_eq!(
        registry
            .parse_literal("MultiFormatDate", &argument(query, "until"))
            .unwrap(),
        ScalarValue::Int(1_609_459_200_000)
    );
}

#[test]
fn test_signup_mutation_literals() {
    let registry = registry();
    let query = r#"
        mutation {
            signUp(
                email: "New.User@Example.COM",
                password: "correct-horse-battery",
                homepage: "https://example.com/~user",
                birthday: "1990-04-01",
                wakeUp: "07:15"
            )
        }
    "#;

    assert_eq!(
        registry.parse_literal("Email", &argument(query, "email")).unwrap(),
        ScalarValue::from("new.user@example.com")
    );
    assert_eq!(
        registry
            .parse_literal("Password", &argument(query, "password"))
            .unwrap(),
        ScalarValue::from("correct-horse-battery")
    );
    assert!(registry.parse_literal("Uri", &argument(query, "homepage")).is_ok());
    assert_eq!(
        registry
            .serialize(
                "CalendarDate",
                &registry
                    .parse_literal("CalendarDate", &argument(query, "birthday"))
                    .unwrap()
            )
            .unwrap(),
        json!("1990-04-01")
    );
    assert!(registry.parse_literal("Time", &argument(query, "wakeUp")).is_ok());
}

#[test]
fn test_pagination_literals() {
    let registry = registry();
    let query = r#"{ a: users(first: 100) b: users(first: 101) c: users(first: "10") }"#;
    let firsts: Vec<Value> = root_arguments(query).into_iter().map(|(_, v)| v).collect();

    assert_eq!(
        registry.parse_literal("PageSize", &firsts[0]).unwrap(),
        ScalarValue::Int(100)
    );
    assert!(
        registry
            .parse_literal("PageSize", &firsts[1])
            .unwrap_err()
            .is_validation_error()
    );
    assert!(
        registry
            .parse_literal("PageSize", &firsts[2])
            .unwrap_err()
            .is_type_mismatch()
    );
}

#[test]
fn test_timestamp_literal_kind() {
    let registry = registry();
    let query = "{ at(float: 1623456789.5, int: 1623456789) }";

    assert_eq!(
        registry
            .parse_literal("Timestamp", &argument(query, "float"))
            .unwrap(),
        ScalarValue::Float(1623456789.5)
    );
    assert!(
        registry
            .parse_literal("Timestamp", &argument(query, "int"))
            .unwrap_err()
            .is_type_mismatch()
    );
}

#[test]
fn test_code_literal_shapes() {
    let registry = registry();
    let query = r#"{ redeem(a: "XYZ", b: 42, c: [1, "two"], d: {k: V}) }"#;

    assert_eq!(
        registry.parse_literal("Code", &argument(query, "a")).unwrap(),
        ScalarValue::Json(json!("XYZ"))
    );
    assert_eq!(
        registry.parse_literal("Code", &argument(query, "b")).unwrap(),
        ScalarValue::Json(json!(42))
    );
    assert_eq!(
        registry.parse_literal("Token", &argument(query, "c")).unwrap(),
        ScalarValue::Json(json!([1, "two"]))
    );
    assert_eq!(
        registry.parse_literal("Token", &argument(query, "d")).unwrap(),
        ScalarValue::Json(json!({"k": "V"}))
    );
}

#[test]
fn test_variable_reference_is_not_a_literal() {
    let registry = registry();
    let query = "query ($email: Email, $code: Code) { f(email: $email, code: [$code]) }";

    let err = registry
        .parse_literal("Email", &argument(query, "email"))
        .unwrap_err();
    assert!(err.is_type_mismatch());
    assert!(err.to_string().contains("VARIABLE"));

    assert!(
        registry
            .parse_literal("Code", &argument(query, "code"))
            .unwrap_err()
            .is_type_mismatch()
    );
}

#[test]
fn test_literal_and_variable_paths_agree() {
    let registry = registry();
    let query = r#"{ f(email: "USER@Example.com", version: "1.2.3-rc.1", date: "2021-06-15T10:30:00+02:00", size: 7) }"#;

    let cases = [
        ("Email", "email", json!("USER@Example.com")),
        ("SemanticVersion", "version", json!("1.2.3-rc.1")),
        ("Date", "date", json!("2021-06-15T10:30:00+02:00")),
        ("PageSize", "size", json!(7)),
    ];
    for (scalar, arg, variable) in cases {
        assert_eq!(
            registry.parse_literal(scalar, &argument(query, arg)).unwrap(),
            registry.parse_value(scalar, &variable).unwrap(),
            "{scalar} literal and variable disagree"
        );
    }
}
