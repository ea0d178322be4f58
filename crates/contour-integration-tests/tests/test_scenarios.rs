//! # End-to-End Scenarios
//!
//! The six reference scenarios: scalar strings and numbers, a nested object
//! with several failing fields, an array with one bad element, a `oneOf`
//! composition, and the OpenAPI emission of two schemas.

use contour_core::{Rule, Value};
use contour_openapi::to_open_api;
use contour_schema::{array, number, object, one_of, presets, string};
use serde_json::json;

// ── Scenario 1: bounded string ───────────────────────────────────────

#[test]
fn test_bounded_string() {
    let s = string().min_length(3).max_length(5).required();

    let err = s.validate(&Value::from("hi")).unwrap_err();
    assert_eq!(err.rule(), Rule::MinLength);
    assert_eq!(err.path(), "");
    assert!(err.message().ends_with("minimum length is 3"));
    assert_eq!(err.to_string(), "Field: (root), Error: minimum length is 3");

    assert!(s.validate(&Value::from("hello")).is_ok());
    assert_eq!(s.validate(&Value::from("hellos")).unwrap_err().rule(), Rule::MaxLength);
    assert_eq!(s.validate(&Value::Null).unwrap_err().rule(), Rule::Required);
}

// ── Scenario 2: bounded integer ──────────────────────────────────────

#[test]
fn test_bounded_integer() {
    let s = number().min(0).max(100).integer().required();
    assert!(s.validate(&Value::from(42)).is_ok());
    assert_eq!(s.validate(&Value::from(42.5)).unwrap_err().rule(), Rule::Integer);
    assert_eq!(s.validate(&Value::from(-1)).unwrap_err().rule(), Rule::Min);
    assert_eq!(s.validate(&Value::from(101)).unwrap_err().rule(), Rule::Max);
}

// ── Scenario 3: object with three failing fields ─────────────────────

#[test]
fn test_object_reports_every_field() {
    let s = object()
        .field("name", string().min_length(1).required())
        .field("email", presets::email())
        .field("age", number().min(0).optional())
        .required();

    let input = Value::object([
        ("name", Value::from("")),
        ("email", Value::from("x")),
        ("age", Value::from(-1)),
    ]);
    let err = s.validate(&input).unwrap_err();
    assert_eq!(err.rule(), Rule::InvalidShape);
    assert_eq!(err.children().len(), 3);

    let by_path: Vec<(&str, Rule)> = err.children().iter().map(|c| (c.path(), c.rule())).collect();
    assert_eq!(
        by_path,
        vec![("name", Rule::MinLength), ("email", Rule::Email), ("age", Rule::Min)]
    );
}

// ── Scenario 4: array with one bad element ───────────────────────────

#[test]
fn test_array_reports_bad_element() {
    let s = array(string().min_length(1)).min_items(1).required();
    let err = s.validate(&Value::from(vec!["ok", "", "ok"])).unwrap_err();
    assert!(err.is_nested());
    assert_eq!(err.children().len(), 1);
    let child = &err.children()[0];
    assert_eq!(child.path(), "[1]");
    assert_eq!(child.rule(), Rule::MinLength);
}

// ── Scenario 5: oneOf ────────────────────────────────────────────────

#[test]
fn test_one_of_string_or_number() {
    let s = one_of([string().required().boxed(), number().required().boxed()]).required();
    assert!(s.validate(&Value::from("hi")).is_ok());
    assert!(s.validate(&Value::from(42)).is_ok());
    let err = s.validate(&Value::Bool(true)).unwrap_err();
    assert_eq!(err.message(), "data does not match any schema");
}

#[test]
fn test_one_of_ambiguous_match() {
    let s = one_of([
        string().min_length(1).required().boxed(),
        string().max_length(10).required().boxed(),
    ])
    .required();
    let err = s.validate(&Value::from("both")).unwrap_err();
    assert!(err.message().contains("matches 2 schemas, expected exactly 1"));
}

// ── Scenario 6: OpenAPI emission ─────────────────────────────────────

#[test]
fn test_openapi_string() {
    let s = string().min_length(3).pattern("^[a-z]+$").required();
    assert_eq!(
        to_open_api(&s),
        json!({"type": "string", "minLength": 3, "pattern": "^[a-z]+$"})
    );
}

#[test]
fn test_openapi_object() {
    let s = object()
        .field("name", string().required())
        .field("age", number().integer().optional())
        .required();
    assert_eq!(
        to_open_api(&s),
        json!({
            "type": "object",
            "properties": {"name": {"type": "string"}, "age": {"type": "integer"}},
            "required": ["name"]
        })
    );
}

#[test]
fn test_anchored_pattern_source_still_validates() {
    let s = string().min_length(3).pattern("^[a-z]+$").required();
    assert!(s.validate(&Value::from("abc")).is_ok());
    assert_eq!(s.validate(&Value::from("abC")).unwrap_err().rule(), Rule::Pattern);
}
