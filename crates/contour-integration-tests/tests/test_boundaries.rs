//! # Boundary Behavior
//!
//! Inclusive and exclusive edges for every bounded constraint, `NaN`
//! handling, and Unicode length counting.

use contour_core::{Rule, Value};
use contour_schema::{array, number, object, string};

fn rule_of(result: Result<(), contour_core::ValidationError>) -> Option<Rule> {
    result.err().map(|e| e.rule())
}

// ── Strings ──────────────────────────────────────────────────────────

#[test]
fn test_string_min_five() {
    let s = string().min_length(5).required();
    assert_eq!(rule_of(s.validate(&Value::from("abcd"))), Some(Rule::MinLength));
    assert_eq!(rule_of(s.validate(&Value::from("abcde"))), None);
    assert_eq!(rule_of(s.validate(&Value::from("abcdef"))), None);
}

#[test]
fn test_string_max_five() {
    let s = string().max_length(5).required();
    assert_eq!(rule_of(s.validate(&Value::from("abcde"))), None);
    assert_eq!(rule_of(s.validate(&Value::from("abcdef"))), Some(Rule::MaxLength));
}

#[test]
fn test_combining_marks_count_as_code_points() {
    // "é" precomposed is one code point; "e" + U+0301 is two.
    let s = string().max_length(4).required();
    assert!(s.validate(&Value::from("caf\u{e9}")).is_ok());
    assert_eq!(rule_of(s.validate(&Value::from("cafe\u{301}"))), Some(Rule::MaxLength));
}

#[test]
fn test_emoji_is_one_code_point() {
    let s = string().min_length(2).max_length(2).required();
    assert!(s.validate(&Value::from("🦀🦀")).is_ok());
    assert_eq!(rule_of(s.validate(&Value::from("🦀"))), Some(Rule::MinLength));
}

// ── Numbers ──────────────────────────────────────────────────────────

#[test]
fn test_min_zero() {
    let s = number().min(0).required();
    assert_eq!(rule_of(s.validate(&Value::from(-0.1))), Some(Rule::Min));
    assert_eq!(rule_of(s.validate(&Value::from(0))), None);
    assert_eq!(rule_of(s.validate(&Value::from(-0.0))), None);
}

#[test]
fn test_exclusive_min_zero() {
    let s = number().exclusive_min(0).required();
    assert_eq!(rule_of(s.validate(&Value::from(0))), Some(Rule::ExclusiveMin));
    assert_eq!(rule_of(s.validate(&Value::from(f64::EPSILON))), None);
    assert_eq!(rule_of(s.validate(&Value::from(f64::MIN_POSITIVE))), None);
}

#[test]
fn test_nan_under_bounds_and_type_only() {
    let nan = Value::from(f64::NAN);
    assert!(number().required().validate(&nan).is_ok());
    assert_eq!(rule_of(number().min(0).required().validate(&nan)), Some(Rule::Min));
    assert_eq!(rule_of(number().max(0).required().validate(&nan)), Some(Rule::Max));
    assert_eq!(rule_of(number().exclusive_min(0).required().validate(&nan)), Some(Rule::ExclusiveMin));
    assert_eq!(rule_of(number().exclusive_max(0).required().validate(&nan)), Some(Rule::ExclusiveMax));
    assert_eq!(rule_of(number().integer().required().validate(&nan)), Some(Rule::Integer));
    assert_eq!(rule_of(number().positive().required().validate(&nan)), Some(Rule::Positive));
}

#[test]
fn test_large_unsigned_widens() {
    let s = number().min(0).required();
    assert!(s.validate(&Value::from(u64::MAX)).is_ok());
    let s = number().max(i64::MAX).required();
    assert!(s.validate(&Value::from(i64::MAX)).is_ok());
}

// ── Arrays and objects ───────────────────────────────────────────────

#[test]
fn test_min_items_one() {
    let s = array(string()).min_items(1).required();
    assert_eq!(rule_of(s.validate(&Value::Array(vec![]))), Some(Rule::MinItems));
    assert_eq!(rule_of(s.validate(&Value::from(vec!["x"]))), None);
}

#[test]
fn test_max_properties_edge() {
    let s = object().max_properties(2).required();
    assert!(s.validate(&Value::object([("a", 1), ("b", 2)])).is_ok());
    assert_eq!(
        rule_of(s.validate(&Value::object([("a", 1), ("b", 2), ("c", 3)]))),
        Some(Rule::MaxProperties)
    );
}

#[test]
fn test_empty_object_against_empty_schema() {
    let s = object().strict().required();
    assert!(s.validate(&Value::object::<&str, i32, _>([])).is_ok());
    assert_eq!(rule_of(s.validate(&Value::object([("x", 1)]))), Some(Rule::UnknownKey));
}
