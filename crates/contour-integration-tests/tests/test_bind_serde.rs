//! # Typed Binding and Serde Fidelity
//!
//! Host structs validated through `bind` / `bind_value`, and `Value`
//! conversions to and from `serde_json` preserving integer width.

use contour_core::{Number, Rule, Value};
use contour_schema::{array, bind, bind_value, number, object, string, BindError, ObjectSchema, Required};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Account {
    handle: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    quota: Option<u32>,
    tags: Vec<String>,
}

fn account_schema() -> ObjectSchema<Required> {
    object()
        .field("handle", string().min_length(3).pattern("[a-z0-9_]+").required())
        .field("role", string().literal("member").optional().default("member"))
        .field("quota", number().integer().min(1).optional().default(10))
        .field("tags", array(string().min_length(1)).max_items(4).unique().required())
        .strict()
        .required()
}

fn account(handle: &str) -> Account {
    Account {
        handle: handle.to_string(),
        role: None,
        quota: None,
        tags: vec!["a".to_string()],
    }
}

// ── Binding ──────────────────────────────────────────────────────────

#[test]
fn test_bind_value_fills_defaults() {
    let bound = bind_value(&account_schema(), account("ada_99")).expect("valid account");
    assert_eq!(bound.role.as_deref(), Some("member"));
    assert_eq!(bound.quota, Some(10));
    assert_eq!(bound.handle, "ada_99");
}

#[test]
fn test_bind_in_place() {
    let mut target = account("grace");
    target.quota = Some(3);
    bind(&account_schema(), &mut target).expect("valid account");
    assert_eq!(target.quota, Some(3));
    assert_eq!(target.role.as_deref(), Some("member"));
}

#[test]
fn test_bind_reports_validation_tree() {
    let mut bad = account("A!");
    bad.tags = vec!["x".to_string(), "x".to_string()];
    match bind_value(&account_schema(), bad) {
        Err(BindError::Invalid(err)) => {
            assert_eq!(err.find("handle").map(|e| e.rule()), Some(Rule::MinLength));
            assert_eq!(err.find("tags[1]").map(|e| e.rule()), Some(Rule::UniqueItems));
        }
        other => panic!("expected BindError::Invalid, got {other:?}"),
    }
}

#[test]
fn test_bind_rejects_unknown_field_from_host_type() {
    #[derive(Debug, Serialize, Deserialize)]
    struct Extended {
        handle: String,
        tags: Vec<String>,
        admin: bool,
    }
    let value = Extended {
        handle: "root".to_string(),
        tags: vec![],
        admin: true,
    };
    match bind_value(&account_schema(), value) {
        Err(BindError::Invalid(err)) => {
            assert_eq!(err.find("admin").map(|e| e.rule()), Some(Rule::UnknownKey));
        }
        other => panic!("expected BindError::Invalid, got {other:?}"),
    }
}

#[test]
fn test_bind_error_display() {
    let err = bind_value(&string().min_length(5).required(), "abc".to_string()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation failed: Field: (root), Error: minimum length is 5"
    );
}

// ── Value conversions ────────────────────────────────────────────────

#[test]
fn test_json_integers_keep_width() {
    let v = Value::from(json!({"big": u64::MAX, "neg": -7, "frac": 0.25}));
    let map = v.as_object().expect("object");
    assert!(matches!(map["big"].as_number(), Some(Number::UInt(u64::MAX))));
    assert!(matches!(map["neg"].as_number(), Some(Number::Int(-7))));
    assert!(matches!(map["frac"].as_number(), Some(Number::Float(f)) if f == 0.25));
    assert_eq!(v.to_json(), json!({"big": u64::MAX, "neg": -7, "frac": 0.25}));
}

#[test]
fn test_value_serde_round_trip() {
    let v = Value::object([
        ("list", Value::from(vec![Value::from(1), Value::Null, Value::from("s")])),
        ("flag", Value::Bool(false)),
    ]);
    let text = serde_json::to_string(&v).expect("serialize");
    assert_eq!(text, r#"{"flag":false,"list":[1,null,"s"]}"#);
    let back: Value = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, v);
}

#[test]
fn test_validate_json_matches_validate() {
    let schema = account_schema();
    let raw = json!({"handle": "ada", "tags": ["x"], "quota": 0});
    assert_eq!(schema.validate_json(&raw), schema.validate(&Value::from(&raw)));
    assert!(schema.validate_json(&raw).is_err());
}
