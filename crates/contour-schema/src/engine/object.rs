//! Object validation.
//!
//! Order: type, property-count bounds, strict-mode unknown keys, every
//! declared field (collect-all), then the custom predicate.

use contour_core::{Rule, ValidationError, Value};

use crate::model::{NodeRef, ObjectSpec};

use super::{check as check_node, fail, run_custom, type_mismatch, Mode};

pub(super) fn check(node: NodeRef<'_>, spec: &ObjectSpec, value: &Value) -> Result<(), ValidationError> {
    let Some(map) = value.as_object() else {
        return Err(type_mismatch(node, Rule::Type, value));
    };

    if let Some(min) = spec.min_properties() {
        if map.len() < min {
            return Err(fail(
                node,
                Rule::MinProperties,
                value,
                format!("object must have at least {min} properties"),
            ));
        }
    }
    if let Some(max) = spec.max_properties() {
        if map.len() > max {
            return Err(fail(
                node,
                Rule::MaxProperties,
                value,
                format!("object must have at most {max} properties"),
            ));
        }
    }

    if spec.is_strict() {
        if let Some((key, unknown)) = map.iter().find(|(key, _)| spec.field(key).is_none()) {
            return Err(fail(node, Rule::UnknownKey, unknown, format!("unknown key {key:?}")).at(key));
        }
    }

    let mut failures = Vec::new();
    for (name, field) in spec.fields() {
        let result = match map.get(name) {
            None if field.is_required() && !spec.is_partial() => {
                Err(fail(field, Rule::MissingKey, &Value::Null, "missing required key"))
            }
            None => check_node(field, &Value::Null, optional_mode(field)),
            Some(present) if spec.is_partial() => check_node(field, present, optional_mode(field)),
            Some(present) => check_node(field, present, Mode::of(field)),
        };
        if let Err(e) = result {
            failures.push(e.at(name));
        }
    }
    if !failures.is_empty() {
        let message = format!("object validation failed: {} invalid fields", failures.len());
        return Err(fail(node, Rule::InvalidShape, value, message).with_children(failures));
    }

    run_custom(node, spec.custom.as_ref(), map, value)
}

/// Mode for a field relaxed to optional by `partial` (or absent and
/// already optional). Keeps the field's own default.
fn optional_mode(field: NodeRef<'_>) -> Mode<'_> {
    Mode::Optional {
        default: field.default_value(),
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{number, object, string};
    use contour_core::{Rule, Value};

    // ── Type and counts ──────────────────────────────────────────────

    #[test]
    fn test_non_object_is_type_error() {
        let s = object().required();
        let err = s.validate(&Value::from(vec![1])).unwrap_err();
        assert_eq!(err.rule(), Rule::Type);
        assert_eq!(err.message(), "expected object, got array");
    }

    #[test]
    fn test_property_counts() {
        let s = object().min_properties(1).max_properties(2).required();
        assert_eq!(s.validate(&Value::object::<&str, i32, _>([])).unwrap_err().rule(), Rule::MinProperties);
        let three = Value::object([("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(s.validate(&three).unwrap_err().rule(), Rule::MaxProperties);
    }

    // ── Fields ───────────────────────────────────────────────────────

    #[test]
    fn test_missing_required_key() {
        let s = object().field("name", string().required()).required();
        let err = s.validate(&Value::object::<&str, i32, _>([])).unwrap_err();
        let child = &err.children()[0];
        assert_eq!(child.rule(), Rule::MissingKey);
        assert_eq!(child.path(), "name");
    }

    #[test]
    fn test_unfinalized_field_is_required() {
        let s = object().field("name", string().min_length(1)).required();
        let err = s.validate(&Value::object::<&str, i32, _>([])).unwrap_err();
        assert_eq!(err.children()[0].rule(), Rule::MissingKey);
        let err = s.validate(&Value::object([("name", Value::Null)])).unwrap_err();
        assert_eq!(err.children()[0].rule(), Rule::Required);
    }

    #[test]
    fn test_missing_optional_key_is_ok() {
        let s = object().field("nick", string().optional()).required();
        assert!(s.validate(&Value::object::<&str, i32, _>([])).is_ok());
    }

    #[test]
    fn test_missing_optional_key_with_unsound_default_fails() {
        let s = object()
            .field("age", number().min(18).optional().default(3))
            .required();
        let err = s.validate(&Value::object::<&str, i32, _>([])).unwrap_err();
        assert_eq!(err.children()[0].rule(), Rule::Min);
        assert_eq!(err.children()[0].path(), "age");
    }

    #[test]
    fn test_collects_all_field_failures() {
        let s = object()
            .field("name", string().min_length(1).required())
            .field("email", string().email().required())
            .field("age", number().min(0).required())
            .required();
        let input = Value::object([
            ("name", Value::from("")),
            ("email", Value::from("x")),
            ("age", Value::from(-1)),
        ]);
        let err = s.validate(&input).unwrap_err();
        assert_eq!(err.message(), "object validation failed: 3 invalid fields");
        let paths: Vec<&str> = err.children().iter().map(|c| c.path()).collect();
        assert_eq!(paths, vec!["name", "email", "age"]);
    }

    #[test]
    fn test_invalid_shape_override_on_object() {
        let s = object()
            .field("name", string().min_length(2).required())
            .message(Rule::InvalidShape, "bad profile")
            .required();
        let err = s.validate(&Value::object([("name", "a")])).unwrap_err();
        assert_eq!(err.rule(), Rule::InvalidShape);
        assert_eq!(err.message(), "bad profile");
        assert_eq!(err.find("name").map(|e| e.message()), Some("minimum length is 2"));
    }

    // ── Strict and partial ───────────────────────────────────────────

    #[test]
    fn test_strict_rejects_unknown_key() {
        let s = object().field("a", number().required()).strict().required();
        let input = Value::object([("a", 1), ("zz", 2), ("b", 3)]);
        let err = s.validate(&input).unwrap_err();
        assert_eq!(err.rule(), Rule::UnknownKey);
        assert_eq!(err.path(), "b");
        assert_eq!(err.message(), "unknown key \"b\"");
    }

    #[test]
    fn test_non_strict_ignores_unknown_keys() {
        let s = object().field("a", number().required()).required();
        assert!(s.validate(&Value::object([("a", 1), ("b", 2)])).is_ok());
    }

    #[test]
    fn test_partial_relaxes_required_fields() {
        let s = object()
            .field("name", string().min_length(2).required())
            .field("age", number().required())
            .partial()
            .required();
        assert!(s.validate(&Value::object::<&str, i32, _>([])).is_ok());
        assert!(s.validate(&Value::object([("name", Value::Null)])).is_ok());
        let err = s.validate(&Value::object([("name", "x")])).unwrap_err();
        assert_eq!(err.children()[0].rule(), Rule::MinLength);
    }

    #[test]
    fn test_nested_object_paths() {
        let s = object()
            .field(
                "user",
                object().field("profile", object().field("email", string().email().required())),
            )
            .required();
        let input = Value::object([(
            "user",
            Value::object([("profile", Value::object([("email", "bad")]))]),
        )]);
        let err = s.validate(&input).unwrap_err();
        let leaf = err.leaves().next().unwrap();
        assert_eq!(leaf.path(), "user.profile.email");
        assert_eq!(leaf.rule(), Rule::Email);
    }

    #[test]
    fn test_custom_sees_whole_object() {
        let s = object()
            .field("password", string().required())
            .field("confirm", string().required())
            .custom(|map| {
                if map.get("password") == map.get("confirm") {
                    Ok(())
                } else {
                    Err("passwords do not match".into())
                }
            })
            .required();
        let ok = Value::object([("password", "a"), ("confirm", "a")]);
        assert!(s.validate(&ok).is_ok());
        let bad = Value::object([("password", "a"), ("confirm", "b")]);
        assert_eq!(s.validate(&bad).unwrap_err().rule(), Rule::Custom);
    }
}
