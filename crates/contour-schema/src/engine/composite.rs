//! Composition validation.
//!
//! Each child is evaluated under its own presence. Branch failures are kept
//! as the children of the aggregate error so callers can see why every
//! branch was rejected.

use contour_core::{Rule, ValidationError, Value};

use crate::model::{Combinator, CompositeSpec, NodeRef};

use super::{check as check_node, fail, run_custom, Mode};

pub(super) fn check(node: NodeRef<'_>, spec: &CompositeSpec, value: &Value) -> Result<(), ValidationError> {
    let outcomes: Vec<Result<(), ValidationError>> = spec
        .children()
        .map(|child| check_node(child, value, Mode::of(child)))
        .collect();
    let matched = outcomes.iter().filter(|r| r.is_ok()).count();
    let failures = || -> Vec<ValidationError> {
        outcomes.iter().filter_map(|r| r.as_ref().err().cloned()).collect()
    };

    match spec.combinator() {
        Combinator::AllOf => {
            let failed = failures();
            if !failed.is_empty() {
                let message = format!("data does not match all schemas: {} failed", failed.len());
                return Err(aggregate(node, value, message, failed));
            }
        }
        Combinator::AnyOf => {
            if matched == 0 {
                return Err(aggregate(node, value, "data does not match any schema", failures()));
            }
        }
        Combinator::OneOf => {
            if matched == 0 {
                return Err(aggregate(node, value, "data does not match any schema", failures()));
            }
            if matched > 1 {
                return Err(fail(
                    node,
                    Rule::InvalidShape,
                    value,
                    format!("data matches {matched} schemas, expected exactly 1"),
                ));
            }
        }
        Combinator::Not => {
            if matched > 0 {
                return Err(fail(node, Rule::InvalidShape, value, "data should not match the schema"));
            }
        }
    }

    run_custom(node, spec.custom.as_ref(), value, value)
}

fn aggregate(
    node: NodeRef<'_>,
    value: &Value,
    message: impl Into<String>,
    children: Vec<ValidationError>,
) -> ValidationError {
    fail(node, Rule::InvalidShape, value, message).with_children(children)
}

#[cfg(test)]
mod tests {
    use crate::builder::{all_of, any_of, not, number, object, one_of, string, AnySchema};
    use contour_core::{Rule, Value};

    // ── oneOf ────────────────────────────────────────────────────────

    #[test]
    fn test_one_of_exactly_one() {
        let s = one_of([string().required().boxed(), number().required().boxed()]).required();
        assert!(s.validate(&Value::from("x")).is_ok());
        assert!(s.validate(&Value::from(1)).is_ok());
        let err = s.validate(&Value::Bool(true)).unwrap_err();
        assert_eq!(err.rule(), Rule::InvalidShape);
        assert_eq!(err.message(), "data does not match any schema");
        assert_eq!(err.children().len(), 2);
    }

    #[test]
    fn test_one_of_ambiguous() {
        let s = one_of([
            number().min(0).required().boxed(),
            number().max(10).required().boxed(),
        ])
        .required();
        let err = s.validate(&Value::from(5)).unwrap_err();
        assert_eq!(err.message(), "data matches 2 schemas, expected exactly 1");
        assert!(s.validate(&Value::from(-5)).is_ok());
    }

    #[test]
    fn test_empty_one_of_and_any_of_never_match() {
        let s = one_of(Vec::<AnySchema>::new()).required();
        assert!(s.validate(&Value::from(1)).is_err());
        let s = any_of(Vec::<AnySchema>::new()).required();
        assert!(s.validate(&Value::from(1)).is_err());
    }

    // ── allOf / anyOf ────────────────────────────────────────────────

    #[test]
    fn test_all_of_aggregates_every_failure() {
        let s = all_of([
            string().min_length(5).required().boxed(),
            string().pattern("[0-9]+").required().boxed(),
            string().max_length(10).required().boxed(),
        ])
        .required();
        assert!(s.validate(&Value::from("123456")).is_ok());
        let err = s.validate(&Value::from("abc")).unwrap_err();
        assert_eq!(err.children().len(), 2);
        assert_eq!(err.children()[0].rule(), Rule::MinLength);
        assert_eq!(err.children()[1].rule(), Rule::Pattern);
    }

    #[test]
    fn test_empty_all_of_matches_everything() {
        assert!(all_of(Vec::<AnySchema>::new()).required().validate(&Value::from("anything")).is_ok());
    }

    #[test]
    fn test_any_of() {
        let s = any_of([
            string().email().required().boxed(),
            string().url().required().boxed(),
        ])
        .required();
        assert!(s.validate(&Value::from("a@b.io")).is_ok());
        assert!(s.validate(&Value::from("https://b.io")).is_ok());
        let err = s.validate(&Value::from("nope")).unwrap_err();
        assert_eq!(err.message(), "data does not match any schema");
        let rules: Vec<Rule> = err.children().iter().map(|c| c.rule()).collect();
        assert_eq!(rules, vec![Rule::Email, Rule::Url]);
    }

    // ── not ──────────────────────────────────────────────────────────

    #[test]
    fn test_not() {
        let s = not(string().literal("root").required()).required();
        assert!(s.validate(&Value::from("alice")).is_ok());
        let err = s.validate(&Value::from("root")).unwrap_err();
        assert_eq!(err.message(), "data should not match the schema");
    }

    // ── Presence ─────────────────────────────────────────────────────

    #[test]
    fn test_optional_composition_absent() {
        let s = one_of([string().required().boxed(), number().required().boxed()]).optional();
        assert!(s.validate(&Value::Null).is_ok());
        let required = one_of([string().required().boxed()]).required();
        assert_eq!(required.validate(&Value::Null).unwrap_err().rule(), Rule::Required);
    }

    #[test]
    fn test_composition_default_is_checked() {
        let s = one_of([string().required().boxed(), number().required().boxed()])
            .optional()
            .default(true);
        assert!(s.validate(&Value::Null).is_err());
    }

    #[test]
    fn test_children_keep_their_own_object_flags() {
        let strict = object().field("a", number().required()).strict().required();
        let loose = object().field("b", number().required()).required();
        let s = all_of([strict.boxed(), loose.boxed()]).required();
        let err = s.validate(&Value::object([("a", 1), ("b", 2)])).unwrap_err();
        assert_eq!(err.children()[0].rule(), Rule::UnknownKey);
    }

    #[test]
    fn test_message_override_on_composition() {
        let s = any_of([number().required().boxed()])
            .message(Rule::InvalidShape, "must be numeric")
            .required();
        assert_eq!(s.validate(&Value::from("x")).unwrap_err().message(), "must be numeric");
    }
}
