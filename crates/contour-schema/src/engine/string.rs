//! String validation.
//!
//! Lengths count Unicode scalar values (`char`s), so `"héllo"` has length
//! 5 and a decomposed `"e\u{301}"` has length 2.

use contour_core::{Rule, ValidationError, Value};

use crate::format;
use crate::model::{NodeRef, StringSpec};

use super::{fail, run_custom, type_mismatch};

pub(super) fn check(node: NodeRef<'_>, spec: &StringSpec, value: &Value) -> Result<(), ValidationError> {
    let Some(s) = value.as_str() else {
        return Err(type_mismatch(node, Rule::Type, value));
    };

    let length = s.chars().count();
    if let Some(min) = spec.min_length() {
        if length < min {
            return Err(fail(node, Rule::MinLength, value, format!("minimum length is {min}")));
        }
    }
    if let Some(max) = spec.max_length() {
        if length > max {
            return Err(fail(node, Rule::MaxLength, value, format!("maximum length is {max}")));
        }
    }

    if let Some(pattern) = spec.pattern() {
        if !pattern.is_match(s) {
            return Err(fail(
                node,
                Rule::Pattern,
                value,
                format!("value does not match pattern {}", pattern.source()),
            ));
        }
    }

    if let Some(fmt) = spec.format() {
        if !format::matches(fmt, s) {
            let message = match fmt {
                crate::model::Format::Email => "invalid email format",
                crate::model::Format::Uri => "invalid url format",
            };
            return Err(fail(node, fmt.rule(), value, message));
        }
    }

    if let Some(literal) = spec.literal() {
        if s != literal {
            return Err(fail(node, Rule::Const, value, format!("value must be {literal:?}")));
        }
    }

    run_custom(node, spec.custom.as_ref(), s, value)
}

#[cfg(test)]
mod tests {
    use crate::builder::string;
    use contour_core::{Rule, Value};

    fn rule_of(result: Result<(), contour_core::ValidationError>) -> Option<Rule> {
        result.err().map(|e| e.rule())
    }

    // ── Type ─────────────────────────────────────────────────────────

    #[test]
    fn test_non_string_is_type_error() {
        let s = string().required();
        let err = s.validate(&Value::from(42)).unwrap_err();
        assert_eq!(err.rule(), Rule::Type);
        assert_eq!(err.message(), "expected string, got number");
        assert_eq!(rule_of(s.validate(&Value::Bool(true))), Some(Rule::Type));
        assert_eq!(rule_of(s.validate(&Value::Array(vec![]))), Some(Rule::Type));
    }

    // ── Length ───────────────────────────────────────────────────────

    #[test]
    fn test_length_bounds_inclusive() {
        let s = string().min_length(3).max_length(5).required();
        assert_eq!(rule_of(s.validate(&Value::from("ab"))), Some(Rule::MinLength));
        assert!(s.validate(&Value::from("abc")).is_ok());
        assert!(s.validate(&Value::from("abcde")).is_ok());
        assert_eq!(rule_of(s.validate(&Value::from("abcdef"))), Some(Rule::MaxLength));
    }

    #[test]
    fn test_length_counts_code_points() {
        let s = string().max_length(5).required();
        assert!(s.validate(&Value::from("héllo")).is_ok());
        assert!(s.validate(&Value::from("日本語テキ")).is_ok());
        assert_eq!(rule_of(s.validate(&Value::from("日本語テキス"))), Some(Rule::MaxLength));
        let decomposed = string().max_length(1).required();
        assert_eq!(rule_of(decomposed.validate(&Value::from("e\u{301}"))), Some(Rule::MaxLength));
    }

    #[test]
    fn test_length_messages() {
        let s = string().min_length(3).required();
        assert_eq!(s.validate(&Value::from("hi")).unwrap_err().message(), "minimum length is 3");
        let s = string().max_length(2).required();
        assert_eq!(s.validate(&Value::from("hey")).unwrap_err().message(), "maximum length is 2");
    }

    // ── Pattern ──────────────────────────────────────────────────────

    #[test]
    fn test_pattern_is_whole_string() {
        let s = string().pattern("[a-z]+").required();
        assert!(s.validate(&Value::from("abc")).is_ok());
        assert_eq!(rule_of(s.validate(&Value::from("abc1"))), Some(Rule::Pattern));
        assert_eq!(rule_of(s.validate(&Value::from("1abc"))), Some(Rule::Pattern));
    }

    #[test]
    fn test_pattern_alternation_is_anchored_as_group() {
        let s = string().pattern("cat|dog").required();
        assert!(s.validate(&Value::from("dog")).is_ok());
        assert_eq!(rule_of(s.validate(&Value::from("catdog"))), Some(Rule::Pattern));
    }

    // ── Formats ──────────────────────────────────────────────────────

    #[test]
    fn test_email_format() {
        let s = string().email().required();
        assert!(s.validate(&Value::from("a@b.co")).is_ok());
        let err = s.validate(&Value::from("a@b")).unwrap_err();
        assert_eq!(err.rule(), Rule::Email);
        assert_eq!(err.message(), "invalid email format");
    }

    #[test]
    fn test_url_format() {
        let s = string().url().required();
        assert!(s.validate(&Value::from("https://example.com/x")).is_ok());
        let err = s.validate(&Value::from("example.com")).unwrap_err();
        assert_eq!(err.rule(), Rule::Url);
    }

    // ── Const and ordering ───────────────────────────────────────────

    #[test]
    fn test_literal() {
        let s = string().literal("admin").required();
        assert!(s.validate(&Value::from("admin")).is_ok());
        let err = s.validate(&Value::from("Admin")).unwrap_err();
        assert_eq!(err.rule(), Rule::Const);
        assert_eq!(err.message(), "value must be \"admin\"");
    }

    #[test]
    fn test_first_violation_wins() {
        let s = string().min_length(5).pattern("[0-9]+").email().required();
        assert_eq!(rule_of(s.validate(&Value::from("ab"))), Some(Rule::MinLength));
        assert_eq!(rule_of(s.validate(&Value::from("abcdef"))), Some(Rule::Pattern));
        assert_eq!(rule_of(s.validate(&Value::from("123456"))), Some(Rule::Email));
    }
}
