//! # Validation Engine
//!
//! Evaluates a schema node against a candidate [`Value`].
//!
//! ## Per-node pipeline
//!
//! ```text
//! Absent? ──▶ TypeCheck ──▶ ConstraintCheck ──▶ ChildValidation ──▶ CustomCheck ──▶ Done
//! ```
//!
//! Any stage may finish early with an error. Constraint checks stop at the
//! first violated constraint. Child validation for arrays and objects
//! collects every failing child into one nested error.
//!
//! ## Absent values
//!
//! `null` is absent for every kind. The empty string is also absent, but
//! only when the string node is optional; a required string receives `""`
//! as a value and its length constraints decide.
//!
//! | Presence | Absent input |
//! |---|---|
//! | required or unfinalized | `required` error |
//! | optional with default | validate the default instead |
//! | optional | ok |
//!
//! ## Purity
//!
//! The engine reads the schema through [`NodeRef`] and never writes to it.
//! An unfinalized child is validated as required by computing its [`Mode`]
//! per call, so concurrent validations of one schema share nothing mutable.

mod array;
mod boolean;
mod composite;
mod defaults;
mod number;
mod object;
mod string;

use std::panic::{catch_unwind, AssertUnwindSafe};

use contour_core::{Rule, ValidationError, Value};

use crate::model::{KindRef, NodeRef, Predicate, Presence};

pub(crate) use defaults::fill_defaults;

/// How absence is treated for one evaluation of a node.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Mode<'a> {
    Required,
    Optional { default: Option<&'a Value> },
}

impl<'a> Mode<'a> {
    /// Mode from the node's own presence. Unfinalized counts as required.
    pub(crate) fn of(node: NodeRef<'a>) -> Self {
        match node.presence() {
            Presence::Optional => Mode::Optional {
                default: node.default_value(),
            },
            Presence::Required | Presence::Unfinalized => Mode::Required,
        }
    }

    fn is_optional(&self) -> bool {
        matches!(self, Mode::Optional { .. })
    }
}

/// Validate `value` against `node` under the node's own presence.
pub(crate) fn validate(node: NodeRef<'_>, value: &Value) -> Result<(), ValidationError> {
    check(node, value, Mode::of(node))
}

/// Fill defaults, then validate the filled value.
pub(crate) fn parse(node: NodeRef<'_>, value: Value) -> Result<Value, ValidationError> {
    let filled = fill_defaults(node, value);
    validate(node, &filled)?;
    Ok(filled)
}

/// Validate `value` against `node` under an explicit mode.
pub(crate) fn check(node: NodeRef<'_>, value: &Value, mode: Mode<'_>) -> Result<(), ValidationError> {
    if let KindRef::String(spec) = node.kind() {
        if let Some(pattern) = spec.pattern() {
            if let Some(reason) = pattern.compile_error() {
                tracing::debug!(pattern = pattern.source(), "validation against poisoned pattern");
                return Err(fail(
                    node,
                    Rule::Pattern,
                    value,
                    format!("invalid pattern {:?}: {reason}", pattern.source()),
                ));
            }
        }
    }

    if is_absent(node, value, mode) {
        return match mode {
            Mode::Required => Err(fail(node, Rule::Required, value, "field is required")),
            Mode::Optional { default: Some(default) } => {
                check(node, default, Mode::Optional { default: None })
            }
            Mode::Optional { default: None } => Ok(()),
        };
    }

    tracing::trace!(kind = node.kind().name(), "validating");
    match node.kind() {
        KindRef::String(spec) => string::check(node, spec, value),
        KindRef::Number(spec) => number::check(node, spec, value),
        KindRef::Boolean(spec) => boolean::check(node, spec, value),
        KindRef::Array(spec) => array::check(node, spec, value),
        KindRef::Object(spec) => object::check(node, spec, value),
        KindRef::Composite(spec) => composite::check(node, spec, value),
    }
}

fn is_absent(node: NodeRef<'_>, value: &Value, mode: Mode<'_>) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() && mode.is_optional() && matches!(node.kind(), KindRef::String(_)),
        _ => false,
    }
}

// ─── Error helpers ───────────────────────────────────────────────────

/// A leaf error, with the node's message override applied.
pub(crate) fn fail(
    node: NodeRef<'_>,
    rule: Rule,
    value: &Value,
    default_message: impl Into<String>,
) -> ValidationError {
    let message = match node.meta.message_for(rule) {
        Some(custom) => custom.to_string(),
        None => default_message.into(),
    };
    ValidationError::new(rule, value.clone(), message)
}

/// Type mismatch error: `expected <kind>, got <type>`.
pub(crate) fn type_mismatch(node: NodeRef<'_>, rule: Rule, value: &Value) -> ValidationError {
    fail(
        node,
        rule,
        value,
        format!("expected {}, got {}", node.kind().name(), value.type_name()),
    )
}

/// Run a custom predicate, converting a panic into a `custom` error.
pub(crate) fn run_custom<T: ?Sized>(
    node: NodeRef<'_>,
    predicate: Option<&Predicate<T>>,
    input: &T,
    value: &Value,
) -> Result<(), ValidationError> {
    let Some(predicate) = predicate else {
        return Ok(());
    };
    match catch_unwind(AssertUnwindSafe(|| predicate.call(input))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(message)) => Err(fail(node, Rule::Custom, value, message)),
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            tracing::warn!(%reason, "custom predicate panicked");
            Err(fail(
                node,
                Rule::Custom,
                value,
                format!("custom validator panicked: {reason}"),
            ))
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Render a bound for messages: integral values without a fraction.
pub(crate) fn fmt_bound(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
