//! # Error Types: Validation Failures and Programmer Errors
//!
//! Two axes, never mixed:
//!
//! - [`ValidationError`]: the caller's input is invalid. Always a value,
//!   never a panic. Carries the field path, the offending value, the rule
//!   identifier, a message, and (for aggregates) the child errors.
//! - [`SchemaError`]: the schema itself is malformed or misused. Surfaced
//!   immediately to the caller of the misused construction API.
//!
//! ## Paths
//!
//! The engine builds paths while unwinding: a leaf error starts at the root
//! (empty path) and each enclosing object or array prepends its segment via
//! [`ValidationError::at`]. Property segments join with `.`; index segments
//! (`[3]`) attach directly, giving `user.addresses[3].zip`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::rule::Rule;
use crate::value::Value;

/// A validation failure, possibly aggregating child failures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Full path from the validated root; empty at the root.
    path: String,
    /// The offending value.
    value: Value,
    /// Rule identifier; aggregates use [`Rule::InvalidShape`].
    rule: Rule,
    /// Human-readable message (default or override).
    message: String,
    /// Child failures of an aggregate.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<ValidationError>,
}

impl ValidationError {
    /// Construct a leaf error at the root path.
    pub fn new(rule: Rule, value: impl Into<Value>, message: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            value: value.into(),
            rule,
            message: message.into(),
            children: Vec::new(),
        }
    }

    /// Construct an aggregate error over child failures.
    pub fn nested(
        value: impl Into<Value>,
        message: impl Into<String>,
        children: Vec<ValidationError>,
    ) -> Self {
        Self::new(Rule::InvalidShape, value, message).with_children(children)
    }

    /// Attach child errors.
    pub fn with_children(mut self, children: Vec<ValidationError>) -> Self {
        self.children = children;
        self
    }

    /// Replace the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Prepend a path segment to this error and every descendant.
    ///
    /// An empty segment leaves the paths unchanged. A segment starting with
    /// `[` is joined without a dot. Segments are not quoted, so a property
    /// name containing `.` or starting with `[` yields an ambiguous path:
    /// key `"[0]"` under `tags` renders as `tags[0]`. Walk
    /// [`children`](Self::children) when exact segments matter.
    pub fn at(mut self, segment: &str) -> Self {
        self.prepend(segment);
        self
    }

    fn prepend(&mut self, segment: &str) {
        if segment.is_empty() {
            return;
        }
        self.path = join_path(segment, &self.path);
        for child in &mut self.children {
            child.prepend(segment);
        }
    }

    /// Full path from the validated root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The offending value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Rule identifier.
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Direct child errors.
    pub fn children(&self) -> &[ValidationError] {
        &self.children
    }

    /// Whether this error aggregates children.
    pub fn is_nested(&self) -> bool {
        !self.children.is_empty()
    }

    /// Depth-first walk over this error and all descendants, self first.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Errors without children.
    pub fn leaves(&self) -> impl Iterator<Item = &ValidationError> {
        self.iter().filter(|e| !e.is_nested())
    }

    /// The first error (depth-first) whose path equals `path`.
    pub fn find(&self, path: &str) -> Option<&ValidationError> {
        self.iter().find(|e| e.path == path)
    }

    /// Machine-readable tree for structured responses.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("path".into(), serde_json::Value::String(self.path.clone()));
        obj.insert("rule".into(), serde_json::Value::String(self.rule.to_string()));
        obj.insert("message".into(), serde_json::Value::String(self.message.clone()));
        obj.insert("value".into(), self.value.to_json());
        if !self.children.is_empty() {
            obj.insert(
                "children".into(),
                serde_json::Value::Array(self.children.iter().map(Self::to_json).collect()),
            );
        }
        serde_json::Value::Object(obj)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = if self.path.is_empty() {
            "(root)"
        } else {
            self.path.as_str()
        };
        write!(f, "Field: {field}, Error: {}", self.message)?;
        if !self.children.is_empty() {
            f.write_str(" [")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    f.write_str("; ")?;
                }
                write!(f, "{child}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Depth-first iterator over an error tree.
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a ValidationError>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ValidationError;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

fn join_path(segment: &str, rest: &str) -> String {
    if rest.is_empty() {
        segment.to_string()
    } else if rest.starts_with('[') {
        format!("{segment}{rest}")
    } else {
        format!("{segment}.{rest}")
    }
}

/// Malformed or misused schema construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A composition child has not been finalized with `required()` or `optional()`.
    #[error("{combinator} child at index {index} is not finalized; call required() or optional() first")]
    UnfinalizedChild {
        /// Combinator keyword (`oneOf`, `allOf`, `anyOf`, `not`).
        combinator: &'static str,
        /// Position of the offending child.
        index: usize,
    },

    /// `not` was given other than exactly one child.
    #[error("not requires exactly one child schema, got {count}")]
    NotArity {
        /// Number of children supplied.
        count: usize,
    },

    /// A combinator other than `not` was given no children.
    #[error("{combinator} requires at least one child schema")]
    EmptyComposition {
        /// Combinator keyword.
        combinator: &'static str,
    },

    /// Two declared object fields share a name.
    #[error("duplicate object field: {0}")]
    DuplicateField(String),
}
