//! # Schema Model
//!
//! The read-only representation of a schema node. A node is a kind-specific
//! spec (constraints, children, custom predicate) plus [`Meta`] (presence,
//! default, message overrides, documentation).
//!
//! There is no public construction surface here: the builder in
//! [`crate::builder`] owns construction, and a node only ever becomes a
//! [`SchemaNode`] by erasing a built [`Schema`](crate::Schema). Validation
//! and emission walk the tree through the borrowed [`NodeRef`] view, which
//! exposes read accessors only.
//!
//! ## Invariants
//!
//! - Presence is set by the builder's state type and never changes after a
//!   transition.
//! - A node with `Presence::Required` carries no default.
//! - Object field names are unique; re-declaring a field replaces it in
//!   place.
//! - A pattern is compiled when it is set. A pattern that fails to compile
//!   poisons the node: every validation yields a `pattern` error, and the
//!   original source string is still available for emission.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use contour_core::{Rule, Value};

// ─── Presence ────────────────────────────────────────────────────────

/// Whether a node demands a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Not yet finalized. Treated as required when validated as a child.
    Unfinalized,
    /// A value must be present.
    Required,
    /// Absence is tolerated; a default may apply.
    Optional,
}

impl Presence {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unfinalized => "unfinalized",
            Self::Required => "required",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Custom predicates ───────────────────────────────────────────────

/// A user-supplied check over the typed value of a node.
///
/// Predicates are shared by every clone of the schema and invoked
/// concurrently when the schema is validated from several threads, so they
/// must be `Send + Sync` and must not rely on unsynchronized shared state.
/// A predicate that panics is reported as a `custom` error.
pub struct Predicate<T: ?Sized>(Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>);

impl<T: ?Sized> Predicate<T> {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, input: &T) -> Result<(), String> {
        (self.0)(input)
    }
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

// ─── Documentation ───────────────────────────────────────────────────

/// One entry of a named example set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Embedded example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// URL of an externally hosted example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,
}

impl Example {
    /// An example carrying an embedded value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// An example pointing at an external resource.
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            external_value: Some(url.into()),
            ..Self::default()
        }
    }

    /// Set the summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Documentation attached to a node. Never consulted by validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Documentation {
    pub(crate) description: Option<String>,
    pub(crate) example: Option<Value>,
    pub(crate) examples: BTreeMap<String, Example>,
}

impl Documentation {
    /// Free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Single example value.
    pub fn example(&self) -> Option<&Value> {
        self.example.as_ref()
    }

    /// Named example set, keyed by name.
    pub fn examples(&self) -> &BTreeMap<String, Example> {
        &self.examples
    }
}

// ─── Meta ────────────────────────────────────────────────────────────

/// Kind-independent node data.
#[derive(Debug, Clone)]
pub struct Meta {
    pub(crate) presence: Presence,
    pub(crate) default: Option<Value>,
    pub(crate) messages: BTreeMap<String, String>,
    pub(crate) docs: Documentation,
}

impl Meta {
    pub(crate) fn new() -> Self {
        Self {
            presence: Presence::Unfinalized,
            default: None,
            messages: BTreeMap::new(),
            docs: Documentation::default(),
        }
    }

    /// Message override for a rule, if one was set.
    pub fn message_for(&self, rule: Rule) -> Option<&str> {
        self.messages.get(rule.as_str()).map(String::as_str)
    }
}

// ─── Patterns and formats ────────────────────────────────────────────

/// A string pattern, compiled at construction.
///
/// Matching is whole-string: the source is anchored as `^(?:source)$`.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Result<Regex, String>,
}

impl Pattern {
    pub(crate) fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Regex::new(&format!("^(?:{source})$")).map_err(|e| e.to_string());
        if let Err(reason) = &compiled {
            tracing::warn!(pattern = %source, %reason, "pattern failed to compile; schema is poisoned");
        }
        Self { source, compiled }
    }

    /// The pattern as written by the schema author.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Compilation diagnostic, if the pattern is invalid.
    pub fn compile_error(&self) -> Option<&str> {
        self.compiled.as_ref().err().map(String::as_str)
    }

    /// Whether the pattern failed to compile.
    pub fn is_poisoned(&self) -> bool {
        self.compiled.is_err()
    }

    pub(crate) fn is_match(&self, input: &str) -> bool {
        self.compiled.as_ref().map_or(false, |re| re.is_match(input))
    }
}

/// Well-known string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `local@domain.tld`, at most 254 characters.
    Email,
    /// Absolute URI with a non-empty scheme and host.
    Uri,
}

impl Format {
    /// The JSON Schema `format` keyword value.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Uri => "uri",
        }
    }

    /// The rule reported when the format check fails.
    pub fn rule(&self) -> Rule {
        match self {
            Self::Email => Rule::Email,
            Self::Uri => Rule::Url,
        }
    }
}

/// Composition combinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combinator {
    /// Exactly one child must match.
    #[serde(rename = "oneOf")]
    OneOf,
    /// Every child must match.
    #[serde(rename = "allOf")]
    AllOf,
    /// At least one child must match.
    #[serde(rename = "anyOf")]
    AnyOf,
    /// The single child must not match.
    #[serde(rename = "not")]
    Not,
}

impl Combinator {
    /// JSON Schema keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::OneOf => "oneOf",
            Self::AllOf => "allOf",
            Self::AnyOf => "anyOf",
            Self::Not => "not",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ─── Kind specs ──────────────────────────────────────────────────────

/// String constraints.
#[derive(Debug, Clone, Default)]
pub struct StringSpec {
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) pattern: Option<Pattern>,
    pub(crate) format: Option<Format>,
    pub(crate) literal: Option<String>,
    pub(crate) custom: Option<Predicate<str>>,
}

impl StringSpec {
    /// Minimum length in Unicode scalar values.
    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    /// Maximum length in Unicode scalar values.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// The pattern, poisoned or not.
    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// Format check.
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    /// Exact literal the string must equal.
    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    /// Whether a custom predicate is set.
    pub fn has_custom(&self) -> bool {
        self.custom.is_some()
    }
}

/// Number constraints. Bounds are stored widened to `f64`.
#[derive(Debug, Clone, Default)]
pub struct NumberSpec {
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) exclusive_min: Option<f64>,
    pub(crate) exclusive_max: Option<f64>,
    pub(crate) multiple_of: Option<f64>,
    pub(crate) integer: bool,
    pub(crate) positive: bool,
    pub(crate) negative: bool,
    pub(crate) custom: Option<Predicate<f64>>,
}

impl NumberSpec {
    /// Inclusive minimum.
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Inclusive maximum.
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Exclusive minimum.
    pub fn exclusive_min(&self) -> Option<f64> {
        self.exclusive_min
    }

    /// Exclusive maximum.
    pub fn exclusive_max(&self) -> Option<f64> {
        self.exclusive_max
    }

    /// Divisor the value must be a multiple of.
    pub fn multiple_of(&self) -> Option<f64> {
        self.multiple_of
    }

    /// Whether only integral values are accepted.
    pub fn is_integer(&self) -> bool {
        self.integer
    }

    /// Whether only values `> 0` are accepted.
    pub fn is_positive(&self) -> bool {
        self.positive
    }

    /// Whether only values `< 0` are accepted.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether a custom predicate is set.
    pub fn has_custom(&self) -> bool {
        self.custom.is_some()
    }
}

/// Boolean spec: only a custom predicate.
#[derive(Debug, Clone, Default)]
pub struct BooleanSpec {
    pub(crate) custom: Option<Predicate<bool>>,
}

impl BooleanSpec {
    /// Whether a custom predicate is set.
    pub fn has_custom(&self) -> bool {
        self.custom.is_some()
    }
}

/// Array constraints and element schema.
#[derive(Debug, Clone)]
pub struct ArraySpec {
    pub(crate) element: Box<SchemaNode>,
    pub(crate) min_items: Option<usize>,
    pub(crate) max_items: Option<usize>,
    pub(crate) contains: Option<Value>,
    pub(crate) unique: bool,
    pub(crate) custom: Option<Predicate<[Value]>>,
}

impl ArraySpec {
    pub(crate) fn new(element: SchemaNode) -> Self {
        Self {
            element: Box::new(element),
            min_items: None,
            max_items: None,
            contains: None,
            unique: false,
            custom: None,
        }
    }

    /// Element schema.
    pub fn element(&self) -> NodeRef<'_> {
        self.element.as_ref_node()
    }

    /// Minimum item count.
    pub fn min_items(&self) -> Option<usize> {
        self.min_items
    }

    /// Maximum item count.
    pub fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    /// Value at least one element must deep-equal.
    pub fn contains(&self) -> Option<&Value> {
        self.contains.as_ref()
    }

    /// Whether items must be unique.
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Whether a custom predicate is set.
    pub fn has_custom(&self) -> bool {
        self.custom.is_some()
    }
}

/// Object constraints and declared fields.
#[derive(Debug, Clone, Default)]
pub struct ObjectSpec {
    pub(crate) fields: Vec<(String, SchemaNode)>,
    pub(crate) strict: bool,
    pub(crate) partial: bool,
    pub(crate) min_properties: Option<usize>,
    pub(crate) max_properties: Option<usize>,
    pub(crate) custom: Option<Predicate<BTreeMap<String, Value>>>,
}

impl ObjectSpec {
    /// Insert or replace a field, keeping declaration order.
    pub(crate) fn set_field(&mut self, name: String, node: SchemaNode) {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = node,
            None => self.fields.push((name, node)),
        }
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, NodeRef<'_>)> {
        self.fields
            .iter()
            .map(|(name, node)| (name.as_str(), node.as_ref_node()))
    }

    /// Look up a declared field.
    pub fn field(&self, name: &str) -> Option<NodeRef<'_>> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node.as_ref_node())
    }

    /// Whether undeclared keys are rejected.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Whether every declared field is relaxed to optional.
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    /// Minimum property count.
    pub fn min_properties(&self) -> Option<usize> {
        self.min_properties
    }

    /// Maximum property count.
    pub fn max_properties(&self) -> Option<usize> {
        self.max_properties
    }

    /// Whether a custom predicate is set.
    pub fn has_custom(&self) -> bool {
        self.custom.is_some()
    }
}

/// Composition of finalized child schemas.
#[derive(Debug, Clone)]
pub struct CompositeSpec {
    pub(crate) combinator: Combinator,
    pub(crate) children: Vec<SchemaNode>,
    pub(crate) custom: Option<Predicate<Value>>,
}

impl CompositeSpec {
    pub(crate) fn new(combinator: Combinator, children: Vec<SchemaNode>) -> Self {
        Self {
            combinator,
            children,
            custom: None,
        }
    }

    /// The combinator.
    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// Child schemas in order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.children.iter().map(SchemaNode::as_ref_node)
    }

    /// Whether a custom predicate is set.
    pub fn has_custom(&self) -> bool {
        self.custom.is_some()
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────

/// Owned kind-specific data of an erased node.
#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    String(StringSpec),
    Number(NumberSpec),
    Boolean(BooleanSpec),
    Array(ArraySpec),
    Object(ObjectSpec),
    Composite(CompositeSpec),
}

/// A type-erased schema node, as embedded in objects, arrays and
/// compositions.
///
/// Produced only from a built [`Schema`](crate::Schema) via `From`.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub(crate) kind: NodeKind,
    pub(crate) meta: Meta,
}

impl SchemaNode {
    /// Borrowed read-only view.
    pub fn as_ref_node(&self) -> NodeRef<'_> {
        let kind = match &self.kind {
            NodeKind::String(spec) => KindRef::String(spec),
            NodeKind::Number(spec) => KindRef::Number(spec),
            NodeKind::Boolean(spec) => KindRef::Boolean(spec),
            NodeKind::Array(spec) => KindRef::Array(spec),
            NodeKind::Object(spec) => KindRef::Object(spec),
            NodeKind::Composite(spec) => KindRef::Composite(spec),
        };
        NodeRef {
            kind,
            meta: &self.meta,
        }
    }

    /// Presence as set by the builder.
    pub fn presence(&self) -> Presence {
        self.meta.presence
    }
}

/// Borrowed kind-specific data.
#[derive(Debug, Clone, Copy)]
pub enum KindRef<'a> {
    /// String node.
    String(&'a StringSpec),
    /// Number node.
    Number(&'a NumberSpec),
    /// Boolean node.
    Boolean(&'a BooleanSpec),
    /// Array node.
    Array(&'a ArraySpec),
    /// Object node.
    Object(&'a ObjectSpec),
    /// Composition node.
    Composite(&'a CompositeSpec),
}

impl KindRef<'_> {
    /// Kind name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Composite(_) => "composition",
        }
    }
}

/// Read-only view of a node, used by validation and emission.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub(crate) kind: KindRef<'a>,
    pub(crate) meta: &'a Meta,
}

impl<'a> NodeRef<'a> {
    /// Kind-specific data.
    pub fn kind(&self) -> KindRef<'a> {
        self.kind
    }

    /// Presence as set by the builder.
    pub fn presence(&self) -> Presence {
        self.meta.presence
    }

    /// Whether the node demands a value when validated as a child.
    ///
    /// Unfinalized children count as required.
    pub fn is_required(&self) -> bool {
        self.meta.presence != Presence::Optional
    }

    /// The optional default, if any.
    pub fn default_value(&self) -> Option<&'a Value> {
        self.meta.default.as_ref()
    }

    /// Message overrides keyed by rule identifier.
    pub fn messages(&self) -> &'a BTreeMap<String, String> {
        &self.meta.messages
    }

    /// Documentation metadata.
    pub fn documentation(&self) -> &'a Documentation {
        &self.meta.docs
    }

    /// Every constraint set on this node with its value.
    ///
    /// Flags report `true`; a poisoned pattern still reports its source.
    pub fn constraints(&self) -> Vec<(Rule, Value)> {
        let mut out = Vec::new();
        let mut push = |rule: Rule, value: Option<Value>| {
            if let Some(value) = value {
                out.push((rule, value));
            }
        };
        let flag = |set: bool| set.then_some(Value::Bool(true));

        match self.kind {
            KindRef::String(s) => {
                push(Rule::MinLength, s.min_length.map(Value::from));
                push(Rule::MaxLength, s.max_length.map(Value::from));
                push(Rule::Pattern, s.pattern.as_ref().map(|p| Value::from(p.source())));
                push(Rule::Email, flag(s.format == Some(Format::Email)));
                push(Rule::Url, flag(s.format == Some(Format::Uri)));
                push(Rule::Const, s.literal.clone().map(Value::from));
                push(Rule::Custom, flag(s.custom.is_some()));
            }
            KindRef::Number(n) => {
                push(Rule::Min, n.min.map(Value::from));
                push(Rule::Max, n.max.map(Value::from));
                push(Rule::ExclusiveMin, n.exclusive_min.map(Value::from));
                push(Rule::ExclusiveMax, n.exclusive_max.map(Value::from));
                push(Rule::MultipleOf, n.multiple_of.map(Value::from));
                push(Rule::Integer, flag(n.integer));
                push(Rule::Positive, flag(n.positive));
                push(Rule::Negative, flag(n.negative));
                push(Rule::Custom, flag(n.custom.is_some()));
            }
            KindRef::Boolean(b) => {
                push(Rule::Custom, flag(b.custom.is_some()));
            }
            KindRef::Array(a) => {
                push(Rule::MinItems, a.min_items.map(Value::from));
                push(Rule::MaxItems, a.max_items.map(Value::from));
                push(Rule::Contains, a.contains.clone());
                push(Rule::UniqueItems, flag(a.unique));
                push(Rule::Custom, flag(a.custom.is_some()));
            }
            KindRef::Object(o) => {
                push(Rule::UnknownKey, flag(o.strict));
                push(Rule::MinProperties, o.min_properties.map(Value::from));
                push(Rule::MaxProperties, o.max_properties.map(Value::from));
                push(Rule::Custom, flag(o.custom.is_some()));
            }
            KindRef::Composite(c) => {
                push(Rule::Custom, flag(c.custom.is_some()));
            }
        }
        out
    }
}
