//! # Schema Builder
//!
//! Fluent, typestate-checked construction of schema nodes.
//!
//! A [`Schema<K, S>`] pairs a kind spec `K` (strings, numbers, ...) with a
//! presence state `S` from [`crate::state`]. Constraint setters consume and
//! return the schema; `required()`, `optional()` and `default()` consume it
//! and return it in the next state. Validation is only defined for
//! finalized states.
//!
//! ```
//! use contour_schema::{number, object, string};
//! use contour_core::Value;
//!
//! let user = object()
//!     .field("name", string().min_length(1).required())
//!     .field("age", number().min(0).integer().optional())
//!     .required();
//!
//! let ok = Value::object([("name", Value::from("Ada")), ("age", Value::from(36))]);
//! assert!(user.validate(&ok).is_ok());
//! ```
//!
//! ## Erasure
//!
//! Nested positions (object fields, array elements, composition children)
//! hold type-erased [`SchemaNode`]s. Any schema converts into a node;
//! only finalized schemas convert into an [`AnySchema`], which is what the
//! composition constructors accept.

mod array;
mod boolean;
mod composite;
mod number;
mod object;
mod string;

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use contour_core::{Number, Rule, ValidationError, Value};

use crate::engine;
use crate::model::{
    ArraySpec, BooleanSpec, CompositeSpec, Example, KindRef, Meta, NodeKind, NodeRef,
    NumberSpec, ObjectSpec, Predicate, Presence, SchemaNode, StringSpec,
};
use crate::state::{Defaulted, Finalized, Optional, Required, SchemaState, Unfinalized};

pub use array::array;
pub use boolean::boolean;
pub use composite::{all_of, any_of, not, one_of, try_compose};
pub use number::number;
pub use object::{object, try_object};
pub use string::string;

// ─── Kinds ───────────────────────────────────────────────────────────

mod private {
    pub trait Sealed {}
    impl Sealed for crate::model::StringSpec {}
    impl Sealed for crate::model::NumberSpec {}
    impl Sealed for crate::model::BooleanSpec {}
    impl Sealed for crate::model::ArraySpec {}
    impl Sealed for crate::model::ObjectSpec {}
    impl Sealed for crate::model::CompositeSpec {}
}

/// A schema kind: the constraint set carried by a [`Schema`].
///
/// Sealed: the six kinds in [`crate::model`] are the closed set.
pub trait SchemaKind: private::Sealed + Clone + fmt::Debug {
    /// The typed value custom predicates receive.
    type Input: ?Sized;
    /// The type accepted by `default()`.
    type Default;
    /// Kind name.
    const NAME: &'static str;

    #[doc(hidden)]
    fn kind_ref(&self) -> KindRef<'_>;

    #[doc(hidden)]
    fn into_node(self, meta: Meta) -> SchemaNode;

    #[doc(hidden)]
    fn custom_slot(&mut self) -> &mut Option<Predicate<Self::Input>>;

    #[doc(hidden)]
    fn default_to_value(default: Self::Default) -> Value;
}

macro_rules! impl_kind {
    ($spec:ty, $variant:ident, $name:literal, $input:ty, $default:ty, $to_value:expr) => {
        impl SchemaKind for $spec {
            type Input = $input;
            type Default = $default;
            const NAME: &'static str = $name;

            fn kind_ref(&self) -> KindRef<'_> {
                KindRef::$variant(self)
            }

            fn into_node(self, meta: Meta) -> SchemaNode {
                SchemaNode {
                    kind: NodeKind::$variant(self),
                    meta,
                }
            }

            fn custom_slot(&mut self) -> &mut Option<Predicate<Self::Input>> {
                &mut self.custom
            }

            fn default_to_value(default: Self::Default) -> Value {
                let convert: fn($default) -> Value = $to_value;
                convert(default)
            }
        }
    };
}

impl_kind!(StringSpec, String, "string", str, String, Value::String);
impl_kind!(NumberSpec, Number, "number", f64, Number, Value::Number);
impl_kind!(BooleanSpec, Boolean, "boolean", bool, bool, Value::Bool);
impl_kind!(ArraySpec, Array, "array", [Value], Vec<Value>, Value::Array);
impl_kind!(
    ObjectSpec,
    Object,
    "object",
    BTreeMap<String, Value>,
    BTreeMap<String, Value>,
    Value::Object
);
impl_kind!(CompositeSpec, Composite, "composition", Value, Value, |v| v);

// ─── The Schema ──────────────────────────────────────────────────────

/// A schema of kind `K` in builder state `S`.
///
/// Schemas are values: cloning is cheap relative to validation, clones are
/// independent, and a finalized schema may be shared across threads and
/// validated concurrently.
pub struct Schema<K: SchemaKind, S: SchemaState = Unfinalized> {
    spec: K,
    meta: Meta,
    _state: PhantomData<S>,
}

/// String schema.
pub type StringSchema<S = Unfinalized> = Schema<StringSpec, S>;
/// Number schema.
pub type NumberSchema<S = Unfinalized> = Schema<NumberSpec, S>;
/// Boolean schema.
pub type BoolSchema<S = Unfinalized> = Schema<BooleanSpec, S>;
/// Array schema.
pub type ArraySchema<S = Unfinalized> = Schema<ArraySpec, S>;
/// Object schema.
pub type ObjectSchema<S = Unfinalized> = Schema<ObjectSpec, S>;
/// Composition schema.
pub type CompositeSchema<S = Unfinalized> = Schema<CompositeSpec, S>;

impl<K: SchemaKind, S: SchemaState> Clone for Schema<K, S> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            meta: self.meta.clone(),
            _state: PhantomData,
        }
    }
}

impl<K: SchemaKind, S: SchemaState> fmt::Debug for Schema<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("kind", &K::NAME)
            .field("state", &S::name())
            .field("spec", &self.spec)
            .field("meta", &self.meta)
            .finish()
    }
}

impl<K: SchemaKind> Schema<K, Unfinalized> {
    pub(crate) fn from_spec(spec: K) -> Self {
        Self {
            spec,
            meta: Meta::new(),
            _state: PhantomData,
        }
    }
}

impl<K: SchemaKind, S: SchemaState> Schema<K, S> {
    /// Canonical name of the builder state.
    pub fn state_name(&self) -> &'static str {
        S::name()
    }

    /// Presence reported by this schema.
    pub fn presence(&self) -> Presence {
        self.meta.presence
    }

    /// Read-only view of this schema.
    pub fn as_node(&self) -> NodeRef<'_> {
        NodeRef {
            kind: self.spec.kind_ref(),
            meta: &self.meta,
        }
    }

    /// Erase into a nested node.
    pub fn into_node(self) -> SchemaNode {
        self.spec.into_node(self.meta)
    }

    /// Attach a custom predicate over the typed value.
    ///
    /// Runs last, after every built-in constraint has passed. A returned
    /// `Err` or a panic is reported under the `custom` rule.
    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&K::Input) -> Result<(), String> + Send + Sync + 'static,
    {
        *self.spec.custom_slot() = Some(Predicate::new(predicate));
        self
    }

    /// Override the message reported for a rule.
    ///
    /// Overrides set on a node apply to errors that node produces. The key
    /// is a rule identifier; keys outside the closed set are kept but never
    /// match.
    pub fn message(mut self, rule: impl AsRef<str>, message: impl Into<String>) -> Self {
        let rule = rule.as_ref();
        if rule.parse::<Rule>().is_err() {
            tracing::debug!(rule, "message override for unknown rule identifier");
        }
        self.meta.messages.insert(rule.to_string(), message.into());
        self
    }

    /// Free-text description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta.docs.description = Some(description.into());
        self
    }

    /// Single example value.
    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.meta.docs.example = Some(example.into());
        self
    }

    /// Add a named example. A repeated name replaces the earlier entry.
    pub fn named_example(mut self, name: impl Into<String>, example: Example) -> Self {
        self.meta.docs.examples.insert(name.into(), example);
        self
    }

    pub(crate) fn spec_mut(&mut self) -> &mut K {
        &mut self.spec
    }

    fn transition_to<T: SchemaState>(mut self) -> Schema<K, T> {
        self.meta.presence = T::presence();
        Schema {
            spec: self.spec,
            meta: self.meta,
            _state: PhantomData,
        }
    }
}

// ─── State-Specific Impl Blocks ─────────────────────────────────────

impl<K: SchemaKind> Schema<K, Unfinalized> {
    /// Finalize as required (Unfinalized → Required).
    pub fn required(self) -> Schema<K, Required> {
        self.transition_to()
    }

    /// Finalize as optional (Unfinalized → Optional).
    pub fn optional(self) -> Schema<K, Optional> {
        self.transition_to()
    }
}

impl<K: SchemaKind> Schema<K, Optional> {
    /// Attach the value used when the input is absent (Optional → Defaulted).
    ///
    /// The default is checked against the schema's own constraints at
    /// validation time; an unsound default is reported there.
    pub fn default(self, default: impl Into<K::Default>) -> Schema<K, Defaulted> {
        let mut next: Schema<K, Defaulted> = self.transition_to();
        next.meta.default = Some(K::default_to_value(default.into()));
        next
    }
}

impl<K: SchemaKind, S: Finalized> Schema<K, S> {
    /// Validate a value against this schema.
    ///
    /// Pure: the value is not modified and no state is retained between
    /// calls. Nested failures are collected; scalar checks stop at the
    /// first failing constraint.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        engine::validate(self.as_node(), value)
    }

    /// Validate a decoded JSON document.
    pub fn validate_json(&self, value: &serde_json::Value) -> Result<(), ValidationError> {
        self.validate(&Value::from(value))
    }

    /// Fill defaults for absent optional values, then validate.
    ///
    /// Returns the value with defaults applied. Validation alone never
    /// substitutes defaults into the caller's value.
    pub fn parse(&self, value: Value) -> Result<Value, ValidationError> {
        engine::parse(self.as_node(), value)
    }

    /// The default attached to this schema, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.meta.default.as_ref()
    }

    /// Erase into a finalized node accepted by the composition constructors.
    pub fn boxed(self) -> AnySchema {
        AnySchema(self.into_node())
    }
}

impl<K: SchemaKind, S: SchemaState> From<Schema<K, S>> for SchemaNode {
    fn from(schema: Schema<K, S>) -> Self {
        schema.into_node()
    }
}

// ─── Finalized erasure ───────────────────────────────────────────────

/// A finalized schema of any kind.
///
/// Only obtainable from a finalized [`Schema`], so composition
/// constructors taking `AnySchema` reject unfinalized children at compile
/// time.
#[derive(Debug, Clone)]
pub struct AnySchema(SchemaNode);

impl AnySchema {
    /// Read-only view.
    pub fn as_node(&self) -> NodeRef<'_> {
        self.0.as_ref_node()
    }

    /// Validate a value.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        engine::validate(self.as_node(), value)
    }

    /// Fill defaults, then validate.
    pub fn parse(&self, value: Value) -> Result<Value, ValidationError> {
        engine::parse(self.as_node(), value)
    }

    /// Unwrap the node.
    pub fn into_node(self) -> SchemaNode {
        self.0
    }
}

impl<K: SchemaKind, S: Finalized> From<Schema<K, S>> for AnySchema {
    fn from(schema: Schema<K, S>) -> Self {
        schema.boxed()
    }
}

impl From<AnySchema> for SchemaNode {
    fn from(schema: AnySchema) -> Self {
        schema.0
    }
}

impl<'a, K: SchemaKind, S: SchemaState> From<&'a Schema<K, S>> for NodeRef<'a> {
    fn from(schema: &'a Schema<K, S>) -> Self {
        schema.as_node()
    }
}

impl<'a> From<&'a AnySchema> for NodeRef<'a> {
    fn from(schema: &'a AnySchema) -> Self {
        schema.as_node()
    }
}

impl<'a> From<&'a SchemaNode> for NodeRef<'a> {
    fn from(node: &'a SchemaNode) -> Self {
        node.as_ref_node()
    }
}
