//! Object schema constraints and field declaration.

use std::collections::HashSet;

use contour_core::SchemaError;

use crate::model::{ObjectSpec, SchemaNode};
use crate::state::SchemaState;

use super::Schema;

/// Start an object schema with no declared fields.
pub fn object() -> Schema<ObjectSpec> {
    Schema::from_spec(ObjectSpec::default())
}

/// Build an object schema from a field list, rejecting duplicate names.
///
/// The fluent [`field`](Schema::field) setter replaces a re-declared field
/// in place; this constructor treats a repeat as a construction error.
pub fn try_object<I, N>(fields: I) -> Result<Schema<ObjectSpec>, SchemaError>
where
    I: IntoIterator<Item = (N, SchemaNode)>,
    N: Into<String>,
{
    let mut seen = HashSet::new();
    let mut schema = object();
    for (name, node) in fields {
        let name = name.into();
        if !seen.insert(name.clone()) {
            return Err(SchemaError::DuplicateField(name));
        }
        schema.spec_mut().set_field(name, node);
    }
    Ok(schema)
}

impl<S: SchemaState> Schema<ObjectSpec, S> {
    /// Declare a field. Re-declaring a name replaces the earlier schema
    /// and keeps its position.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<SchemaNode>) -> Self {
        self.spec_mut().set_field(name.into(), schema.into());
        self
    }

    /// Reject keys that are not declared fields.
    pub fn strict(mut self) -> Self {
        self.spec_mut().strict = true;
        self
    }

    /// Treat every declared field as optional.
    pub fn partial(mut self) -> Self {
        self.spec_mut().partial = true;
        self
    }

    /// Minimum property count, inclusive.
    pub fn min_properties(mut self, n: usize) -> Self {
        self.spec_mut().min_properties = Some(n);
        self
    }

    /// Maximum property count, inclusive.
    pub fn max_properties(mut self, n: usize) -> Self {
        self.spec_mut().max_properties = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{number, string};
    use crate::model::{KindRef, Presence};

    #[test]
    fn test_fields_keep_declaration_order() {
        let s = object()
            .field("b", string().required())
            .field("a", number().optional());
        let KindRef::Object(spec) = s.as_node().kind() else {
            panic!("not an object schema");
        };
        let names: Vec<&str> = spec.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_redeclared_field_replaces_in_place() {
        let s = object()
            .field("a", string().required())
            .field("b", string().required())
            .field("a", number().optional());
        let KindRef::Object(spec) = s.as_node().kind() else {
            panic!("not an object schema");
        };
        let names: Vec<&str> = spec.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        let a = spec.field("a").expect("field a");
        assert_eq!(a.kind().name(), "number");
        assert_eq!(a.presence(), Presence::Optional);
    }

    #[test]
    fn test_try_object_rejects_duplicates() {
        let err = try_object([
            ("id", SchemaNode::from(string().required())),
            ("id", SchemaNode::from(string().optional())),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("id".into()));
    }

    #[test]
    fn test_try_object_accepts_unique_fields() {
        let s = try_object([
            ("id", SchemaNode::from(string().required())),
            ("n", SchemaNode::from(number().optional())),
        ])
        .unwrap()
        .strict()
        .required();
        let KindRef::Object(spec) = s.as_node().kind() else {
            panic!("not an object schema");
        };
        assert!(spec.is_strict());
        assert_eq!(spec.fields().count(), 2);
    }
}
