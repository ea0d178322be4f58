//! Default substitution for `parse`.
//!
//! Walks the value alongside the schema and replaces absent optional values
//! with their defaults: missing object keys, `null` fields and elements,
//! and empty strings at optional string nodes. Composition children are not
//! entered, since which branch applies is not known before validation.

use contour_core::Value;

use crate::model::{KindRef, NodeRef, Presence};

/// Return `value` with defaults applied throughout.
pub(crate) fn fill_defaults(node: NodeRef<'_>, value: Value) -> Value {
    let value = match substitute(node, &value) {
        Some(default) => default.clone(),
        None => value,
    };

    match (node.kind(), value) {
        (KindRef::Object(spec), Value::Object(mut map)) => {
            for (name, field) in spec.fields() {
                match map.remove(name) {
                    Some(current) => {
                        map.insert(name.to_string(), fill_defaults(field, current));
                    }
                    None => {
                        let filled = fill_defaults(field, Value::Null);
                        if !filled.is_null() {
                            map.insert(name.to_string(), filled);
                        }
                    }
                }
            }
            Value::Object(map)
        }
        (KindRef::Array(spec), Value::Array(items)) => {
            let element = spec.element();
            Value::Array(items.into_iter().map(|item| fill_defaults(element, item)).collect())
        }
        (_, value) => value,
    }
}

/// The default to substitute when `value` is absent at `node`.
fn substitute<'a>(node: NodeRef<'a>, value: &Value) -> Option<&'a Value> {
    if node.presence() != Presence::Optional {
        return None;
    }
    let default = node.default_value()?;
    let absent = match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() && matches!(node.kind(), KindRef::String(_)),
        _ => false,
    };
    if absent {
        tracing::debug!(kind = node.kind().name(), default = %default, "substituting default");
        Some(default)
    } else {
        None
    }
}
