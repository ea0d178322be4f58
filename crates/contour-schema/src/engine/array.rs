//! Array validation.
//!
//! Order: type, item-count bounds, `contains`, uniqueness, then every
//! element (collect-all), then the custom predicate.

use std::collections::HashMap;

use contour_core::{Rule, ValidationError, Value};

use crate::model::{ArraySpec, NodeRef};

use super::{check as check_node, fail, run_custom, type_mismatch, Mode};

pub(super) fn check(node: NodeRef<'_>, spec: &ArraySpec, value: &Value) -> Result<(), ValidationError> {
    let Some(items) = value.as_array() else {
        return Err(type_mismatch(node, Rule::Type, value));
    };

    if let Some(min) = spec.min_items() {
        if items.len() < min {
            return Err(fail(node, Rule::MinItems, value, format!("array must have at least {min} items")));
        }
    }
    if let Some(max) = spec.max_items() {
        if items.len() > max {
            return Err(fail(node, Rule::MaxItems, value, format!("array must have at most {max} items")));
        }
    }

    if let Some(target) = spec.contains() {
        if !items.iter().any(|item| item == target) {
            return Err(fail(node, Rule::Contains, value, format!("array must contain {target}")));
        }
    }

    if spec.is_unique() {
        let mut seen: HashMap<String, usize> = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(first) = seen.insert(item.unique_key(), index) {
                return Err(fail(
                    node,
                    Rule::UniqueItems,
                    item,
                    format!("duplicate item at index {index} (first seen at index {first})"),
                )
                .at(&format!("[{index}]")));
            }
        }
    }

    let element = spec.element();
    let mode = Mode::of(element);
    let failures: Vec<ValidationError> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            check_node(element, item, mode)
                .err()
                .map(|e| e.at(&format!("[{index}]")))
        })
        .collect();
    if !failures.is_empty() {
        let message = format!("array validation failed: {} invalid items", failures.len());
        return Err(fail(node, Rule::InvalidShape, value, message).with_children(failures));
    }

    run_custom(node, spec.custom.as_ref(), items, value)
}
