//! Boolean validation. No coercion from numbers or strings.

use contour_core::{Rule, ValidationError, Value};

use crate::model::{BooleanSpec, NodeRef};

use super::{run_custom, type_mismatch};

pub(super) fn check(node: NodeRef<'_>, spec: &BooleanSpec, value: &Value) -> Result<(), ValidationError> {
    let Some(b) = value.as_bool() else {
        return Err(type_mismatch(node, Rule::InvalidBoolean, value));
    };
    run_custom(node, spec.custom.as_ref(), &b, value)
}
