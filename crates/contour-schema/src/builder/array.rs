//! Array schema constraints.

use contour_core::Value;

use crate::model::{ArraySpec, SchemaNode};
use crate::state::SchemaState;

use super::Schema;

/// Start an array schema over the given element schema.
///
/// The element may be in any builder state; an unfinalized element is
/// treated as required, so `null` elements are rejected.
pub fn array(element: impl Into<SchemaNode>) -> Schema<ArraySpec> {
    Schema::from_spec(ArraySpec::new(element.into()))
}

impl<S: SchemaState> Schema<ArraySpec, S> {
    /// Minimum item count, inclusive.
    pub fn min_items(mut self, n: usize) -> Self {
        self.spec_mut().min_items = Some(n);
        self
    }

    /// Maximum item count, inclusive.
    pub fn max_items(mut self, n: usize) -> Self {
        self.spec_mut().max_items = Some(n);
        self
    }

    /// Require at least one element deep-equal to `value`.
    pub fn contains(mut self, value: impl Into<Value>) -> Self {
        self.spec_mut().contains = Some(value.into());
        self
    }

    /// Reject duplicate elements.
    pub fn unique(mut self) -> Self {
        self.spec_mut().unique = true;
        self
    }
}
