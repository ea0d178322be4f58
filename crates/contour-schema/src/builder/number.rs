//! Number schema constraints.
//!
//! Bounds accept any host numeric type and are widened to `f64`.

use contour_core::Number;

use crate::model::NumberSpec;
use crate::state::SchemaState;

use super::Schema;

/// Start a number schema.
pub fn number() -> Schema<NumberSpec> {
    Schema::from_spec(NumberSpec::default())
}

fn widen(n: impl Into<Number>) -> f64 {
    n.into().as_f64()
}

impl<S: SchemaState> Schema<NumberSpec, S> {
    /// Inclusive minimum.
    pub fn min(mut self, n: impl Into<Number>) -> Self {
        self.spec_mut().min = Some(widen(n));
        self
    }

    /// Inclusive maximum.
    pub fn max(mut self, n: impl Into<Number>) -> Self {
        self.spec_mut().max = Some(widen(n));
        self
    }

    /// Exclusive minimum.
    pub fn exclusive_min(mut self, n: impl Into<Number>) -> Self {
        self.spec_mut().exclusive_min = Some(widen(n));
        self
    }

    /// Exclusive maximum.
    pub fn exclusive_max(mut self, n: impl Into<Number>) -> Self {
        self.spec_mut().exclusive_max = Some(widen(n));
        self
    }

    /// Require a multiple of `n`, within a tolerance of `1e-10`.
    pub fn multiple_of(mut self, n: impl Into<Number>) -> Self {
        let divisor = widen(n);
        if divisor == 0.0 || !divisor.is_finite() {
            tracing::warn!(divisor, "multipleOf divisor is not a positive finite number");
        }
        self.spec_mut().multiple_of = Some(divisor);
        self
    }

    /// Reject values with a fractional part.
    pub fn integer(mut self) -> Self {
        self.spec_mut().integer = true;
        self
    }

    /// Require `> 0`.
    pub fn positive(mut self) -> Self {
        self.spec_mut().positive = true;
        self
    }

    /// Require `< 0`.
    pub fn negative(mut self) -> Self {
        self.spec_mut().negative = true;
        self
    }
}
