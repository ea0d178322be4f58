//! Number validation.
//!
//! Every host numeric type is widened to `f64`. Bound checks are written
//! as negated comparisons so that `NaN`, which compares false to
//! everything, fails each bound it meets.

use contour_core::{Rule, ValidationError, Value};

use crate::model::{NodeRef, NumberSpec};

use super::{fail, fmt_bound, run_custom, type_mismatch};

/// Tolerance for `multipleOf` remainders.
pub(crate) const MULTIPLE_OF_EPSILON: f64 = 1e-10;

pub(super) fn check(node: NodeRef<'_>, spec: &NumberSpec, value: &Value) -> Result<(), ValidationError> {
    let Some(n) = value.as_f64() else {
        return Err(type_mismatch(node, Rule::Type, value));
    };

    if spec.is_integer() && n != n.trunc() {
        return Err(fail(node, Rule::Integer, value, "value must be an integer"));
    }

    if let Some(min) = spec.min() {
        if !(n >= min) {
            return Err(fail(node, Rule::Min, value, format!("value must be at least {}", fmt_bound(min))));
        }
    }
    if let Some(max) = spec.max() {
        if !(n <= max) {
            return Err(fail(node, Rule::Max, value, format!("value must be at most {}", fmt_bound(max))));
        }
    }
    if let Some(min) = spec.exclusive_min() {
        if !(n > min) {
            return Err(fail(
                node,
                Rule::ExclusiveMin,
                value,
                format!("value must be greater than {}", fmt_bound(min)),
            ));
        }
    }
    if let Some(max) = spec.exclusive_max() {
        if !(n < max) {
            return Err(fail(
                node,
                Rule::ExclusiveMax,
                value,
                format!("value must be less than {}", fmt_bound(max)),
            ));
        }
    }

    if let Some(divisor) = spec.multiple_of() {
        if !is_multiple_of(n, divisor) {
            return Err(fail(
                node,
                Rule::MultipleOf,
                value,
                format!("value must be a multiple of {}", fmt_bound(divisor)),
            ));
        }
    }

    if spec.is_positive() && !(n > 0.0) {
        return Err(fail(node, Rule::Positive, value, "value must be positive"));
    }
    if spec.is_negative() && !(n < 0.0) {
        return Err(fail(node, Rule::Negative, value, "value must be negative"));
    }

    run_custom(node, spec.custom.as_ref(), &n, value)
}

fn is_multiple_of(n: f64, divisor: f64) -> bool {
    if divisor == 0.0 || !divisor.is_finite() || !n.is_finite() {
        return false;
    }
    let remainder = (n % divisor).abs();
    remainder < MULTIPLE_OF_EPSILON || (divisor.abs() - remainder) < MULTIPLE_OF_EPSILON
}
