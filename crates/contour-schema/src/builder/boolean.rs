//! Boolean schema. Carries no constraints beyond a custom predicate.

use crate::model::BooleanSpec;

use super::Schema;

/// Start a boolean schema.
pub fn boolean() -> Schema<BooleanSpec> {
    Schema::from_spec(BooleanSpec::default())
}
