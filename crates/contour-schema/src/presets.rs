//! # Presets
//!
//! Ready-made schemas for the most common field shapes.

use crate::builder::{number as number_schema, string, NumberSchema, StringSchema};
use crate::state::{Optional, Required};

/// Required email address.
pub fn email() -> StringSchema<Required> {
    string().email().required()
}

/// Required absolute URI.
pub fn url() -> StringSchema<Required> {
    string().url().required()
}

/// Required string of at least one character.
pub fn non_empty_string() -> StringSchema<Required> {
    string().min_length(1).required()
}

/// Optional string.
pub fn optional_string() -> StringSchema<Optional> {
    string().optional()
}

/// Required number `> 0`.
pub fn positive_number() -> NumberSchema<Required> {
    number_schema().positive().required()
}

/// Required integral number.
pub fn integer() -> NumberSchema<Required> {
    number_schema().integer().required()
}
