//! # Rule Identifiers
//!
//! The closed vocabulary of constraints. A rule identifier is at once the
//! tag on a [`ValidationError`](crate::ValidationError), the key of a
//! message override, and the anchor for OpenAPI keyword mapping.
//!
//! Three equivalent spellings are exported so that override maps, error
//! matching, and documentation stay in sync:
//!
//! - the [`Rule`] enum (`Rule::MinLength`),
//! - string constants in [`ids`] (`ids::MIN_LENGTH == "minLength"`),
//! - accessor methods on the [`RULES`] umbrella value (`RULES.min_length()`).
//!
//! ```
//! use contour_core::rule::{ids, Rule, RULES};
//!
//! assert_eq!(RULES.min_length(), Rule::MinLength);
//! assert_eq!(Rule::MinLength.as_str(), ids::MIN_LENGTH);
//! assert_eq!("minLength".parse::<Rule>().unwrap(), Rule::MinLength);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when parsing an identifier outside the closed set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown rule identifier: {0}")]
pub struct UnknownRule(pub String);

/// Umbrella value exposing every rule as an accessor method.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rules;

/// The single instance of [`Rules`].
pub const RULES: Rules = Rules;

macro_rules! define_rules {
    ($( $(#[$doc:meta])* $variant:ident => $id:literal, $konst:ident, $accessor:ident; )*) => {
        /// A rule identifier from the closed set.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Rule {
            $( $(#[$doc])* $variant, )*
        }

        impl Rule {
            /// Every rule, in declaration order.
            pub const ALL: &'static [Rule] = &[$(Rule::$variant),*];

            /// The identifier string (camelCase).
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Rule::$variant => $id, )*
                }
            }
        }

        /// Rule identifiers as string constants.
        pub mod ids {
            $( pub const $konst: &str = $id; )*
        }

        impl Rules {
            $(
                #[allow(missing_docs)]
                pub const fn $accessor(&self) -> Rule {
                    Rule::$variant
                }
            )*
        }
    };
}

define_rules! {
    /// Value is absent but the schema demands it.
    Required => "required", REQUIRED, required;
    /// Value has the wrong kind.
    Type => "type", TYPE, type_;
    /// User-supplied predicate rejected the value.
    Custom => "custom", CUSTOM, custom;
    /// String shorter than the minimum length.
    MinLength => "minLength", MIN_LENGTH, min_length;
    /// String longer than the maximum length.
    MaxLength => "maxLength", MAX_LENGTH, max_length;
    /// String does not match the pattern, or the pattern failed to compile.
    Pattern => "pattern", PATTERN, pattern;
    /// String is not an email address.
    Email => "email", EMAIL, email;
    /// String is not an absolute URI.
    Url => "url", URL, url;
    /// String differs from the const literal.
    Const => "const", CONST, const_;
    /// Number below the inclusive minimum.
    Min => "min", MIN, min;
    /// Number above the inclusive maximum.
    Max => "max", MAX, max;
    /// Number not above the exclusive minimum.
    ExclusiveMin => "exclusiveMin", EXCLUSIVE_MIN, exclusive_min;
    /// Number not below the exclusive maximum.
    ExclusiveMax => "exclusiveMax", EXCLUSIVE_MAX, exclusive_max;
    /// Number is not a multiple of the divisor.
    MultipleOf => "multipleOf", MULTIPLE_OF, multiple_of;
    /// Number has a fractional part.
    Integer => "integer", INTEGER, integer;
    /// Number is not strictly positive.
    Positive => "positive", POSITIVE, positive;
    /// Number is not strictly negative.
    Negative => "negative", NEGATIVE, negative;
    /// Array has fewer items than the minimum.
    MinItems => "minItems", MIN_ITEMS, min_items;
    /// Array has more items than the maximum.
    MaxItems => "maxItems", MAX_ITEMS, max_items;
    /// Array does not contain the required value.
    Contains => "contains", CONTAINS, contains;
    /// Array has a duplicate item.
    UniqueItems => "uniqueItems", UNIQUE_ITEMS, unique_items;
    /// Strict object carries an undeclared key.
    UnknownKey => "unknownKey", UNKNOWN_KEY, unknown_key;
    /// Object lacks a required key.
    MissingKey => "missingKey", MISSING_KEY, missing_key;
    /// Aggregate failure of children or composition branches.
    InvalidShape => "invalidShape", INVALID_SHAPE, invalid_shape;
    /// Object has fewer properties than the minimum.
    MinProperties => "minProperties", MIN_PROPERTIES, min_properties;
    /// Object has more properties than the maximum.
    MaxProperties => "maxProperties", MAX_PROPERTIES, max_properties;
    /// Value is not a boolean.
    InvalidBoolean => "invalidBoolean", INVALID_BOOLEAN, invalid_boolean;
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Rule {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Rule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .iter()
            .copied()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
