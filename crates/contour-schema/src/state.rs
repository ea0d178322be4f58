//! # Builder Typestate
//!
//! The presence lifecycle of a schema under construction, encoded as types.
//!
//! ## States
//!
//! - `Unfinalized` → initial state; constraints may be added, the schema
//!   cannot be validated standalone.
//! - `Required` → finalized; a value must be present. Terminal.
//! - `Optional` → finalized; absence is tolerated. Accepts one `default()`.
//! - `Defaulted` → optional with its default attached. Terminal.
//!
//! ## Allowed Transitions
//!
//! ```text
//! Unfinalized ──required()──▶ Required
//!      │
//!      └──optional()──▶ Optional ──default(v)──▶ Defaulted
//! ```
//!
//! Presence is a type, not a flag. There is no `required()` method on
//! `Schema<_, Required>`, so finalizing twice does not compile:
//!
//! ```compile_fail
//! use contour_schema::string;
//!
//! let _twice = string().required().required();
//! ```
//!
//! A required schema has no `default()`:
//!
//! ```compile_fail
//! use contour_schema::string;
//!
//! let _bad = string().required().default("x");
//! ```
//!
//! A second default does not compile either:
//!
//! ```compile_fail
//! use contour_schema::string;
//!
//! let _bad = string().optional().default("a").default("b");
//! ```
//!
//! And an unfinalized schema cannot be validated on its own:
//!
//! ```compile_fail
//! use contour_schema::string;
//! use contour_core::Value;
//!
//! let _ = string().min_length(3).validate(&Value::from("abc"));
//! ```

use crate::model::Presence;

// ─── State Types ─────────────────────────────────────────────────────

/// Builder state: under construction.
#[derive(Debug, Clone, Copy)]
pub struct Unfinalized;

/// Builder state: finalized as required.
#[derive(Debug, Clone, Copy)]
pub struct Required;

/// Builder state: finalized as optional, no default yet.
#[derive(Debug, Clone, Copy)]
pub struct Optional;

/// Builder state: finalized as optional with a default.
#[derive(Debug, Clone, Copy)]
pub struct Defaulted;

// ─── Sealed Traits ───────────────────────────────────────────────────

mod private {
    pub trait Sealed {}
    impl Sealed for super::Unfinalized {}
    impl Sealed for super::Required {}
    impl Sealed for super::Optional {}
    impl Sealed for super::Defaulted {}
}

/// Marker trait for every builder state.
///
/// Sealed: only the four states in this module implement it.
pub trait SchemaState: private::Sealed + std::fmt::Debug {
    /// Canonical state name.
    fn name() -> &'static str;

    /// The presence a node in this state reports.
    fn presence() -> Presence;
}

/// States in which a schema may be validated, parsed, or erased into an
/// [`AnySchema`](crate::AnySchema).
pub trait Finalized: SchemaState {}

impl SchemaState for Unfinalized {
    fn name() -> &'static str {
        "unfinalized"
    }
    fn presence() -> Presence {
        Presence::Unfinalized
    }
}

impl SchemaState for Required {
    fn name() -> &'static str {
        "required"
    }
    fn presence() -> Presence {
        Presence::Required
    }
}

impl SchemaState for Optional {
    fn name() -> &'static str {
        "optional"
    }
    fn presence() -> Presence {
        Presence::Optional
    }
}

impl SchemaState for Defaulted {
    fn name() -> &'static str {
        "defaulted"
    }
    fn presence() -> Presence {
        Presence::Optional
    }
}

impl Finalized for Required {}
impl Finalized for Optional {}
impl Finalized for Defaulted {}
