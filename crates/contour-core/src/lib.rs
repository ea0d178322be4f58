//! # contour-core: Foundational Types for contour
//!
//! The leaf of the workspace DAG. Defines the three vocabularies every other
//! crate speaks:
//!
//! 1. **`Value`**: the generic decoded runtime value the validator consumes.
//!    A tagged variant, not reflection. Numbers keep their host
//!    representation and widen to `f64` for checks.
//!
//! 2. **`Rule`**: the closed set of rule identifiers. The same identifier
//!    tags an error, keys a message override, and anchors an OpenAPI keyword.
//!
//! 3. **`ValidationError` / `SchemaError`**: user-input failures as values,
//!    programmer errors as a `thiserror` enum.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `contour-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod rule;
pub mod value;

pub use error::{SchemaError, ValidationError};
pub use rule::{Rule, Rules, UnknownRule, RULES};
pub use value::{Number, Value};
