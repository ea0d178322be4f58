//! # contour-schema: Schema Model, Builder, and Validation Engine
//!
//! Declare a schema once with the fluent builder, then validate decoded
//! [`Value`](contour_core::Value)s against it from any number of threads.
//!
//! ```
//! use contour_core::{Rule, Value};
//! use contour_schema::{number, object, string};
//!
//! let signup = object()
//!     .field("email", string().email().required())
//!     .field("age", number().integer().min(18).optional())
//!     .strict()
//!     .required();
//!
//! let input = Value::object([("email", Value::from("not-an-email")), ("age", Value::from(12))]);
//! let err = signup.validate(&input).unwrap_err();
//! assert_eq!(err.children().len(), 2);
//! assert_eq!(err.find("email").map(|e| e.rule()), Some(Rule::Email));
//! ```
//!
//! ## Modules
//!
//! - [`model`]: the read-only node representation and the [`NodeRef`]
//!   view used by validation and emission.
//! - [`state`]: builder typestates and their sealed traits.
//! - [`builder`]: entry points, setters, and composition constructors.
//! - `engine`: validation (crate-private; reached through `validate` and
//!   `parse` on finalized schemas).
//! - [`format`]: email and URI checks.
//! - [`presets`]: common field shapes.
//! - [`bind`]: struct binding through a JSON intermediate.
//!
//! ## Thread safety
//!
//! Finalized schemas are immutable and `Send + Sync`. Custom predicates are
//! invoked concurrently and must be thread-safe.

pub mod bind;
pub mod builder;
mod engine;
pub mod format;
pub mod model;
pub mod presets;
pub mod state;

pub use bind::{bind, bind_value, BindError};
pub use builder::{
    all_of, any_of, array, boolean, not, number, object, one_of, string, try_compose, try_object,
    AnySchema, ArraySchema, BoolSchema, CompositeSchema, NumberSchema, ObjectSchema, Schema,
    SchemaKind, StringSchema,
};
pub use model::{Combinator, Example, Format, KindRef, NodeRef, Presence, SchemaNode};
pub use state::{Defaulted, Finalized, Optional, Required, SchemaState, Unfinalized};
