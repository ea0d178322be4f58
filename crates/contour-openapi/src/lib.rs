//! # contour-openapi: OpenAPI 3.1 Projection
//!
//! Emits JSON Schema 2020-12 fragments, valid as OpenAPI 3.1 schema
//! objects, from contour schemas.
//!
//! ```
//! use contour_openapi::to_open_api;
//! use contour_schema::{number, object, string};
//! use serde_json::json;
//!
//! let user = object()
//!     .field("name", string().required())
//!     .field("age", number().integer().optional())
//!     .required();
//!
//! assert_eq!(
//!     to_open_api(&user),
//!     json!({
//!         "type": "object",
//!         "properties": {"name": {"type": "string"}, "age": {"type": "integer"}},
//!         "required": ["name"]
//!     })
//! );
//! ```
//!
//! ## Extensions
//!
//! Constraints with no standard keyword are emitted as `x-` extensions,
//! controlled by [`ProjectionOptions`]. Named examples go under
//! `x-examples`; message overrides, when enabled, under `x-error-messages`.
//!
//! ## Features
//!
//! - `utoipa`: conversion into `utoipa::openapi::RefOr<Schema>`.

pub mod error;
pub mod options;
pub mod projection;
#[cfg(feature = "utoipa")]
pub mod utoipa_schema;

pub use error::OpenApiError;
pub use options::ProjectionOptions;
pub use projection::{to_open_api, to_yaml_string, OpenApiProjector};
#[cfg(feature = "utoipa")]
pub use utoipa_schema::to_utoipa_schema;
