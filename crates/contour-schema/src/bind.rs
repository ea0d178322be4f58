//! # Struct Binding
//!
//! Validate a typed host value by round-tripping it through JSON:
//! serialize with `serde_json`, [`parse`](crate::Schema::parse) the
//! intermediate (defaults applied), then deserialize back.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use contour_schema::{bind::bind_value, object, string};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Signup {
//!     email: String,
//!     #[serde(default)]
//!     plan: Option<String>,
//! }
//!
//! let schema = object()
//!     .field("email", string().email().required())
//!     .field("plan", string().optional().default("free"))
//!     .required();
//!
//! let signup = bind_value(&schema, Signup { email: "a@b.io".into(), plan: None }).unwrap();
//! assert_eq!(signup.plan.as_deref(), Some("free"));
//! ```
//!
//! This is a convenience layer; it adds nothing to validation semantics.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use contour_core::{ValidationError, Value};

use crate::builder::{Schema, SchemaKind};
use crate::state::Finalized;

/// Failure of a bind round trip.
#[derive(Error, Debug)]
pub enum BindError {
    /// The host value could not be serialized to JSON.
    #[error("failed to serialize value for validation: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The validated value could not be deserialized back into the host type.
    #[error("failed to deserialize validated value: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// The value failed validation.
    #[error("validation failed: {0}")]
    Invalid(#[from] ValidationError),
}

/// Validate `value`, returning it with defaults applied.
///
/// # Errors
///
/// [`BindError::Invalid`] carries the validation error tree.
pub fn bind_value<T, K, S>(schema: &Schema<K, S>, value: T) -> Result<T, BindError>
where
    T: Serialize + DeserializeOwned,
    K: SchemaKind,
    S: Finalized,
{
    let json = serde_json::to_value(&value).map_err(BindError::Serialize)?;
    let parsed = schema.parse(Value::from(json))?;
    serde_json::from_value(parsed.to_json()).map_err(BindError::Deserialize)
}

/// Validate `target` in place, writing defaults back into it.
///
/// On error `target` is left unchanged.
pub fn bind<T, K, S>(schema: &Schema<K, S>, target: &mut T) -> Result<(), BindError>
where
    T: Serialize + DeserializeOwned,
    K: SchemaKind,
    S: Finalized,
{
    let json = serde_json::to_value(&*target).map_err(BindError::Serialize)?;
    let parsed = schema.parse(Value::from(json))?;
    *target = serde_json::from_value(parsed.to_json()).map_err(BindError::Deserialize)?;
    Ok(())
}
