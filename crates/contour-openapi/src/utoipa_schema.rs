//! # utoipa Adapter
//!
//! Converts emitted documents into `utoipa` schema objects so contour
//! schemas can be registered as components of a utoipa-generated API
//! document. Enabled by the `utoipa` feature.

use contour_schema::NodeRef;
use utoipa::openapi::{RefOr, Schema};

use crate::error::OpenApiError;
use crate::projection::OpenApiProjector;

impl OpenApiProjector {
    /// Emit `node` and convert the document into a utoipa schema.
    pub fn project_utoipa<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<RefOr<Schema>, OpenApiError> {
        serde_json::from_value(self.project(node)).map_err(OpenApiError::Utoipa)
    }
}

/// Emit `node` with default options and convert it into a utoipa schema.
pub fn to_utoipa_schema<'a>(node: impl Into<NodeRef<'a>>) -> Result<RefOr<Schema>, OpenApiError> {
    OpenApiProjector::default().project_utoipa(node)
}
