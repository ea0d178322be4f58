//! Errors from loading options and rendering documents.
//!
//! Projection itself is total; only the text formats around it can fail.

use thiserror::Error;

/// Error raised by option loading, rendering, or the utoipa adapter.
#[derive(Error, Debug)]
pub enum OpenApiError {
    /// Options YAML did not parse or had unknown keys.
    #[error("invalid projection options (YAML): {0}")]
    OptionsYaml(#[source] serde_yaml::Error),

    /// Options JSON did not parse or had unknown keys.
    #[error("invalid projection options (JSON): {0}")]
    OptionsJson(#[source] serde_json::Error),

    /// The emitted document could not be rendered as YAML.
    #[error("failed to render schema document as YAML: {0}")]
    Render(#[source] serde_yaml::Error),

    /// The emitted document could not be converted into a utoipa schema.
    #[error("emitted document is not a valid utoipa schema: {0}")]
    Utoipa(#[source] serde_json::Error),
}
