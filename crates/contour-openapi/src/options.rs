//! # Projection Options
//!
//! What the projector emits beyond the standard keyword mapping. Options are
//! plain values, loadable from YAML or JSON so documentation tooling can
//! keep them next to its other configuration.
//!
//! ```
//! use contour_openapi::ProjectionOptions;
//!
//! let opts = ProjectionOptions::from_yaml_str("error_messages: true\nextensions: false\n").unwrap();
//! assert!(opts.error_messages);
//! assert!(!opts.extensions);
//! assert!(opts.descriptions);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::OpenApiError;

/// Toggles for non-standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionOptions {
    /// Emit `x-` extensions for constraints with no standard keyword:
    /// `x-partial`, `x-positive`, `x-negative`, `x-custom-validator`.
    pub extensions: bool,
    /// Emit the named example set under `x-examples`.
    pub named_examples: bool,
    /// Emit message overrides under `x-error-messages`.
    pub error_messages: bool,
    /// Emit `description`.
    pub descriptions: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            extensions: true,
            named_examples: true,
            error_messages: false,
            descriptions: true,
        }
    }
}

impl ProjectionOptions {
    /// Only the standard keyword mapping, no extensions or documentation.
    pub fn standard_only() -> Self {
        Self {
            extensions: false,
            named_examples: false,
            error_messages: false,
            descriptions: false,
        }
    }

    /// Parse options from YAML. Missing keys take their defaults.
    pub fn from_yaml_str(input: &str) -> Result<Self, OpenApiError> {
        serde_yaml::from_str(input).map_err(OpenApiError::OptionsYaml)
    }

    /// Parse options from JSON. Missing keys take their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, OpenApiError> {
        serde_json::from_str(input).map_err(OpenApiError::OptionsJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ProjectionOptions::default();
        assert!(opts.extensions);
        assert!(opts.named_examples);
        assert!(!opts.error_messages);
        assert!(opts.descriptions);
    }

    #[test]
    fn test_empty_documents_yield_defaults() {
        assert_eq!(ProjectionOptions::from_json_str("{}").unwrap(), ProjectionOptions::default());
        assert_eq!(ProjectionOptions::from_yaml_str("{}").unwrap(), ProjectionOptions::default());
    }

    #[test]
    fn test_json_overrides() {
        let opts = ProjectionOptions::from_json_str(r#"{"named_examples": false}"#).unwrap();
        assert!(!opts.named_examples);
        assert!(opts.extensions);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ProjectionOptions::from_yaml_str("extentions: true\n").unwrap_err();
        assert!(matches!(err, OpenApiError::OptionsYaml(_)));
        assert!(ProjectionOptions::from_json_str(r#"{"bogus": 1}"#).is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(ProjectionOptions::from_json_str(r#"{"extensions": "yes"}"#).is_err());
    }
}
