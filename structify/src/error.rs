//! Extraction error taxonomy.

use thiserror::Error;

use crate::request::RequestError;
use structify_model::ModelError;
use structify_schema::{SchemaError, SchemaViolation};

/// Everything that can go wrong between a decoded request and a
/// validated JSON value.
///
/// Three kinds are retried by the orchestrator (generation, parse,
/// schema mismatch); the other two cannot be fixed by retrying and
/// surface immediately.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Malformed inbound payload.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    /// The schema description used an unrecognized type tag.
    #[error(transparent)]
    UnsupportedSchema(#[from] SchemaError),

    /// The generation call itself failed.
    #[error("Generation failed: {0}")]
    Generation(#[from] ModelError),

    /// The model's output was not syntactically valid JSON.
    #[error("Model output is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The model's output parsed but did not conform to the compiled
    /// validator.
    #[error("Model output does not match the requested format: {0}")]
    SchemaMismatch(#[from] SchemaViolation),
}

impl ExtractionError {
    /// Stable machine-readable tag for boundary payloads.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::InvalidRequest(_) => "invalid_request",
            ExtractionError::UnsupportedSchema(_) => "unsupported_schema",
            ExtractionError::Generation(_) => "generation_failure",
            ExtractionError::Parse(_) => "parse_failure",
            ExtractionError::SchemaMismatch(_) => "schema_mismatch",
        }
    }

    /// Whether another attempt against the same prompt could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExtractionError::Generation(_)
                | ExtractionError::Parse(_)
                | ExtractionError::SchemaMismatch(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        let err = ExtractionError::from(RequestError::MissingField("data"));
        assert_eq!(err.kind(), "invalid_request");

        let err = ExtractionError::from(SchemaError::unsupported("uuid"));
        assert_eq!(err.kind(), "unsupported_schema");

        let err = ExtractionError::from(ModelError::api("down"));
        assert_eq!(err.kind(), "generation_failure");

        let err = ExtractionError::from(SchemaViolation::new("$", "object", "null"));
        assert_eq!(err.kind(), "schema_mismatch");
    }

    #[test]
    fn test_retryable_split() {
        assert!(ExtractionError::from(ModelError::api("down")).is_retryable());
        assert!(
            ExtractionError::from(SchemaViolation::new("$", "object", "null")).is_retryable()
        );
        assert!(!ExtractionError::from(RequestError::NotAnObject).is_retryable());
        assert!(!ExtractionError::from(SchemaError::unsupported("uuid")).is_retryable());
    }

    #[test]
    fn test_unsupported_schema_message_passes_through() {
        let err = ExtractionError::from(SchemaError::unsupported("integer"));
        assert_eq!(err.to_string(), "Unsupported schema type: integer");
    }
}
