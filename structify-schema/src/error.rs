//! Error types for schema compilation and conformance checking.

use thiserror::Error;

/// Error during schema compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The resolved type tag is not one of the recognized kinds.
    #[error("Unsupported schema type: {kind}")]
    UnsupportedType {
        /// The offending tag, rendered as text.
        kind: String,
    },
}

impl SchemaError {
    /// Create an unsupported-type error.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedType { kind: kind.into() }
    }
}

/// A candidate value failed to conform to a compiled validator.
///
/// Carries the path to the failing node so repeated mismatches against
/// the same prompt can be diagnosed from logs alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value at `{path}` does not conform: expected {expected}, got {actual}")]
pub struct SchemaViolation {
    /// Dotted/indexed path from the root to the failing node.
    pub path: String,
    /// What the validator expected at that path.
    pub expected: String,
    /// What the candidate value actually held.
    pub actual: String,
}

impl SchemaViolation {
    /// Create a new violation.
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a violation for a declared field that is absent.
    pub fn missing_field(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(path, expected, "a missing field")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_carries_tag() {
        let err = SchemaError::unsupported("integer");
        assert_eq!(err.to_string(), "Unsupported schema type: integer");
    }

    #[test]
    fn test_violation_display() {
        let violation = SchemaViolation::new("$.age", "number", "string");
        assert!(violation.to_string().contains("$.age"));
        assert!(violation.to_string().contains("expected number"));
    }
}
