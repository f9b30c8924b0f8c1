//! Decoded request boundary.
//!
//! The transport layer (HTTP server, queue consumer, CLI) lives outside
//! this crate. Whatever it is, it hands over a decoded JSON body; this
//! module turns that body into a typed [`ExtractionRequest`] or a
//! [`RequestError`] naming the offending field.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Malformed inbound payload. Never retried; surfaced immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request body is not a JSON object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A required field has the wrong type.
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        /// The field name.
        field: &'static str,
        /// What the field must be.
        expected: &'static str,
    },
}

/// One extraction request: raw text plus the desired output shape.
///
/// Immutable for the duration of the request; the `format` tree is the
/// caller's hybrid schema description, kept verbatim because the prompt
/// interpolates it as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Raw textual data to extract from.
    pub data: String,
    /// Schema description of the desired output.
    pub format: JsonValue,
}

impl ExtractionRequest {
    /// Create a request from its parts.
    pub fn new(data: impl Into<String>, format: JsonValue) -> Self {
        Self {
            data: data.into(),
            format,
        }
    }

    /// Decode a request from an untyped JSON body.
    ///
    /// Exactly two fields are required: `data` (a string) and `format`
    /// (an object). Extra fields are ignored.
    pub fn from_value(body: JsonValue) -> Result<Self, RequestError> {
        let mut map = match body {
            JsonValue::Object(map) => map,
            _ => return Err(RequestError::NotAnObject),
        };

        let data = match map.remove("data") {
            Some(JsonValue::String(data)) => data,
            Some(_) => {
                return Err(RequestError::InvalidField {
                    field: "data",
                    expected: "a string",
                })
            }
            None => return Err(RequestError::MissingField("data")),
        };

        let format = match map.remove("format") {
            Some(format @ JsonValue::Object(_)) => format,
            Some(_) => {
                return Err(RequestError::InvalidField {
                    field: "format",
                    expected: "an object",
                })
            }
            None => return Err(RequestError::MissingField("format")),
        };

        Ok(Self { data, format })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_well_formed_request() {
        let request = ExtractionRequest::from_value(json!({
            "data": "Jane is 30",
            "format": {"name": "", "age": 0}
        }))
        .unwrap();
        assert_eq!(request.data, "Jane is 30");
        assert_eq!(request.format, json!({"name": "", "age": 0}));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let request = ExtractionRequest::from_value(json!({
            "data": "x",
            "format": {},
            "trace_id": "abc"
        }));
        assert!(request.is_ok());
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            ExtractionRequest::from_value(json!({"format": {}})).unwrap_err(),
            RequestError::MissingField("data")
        );
        assert_eq!(
            ExtractionRequest::from_value(json!({"data": "x"})).unwrap_err(),
            RequestError::MissingField("format")
        );
    }

    #[test]
    fn test_mistyped_fields() {
        assert_eq!(
            ExtractionRequest::from_value(json!({"data": 1, "format": {}})).unwrap_err(),
            RequestError::InvalidField {
                field: "data",
                expected: "a string"
            }
        );
        assert_eq!(
            ExtractionRequest::from_value(json!({"data": "x", "format": ["not", "an", "object"]}))
                .unwrap_err(),
            RequestError::InvalidField {
                field: "format",
                expected: "an object"
            }
        );
    }

    #[test]
    fn test_non_object_body() {
        assert_eq!(
            ExtractionRequest::from_value(json!("just text")).unwrap_err(),
            RequestError::NotAnObject
        );
    }
}
