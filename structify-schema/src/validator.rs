//! Compiled validator tree.
//!
//! A [`ValidatorNode`] is the closed-form artifact produced by
//! [`compile`](crate::compile::compile). It checks candidate JSON values
//! structurally: primitives and arrays are nullable, objects are not, and
//! every declared object field must be present.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::error::SchemaViolation;

/// The three primitive kinds a leaf validator can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A node in the compiled validator tree.
///
/// Closed variant set so both the compiler and the checker can match
/// exhaustively. Built once per request and discarded after use.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorNode {
    /// A nullable primitive leaf.
    Primitive(PrimitiveKind),
    /// A nullable array. `None` is the any-item sentinel: element types
    /// are not checked when the item schema could not be inferred.
    Array(Option<Box<ValidatorNode>>),
    /// An object with an ordered field map. Not nullable.
    Object(IndexMap<String, ValidatorNode>),
}

impl ValidatorNode {
    /// Check a candidate value against this validator.
    ///
    /// Returns the first violation found, depth-first in field order.
    /// Undeclared object keys in the candidate are ignored.
    pub fn check(&self, value: &JsonValue) -> Result<(), SchemaViolation> {
        self.check_at(value, "$")
    }

    fn check_at(&self, value: &JsonValue, path: &str) -> Result<(), SchemaViolation> {
        match self {
            ValidatorNode::Primitive(kind) => {
                let matches = match kind {
                    PrimitiveKind::String => value.is_string(),
                    PrimitiveKind::Number => value.is_number(),
                    PrimitiveKind::Boolean => value.is_boolean(),
                };
                // Primitive leaves are nullable.
                if matches || value.is_null() {
                    Ok(())
                } else {
                    Err(SchemaViolation::new(
                        path,
                        kind.to_string(),
                        value_category(value),
                    ))
                }
            }
            ValidatorNode::Array(item) => {
                // Arrays are nullable.
                if value.is_null() {
                    return Ok(());
                }
                let elements = value
                    .as_array()
                    .ok_or_else(|| SchemaViolation::new(path, "array", value_category(value)))?;
                if let Some(item) = item {
                    for (index, element) in elements.iter().enumerate() {
                        item.check_at(element, &format!("{path}[{index}]"))?;
                    }
                }
                Ok(())
            }
            ValidatorNode::Object(fields) => {
                // Objects reject null: absence of the whole record is an error.
                let map = value
                    .as_object()
                    .ok_or_else(|| SchemaViolation::new(path, "object", value_category(value)))?;
                for (name, node) in fields {
                    let field_path = format!("{path}.{name}");
                    match map.get(name) {
                        Some(field_value) => node.check_at(field_value, &field_path)?,
                        None => {
                            return Err(SchemaViolation::missing_field(
                                field_path,
                                node.describe(),
                            ))
                        }
                    }
                }
                Ok(())
            }
        }
    }

    /// Short human-readable description of what this node accepts.
    pub fn describe(&self) -> String {
        match self {
            ValidatorNode::Primitive(kind) => format!("a nullable {kind}"),
            ValidatorNode::Array(_) => "a nullable array".to_string(),
            ValidatorNode::Object(_) => "an object".to_string(),
        }
    }
}

/// The JSON category of a value, for violation messages.
fn value_category(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
