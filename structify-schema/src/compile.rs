//! Schema compilation.
//!
//! A schema description is an untyped JSON tree mixing two notations,
//! interchangeable at any depth:
//!
//! - *tagged* nodes: `{"type": "string"}`, `{"type": "array", "items": ...}`,
//!   `{"type": "object", "name": ...}`;
//! - *untagged* example values: a bare literal stands in for "a value
//!   shaped like this", so `{"name": "Jane"}` means a string field named
//!   `name`.
//!
//! Both notations go through the same recursive entry point: the node's
//! kind is resolved first, then the matching compiler branch runs.

use serde_json::Value as JsonValue;

use crate::error::SchemaError;
use crate::validator::{PrimitiveKind, ValidatorNode};

/// Resolve the type tag of a schema node, as text.
///
/// A `type` key wins verbatim; otherwise a sequence is an array and any
/// other value resolves to its own runtime category. An untagged `null`
/// resolves to `object` (the `typeof null` convention callers of this
/// notation expect).
fn resolve_type(node: &JsonValue) -> String {
    if let Some(tag) = node.as_object().and_then(|map| map.get("type")) {
        return match tag.as_str() {
            Some(name) => name.to_string(),
            // A non-string tag still resolves; it fails downstream as
            // an unsupported kind carrying its rendering.
            None => tag.to_string(),
        };
    }
    let category = match node {
        JsonValue::Array(_) => "array",
        JsonValue::String(_) => "string",
        JsonValue::Number(_) => "number",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Null | JsonValue::Object(_) => "object",
    };
    category.to_string()
}

/// Compile a schema description into a validator tree.
///
/// Total over well-formed input; fails with
/// [`SchemaError::UnsupportedType`] when the resolved tag is none of
/// `string`, `number`, `boolean`, `array`, `object`.
///
/// Object fields are compiled in the order the caller wrote them, with
/// the `type` key excluded. A tagged array takes its item schema from
/// `items`; an untagged sequence takes it from its first element; when
/// neither is available the item schema is left open.
pub fn compile(node: &JsonValue) -> Result<ValidatorNode, SchemaError> {
    match resolve_type(node).as_str() {
        "string" => Ok(ValidatorNode::Primitive(PrimitiveKind::String)),
        "number" => Ok(ValidatorNode::Primitive(PrimitiveKind::Number)),
        "boolean" => Ok(ValidatorNode::Primitive(PrimitiveKind::Boolean)),
        "array" => {
            let item = match node {
                JsonValue::Object(map) => map.get("items").map(compile).transpose()?,
                JsonValue::Array(elements) => elements.first().map(compile).transpose()?,
                _ => None,
            };
            Ok(ValidatorNode::Array(item.map(Box::new)))
        }
        "object" => {
            let mut fields = indexmap::IndexMap::new();
            if let Some(map) = node.as_object() {
                for (key, child) in map {
                    if key != "type" {
                        fields.insert(key.clone(), compile(child)?);
                    }
                }
            }
            Ok(ValidatorNode::Object(fields))
        }
        other => Err(SchemaError::unsupported(other)),
    }
}
