//! Prompt assembly.
//!
//! The prompt is a deterministic string with four segments in fixed
//! order: the raw data quoted verbatim, a separator, the caller's format
//! description pretty-printed as JSON, and a separator followed by one
//! canonical example answer. The model sees the caller's original
//! notation, never the compiled validator.
//!
//! The `data` segment is inserted as-is. A caller-controlled `data`
//! string can therefore steer the model (prompt injection); this is an
//! accepted boundary condition of the system, not something the prompt
//! builder defends against.

use serde_json::Value as JsonValue;

/// Fixed instruction accompanying every extraction call.
///
/// Invariant across requests; treated as a constant contract with the
/// generation backend.
pub const SYSTEM_PROMPT: &str = "You are a helpful AI that converts data into the attached JSON format. You respond with nothing but valid JSON based on input data. Your output should directly be the JSON, nothing added before or after. You will begin with opening curly braces and end with closing curly braces. Only if you absolutely cannot determine a field, use value null.";

/// Canonical example of a correctly shaped answer.
///
/// A static exemplar bundled with the system; it is not derived from the
/// caller's format.
pub const EXAMPLE_ANSWER: &str = r#"{
  "name": "John",
  "age": 25,
  "isStudent": true,
  "courses": ["math", "science"]
}"#;

/// Build the extraction prompt for one request.
pub fn build_prompt(data: &str, format: &JsonValue) -> String {
    let format_json =
        serde_json::to_string_pretty(format).unwrap_or_else(|_| format.to_string());
    format!(
        "DATA: \n\"{data}\"\n\n-----------\nExpected JSON format: \n{format_json}\n\n-----------\nValid JSON output in expected example format: \n{EXAMPLE_ANSWER}\n"
    )
}
