//! # structify
//!
//! Structured JSON extraction from free-form text via a generative model.
//!
//! A caller hands over raw text and a description of the shape it wants
//! back. The description mixes explicit type tags and example values
//! freely: `{"name": "", "age": 0}` and
//! `{"name": {"type": "string"}, "age": {"type": "number"}}` compile to
//! the same validator. structify compiles the description, prompts a
//! model to answer with nothing but JSON, and retries a bounded number of
//! times until the reply parses and conforms.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use serde_json::json;
//! use structify::{extract_structured, ExtractionRequest};
//! use structify_model::ReplicateModel;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = Arc::new(ReplicateModel::from_env()?);
//!     let request = ExtractionRequest::new(
//!         "Jane is 30 and lives in Berlin",
//!         json!({"name": "", "age": 0, "city": ""}),
//!     );
//!     let value = extract_structured(model, &request).await?;
//!     println!("{value}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The workspace is split by concern:
//!
//! - [`structify_schema`] — schema compilation and conformance checking
//! - [`structify_model`] — the generation model boundary
//! - `structify` (this crate) — prompt assembly, the retry-validate
//!   loop, and the decoded request boundary
//!
//! The transport in front of [`ExtractionRequest`] and the model behind
//! [`structify_model::GenerationModel`] are external collaborators; this
//! crate owns everything in between.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod extractor;
pub mod prompt;
pub mod request;

pub use error::ExtractionError;
pub use extractor::{extract_structured, Extractor, DEFAULT_MAX_RETRIES};
pub use prompt::{build_prompt, EXAMPLE_ANSWER, SYSTEM_PROMPT};
pub use request::{ExtractionRequest, RequestError};

// Member crates, re-exported for one-stop imports.
pub use structify_model::{
    BoxedModel, GenerationModel, GenerationSettings, MockModel, ModelError, ReplicateModel,
};
pub use structify_schema::{compile, SchemaError, SchemaViolation, ValidatorNode};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        build_prompt, compile, extract_structured, BoxedModel, ExtractionError,
        ExtractionRequest, Extractor, GenerationModel, GenerationSettings, ValidatorNode,
    };
}
