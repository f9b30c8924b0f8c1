//! # structify-model
//!
//! Generation model boundary for structify.
//!
//! The rest of the system treats text generation as an opaque, fallible
//! call: prompt and system prompt in, a sequence of text fragments out.
//! This crate owns that boundary:
//!
//! - **[`GenerationModel`]**: the trait every backend implements
//! - **[`GenerationSettings`]**: the fixed sampling record for extraction
//! - **[`ReplicateModel`]**: Replicate predictions API client
//! - **[`MockModel`]**: scripted model for tests
//!
//! ## Example
//!
//! ```ignore
//! use structify_model::{GenerationModel, GenerationSettings, ReplicateModel};
//!
//! let model = ReplicateModel::from_env()?;
//! let chunks = model
//!     .generate("DATA: ...", "Respond with nothing but JSON.", &GenerationSettings::extraction_defaults())
//!     .await?;
//! let text = chunks.concat();
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod mock;
pub mod model;
pub mod replicate;
pub mod settings;

pub use error::{ModelError, ModelResult};
pub use mock::MockModel;
pub use model::{BoxedModel, GenerationModel};
pub use replicate::{ReplicateModel, DEFAULT_MODEL_ID, REPLICATE_BASE_URL};
pub use settings::{GenerationSettings, LLAMA_PROMPT_TEMPLATE};
