//! Core generation model trait.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ModelError;
use crate::settings::GenerationSettings;

/// The opaque text-generation boundary.
///
/// One call takes a prompt, a system prompt and a fixed sampling record,
/// and yields either the model's output as a sequence of text fragments
/// or a failure. The fragments carry no structure; callers concatenate
/// them and treat the result as untrusted text.
///
/// Implementations must be cancel-safe: dropping the returned future
/// aborts the in-flight call.
#[async_trait]
pub trait GenerationModel: Send + Sync {
    /// The model name (e.g. `meta/llama-2-70b-chat`).
    fn name(&self) -> &str;

    /// The backing system/provider (e.g. `replicate`, `mock`).
    fn system(&self) -> &str;

    /// Full model identifier.
    fn identifier(&self) -> String {
        format!("{}:{}", self.system(), self.name())
    }

    /// Run one generation and return the output fragments.
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<String>, ModelError>;
}

/// Shared model handle for dynamic dispatch.
pub type BoxedModel = Arc<dyn GenerationModel>;
