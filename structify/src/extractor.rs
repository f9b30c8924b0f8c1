//! Retry-validate orchestration.
//!
//! One extraction is a bounded sequence of attempts. Each attempt runs
//! the generation call, concatenates the returned fragments, parses them
//! as JSON and checks the result against the compiled validator. Any
//! failure inside an attempt is logged and retried immediately — no
//! backoff, no jitter, no distinction between failure causes — until the
//! budget is spent, at which point the last error surfaces verbatim.
//!
//! Attempts are strictly sequential; the model call is the dominant cost
//! and carries no state worth parallelizing. Dropping the future returned
//! by [`Extractor::extract`] cancels the in-flight call.

use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::request::ExtractionRequest;
use structify_model::{BoxedModel, GenerationSettings, ModelError};
use structify_schema::{compile, ValidatorNode};

/// Default retry budget: 3 retries, up to 4 total attempts.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Drives a generation model until its output parses and conforms, or
/// the retry budget runs out.
#[derive(Clone)]
pub struct Extractor {
    model: BoxedModel,
    settings: GenerationSettings,
    system_prompt: String,
    max_retries: u32,
    attempt_timeout: Option<Duration>,
}

impl Extractor {
    /// Create an extractor with the default configuration.
    pub fn new(model: BoxedModel) -> Self {
        Self {
            model,
            settings: GenerationSettings::extraction_defaults(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            attempt_timeout: None,
        }
    }

    /// Replace the sampling settings.
    #[must_use]
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the fixed instruction string.
    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Set the retry budget (`n` retries = `n + 1` total attempts).
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Bound each attempt's wall clock.
    ///
    /// Without this, a hung generation call stalls the whole retry
    /// budget; with it, an overlong attempt fails as a generation
    /// timeout and the loop moves on.
    #[must_use]
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    /// Run the full flow for one decoded request: compile the format,
    /// build the prompt, then extract.
    ///
    /// Compilation failures surface immediately; retrying cannot fix a
    /// malformed schema.
    pub async fn extract_request(
        &self,
        request: &ExtractionRequest,
    ) -> Result<JsonValue, ExtractionError> {
        let validator = compile(&request.format)?;
        let prompt = build_prompt(&request.data, &request.format);
        self.extract(&prompt, &validator).await
    }

    /// Run the retry loop for an already-built prompt and validator.
    pub async fn extract(
        &self,
        prompt: &str,
        validator: &ValidatorNode,
    ) -> Result<JsonValue, ExtractionError> {
        let max_attempts = self.max_retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(attempt, max_attempts, model = %self.model.identifier(), "generation attempt");

            match self.attempt(prompt, validator).await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < max_attempts => {
                    warn!(attempt, kind = error.kind(), error = %error, "attempt failed, retrying");
                }
                Err(error) => {
                    warn!(attempt, kind = error.kind(), error = %error, "retry budget exhausted");
                    return Err(error);
                }
            }
        }
    }

    /// One attempt: generate, assemble, parse, check.
    async fn attempt(
        &self,
        prompt: &str,
        validator: &ValidatorNode,
    ) -> Result<JsonValue, ExtractionError> {
        let generation = self
            .model
            .generate(prompt, &self.system_prompt, &self.settings);

        let chunks = match self.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, generation)
                .await
                .map_err(|_| ModelError::Timeout(limit))??,
            None => generation.await?,
        };

        let text = chunks.concat();
        let value: JsonValue = serde_json::from_str(&text)?;
        validator.check(&value)?;
        Ok(value)
    }
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("model", &self.model.identifier())
            .field("max_retries", &self.max_retries)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}

/// Convenience entry point: extract one request with the default
/// configuration.
pub async fn extract_structured(
    model: BoxedModel,
    request: &ExtractionRequest,
) -> Result<JsonValue, ExtractionError> {
    Extractor::new(model).extract_request(request).await
}
