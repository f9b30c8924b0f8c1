//! Replicate predictions API wire types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::settings::GenerationSettings;

/// Request body for creating a prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    /// Model input payload.
    pub input: PredictionInput,
}

/// Input payload for a language-model prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionInput {
    /// The user prompt.
    pub prompt: String,
    /// The system prompt.
    pub system_prompt: String,
    /// Top-k sampling cutoff.
    pub top_k: i64,
    /// Top-p sampling mass.
    pub top_p: f64,
    /// Sampling temperature.
    pub temperature: f64,
    /// Length penalty.
    pub length_penalty: f64,
    /// Maximum new tokens.
    pub max_new_tokens: u32,
    /// Minimum new tokens (-1 = unbounded).
    pub min_new_tokens: i64,
    /// Presence penalty.
    pub presence_penalty: f64,
    /// Instruction-wrapping template.
    pub prompt_template: String,
}

impl PredictionInput {
    /// Assemble the input payload from a prompt pair and settings.
    pub fn new(prompt: &str, system_prompt: &str, settings: &GenerationSettings) -> Self {
        Self {
            prompt: prompt.to_string(),
            system_prompt: system_prompt.to_string(),
            top_k: settings.top_k,
            top_p: settings.top_p,
            temperature: settings.temperature,
            length_penalty: settings.length_penalty,
            max_new_tokens: settings.max_new_tokens,
            min_new_tokens: settings.min_new_tokens,
            presence_penalty: settings.presence_penalty,
            prompt_template: settings.prompt_template.clone(),
        }
    }
}

/// A prediction as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    /// Prediction id.
    #[serde(default)]
    pub id: Option<String>,
    /// Lifecycle status.
    pub status: PredictionStatus,
    /// Output fragments; language models emit an array of strings.
    #[serde(default)]
    pub output: Option<Vec<String>>,
    /// Error detail when the prediction did not succeed.
    #[serde(default)]
    pub error: Option<String>,
}

/// Prediction lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    /// Queued, not yet running.
    Starting,
    /// Currently running.
    Processing,
    /// Finished successfully.
    Succeeded,
    /// Finished with an error.
    Failed,
    /// Canceled before completion.
    Canceled,
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PredictionStatus::Starting => "starting",
            PredictionStatus::Processing => "processing",
            PredictionStatus::Succeeded => "succeeded",
            PredictionStatus::Failed => "failed",
            PredictionStatus::Canceled => "canceled",
        };
        f.write_str(name)
    }
}

/// Error body returned by the Replicate API.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplicateError {
    /// Error detail message.
    pub detail: String,
}
