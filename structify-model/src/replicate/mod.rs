//! Replicate-backed generation model.

pub mod types;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use self::types::{Prediction, PredictionInput, PredictionRequest, PredictionStatus, ReplicateError};
use crate::error::ModelError;
use crate::model::GenerationModel;
use crate::settings::GenerationSettings;

/// Replicate API base URL.
pub const REPLICATE_BASE_URL: &str = "https://api.replicate.com/v1";

/// Default model for JSON extraction.
pub const DEFAULT_MODEL_ID: &str = "meta/llama-2-70b-chat";

/// Generation model backed by the Replicate predictions API.
///
/// Uses the synchronous prediction mode (`Prefer: wait`), so one
/// generation is one HTTP round trip and cancellation maps to dropping
/// the request future.
#[derive(Debug, Clone)]
pub struct ReplicateModel {
    /// Model id in `owner/name` form.
    model_id: String,
    /// API token.
    api_token: String,
    /// HTTP client.
    client: Client,
    /// Base URL, overridable for tests.
    base_url: String,
    /// Timeout applied when the settings carry none.
    default_timeout: Duration,
}

impl ReplicateModel {
    /// Create a new Replicate model client.
    pub fn new(model_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            api_token: api_token.into(),
            client: Client::new(),
            base_url: REPLICATE_BASE_URL.to_string(),
            default_timeout: Duration::from_secs(120),
        }
    }

    /// Create the default extraction model from `REPLICATE_API_TOKEN`.
    pub fn from_env() -> Result<Self, ModelError> {
        let api_token = std::env::var("REPLICATE_API_TOKEN")
            .map_err(|_| ModelError::configuration("REPLICATE_API_TOKEN not set"))?;
        Ok(Self::new(DEFAULT_MODEL_ID, api_token))
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    fn predictions_url(&self) -> String {
        format!("{}/models/{}/predictions", self.base_url, self.model_id)
    }

    fn handle_error(&self, status: u16, body: &str) -> ModelError {
        let detail = serde_json::from_str::<ReplicateError>(body)
            .map(|err| err.detail)
            .unwrap_or_else(|_| body.to_string());
        match status {
            401 | 403 => ModelError::auth(detail),
            429 => ModelError::RateLimited,
            _ => ModelError::http(status, detail),
        }
    }
}

#[async_trait]
impl GenerationModel for ReplicateModel {
    fn name(&self) -> &str {
        &self.model_id
    }

    fn system(&self) -> &str {
        "replicate"
    }

    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<String>, ModelError> {
        let body = PredictionRequest {
            input: PredictionInput::new(prompt, system_prompt, settings),
        };
        let timeout = settings.timeout.unwrap_or(self.default_timeout);

        debug!(model = %self.model_id, "creating prediction");

        let response = self
            .client
            .post(self.predictions_url())
            .header("Authorization", format!("Bearer {}", self.api_token))
            .header("Prefer", "wait")
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(self.handle_error(status, &body));
        }

        let prediction: Prediction = response
            .json()
            .await
            .map_err(|err| ModelError::invalid_response(err.to_string()))?;

        match prediction.status {
            PredictionStatus::Succeeded => Ok(prediction.output.unwrap_or_default()),
            status => Err(ModelError::api(prediction.error.unwrap_or_else(|| {
                format!("prediction ended with status {status}")
            }))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn model_for(server: &MockServer) -> ReplicateModel {
        ReplicateModel::new("meta/llama-2-70b-chat", "test-token").with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_returns_output_fragments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/meta/llama-2-70b-chat/predictions"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Prefer", "wait"))
            .and(body_partial_json(json!({
                "input": {"temperature": 0.5, "max_new_tokens": 500}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p1",
                "status": "succeeded",
                "output": ["{\"name\":", " \"Jane\"}"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let model = model_for(&server);
        let chunks = model
            .generate("prompt", "system", &GenerationSettings::extraction_defaults())
            .await
            .unwrap();
        assert_eq!(chunks.concat(), "{\"name\": \"Jane\"}");
    }

    #[tokio::test]
    async fn test_failed_prediction_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "status": "failed",
                "error": "model exploded"
            })))
            .mount(&server)
            .await;

        let model = model_for(&server);
        let err = model
            .generate("prompt", "system", &GenerationSettings::extraction_defaults())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Api(message) if message == "model exploded"));
    }

    #[tokio::test]
    async fn test_auth_error_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "invalid token"})),
            )
            .mount(&server)
            .await;

        let model = model_for(&server);
        let err = model
            .generate("prompt", "system", &GenerationSettings::extraction_defaults())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Authentication(message) if message == "invalid token"));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let model = model_for(&server);
        let err = model
            .generate("prompt", "system", &GenerationSettings::extraction_defaults())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Http { status: 500, body } if body == "boom"));
    }

    #[test]
    fn test_from_env_requires_token() {
        std::env::remove_var("REPLICATE_API_TOKEN");
        assert!(matches!(
            ReplicateModel::from_env(),
            Err(ModelError::Configuration(_))
        ));
    }

    #[test]
    fn test_predictions_url() {
        let model = ReplicateModel::new("meta/llama-2-70b-chat", "t");
        assert_eq!(
            model.predictions_url(),
            "https://api.replicate.com/v1/models/meta/llama-2-70b-chat/predictions"
        );
    }
}
