//! Mock generation model for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::ModelError;
use crate::model::GenerationModel;
use crate::settings::GenerationSettings;

/// One scripted generation outcome.
#[derive(Debug, Clone)]
enum ScriptedOutcome {
    /// Succeed with these output fragments.
    Chunks(Vec<String>),
    /// Fail with an API error carrying this message.
    Failure(String),
}

/// A generation model driven by a scripted queue of outcomes.
///
/// Outcomes are consumed in order; the last one repeats once the queue
/// runs out, so an always-failing or always-succeeding stub needs a
/// single entry. Every prompt the mock receives is recorded, which makes
/// attempt-count assertions straightforward.
///
/// # Example
///
/// ```rust
/// use structify_model::MockModel;
///
/// let model = MockModel::new()
///     .with_failure("transient error")
///     .with_text(r#"{"name": "Jane"}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockModel {
    outcomes: Arc<Mutex<VecDeque<ScriptedOutcome>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockModel {
    /// Create a new mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful outcome returning these fragments.
    #[must_use]
    pub fn with_chunks(self, chunks: Vec<String>) -> Self {
        self.push(ScriptedOutcome::Chunks(chunks))
    }

    /// Script a successful outcome returning one fragment.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(ScriptedOutcome::Chunks(vec![text.into()]))
    }

    /// Script a failing outcome.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(ScriptedOutcome::Failure(message.into()))
    }

    fn push(&self, outcome: ScriptedOutcome) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self.clone()
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of generation calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationModel for MockModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn system(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        _system_prompt: &str,
        _settings: &GenerationSettings,
    ) -> Result<Vec<String>, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let outcome = {
            let mut queue = self.outcomes.lock().unwrap();
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        };

        match outcome {
            Some(ScriptedOutcome::Chunks(chunks)) => Ok(chunks),
            Some(ScriptedOutcome::Failure(message)) => Err(ModelError::api(message)),
            None => Err(ModelError::api("mock model has no scripted outcome")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outcomes_consumed_in_order() {
        let model = MockModel::new().with_failure("first").with_text("second");
        let settings = GenerationSettings::extraction_defaults();

        assert!(model.generate("p1", "s", &settings).await.is_err());
        let chunks = model.generate("p2", "s", &settings).await.unwrap();
        assert_eq!(chunks, vec!["second".to_string()]);
    }

    #[tokio::test]
    async fn test_last_outcome_repeats() {
        let model = MockModel::new().with_failure("always");
        let settings = GenerationSettings::extraction_defaults();

        for _ in 0..4 {
            assert!(model.generate("p", "s", &settings).await.is_err());
        }
        assert_eq!(model.call_count(), 4);
    }

    #[tokio::test]
    async fn test_prompts_are_recorded() {
        let model = MockModel::new().with_text("{}");
        let settings = GenerationSettings::extraction_defaults();

        model.generate("hello", "s", &settings).await.unwrap();
        assert_eq!(model.recorded_prompts(), vec!["hello".to_string()]);
        assert_eq!(model.identifier(), "mock:scripted");
    }
}
