//! Generation sampling settings.

use std::time::Duration;

/// Instruction-wrapping template for Llama-2 chat models.
///
/// `{system_prompt}` and `{prompt}` are substituted by the backend.
pub const LLAMA_PROMPT_TEMPLATE: &str = "<s>[INST] <<SYS>>{system_prompt}<</SYS>>{prompt} [/INST]";

/// Sampling configuration for a generation call.
///
/// The extraction defaults are a deliberately deterministic-leaning
/// record: no top-k filtering, full nucleus, moderate temperature, a
/// bounded new-token budget and no repetition penalties. They are fixed
/// per deployment, not varied per request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Top-k sampling cutoff (0 disables it).
    pub top_k: i64,
    /// Top-p (nucleus) sampling mass.
    pub top_p: f64,
    /// Sampling temperature.
    pub temperature: f64,
    /// Length penalty applied during decoding.
    pub length_penalty: f64,
    /// Maximum number of new tokens to generate.
    pub max_new_tokens: u32,
    /// Minimum number of new tokens; -1 is the unbounded-min sentinel.
    pub min_new_tokens: i64,
    /// Presence penalty.
    pub presence_penalty: f64,
    /// Instruction-wrapping template around system prompt and prompt.
    pub prompt_template: String,
    /// Optional wall-clock limit for the HTTP call.
    pub timeout: Option<Duration>,
}

impl GenerationSettings {
    /// The fixed sampling record used for JSON extraction.
    #[must_use]
    pub fn extraction_defaults() -> Self {
        Self {
            top_k: 0,
            top_p: 1.0,
            temperature: 0.5,
            length_penalty: 1.0,
            max_new_tokens: 500,
            min_new_tokens: -1,
            presence_penalty: 0.0,
            prompt_template: LLAMA_PROMPT_TEMPLATE.to_string(),
            timeout: None,
        }
    }

    /// Set the temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the new-token budget.
    #[must_use]
    pub fn max_new_tokens(mut self, tokens: u32) -> Self {
        self.max_new_tokens = tokens;
        self
    }

    /// Set the instruction-wrapping template.
    #[must_use]
    pub fn prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = template.into();
        self
    }

    /// Set the call timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::extraction_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_defaults_record() {
        let settings = GenerationSettings::extraction_defaults();
        assert_eq!(settings.top_k, 0);
        assert_eq!(settings.top_p, 1.0);
        assert_eq!(settings.temperature, 0.5);
        assert_eq!(settings.length_penalty, 1.0);
        assert_eq!(settings.max_new_tokens, 500);
        assert_eq!(settings.min_new_tokens, -1);
        assert_eq!(settings.presence_penalty, 0.0);
        assert!(settings.prompt_template.contains("{system_prompt}"));
        assert!(settings.prompt_template.contains("{prompt}"));
        assert!(settings.timeout.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let settings = GenerationSettings::default()
            .temperature(0.0)
            .max_new_tokens(100)
            .timeout(Duration::from_secs(20));
        assert_eq!(settings.temperature, 0.0);
        assert_eq!(settings.max_new_tokens, 100);
        assert_eq!(settings.timeout, Some(Duration::from_secs(20)));
    }
}
