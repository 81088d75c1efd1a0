// src/core/completion.rs — Ask the model for a color, with one retry on bad output

use std::sync::Arc;

use super::extractor::extract_color;
use super::system_prompt::build_messages;
use super::types::ColorResult;
use crate::infra::config::CompletionConfig;
use crate::infra::errors::TinctureError;
use crate::provider::retry::{with_retry, RetryConfig};
use crate::provider::{ChatRequest, Message, ModelProvider};

/// Sampling settings sent with every completion call.
#[derive(Debug, Clone)]
pub struct SamplingParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            model: "gpt-4o".into(),
            temperature: 0.0,
            max_tokens: 848,
        }
    }
}

impl SamplingParams {
    pub fn from_config(config: &CompletionConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

pub struct CompletionClient {
    provider: Arc<dyn ModelProvider>,
    sampling: SamplingParams,
    retry: RetryConfig,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            sampling: SamplingParams::default(),
            retry: RetryConfig::default(),
        }
    }

    pub fn from_config(provider: Arc<dyn ModelProvider>, config: &CompletionConfig) -> Self {
        Self {
            provider,
            sampling: SamplingParams::from_config(config),
            retry: RetryConfig::from_completion(config),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn provider_id(&self) -> &str {
        self.provider.id()
    }

    /// Generate a color for `input_text`.
    ///
    /// `history` is only sent when `keep_history` is set. An attempt fails when
    /// the provider errors, returns no text, or returns text without a
    /// `#RRGGBB` token; failed attempts are retried per the retry config.
    pub async fn generate(
        &self,
        input_text: &str,
        history: &[Message],
        keep_history: bool,
    ) -> Result<ColorResult, TinctureError> {
        let messages = build_messages(input_text, history, keep_history);

        tracing::debug!(
            provider = self.provider.id(),
            model = %self.sampling.model,
            messages = messages.len(),
            history = if keep_history { history.len() } else { 0 },
            "Requesting color"
        );

        let request = ChatRequest {
            model: self.sampling.model.clone(),
            messages,
            max_tokens: Some(self.sampling.max_tokens),
            temperature: Some(self.sampling.temperature),
        };

        let label = format!("color for {input_text:?}");
        let result = with_retry(&self.retry, &label, |_| self.attempt(request.clone())).await?;

        tracing::debug!(color = %result.color, imagery = ?result.imagery, "Extracted color");
        Ok(result)
    }

    async fn attempt(&self, request: ChatRequest) -> Result<ColorResult, TinctureError> {
        let response = self.provider.chat(request).await?;
        tracing::debug!(
            tokens = response.usage.total(),
            stop = ?response.stop_reason,
            "Completion received"
        );
        let output = response.content.unwrap_or_default();
        extract_color(&output)
    }
}
