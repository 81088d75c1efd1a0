// src/provider/openai.rs — OpenAI Chat Completions provider

use async_trait::async_trait;
use std::time::Duration;

use super::{ChatRequest, ChatResponse, Message, ModelProvider, StopReason, TokenUsage};
use crate::infra::config::CompletionConfig;
use crate::infra::errors::TinctureError;

const PROVIDER_ID: &str = "openai";

pub struct OpenAIProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl OpenAIProvider {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build from config, reading the key from the configured env var.
    pub fn from_config(config: &CompletionConfig) -> Result<Self, TinctureError> {
        let api_key = config.api_key().ok_or_else(|| TinctureError::NoApiKey {
            env: config.api_key_env.clone(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TinctureError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            api_key,
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn provider_error(message: impl Into<String>) -> TinctureError {
        TinctureError::Provider {
            provider: PROVIDER_ID.into(),
            message: message.into(),
        }
    }
}

/// Request body for `/chat/completions`. Plain-text output, neutral penalties.
pub(crate) fn build_body(request: &ChatRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request
        .messages
        .iter()
        .map(|m: &Message| {
            serde_json::json!({
                "role": m.role.as_str(),
                "content": m.content,
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "model": request.model,
        "messages": messages,
        "response_format": { "type": "text" },
        "top_p": 1,
        "frequency_penalty": 0,
        "presence_penalty": 0,
    });

    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = serde_json::json!(max_tokens);
    }
    if let Some(temp) = request.temperature {
        body["temperature"] = serde_json::json!(temp);
    }
    body
}

/// Pull content, usage and stop reason out of a chat-completions response.
pub(crate) fn parse_response(resp: &serde_json::Value) -> ChatResponse {
    let choice = &resp["choices"][0];
    let content = choice["message"]["content"].as_str().map(str::to_string);

    let usage = TokenUsage {
        input_tokens: resp["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        output_tokens: resp["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
    };

    let stop_reason = match choice["finish_reason"].as_str() {
        Some("stop") => StopReason::EndTurn,
        Some("length") => StopReason::MaxTokens,
        _ => StopReason::Unknown,
    };

    ChatResponse {
        content,
        usage,
        stop_reason,
    }
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, TinctureError> {
        let body = build_body(&request);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::provider_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::provider_error(format!(
                "HTTP {}: {}",
                status, error_body
            )));
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to parse response: {}", e)))?;

        let parsed = parse_response(&resp);
        tracing::debug!(
            model = %request.model,
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "Chat completion finished"
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_body_includes_sampling_parameters() {
        let request = ChatRequest {
            model: "gpt-4o".into(),
            messages: vec![Message::system("sys"), Message::user("a peach")],
            max_tokens: Some(848),
            temperature: Some(0.0),
        };
        let body = build_body(&request);
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 848);
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["response_format"]["type"], "text");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "a peach");
    }

    #[test]
    fn test_build_body_omits_unset_limits() {
        let body = build_body(&ChatRequest::default());
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response_content_and_usage() {
        let resp = serde_json::json!({
            "choices": [{
                "message": { "role": "assistant", "content": "Imagery: x\n#4c8c64" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 420, "completion_tokens": 60 }
        });
        let parsed = parse_response(&resp);
        assert_eq!(parsed.content.as_deref(), Some("Imagery: x\n#4c8c64"));
        assert_eq!(parsed.usage.total(), 480);
        assert!(matches!(parsed.stop_reason, StopReason::EndTurn));
    }

    #[test]
    fn test_parse_response_null_content() {
        let resp = serde_json::json!({
            "choices": [{ "message": { "content": null }, "finish_reason": "length" }]
        });
        let parsed = parse_response(&resp);
        assert!(parsed.content.is_none());
        assert!(matches!(parsed.stop_reason, StopReason::MaxTokens));
    }

    #[test]
    fn test_parse_response_no_choices() {
        let parsed = parse_response(&serde_json::json!({}));
        assert!(parsed.content.is_none());
        assert_eq!(parsed.usage.total(), 0);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let p = OpenAIProvider::with_base_url("k".into(), "http://localhost:8080/v1/".into());
        assert_eq!(p.base_url, "http://localhost:8080/v1");
        assert_eq!(p.id(), "openai");
    }

    #[test]
    fn test_from_config_without_key() {
        let config = CompletionConfig {
            api_key_env: "TINCTURE_TEST_NO_SUCH_KEY".into(),
            ..CompletionConfig::default()
        };
        let err = OpenAIProvider::from_config(&config).err().unwrap();
        assert!(matches!(err, TinctureError::NoApiKey { .. }));
    }
}
