//! OpenAI-Compatible Provider
//!
//! Implementation of the LlmProvider trait for any endpoint that speaks the
//! OpenAI `chat/completions` wire format (ZhipuAI GLM, OpenAI, DeepSeek).
//!
//! Request: `{model, messages:[{role,content}], temperature, max_tokens, stream:false}`
//! Response: the reply text lives in `choices[0].message.content`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig, StopReason,
    UsageStats, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};

/// OpenAI-compatible chat provider
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenAIProvider {
    /// Create a provider with an already-built HTTP client
    pub fn new(config: ProviderConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Get the chat-completions URL
    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.config.provider.default_base_url())
    }

    /// Build the request body for the API
    fn build_request_body(
        &self,
        messages: &[Message],
        system: Option<&str>,
        request_options: &LlmRequestOptions,
    ) -> serde_json::Value {
        let mut wire_messages: Vec<serde_json::Value> = Vec::with_capacity(messages.len() + 1);

        if let Some(sys) = system {
            wire_messages.push(serde_json::json!({
                "role": "system",
                "content": sys
            }));
        }

        for msg in messages {
            wire_messages.push(serde_json::json!({
                "role": msg.role.as_str(),
                "content": msg.content
            }));
        }

        serde_json::json!({
            "model": self.config.model,
            "messages": wire_messages,
            "temperature": request_options
                .temperature_override
                .unwrap_or(DEFAULT_TEMPERATURE),
            "max_tokens": request_options
                .max_tokens_override
                .unwrap_or(DEFAULT_MAX_TOKENS),
            "stream": false,
        })
    }

    /// Parse a response body. A missing `choices[0].message` is an error.
    fn parse_response(&self, response: ChatCompletionResponse) -> LlmResult<LlmResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::ParseError {
                message: "response has no choices".to_string(),
            })?;

        let message = choice.message.ok_or_else(|| LlmError::ParseError {
            message: "choices[0] has no message".to_string(),
        })?;

        let stop_reason = choice
            .finish_reason
            .as_deref()
            .map(StopReason::from)
            .unwrap_or(StopReason::EndTurn);

        let usage = response
            .usage
            .map(|u| UsageStats {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(LlmResponse {
            content: message.content,
            stop_reason,
            usage,
            model: response.model.unwrap_or_else(|| self.config.model.clone()),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let provider = self.config.provider.to_string();
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| missing_api_key_error(&provider))?;

        let body = self.build_request_body(&messages, system.as_deref(), &request_options);

        debug!(
            provider = %provider,
            model = %self.config.model,
            message_count = messages.len(),
            "sending chat completion"
        );

        let response = self
            .client
            .post(self.base_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| network_error(&e))?;

        if !status.is_success() {
            return Err(parse_http_error(status.as_u16(), &body_text, &provider));
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        self.parse_response(parsed)
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

fn network_error(err: &reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout { seconds: 0 }
    } else {
        LlmError::NetworkError {
            message: err.to_string(),
        }
    }
}

/// Chat completion response format
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<ResponseUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}
