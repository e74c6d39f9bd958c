//! OpenAI-compatible chat completion provider
//!
//! Talks to `{base_url}/chat/completions`. The API key is injected from
//! configuration; the client carries a bounded timeout.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use nexus::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider, TokenUsage,
};

use crate::config::RemoteConfig;

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, config: &RemoteConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::ExternalService(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DomainError::ExternalService(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            DomainError::ExternalService(format!("Failed to parse OpenAI response: {e}"))
        })?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::ExternalService("No choices returned".to_string()))?;
        let content = choice.message.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(DomainError::ExternalService(
                "Empty completion returned".to_string(),
            ));
        }

        Ok(CompletionResponse {
            content,
            model: body.model.unwrap_or_else(|| self.model.clone()),
            usage: body
                .usage
                .map(|u| TokenUsage {
                    prompt_tokens: u.prompt_tokens,
                    completion_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            finish_reason: choice.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let messages = [ChatMessage::system("voice"), ChatMessage::user("task")];
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            max_tokens: Some(100),
            temperature: Some(0.9),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "task");
        assert_eq!(json["max_tokens"], 100);
    }

    #[test]
    fn test_response_parses_without_usage() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"gm"},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert!(body.usage.is_none());
        assert_eq!(body.choices[0].message.content.as_deref(), Some("gm"));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = RemoteConfig {
            base_url: "http://localhost:11434/v1/".to_string(),
            ..RemoteConfig::default()
        };
        let provider = OpenAiProvider::new("key", &config).unwrap();
        assert_eq!(provider.base_url, "http://localhost:11434/v1");
        assert_eq!(provider.model_id(), "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_external_error() {
        let config = RemoteConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout_secs: 2,
            ..RemoteConfig::default()
        };
        let provider = OpenAiProvider::new("key", &config).unwrap();
        let result = provider
            .complete(&[ChatMessage::user("hi")], &CompletionOptions::default())
            .await;
        assert!(matches!(result, Err(DomainError::ExternalService(_))));
    }
}
