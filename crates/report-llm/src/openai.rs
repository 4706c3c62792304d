use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};

use crate::api::{ChatCompletionRequest, ChatCompletionResponse};
use crate::provider::{Completion, CompletionError, CompletionProvider, Result};
use report_core::{ChatMessage, TokenUsage};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4-turbo";

/// Non-streaming client for any OpenAI-compatible chat-completion endpoint.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_output_tokens: u32,
    ) -> Result<Completion> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: max_output_tokens,
        };

        debug!(
            "POST {}/chat/completions ({} messages, max_tokens {})",
            self.base_url,
            messages.len(),
            max_output_tokens
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(CompletionError::Auth(message));
            }
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&raw)?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyChoices)?
            .message
            .content
            .unwrap_or_default();

        let usage = parsed.usage.ok_or(CompletionError::MissingUsage)?;
        let usage = TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        };

        debug!(
            "completion received: {} chars, {} tokens total",
            text.len(),
            usage.total_tokens
        );

        Ok(Completion { text, usage })
    }
}
