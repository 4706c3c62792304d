use async_trait::async_trait;
use thiserror::Error;

use report_core::{ChatMessage, TokenUsage};

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("response contained no choices")]
    EmptyChoices,

    #[error("response contained no usage counters")]
    MissingUsage,
}

pub type Result<T> = std::result::Result<T, CompletionError>;

/// Text and usage counters returned by a single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

/// A chat-completion backend. One network round-trip per call, no state
/// retained between calls. Failures propagate to the caller; nothing is
/// retried at this layer.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a conversation and return at most `max_output_tokens` of
    /// generated text, together with the usage counters the service reports.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_output_tokens: u32,
    ) -> Result<Completion>;
}
