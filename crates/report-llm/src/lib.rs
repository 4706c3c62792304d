pub mod api;
pub mod openai;
pub mod provider;

pub use openai::OpenAiProvider;
pub use provider::{Completion, CompletionError, CompletionProvider, Result};
