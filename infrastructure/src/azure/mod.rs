//! Azure OpenAI adapter
//!
//! Implements [`LlmGateway`](debate_application::LlmGateway) over the
//! chat-completions REST endpoint, in blocking mode and as server-sent
//! events.

mod error;
mod gateway;
mod protocol;
mod stream;

pub use gateway::{AzureOpenAiConfig, AzureOpenAiGateway};
