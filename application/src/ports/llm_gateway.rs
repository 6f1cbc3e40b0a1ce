//! LLM Gateway port
//!
//! Defines the interface for submitting a conversation to a chat-completion
//! provider. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use debate_domain::{Message, Model, StreamEvent, UsageRecord};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Rate limiting or a temporary provider outage
    #[error("Transient provider fault: {0}")]
    Transient(String),

    /// The provider answered with something we cannot interpret
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Timeout")]
    Timeout,
}

impl GatewayError {
    /// Whether resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionError(_) | GatewayError::Transient(_) | GatewayError::Timeout
        )
    }
}

/// One submission: the full conversation plus sampling parameters.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a Model,
    pub messages: &'a [Message],
    pub temperature: f32,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: &'a Model, messages: &'a [Message], temperature: f32) -> Self {
        Self {
            model,
            messages,
            temperature,
        }
    }
}

/// A blocking completion with the provider-reported usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: UsageRecord,
}

/// Handle for receiving streaming events from a completion.
///
/// Fragments arrive as [`StreamEvent::Delta`]; the stream ends with
/// [`StreamEvent::Completed`]. A fault ends the stream with an `Err` item.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<Result<StreamEvent, GatewayError>>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<Result<StreamEvent, GatewayError>>) -> Self {
        Self { receiver }
    }

    pub async fn next(&mut self) -> Option<Result<StreamEvent, GatewayError>> {
        self.receiver.recv().await
    }
}

/// Gateway for chat completions
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Submit the conversation and wait for the whole reply.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, GatewayError>;

    /// Submit the conversation and receive the reply incrementally.
    ///
    /// Streaming responses carry no usage; callers count tokens themselves.
    async fn complete_streaming(
        &self,
        request: CompletionRequest<'_>,
    ) -> Result<StreamHandle, GatewayError>;
}
