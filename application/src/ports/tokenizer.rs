//! Token counting port
//!
//! Streaming completions carry no usage, so the prompt side is counted
//! locally before submission.

use debate_domain::{Message, Model};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    #[error("Token counting is not implemented for model {0}")]
    UnsupportedModel(String),
}

/// Counts the prompt tokens of a conversation for a given model.
pub trait TokenCounter: Send + Sync {
    fn count_messages(&self, model: &Model, messages: &[Message]) -> Result<u64, TokenizerError>;
}
