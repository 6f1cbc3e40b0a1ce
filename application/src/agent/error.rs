//! Agent error types

use crate::ports::llm_gateway::GatewayError;
use crate::ports::tokenizer::TokenizerError;
use debate_domain::{AgentRole, DomainError};
use thiserror::Error;

/// Errors from a single agent operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("{role} has nothing to submit: its memory is empty")]
    EmptyMemory { role: AgentRole },

    #[error("Prompt of {role} is {tokens} tokens, over the limit of {limit}")]
    PromptBudgetExceeded {
        role: AgentRole,
        tokens: u64,
        limit: u64,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AgentError {
    /// Whether resubmitting the same conversation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AgentError::Gateway(e) if e.is_retryable())
    }

    /// Errors the provider (or the network) produced.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AgentError::Gateway(_))
    }

    pub fn is_unsupported_model(&self) -> bool {
        matches!(self, AgentError::Tokenizer(TokenizerError::UnsupportedModel(_)))
    }
}
