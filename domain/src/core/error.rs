//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Every variant except [`DomainError::Cancelled`] is a caller-misuse or
/// configuration error: retrying the same operation cannot succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("System prompt must be the first message (memory already holds {existing} messages)")]
    SystemPromptNotFirst { existing: usize },

    #[error("Cannot append a {role} message; use set_system for the system prompt")]
    InvalidAppendRole { role: String },

    #[error("Cannot truncate to {requested} messages: the system prompt must be retained")]
    TruncateBelowSystemPrompt { requested: usize },

    #[error("Memory budget of {limit} messages exceeded for {owner}")]
    MemoryBudgetExceeded { owner: String, limit: usize },

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidPhaseTransition { from: String, to: String },

    #[error("Agenda can only be fixed once, during set_agenda (phase: {phase})")]
    AgendaNotAccepted { phase: String },

    #[error("Invalid debate configuration: {0}")]
    InvalidDebateConfig(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }

    /// Check if this error is a caller-misuse error (programming error)
    pub fn is_caller_misuse(&self) -> bool {
        !self.is_cancelled()
    }
}
