//! Application layer for ai-debate
//!
//! This crate contains the debate agents, the run-debate use case, port
//! definitions and application configuration. It depends only on the domain
//! layer.

pub mod agent;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use agent::{Agent, AgentError};
pub use config::{DebateSettings, RetryPolicy, RolePricing, SubmissionMode};
pub use ports::{
    llm_gateway::{Completion, CompletionRequest, GatewayError, LlmGateway, StreamHandle},
    progress::{DebateProgressNotifier, NoProgress},
    tokenizer::{TokenCounter, TokenizerError},
};
pub use use_cases::run_debate::{
    DebateSession, RunDebateError, RunDebateInput, RunDebateUseCase,
};
