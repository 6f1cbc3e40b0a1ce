//! Input and error types for the run-debate use case

use crate::agent::AgentError;
use debate_domain::{AgentRole, DebateConfig, DebatePhase, DomainError};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running a debate
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Invalid debate: {0}")]
    Domain(#[from] DomainError),

    #[error("{role} failed during {phase}: {source}")]
    Agent {
        phase: DebatePhase,
        role: AgentRole,
        #[source]
        source: AgentError,
    },

    #[error("Debate exceeded its {limit:?} deadline during {phase}")]
    DeadlineExceeded { phase: DebatePhase, limit: Duration },

    #[error("Debate cancelled during {phase}")]
    Cancelled { phase: DebatePhase },

    #[error("Debate stopped in {phase} before producing a verdict")]
    Incomplete { phase: DebatePhase },
}

impl RunDebateError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunDebateError::Cancelled { .. })
    }

    /// Whether running the debate again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RunDebateError::Agent { source, .. } => source.is_retryable(),
            RunDebateError::DeadlineExceeded { .. } => true,
            _ => false,
        }
    }

    /// The phase the debate was in, if the failure happened mid-run.
    pub fn phase(&self) -> Option<DebatePhase> {
        match self {
            RunDebateError::Agent { phase, .. }
            | RunDebateError::DeadlineExceeded { phase, .. }
            | RunDebateError::Cancelled { phase }
            | RunDebateError::Incomplete { phase } => Some(*phase),
            RunDebateError::Domain(_) => None,
        }
    }

    /// The agent whose call failed.
    pub fn role(&self) -> Option<AgentRole> {
        match self {
            RunDebateError::Agent { role, .. } => Some(*role),
            _ => None,
        }
    }
}

/// Input for the run-debate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub config: DebateConfig,
}

impl RunDebateInput {
    pub fn new(config: DebateConfig) -> Self {
        Self { config }
    }
}

impl From<DebateConfig> for RunDebateInput {
    fn from(config: DebateConfig) -> Self {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;

    #[test]
    fn test_agent_error_display() {
        let err = RunDebateError::Agent {
            phase: DebatePhase::SetAgenda,
            role: AgentRole::Moderator,
            source: AgentError::Gateway(GatewayError::Timeout),
        };
        assert_eq!(err.to_string(), "moderator failed during set_agenda: Timeout");
        assert!(err.is_retryable());
        assert_eq!(err.phase(), Some(DebatePhase::SetAgenda));
        assert_eq!(err.role(), Some(AgentRole::Moderator));
    }

    #[test]
    fn test_cancelled() {
        let err = RunDebateError::Cancelled {
            phase: DebatePhase::DebateTopic { index: 1 },
        };
        assert!(err.is_cancelled());
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Debate cancelled during debate_topic[1]");
    }

    #[test]
    fn test_domain_error_has_no_phase() {
        let err = RunDebateError::from(DomainError::InvalidDebateConfig("empty topic".into()));
        assert!(err.phase().is_none());
        assert!(!err.is_retryable());
    }
}
