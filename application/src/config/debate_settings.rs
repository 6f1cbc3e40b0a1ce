//! Debate settings - how a debate is executed.
//!
//! [`DebateSettings`] groups the parameters that control agent construction
//! and the orchestration loop in
//! [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase).
//! What is debated lives in [`DebateConfig`](debate_domain::DebateConfig).

use debate_domain::{AgentRole, CostRates, MemoryBudget, MemoryRetention, Model};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// How an agent submits its conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    /// Wait for the whole reply; usage is reported by the provider.
    Blocking,
    /// Reveal the reply incrementally; usage is counted locally.
    #[default]
    Streaming,
}

impl SubmissionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionMode::Blocking => "blocking",
            SubmissionMode::Streaming => "streaming",
        }
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self, SubmissionMode::Streaming)
    }
}

impl std::fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resubmission of a failed call.
///
/// Only retryable gateway faults are resubmitted. Memory is never touched
/// by a failed call, so a retry sends the identical conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first. `1` disables retries.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each further attempt.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Delay after the failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff.saturating_mul(1u32 << exponent)
    }

    pub fn allows_another(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Cost rates per role, falling back to a shared default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolePricing {
    pub default: CostRates,
    pub overrides: HashMap<AgentRole, CostRates>,
}

impl RolePricing {
    pub fn uniform(rates: CostRates) -> Self {
        Self {
            default: rates,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, role: AgentRole, rates: CostRates) -> Self {
        self.overrides.insert(role, rates);
        self
    }

    pub fn rates_for(&self, role: AgentRole) -> CostRates {
        self.overrides.get(&role).copied().unwrap_or(self.default)
    }
}

/// Execution parameters of a debate.
#[derive(Debug, Clone)]
pub struct DebateSettings {
    pub model: Model,
    pub temperature: f32,
    pub mode: SubmissionMode,
    pub pricing: RolePricing,
    pub retention: MemoryRetention,
    /// Applied to every agent's memory
    pub memory_budget: MemoryBudget,
    /// Refuse to submit prompts above this many tokens
    pub max_prompt_tokens: Option<u64>,
    /// Deadline for a single completion call
    pub call_timeout: Option<Duration>,
    /// Deadline for the whole debate
    pub session_timeout: Option<Duration>,
    pub retry: RetryPolicy,
}

impl Default for DebateSettings {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: 0.0,
            mode: SubmissionMode::default(),
            pricing: RolePricing::default(),
            retention: MemoryRetention::default(),
            memory_budget: MemoryBudget::unbounded(),
            max_prompt_tokens: None,
            call_timeout: None,
            session_timeout: None,
            retry: RetryPolicy::none(),
        }
    }
}

impl DebateSettings {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_mode(mut self, mode: SubmissionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_pricing(mut self, pricing: RolePricing) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_retention(mut self, retention: MemoryRetention) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_memory_budget(mut self, budget: MemoryBudget) -> Self {
        self.memory_budget = budget;
        self
    }

    pub fn with_max_prompt_tokens(mut self, limit: Option<u64>) -> Self {
        self.max_prompt_tokens = limit;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_session_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.session_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let settings = DebateSettings::default();
        assert_eq!(settings.model, Model::Gpt4Turbo);
        assert_eq!(settings.temperature, 0.0);
        assert_eq!(settings.mode, SubmissionMode::Streaming);
        assert_eq!(settings.retry.max_attempts, 1);
        assert!(settings.call_timeout.is_none());
        assert!(settings.session_timeout.is_none());
        assert_eq!(settings.retention.debater_prefix, 1);
        assert_eq!(settings.retention.moderator_prefix, 3);
    }

    #[test]
    fn test_builder() {
        let settings = DebateSettings::default()
            .with_model(Model::Gpt4)
            .with_temperature(0.7)
            .with_mode(SubmissionMode::Blocking)
            .with_call_timeout(Some(Duration::from_secs(30)));

        assert_eq!(settings.model, Model::Gpt4);
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.mode, SubmissionMode::Blocking);
        assert_eq!(settings.call_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_retry_backoff_doubles() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert!(policy.allows_another(3));
        assert!(!policy.allows_another(4));
    }

    #[test]
    fn test_retry_none_allows_single_attempt() {
        let policy = RetryPolicy::none();
        assert!(!policy.allows_another(1));
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[test]
    fn test_role_pricing_override() {
        let pricing = RolePricing::uniform(CostRates::per_thousand(0.01, 0.03))
            .with_override(AgentRole::Master, CostRates::per_thousand(0.03, 0.06));

        assert_eq!(
            pricing.rates_for(AgentRole::Master),
            CostRates::per_thousand(0.03, 0.06)
        );
        assert_eq!(
            pricing.rates_for(AgentRole::Debater1),
            CostRates::per_thousand(0.01, 0.03)
        );
    }

    #[test]
    fn test_submission_mode_serde() {
        let mode: SubmissionMode = serde_json::from_str("\"blocking\"").unwrap();
        assert_eq!(mode, SubmissionMode::Blocking);
        assert_eq!(mode.to_string(), "blocking");
    }
}
