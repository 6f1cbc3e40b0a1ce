//! Limits, retry and retention configuration from TOML
//! (`[limits]`, `[retry]` and `[retention]` sections)

use super::ConfigValidationError;
use debate_application::RetryPolicy;
use debate_domain::{MemoryBudget, MemoryRetention};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw limits configuration from TOML
///
/// # Example
///
/// ```toml
/// [limits]
/// call_timeout_seconds = 180
/// session_timeout_seconds = 1800
/// max_messages_per_agent = 64
/// max_prompt_tokens = 100000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    pub call_timeout_seconds: Option<u64>,
    pub session_timeout_seconds: Option<u64>,
    pub max_messages_per_agent: Option<usize>,
    pub max_prompt_tokens: Option<u64>,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        Self {
            call_timeout_seconds: Some(180),
            session_timeout_seconds: None,
            max_messages_per_agent: None,
            max_prompt_tokens: None,
        }
    }
}

impl FileLimitsConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.call_timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "limits.call_timeout_seconds",
            });
        }
        if let Some(0) = self.session_timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "limits.session_timeout_seconds",
            });
        }
        if let Some(0) = self.max_messages_per_agent {
            return Err(ConfigValidationError::ZeroCount {
                field: "limits.max_messages_per_agent",
            });
        }
        if let Some(0) = self.max_prompt_tokens {
            return Err(ConfigValidationError::ZeroCount {
                field: "limits.max_prompt_tokens",
            });
        }
        Ok(())
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_seconds.map(Duration::from_secs)
    }

    pub fn session_timeout(&self) -> Option<Duration> {
        self.session_timeout_seconds.map(Duration::from_secs)
    }

    pub fn memory_budget(&self) -> MemoryBudget {
        match self.max_messages_per_agent {
            Some(limit) => MemoryBudget::max_messages(limit),
            None => MemoryBudget::unbounded(),
        }
    }
}

/// Raw retry configuration from TOML (`[retry]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    /// Total attempts per call; 1 disables retries
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff_ms: 500,
        }
    }
}

impl FileRetryConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_attempts == 0 {
            return Err(ConfigValidationError::ZeroCount {
                field: "retry.max_attempts",
            });
        }
        Ok(())
    }

    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.backoff_ms))
    }
}

/// Raw retention configuration from TOML (`[retention]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetentionConfig {
    /// Messages a debater keeps when a talking point closes
    pub debater_prefix: usize,
    /// Messages the moderator keeps after each evaluation
    pub moderator_prefix: usize,
}

impl Default for FileRetentionConfig {
    fn default() -> Self {
        Self {
            debater_prefix: MemoryRetention::DEBATER_PREFIX,
            moderator_prefix: MemoryRetention::MODERATOR_PREFIX,
        }
    }
}

impl FileRetentionConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.debater_prefix == 0 {
            return Err(ConfigValidationError::ZeroCount {
                field: "retention.debater_prefix",
            });
        }
        if self.moderator_prefix == 0 {
            return Err(ConfigValidationError::ZeroCount {
                field: "retention.moderator_prefix",
            });
        }
        Ok(())
    }

    pub fn to_retention(&self) -> MemoryRetention {
        MemoryRetention {
            debater_prefix: self.debater_prefix,
            moderator_prefix: self.moderator_prefix,
        }
    }
}
