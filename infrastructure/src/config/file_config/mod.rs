//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod debate;
mod limits;
mod logging;
mod output;
mod pricing;
mod prompts;
mod provider;

pub use debate::FileDebateConfig;
pub use limits::{FileLimitsConfig, FileRetentionConfig, FileRetryConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use pricing::{FilePricingConfig, FileRates};
pub use prompts::FilePromptsConfig;
pub use provider::FileProviderConfig;

use debate_application::{DebateSettings, SubmissionMode};
use debate_domain::DebatePrompts;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configuration value that cannot be used.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("{field} must be greater than zero seconds")]
    InvalidTimeout { field: &'static str },

    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },

    #[error("debate.agenda_delimiter must not be empty")]
    EmptyDelimiter,

    #[error("debate.temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("{field} must not be negative")]
    NegativeRate { field: String },

    #[error("provider.deployment must not be empty when set")]
    EmptyDeployment,

    #[error("Unknown role '{0}' in [pricing.roles]; expected master, moderator, debater_1 or debater_2")]
    UnknownRole(String),

    #[error("Invalid prompt template '{name}': {message}")]
    InvalidTemplate { name: String, message: String },

    #[error("Missing {what}: set it in [provider] or the {env} environment variable")]
    MissingCredential { what: &'static str, env: String },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Azure OpenAI connection
    pub provider: FileProviderConfig,
    /// Debate shape and model
    pub debate: FileDebateConfig,
    /// Cost rates per 1000 tokens
    pub pricing: FilePricingConfig,
    /// Timeouts and budgets
    pub limits: FileLimitsConfig,
    pub retry: FileRetryConfig,
    pub retention: FileRetentionConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Prompt template overrides
    pub prompts: FilePromptsConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate every section, stopping at the first problem.
    ///
    /// Credentials are not checked here: they may legitimately come from the
    /// environment and are resolved by [`FileProviderConfig::to_azure_config`].
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.provider.validate()?;
        self.debate.validate()?;
        self.pricing.validate()?;
        self.limits.validate()?;
        self.retry.validate()?;
        self.retention.validate()?;
        self.prompts.to_prompts()?;
        Ok(())
    }

    /// Engine settings derived from the `[debate]`, `[pricing]`, `[limits]`,
    /// `[retry]` and `[retention]` sections.
    pub fn to_settings(&self) -> Result<DebateSettings, ConfigValidationError> {
        self.validate()?;

        let mode = if self.debate.streaming {
            SubmissionMode::Streaming
        } else {
            SubmissionMode::Blocking
        };

        Ok(DebateSettings::default()
            .with_model(self.debate.model.clone())
            .with_temperature(self.debate.temperature)
            .with_mode(mode)
            .with_pricing(self.pricing.to_role_pricing()?)
            .with_retention(self.retention.to_retention())
            .with_memory_budget(self.limits.memory_budget())
            .with_max_prompt_tokens(self.limits.max_prompt_tokens)
            .with_call_timeout(self.limits.call_timeout())
            .with_session_timeout(self.limits.session_timeout())
            .with_retry(self.retry.to_policy()))
    }

    /// The prompt set with `[prompts]` overrides applied.
    pub fn prompts(&self) -> Result<DebatePrompts, ConfigValidationError> {
        self.prompts.to_prompts()
    }

    /// Render the effective configuration, credentials redacted.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let mut shown = self.clone();
        if shown.provider.api_key.is_some() {
            shown.provider.api_key = Some("<redacted>".to_string());
        }
        toml::to_string_pretty(&shown)
    }
}
