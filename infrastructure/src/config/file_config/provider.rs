//! Provider configuration from TOML (`[provider]` section)

use super::ConfigValidationError;
use crate::azure::AzureOpenAiConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Azure OpenAI connection settings.
///
/// # Example
///
/// ```toml
/// [provider]
/// endpoint = "my-resource"            # resource name or full base URL
/// deployment = "gpt4-debate"          # defaults to the model id
/// api_key_env = "AZURE_OPENAI_API_KEY"
/// api_version = "2023-05-15"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Resource name or base URL; falls back to `endpoint_env`.
    pub endpoint: Option<String>,
    /// Environment variable holding the endpoint
    pub endpoint_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub deployment: Option<String>,
    pub api_version: String,
    pub connect_timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            endpoint_env: "AZURE_OPENAI_ENDPOINT".to_string(),
            api_key: None,
            api_key_env: "AZURE_OPENAI_API_KEY".to_string(),
            deployment: None,
            api_version: AzureOpenAiConfig::DEFAULT_API_VERSION.to_string(),
            connect_timeout_seconds: 10,
        }
    }
}

impl FileProviderConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if self
            .deployment
            .as_ref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err(ConfigValidationError::EmptyDeployment);
        }
        if self.connect_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "provider.connect_timeout_seconds",
            });
        }
        Ok(())
    }

    /// Resolve credentials, reading the environment where needed.
    pub fn to_azure_config(&self) -> Result<AzureOpenAiConfig, ConfigValidationError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<AzureOpenAiConfig, ConfigValidationError> {
        self.validate()?;

        let endpoint = non_empty(self.endpoint.clone())
            .or_else(|| non_empty(env(&self.endpoint_env)))
            .ok_or_else(|| ConfigValidationError::MissingCredential {
                what: "endpoint",
                env: self.endpoint_env.clone(),
            })?;
        let api_key = non_empty(self.api_key.clone())
            .or_else(|| non_empty(env(&self.api_key_env)))
            .ok_or_else(|| ConfigValidationError::MissingCredential {
                what: "API key",
                env: self.api_key_env.clone(),
            })?;

        let mut config = AzureOpenAiConfig::new(endpoint, api_key)
            .with_api_version(self.api_version.clone());
        config.connect_timeout = Duration::from_secs(self.connect_timeout_seconds);
        if let Some(deployment) = &self.deployment {
            config = config.with_deployment(deployment.trim());
        }
        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
