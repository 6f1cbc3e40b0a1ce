//! Azure OpenAI chat-completions gateway

use super::error::{from_status, from_transport};
use super::protocol::{ChatRequest, ChatResponse};
use super::stream::forward_events;
use async_trait::async_trait;
use debate_application::ports::llm_gateway::{
    Completion, CompletionRequest, GatewayError, LlmGateway, StreamHandle,
};
use debate_domain::Model;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Connection settings of an Azure OpenAI resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureOpenAiConfig {
    /// Resource name (`my-resource`) or full base URL
    pub endpoint: String,
    pub api_key: String,
    /// Deployment to call; the model id is used when unset
    pub deployment: Option<String>,
    pub api_version: String,
    pub connect_timeout: Duration,
}

impl AzureOpenAiConfig {
    pub const DEFAULT_API_VERSION: &'static str = "2023-05-15";

    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            deployment: None,
            api_version: Self::DEFAULT_API_VERSION.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = Some(deployment.into());
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim();
        if endpoint.starts_with("https://") || endpoint.starts_with("http://") {
            endpoint.trim_end_matches('/').to_string()
        } else {
            format!("https://{}.openai.azure.com", endpoint)
        }
    }

    pub fn completions_url(&self, model: &Model) -> String {
        let deployment = self.deployment.as_deref().unwrap_or(model.as_str());
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.base_url(),
            deployment,
            self.api_version
        )
    }
}

/// [`LlmGateway`] backed by the Azure OpenAI REST API
pub struct AzureOpenAiGateway {
    client: reqwest::Client,
    config: AzureOpenAiConfig,
}

impl AzureOpenAiGateway {
    pub fn new(config: AzureOpenAiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        info!(
            endpoint = %config.base_url(),
            deployment = config.deployment.as_deref().unwrap_or("<model id>"),
            api_version = %config.api_version,
            "AzureOpenAiGateway initialized"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AzureOpenAiConfig {
        &self.config
    }

    async fn post(
        &self,
        request: &CompletionRequest<'_>,
        stream: bool,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = self.config.completions_url(request.model);
        debug!(
            url = %url,
            messages = request.messages.len(),
            stream,
            "Posting chat completion"
        );

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.config.api_key)
            .json(&ChatRequest {
                messages: request.messages,
                temperature: request.temperature,
                stream,
            })
            .send()
            .await
            .map_err(from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(from_status(status, &body));
        }
        Ok(response)
    }
}

#[async_trait]
impl LlmGateway for AzureOpenAiGateway {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, GatewayError> {
        let response = self.post(&request, false).await?;
        let body: ChatResponse = response.json().await.map_err(from_transport)?;
        body.into_completion()
    }

    async fn complete_streaming(
        &self,
        request: CompletionRequest<'_>,
    ) -> Result<StreamHandle, GatewayError> {
        let response = self.post(&request, true).await?;
        let (tx, rx) = mpsc::channel(64);
        tokio::spawn(forward_events(response.bytes_stream(), tx));
        Ok(StreamHandle::new(rx))
    }
}
