//! Chat-completions wire types

use debate_application::ports::llm_gateway::{Completion, GatewayError};
use debate_domain::{Message, UsageRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub messages: &'a [Message],
    pub temperature: f32,
    pub stream: bool,
}

/// Blocking response body
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ResponseChoice>,
    pub usage: Option<ResponseUsage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseChoice {
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResponseUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl ChatResponse {
    /// Text of the first choice plus the reported usage.
    pub fn into_completion(self) -> Result<Completion, GatewayError> {
        let usage = self
            .usage
            .ok_or_else(|| GatewayError::Protocol("response carries no usage".to_string()))?;
        let usage =
            UsageRecord::checked(usage.prompt_tokens, usage.completion_tokens, usage.total_tokens)
                .ok_or_else(|| {
                    GatewayError::Protocol(format!(
                        "inconsistent usage: {} + {} != {}",
                        usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
                    ))
                })?;
        let text = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Protocol("response has no choices".to_string()))?
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| GatewayError::Protocol("first choice has no message content".to_string()))?;
        Ok(Completion { text, usage })
    }
}

/// One server-sent chunk of a streaming response
#[derive(Debug, Deserialize)]
pub struct StreamChunk {
    pub choices: Option<Vec<StreamChoice>>,
    /// Azure content-filter preamble, sent before any choice
    pub prompt_filter_results: Option<Value>,
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    pub delta: Option<StreamDelta>,
}

#[derive(Debug, Deserialize)]
pub struct StreamDelta {
    pub content: Option<String>,
}

/// What a single `data:` line means for the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    Fragment(String),
    /// Role-only deltas, empty deltas and preambles
    Skip,
    Done,
}

pub const DONE_MARKER: &str = "[DONE]";

/// Interpret the payload of one server-sent event.
pub fn parse_chunk(data: &str) -> Result<ChunkOutcome, GatewayError> {
    if data.trim() == DONE_MARKER {
        return Ok(ChunkOutcome::Done);
    }

    let chunk: StreamChunk = serde_json::from_str(data)
        .map_err(|e| GatewayError::Protocol(format!("malformed stream chunk: {}: {}", e, data)))?;

    if let Some(error) = chunk.error {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(GatewayError::Protocol(format!("stream error: {}", message)));
    }

    let first = chunk.choices.and_then(|choices| choices.into_iter().next());
    let Some(choice) = first else {
        if chunk.prompt_filter_results.is_some() {
            return Ok(ChunkOutcome::Skip);
        }
        return Err(GatewayError::Protocol(format!(
            "stream chunk has no choices: {}",
            data
        )));
    };

    let delta = choice
        .delta
        .ok_or_else(|| GatewayError::Protocol(format!("stream choice has no delta: {}", data)))?;

    match delta.content {
        Some(content) if !content.is_empty() => Ok(ChunkOutcome::Fragment(content)),
        _ => Ok(ChunkOutcome::Skip),
    }
}
