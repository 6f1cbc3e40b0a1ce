//! Chat-format token counting
//!
//! A chat request costs a fixed overhead per message on top of the encoded
//! role, content and name, plus a few tokens priming the reply. The overhead
//! depends on the model family.

use super::encoder::{Cl100kEncoder, ContentEncoder, HeuristicEncoder};
use debate_application::ports::tokenizer::{TokenCounter, TokenizerError};
use debate_domain::{Message, Model};
use std::sync::Arc;
use tracing::warn;

/// Every reply is primed with `<|start|>assistant<|message|>`.
const REPLY_PRIMING_TOKENS: i64 = 3;

/// Per-message overhead of a model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatFormatRule {
    pub tokens_per_message: i64,
    pub tokens_per_name: i64,
}

impl ChatFormatRule {
    /// `gpt-3.5-turbo-0613` and later snapshots, and all of `gpt-4`.
    pub const CURRENT: ChatFormatRule = ChatFormatRule {
        tokens_per_message: 3,
        tokens_per_name: 1,
    };

    /// `gpt-3.5-turbo-0301`: `<|start|>{role/name}\n{content}<|end|>\n`, and a
    /// name replaces the role.
    pub const LEGACY: ChatFormatRule = ChatFormatRule {
        tokens_per_message: 4,
        tokens_per_name: -1,
    };

    pub fn for_model(model: &Model) -> Result<Self, TokenizerError> {
        match model {
            Model::Gpt35Turbo0613
            | Model::Gpt35Turbo16k0613
            | Model::Gpt40314
            | Model::Gpt432k0314
            | Model::Gpt40613
            | Model::Gpt432k0613
            | Model::Gpt4Turbo => Ok(Self::CURRENT),
            Model::Gpt35Turbo0301 => Ok(Self::LEGACY),
            other if other.is_gpt35() => {
                warn!(
                    model = %other,
                    "gpt-3.5-turbo may update over time; counting tokens as gpt-3.5-turbo-0613"
                );
                Ok(Self::CURRENT)
            }
            other if other.is_gpt4() => {
                warn!(
                    model = %other,
                    "gpt-4 may update over time; counting tokens as gpt-4-0613"
                );
                Ok(Self::CURRENT)
            }
            other => Err(TokenizerError::UnsupportedModel(other.to_string())),
        }
    }
}

/// [`TokenCounter`] following the chat-format rules of each model family.
#[derive(Clone)]
pub struct ChatTokenCounter {
    encoder: Arc<dyn ContentEncoder>,
}

impl ChatTokenCounter {
    pub fn new(encoder: Arc<dyn ContentEncoder>) -> Self {
        Self { encoder }
    }

    /// Character-based estimate, for when exact counts are not needed.
    pub fn heuristic() -> Self {
        Self::new(Arc::new(HeuristicEncoder::default()))
    }
}

/// Counts with `cl100k_base`, or the character estimate if its tables fail to load.
impl Default for ChatTokenCounter {
    fn default() -> Self {
        match Cl100kEncoder::load() {
            Ok(encoder) => Self::new(Arc::new(encoder)),
            Err(e) => {
                warn!(error = %e, "Falling back to estimated token counts");
                Self::heuristic()
            }
        }
    }
}

impl TokenCounter for ChatTokenCounter {
    fn count_messages(&self, model: &Model, messages: &[Message]) -> Result<u64, TokenizerError> {
        let rule = ChatFormatRule::for_model(model)?;
        let mut total = REPLY_PRIMING_TOKENS;
        for message in messages {
            total += rule.tokens_per_message;
            total += self.encoder.encoded_len(message.role.as_str()) as i64;
            total += self.encoder.encoded_len(&message.content) as i64;
            if let Some(name) = &message.name {
                total += self.encoder.encoded_len(name) as i64;
                total += rule.tokens_per_name;
            }
        }
        Ok(total.max(0) as u64)
    }
}
