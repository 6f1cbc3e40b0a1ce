//! Infrastructure layer for ai-debate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Azure OpenAI gateway, prompt token
//! counting and configuration file loading.

pub mod azure;
pub mod config;
pub mod tokenizer;

// Re-export commonly used types
pub use azure::{AzureOpenAiConfig, AzureOpenAiGateway};
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use tokenizer::{
    ChatFormatRule, ChatTokenCounter, Cl100kEncoder, ContentEncoder, EncoderLoadError,
    HeuristicEncoder,
};
