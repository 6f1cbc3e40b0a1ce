//! Content encoders - text length in tokens

use thiserror::Error;
use tiktoken_rs::CoreBPE;

/// Number of tokens a piece of text encodes to.
pub trait ContentEncoder: Send + Sync {
    fn encoded_len(&self, text: &str) -> u64;
}

#[derive(Error, Debug)]
#[error("Failed to load the {encoding} encoding: {message}")]
pub struct EncoderLoadError {
    pub encoding: &'static str,
    pub message: String,
}

/// Exact BPE encoding used by the gpt-3.5-turbo and gpt-4 families.
pub struct Cl100kEncoder {
    bpe: CoreBPE,
}

impl Cl100kEncoder {
    pub const ENCODING: &'static str = "cl100k_base";

    pub fn load() -> Result<Self, EncoderLoadError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| EncoderLoadError {
            encoding: Self::ENCODING,
            message: e.to_string(),
        })?;
        Ok(Self { bpe })
    }
}

impl std::fmt::Debug for Cl100kEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cl100kEncoder").finish_non_exhaustive()
    }
}

impl ContentEncoder for Cl100kEncoder {
    fn encoded_len(&self, text: &str) -> u64 {
        self.bpe.encode_with_special_tokens(text).len() as u64
    }
}

/// Character-based estimate: one token per `chars_per_token` characters,
/// rounded up, so any non-empty text is at least one token.
///
/// Used only when the BPE tables cannot be loaded.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicEncoder {
    chars_per_token: u64,
}

impl HeuristicEncoder {
    pub const DEFAULT_CHARS_PER_TOKEN: u64 = 4;

    pub fn new(chars_per_token: u64) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for HeuristicEncoder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHARS_PER_TOKEN)
    }
}

impl ContentEncoder for HeuristicEncoder {
    fn encoded_len(&self, text: &str) -> u64 {
        let chars = text.chars().count() as u64;
        chars.div_ceil(self.chars_per_token)
    }
}
