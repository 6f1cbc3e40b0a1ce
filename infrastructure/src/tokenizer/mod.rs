//! Prompt token counting for streaming completions

mod counter;
mod encoder;

pub use counter::{ChatFormatRule, ChatTokenCounter};
pub use encoder::{Cl100kEncoder, ContentEncoder, EncoderLoadError, HeuristicEncoder};
