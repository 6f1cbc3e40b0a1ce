//! Prompt domain
//!
//! Parameterized text templates for every instruction the debate sends.

mod debate;
mod template;

pub use debate::DebatePrompts;
pub use template::PromptTemplate;
