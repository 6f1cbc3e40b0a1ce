//! Conversation memory domain.
//!
//! - [`conversation::ConversationMemory`] - append-only, per-agent message log
//! - [`conversation::MemoryBudget`] - optional bound on memory growth

pub mod conversation;
