//! Domain layer for ai-debate
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Four role-bound agents take part in a structured debate:
//!
//! - **Master**: assigns opposing sides and picks the final champion
//! - **Moderator**: sets the agenda and judges every talking point
//! - **Debater #1 / #2**: argue their assigned sides, round by round
//!
//! ## Memory and usage
//!
//! Each agent owns a [`ConversationMemory`] (append-only, explicitly
//! truncated between talking points) and a [`UsageLedger`] (token usage per
//! completion call, priced with the agent's own [`CostRates`]).

pub mod config;
pub mod core;
pub mod debate;
pub mod memory;
pub mod prompt;
pub mod session;
pub mod usage;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{error::DomainError, model::Model};
pub use debate::{
    agenda::{Agenda, DEFAULT_AGENDA_DELIMITER, TalkingPoint},
    config::DebateConfig,
    phase::{DebatePhase, DebatePhaseTracker},
    role::{AgentRole, MemoryRetention},
    transcript::{TopicOutcome, TopicTranscript},
    value_objects::{AgentUsage, DebateResult, SideAssignments},
};
pub use memory::conversation::{ConversationMemory, MemoryBudget};
pub use prompt::{DebatePrompts, PromptTemplate};
pub use session::{
    entities::{Message, Role},
    stream::StreamEvent,
};
pub use usage::{
    cost::{CostBreakdown, CostRates},
    ledger::UsageLedger,
    record::UsageRecord,
};
