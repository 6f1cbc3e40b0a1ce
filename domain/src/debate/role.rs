//! Participant roles

use serde::{Deserialize, Serialize};

/// The four role-bound participants of a debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Assigns sides and picks the final champion.
    Master,
    /// Sets the agenda and judges each talking point.
    Moderator,
    /// Opens every talking point.
    #[serde(rename = "debater_1")]
    Debater1,
    /// Answers Debater #1.
    #[serde(rename = "debater_2")]
    Debater2,
}

impl AgentRole {
    /// All roles, in the order the session reports them.
    pub const ALL: [AgentRole; 4] = [
        AgentRole::Master,
        AgentRole::Moderator,
        AgentRole::Debater1,
        AgentRole::Debater2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Master => "master",
            AgentRole::Moderator => "moderator",
            AgentRole::Debater1 => "debater_1",
            AgentRole::Debater2 => "debater_2",
        }
    }

    /// Label used inside transcripts and console output.
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentRole::Master => "Master",
            AgentRole::Moderator => "Moderator",
            AgentRole::Debater1 => "Debater #1",
            AgentRole::Debater2 => "Debater #2",
        }
    }

    pub fn is_debater(&self) -> bool {
        matches!(self, AgentRole::Debater1 | AgentRole::Debater2)
    }

    /// The other debater, for debaters only.
    pub fn opponent(&self) -> Option<AgentRole> {
        match self {
            AgentRole::Debater1 => Some(AgentRole::Debater2),
            AgentRole::Debater2 => Some(AgentRole::Debater1),
            _ => None,
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many leading messages each role keeps when a talking point closes.
///
/// Debaters keep their role prompt only. The moderator keeps its role
/// prompt plus the agenda request and response so every evaluation still
/// sees the fixed agenda. The master is never truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRetention {
    pub debater_prefix: usize,
    pub moderator_prefix: usize,
}

impl MemoryRetention {
    pub const DEBATER_PREFIX: usize = 1;
    pub const MODERATOR_PREFIX: usize = 3;

    /// Retained prefix length for `role`, `None` when the role is never
    /// truncated.
    pub fn prefix_for(&self, role: AgentRole) -> Option<usize> {
        match role {
            AgentRole::Master => None,
            AgentRole::Moderator => Some(self.moderator_prefix),
            AgentRole::Debater1 | AgentRole::Debater2 => Some(self.debater_prefix),
        }
    }
}

impl Default for MemoryRetention {
    fn default() -> Self {
        Self {
            debater_prefix: Self::DEBATER_PREFIX,
            moderator_prefix: Self::MODERATOR_PREFIX,
        }
    }
}
