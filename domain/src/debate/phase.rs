//! Debate phase state machine

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of a debate session.
///
/// Phases only move forward:
/// `Init → AssignSides → SetAgenda → DebateTopic(0..k) → FinalSynthesis → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DebatePhase {
    Init,
    AssignSides,
    SetAgenda,
    /// Debating the agenda item at `index` (0-based).
    DebateTopic {
        index: usize,
    },
    FinalSynthesis,
    Done,
}

impl DebatePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebatePhase::Init => "init",
            DebatePhase::AssignSides => "assign_sides",
            DebatePhase::SetAgenda => "set_agenda",
            DebatePhase::DebateTopic { .. } => "debate_topic",
            DebatePhase::FinalSynthesis => "final_synthesis",
            DebatePhase::Done => "done",
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            DebatePhase::Init => "Init".to_string(),
            DebatePhase::AssignSides => "Side Assignment".to_string(),
            DebatePhase::SetAgenda => "Agenda Setting".to_string(),
            DebatePhase::DebateTopic { index } => format!("Talking Point #{}", index + 1),
            DebatePhase::FinalSynthesis => "Final Synthesis".to_string(),
            DebatePhase::Done => "Done".to_string(),
        }
    }

    /// Whether `next` is the legal successor of `self`.
    pub fn can_advance_to(&self, next: &DebatePhase) -> bool {
        use DebatePhase::*;
        match (self, next) {
            (Init, AssignSides) => true,
            (AssignSides, SetAgenda) => true,
            (SetAgenda, DebateTopic { index }) => *index == 0,
            (DebateTopic { index: current }, DebateTopic { index }) => *index == current + 1,
            (SetAgenda | DebateTopic { .. }, FinalSynthesis) => true,
            (FinalSynthesis, Done) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DebatePhase::DebateTopic { index } => write!(f, "debate_topic[{}]", index),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Tracks the current phase and rejects out-of-order transitions.
///
/// Topic phases need the agenda size, fixed with
/// [`fix_agenda`](Self::fix_agenda) while in `SetAgenda`: no topic index
/// past the agenda is accepted, and `FinalSynthesis` only follows the last
/// topic (or `SetAgenda` itself for an empty agenda).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebatePhaseTracker {
    current: DebatePhase,
    history: Vec<DebatePhase>,
    agenda_len: Option<usize>,
}

impl DebatePhaseTracker {
    pub fn new() -> Self {
        Self {
            current: DebatePhase::Init,
            history: vec![DebatePhase::Init],
            agenda_len: None,
        }
    }

    /// Number of agenda items, once fixed.
    pub fn agenda_len(&self) -> Option<usize> {
        self.agenda_len
    }

    /// Record the agenda size. Only valid once, during `SetAgenda`.
    pub fn fix_agenda(&mut self, len: usize) -> Result<(), DomainError> {
        if self.current != DebatePhase::SetAgenda || self.agenda_len.is_some() {
            return Err(DomainError::AgendaNotAccepted {
                phase: self.current.to_string(),
            });
        }
        self.agenda_len = Some(len);
        Ok(())
    }

    pub fn current(&self) -> DebatePhase {
        self.current
    }

    /// Every phase entered so far, in order.
    pub fn history(&self) -> &[DebatePhase] {
        &self.history
    }

    pub fn is_done(&self) -> bool {
        self.current == DebatePhase::Done
    }

    pub fn advance(&mut self, next: DebatePhase) -> Result<(), DomainError> {
        if !self.current.can_advance_to(&next) || !self.agenda_allows(&next) {
            return Err(DomainError::InvalidPhaseTransition {
                from: self.current.to_string(),
                to: next.to_string(),
            });
        }
        self.current = next;
        self.history.push(next);
        Ok(())
    }
}

impl DebatePhaseTracker {
    fn agenda_allows(&self, next: &DebatePhase) -> bool {
        match (self.current, next, self.agenda_len) {
            (_, DebatePhase::DebateTopic { index }, Some(len)) => *index < len,
            (DebatePhase::SetAgenda, DebatePhase::FinalSynthesis, Some(len)) => len == 0,
            (DebatePhase::DebateTopic { index }, DebatePhase::FinalSynthesis, Some(len)) => {
                index + 1 == len
            }
            (_, DebatePhase::DebateTopic { .. } | DebatePhase::FinalSynthesis, None) => false,
            _ => true,
        }
    }
}

impl Default for DebatePhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}
