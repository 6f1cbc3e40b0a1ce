//! Per-agent conversation memory.
//!
//! A [`ConversationMemory`] is the ordered message log one agent submits to
//! the completion provider. Messages are appended, never edited or reordered;
//! the only way to shrink the log is one of the explicit truncation
//! operations, all of which keep the system prompt at index 0.

use crate::core::error::DomainError;
use crate::session::entities::{Message, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound on how many messages a memory may hold.
///
/// `None` means unbounded growth, which is what a debate with a small round
/// count needs. Setting a limit turns silent context overflow into an
/// explicit [`DomainError::MemoryBudgetExceeded`] at append time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBudget {
    pub max_messages: Option<usize>,
}

impl MemoryBudget {
    pub fn unbounded() -> Self {
        Self { max_messages: None }
    }

    pub fn max_messages(limit: usize) -> Self {
        Self {
            max_messages: Some(limit),
        }
    }
}

/// Ordered, append-only message log owned by a single agent.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    owner: String,
    messages: Vec<Message>,
    budget: MemoryBudget,
}

impl ConversationMemory {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            messages: Vec::new(),
            budget: MemoryBudget::unbounded(),
        }
    }

    pub fn with_budget(mut self, budget: MemoryBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn budget(&self) -> MemoryBudget {
        self.budget
    }

    /// Set the role prompt. Only valid on an empty memory.
    pub fn set_system(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        if !self.messages.is_empty() {
            return Err(DomainError::SystemPromptNotFirst {
                existing: self.messages.len(),
            });
        }
        self.push(Message::system(text))
    }

    /// Append a `user` or `assistant` message.
    pub fn append(&mut self, role: Role, text: impl Into<String>) -> Result<(), DomainError> {
        if role == Role::System {
            return Err(DomainError::InvalidAppendRole {
                role: role.to_string(),
            });
        }
        self.push(Message::new(role, text))
    }

    pub fn append_user(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        self.append(Role::User, text)
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        self.append(Role::Assistant, text)
    }

    fn push(&mut self, message: Message) -> Result<(), DomainError> {
        if let Some(limit) = self.budget.max_messages
            && self.messages.len() >= limit
        {
            return Err(DomainError::MemoryBudgetExceeded {
                owner: self.owner.clone(),
                limit,
            });
        }
        self.messages.push(message);
        Ok(())
    }

    /// Reset the memory to the system prompt only.
    ///
    /// Leaves an empty memory empty.
    pub fn truncate_to_system(&mut self) {
        let keep = if self.has_system_prompt() { 1 } else { 0 };
        self.discard_after(keep);
    }

    /// Reset the memory to its first `n` messages.
    ///
    /// A memory shorter than `n` is left unchanged. `n == 0` on a memory
    /// holding a system prompt is rejected: the role prompt is never dropped.
    pub fn truncate_to_first_n(&mut self, n: usize) -> Result<(), DomainError> {
        if n == 0 && self.has_system_prompt() {
            return Err(DomainError::TruncateBelowSystemPrompt { requested: n });
        }
        self.discard_after(n);
        Ok(())
    }

    fn discard_after(&mut self, keep: usize) {
        if self.messages.len() > keep {
            debug!(
                owner = %self.owner,
                from = self.messages.len(),
                to = keep,
                "Truncating conversation memory"
            );
            self.messages.truncate(keep);
        }
    }

    /// Full message log, in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_system_prompt(&self) -> bool {
        self.messages
            .first()
            .is_some_and(|m| m.role == Role::System)
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
