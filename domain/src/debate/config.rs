//! Debate configuration

use super::agenda::DEFAULT_AGENDA_DELIMITER;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// What to debate and how long (Entity configuration)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Debate topic, e.g. "Tabs vs Spaces"
    pub topic: String,
    /// Number of talking points the moderator is asked for
    pub n_talking_points: usize,
    /// Rounds debated per talking point
    pub n_rounds: usize,
    /// Separator the moderator uses between talking points
    pub agenda_delimiter: String,
}

impl DebateConfig {
    pub const DEFAULT_TALKING_POINTS: usize = 2;
    pub const DEFAULT_ROUNDS: usize = 1;

    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            n_talking_points: Self::DEFAULT_TALKING_POINTS,
            n_rounds: Self::DEFAULT_ROUNDS,
            agenda_delimiter: DEFAULT_AGENDA_DELIMITER.to_string(),
        }
    }

    pub fn with_talking_points(mut self, n: usize) -> Self {
        self.n_talking_points = n;
        self
    }

    pub fn with_rounds(mut self, n: usize) -> Self {
        self.n_rounds = n;
        self
    }

    pub fn with_agenda_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.agenda_delimiter = delimiter.into();
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.topic.trim().is_empty() {
            return Err(DomainError::InvalidDebateConfig(
                "topic cannot be empty".to_string(),
            ));
        }
        if self.n_talking_points == 0 {
            return Err(DomainError::InvalidDebateConfig(
                "at least one talking point is required".to_string(),
            ));
        }
        if self.n_rounds == 0 {
            return Err(DomainError::InvalidDebateConfig(
                "at least one round per talking point is required".to_string(),
            ));
        }
        if self.agenda_delimiter.is_empty() {
            return Err(DomainError::InvalidDebateConfig(
                "agenda delimiter cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
