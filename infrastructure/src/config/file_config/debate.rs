//! Debate configuration from TOML (`[debate]` section)

use super::ConfigValidationError;
use debate_domain::{DEFAULT_AGENDA_DELIMITER, DebateConfig, Model};
use serde::{Deserialize, Serialize};

/// Raw debate configuration from TOML
///
/// # Example
///
/// ```toml
/// [debate]
/// model = "gpt-4-turbo"
/// n_talking_points = 3
/// n_rounds = 2
/// agenda_delimiter = ";"
/// temperature = 0.0
/// streaming = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    pub model: Model,
    pub n_talking_points: usize,
    pub n_rounds: usize,
    pub agenda_delimiter: String,
    pub temperature: f32,
    /// Reveal answers incrementally (usage counted locally)
    pub streaming: bool,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            n_talking_points: DebateConfig::DEFAULT_TALKING_POINTS,
            n_rounds: DebateConfig::DEFAULT_ROUNDS,
            agenda_delimiter: DEFAULT_AGENDA_DELIMITER.to_string(),
            temperature: 0.0,
            streaming: true,
        }
    }
}

impl FileDebateConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.n_talking_points == 0 {
            return Err(ConfigValidationError::ZeroCount {
                field: "debate.n_talking_points",
            });
        }
        if self.n_rounds == 0 {
            return Err(ConfigValidationError::ZeroCount {
                field: "debate.n_rounds",
            });
        }
        if self.agenda_delimiter.is_empty() {
            return Err(ConfigValidationError::EmptyDelimiter);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(self.temperature));
        }
        Ok(())
    }

    pub fn to_debate_config(&self, topic: impl Into<String>) -> DebateConfig {
        DebateConfig::new(topic)
            .with_talking_points(self.n_talking_points)
            .with_rounds(self.n_rounds)
            .with_agenda_delimiter(self.agenda_delimiter.clone())
    }
}
