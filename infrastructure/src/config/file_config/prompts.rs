//! Prompt overrides from TOML (`[prompts]` section)

use super::ConfigValidationError;
use debate_domain::{DebatePrompts, PromptTemplate};
use serde::{Deserialize, Serialize};

/// Optional replacement for any debate template.
///
/// # Example
///
/// ```toml
/// [prompts]
/// opponent_statement = "Your opponent said: {utterance}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilePromptsConfig {
    pub master_system: Option<String>,
    pub master_assign_first: Option<String>,
    pub master_assign_second: Option<String>,
    pub master_final: Option<String>,
    pub moderator_system: Option<String>,
    pub moderator_agenda: Option<String>,
    pub moderator_evaluation: Option<String>,
    pub debater_1_system: Option<String>,
    pub debater_1_instruction: Option<String>,
    pub debater_2_system: Option<String>,
    pub debater_2_instruction: Option<String>,
    pub own_answer: Option<String>,
    pub opponent_statement: Option<String>,
}

impl FilePromptsConfig {
    /// The default prompt set with every configured override applied.
    pub fn to_prompts(&self) -> Result<DebatePrompts, ConfigValidationError> {
        let mut prompts = DebatePrompts::default();
        for (slot, value) in [
            (&mut prompts.master_system, &self.master_system),
            (&mut prompts.master_assign_first, &self.master_assign_first),
            (&mut prompts.master_assign_second, &self.master_assign_second),
            (&mut prompts.master_final, &self.master_final),
            (&mut prompts.moderator_system, &self.moderator_system),
            (&mut prompts.moderator_agenda, &self.moderator_agenda),
            (&mut prompts.moderator_evaluation, &self.moderator_evaluation),
            (&mut prompts.debater_1_system, &self.debater_1_system),
            (&mut prompts.debater_1_instruction, &self.debater_1_instruction),
            (&mut prompts.debater_2_system, &self.debater_2_system),
            (&mut prompts.debater_2_instruction, &self.debater_2_instruction),
            (&mut prompts.own_answer, &self.own_answer),
            (&mut prompts.opponent_statement, &self.opponent_statement),
        ] {
            if let Some(source) = value {
                *slot = PromptTemplate::new(source.clone());
            }
        }

        for (name, template) in prompts.entries() {
            template
                .placeholders()
                .map_err(|e| ConfigValidationError::InvalidTemplate {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        }
        Ok(prompts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_is_default() {
        let prompts = FilePromptsConfig::default().to_prompts().unwrap();
        assert_eq!(prompts, DebatePrompts::default());
    }

    #[test]
    fn test_override_applies() {
        let config = FilePromptsConfig {
            opponent_statement: Some("Your opponent said: {utterance}".into()),
            ..Default::default()
        };
        let prompts = config.to_prompts().unwrap();
        assert_eq!(
            prompts
                .opponent_statement
                .render(&[("utterance", "tabs")])
                .unwrap(),
            "Your opponent said: tabs"
        );
        assert_eq!(prompts.own_answer, DebatePrompts::default().own_answer);
    }

    #[test]
    fn test_malformed_override_rejected() {
        let config = FilePromptsConfig {
            master_final: Some("Notes: {moderator_notes".into()),
            ..Default::default()
        };
        let err = config.to_prompts().unwrap_err();
        assert!(matches!(
            err,
            ConfigValidationError::InvalidTemplate { ref name, .. } if name == "master_final"
        ));
    }
}
