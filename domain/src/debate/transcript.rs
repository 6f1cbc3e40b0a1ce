//! Per-topic transcripts and outcomes

use super::agenda::TalkingPoint;
use super::role::AgentRole;
use serde::{Deserialize, Serialize};

/// Round-by-round text of one talking point, as handed to the moderator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTranscript {
    text: String,
    rounds: usize,
    utterances: Vec<(AgentRole, String)>,
}

impl TopicTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open round `round` (1-based).
    pub fn begin_round(&mut self, round: usize) {
        self.rounds = self.rounds.max(round);
        self.text.push_str(&format!("\n===== Round {} =====\n", round));
    }

    pub fn record(&mut self, speaker: AgentRole, utterance: &str) {
        self.text.push_str(&format!(
            "\n\n{}:\n{}",
            speaker.display_name(),
            utterance
        ));
        self.utterances.push((speaker, utterance.to_string()));
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn utterances(&self) -> &[(AgentRole, String)] {
        &self.utterances
    }

    pub fn utterance_count(&self, speaker: AgentRole) -> usize {
        self.utterances.iter().filter(|(s, _)| *s == speaker).count()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// What one talking point produced: the moderator's verdict and the debate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOutcome {
    pub talking_point: TalkingPoint,
    /// The moderator's judged summary and winner.
    pub evaluation: String,
    pub transcript: String,
}

impl TopicOutcome {
    pub fn new(
        talking_point: TalkingPoint,
        evaluation: impl Into<String>,
        transcript: impl Into<String>,
    ) -> Self {
        Self {
            talking_point,
            evaluation: evaluation.into(),
            transcript: transcript.into(),
        }
    }

    /// Entry of the session-level summary list fed to the final synthesis.
    pub fn summary_entry(&self) -> String {
        format!(
            "Summary for {}: \n{} \n\n",
            self.talking_point, self.evaluation
        )
    }

    /// Entry of the session-level per-topic debate list.
    pub fn debate_entry(&self, topic: &str) -> String {
        format!(
            "Topic: {} \nCurrent talking point: {} \n\nDebate:\n{} \n\n",
            topic, self.talking_point, self.transcript
        )
    }
}
