//! Debate value objects - immutable results of a debate session.
//!
//! - [`SideAssignments`] - the positions the master handed to each debater
//! - [`AgentUsage`] - token totals and cost of one participant
//! - [`DebateResult`] - complete result of a finished debate

use super::agenda::{Agenda, TalkingPoint};
use super::role::AgentRole;
use super::transcript::TopicOutcome;
use crate::core::model::Model;
use crate::usage::cost::CostBreakdown;
use crate::usage::record::UsageRecord;
use serde::{Deserialize, Serialize};

/// Positions each debater argues for, decided once by the master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideAssignments {
    pub debater_1: String,
    pub debater_2: String,
}

impl SideAssignments {
    pub fn for_role(&self, role: AgentRole) -> Option<&str> {
        match role {
            AgentRole::Debater1 => Some(&self.debater_1),
            AgentRole::Debater2 => Some(&self.debater_2),
            _ => None,
        }
    }
}

/// Usage and cost of one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentUsage {
    pub role: AgentRole,
    pub model: Model,
    /// Number of completion calls recorded
    pub calls: usize,
    pub totals: UsageRecord,
    pub cost: CostBreakdown,
}

/// Complete result of a debate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateResult {
    pub topic: String,
    pub n_talking_points: usize,
    pub n_rounds: usize,
    pub sides: SideAssignments,
    /// The moderator's agenda answer, verbatim
    pub agenda_raw: String,
    pub agenda: Vec<TalkingPoint>,
    /// One outcome per talking point, in agenda order
    pub topics: Vec<TopicOutcome>,
    /// The master's final synthesis and champion
    pub final_verdict: String,
    pub agents: Vec<AgentUsage>,
    pub totals: UsageRecord,
    pub cost: CostBreakdown,
}

impl DebateResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topic: impl Into<String>,
        n_talking_points: usize,
        n_rounds: usize,
        sides: SideAssignments,
        agenda: &Agenda,
        topics: Vec<TopicOutcome>,
        final_verdict: impl Into<String>,
        agents: Vec<AgentUsage>,
    ) -> Self {
        let totals = agents.iter().map(|a| a.totals).sum();
        let cost = agents.iter().map(|a| a.cost).sum();
        Self {
            topic: topic.into(),
            n_talking_points,
            n_rounds,
            sides,
            agenda_raw: agenda.raw().to_string(),
            agenda: agenda.points().to_vec(),
            topics,
            final_verdict: final_verdict.into(),
            agents,
            totals,
            cost,
        }
    }

    /// Per-topic judged summaries, in topic order.
    pub fn summaries(&self) -> Vec<String> {
        self.topics.iter().map(TopicOutcome::summary_entry).collect()
    }

    /// Per-topic debate transcripts, in topic order.
    pub fn debates_for_each_talking_point(&self) -> Vec<String> {
        self.topics
            .iter()
            .map(|t| t.debate_entry(&self.topic))
            .collect()
    }

    pub fn usage_for(&self, role: AgentRole) -> Option<&AgentUsage> {
        self.agents.iter().find(|a| a.role == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::cost::CostRates;

    fn usage(role: AgentRole, prompt: u64, completion: u64) -> AgentUsage {
        let totals = UsageRecord::new(prompt, completion);
        AgentUsage {
            role,
            model: Model::default(),
            calls: 1,
            totals,
            cost: CostRates::new(1.0, 1.0).cost_of(&totals),
        }
    }

    #[test]
    fn test_result_aggregates_agents() {
        let agenda = Agenda::parse("A; B", ";");
        let result = DebateResult::new(
            "X vs Y",
            2,
            1,
            SideAssignments {
                debater_1: "X".to_string(),
                debater_2: "Y".to_string(),
            },
            &agenda,
            vec![
                TopicOutcome::new(TalkingPoint::new("A"), "eval a", "t a"),
                TopicOutcome::new(TalkingPoint::new("B"), "eval b", "t b"),
            ],
            "Y wins",
            vec![
                usage(AgentRole::Master, 10, 1),
                usage(AgentRole::Moderator, 20, 2),
                usage(AgentRole::Debater1, 30, 3),
                usage(AgentRole::Debater2, 40, 4),
            ],
        );

        assert_eq!(result.totals, UsageRecord::new(100, 10));
        assert_eq!(result.cost.total_cost, 110.0);
        assert_eq!(result.summaries().len(), 2);
        assert_eq!(result.debates_for_each_talking_point().len(), 2);
        assert_eq!(result.usage_for(AgentRole::Debater2).unwrap().totals.prompt_tokens, 40);
        assert_eq!(result.agenda_raw, "A; B");
    }

    #[test]
    fn test_side_for_role() {
        let sides = SideAssignments {
            debater_1: "pro".to_string(),
            debater_2: "con".to_string(),
        };
        assert_eq!(sides.for_role(AgentRole::Debater1), Some("pro"));
        assert_eq!(sides.for_role(AgentRole::Master), None);
    }
}
