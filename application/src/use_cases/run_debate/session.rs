//! Debate session aggregate
//!
//! A [`DebateSession`] owns the four agents and everything a debate has
//! produced so far. It stays queryable after a failed run, so partial
//! usage and cost are never lost.

use super::types::RunDebateError;
use crate::agent::{Agent, AgentError};
use debate_domain::{
    Agenda, AgentRole, AgentUsage, CostBreakdown, DebateConfig, DebatePhase, DebatePhaseTracker,
    DebateResult, Role, SideAssignments, TopicOutcome, UsageRecord,
};
use std::time::Duration;
use tokio::time::Instant;

/// State of one debate, from side assignment to the final verdict.
#[derive(Debug)]
pub struct DebateSession {
    pub(super) config: DebateConfig,
    pub(super) master: Agent,
    pub(super) moderator: Agent,
    pub(super) debater_1: Agent,
    pub(super) debater_2: Agent,
    pub(super) tracker: DebatePhaseTracker,
    pub(super) sides: Option<SideAssignments>,
    pub(super) agenda: Option<Agenda>,
    pub(super) outcomes: Vec<TopicOutcome>,
    pub(super) final_verdict: Option<String>,
    pub(super) deadline: Option<(Instant, Duration)>,
}

impl DebateSession {
    pub(super) fn new(
        config: DebateConfig,
        master: Agent,
        moderator: Agent,
        debater_1: Agent,
        debater_2: Agent,
    ) -> Self {
        Self {
            config,
            master,
            moderator,
            debater_1,
            debater_2,
            tracker: DebatePhaseTracker::new(),
            sides: None,
            agenda: None,
            outcomes: Vec::new(),
            final_verdict: None,
            deadline: None,
        }
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    pub fn phase(&self) -> DebatePhase {
        self.tracker.current()
    }

    pub fn phase_history(&self) -> &[DebatePhase] {
        self.tracker.history()
    }

    pub fn is_done(&self) -> bool {
        self.tracker.is_done()
    }

    pub fn agent(&self, role: AgentRole) -> &Agent {
        match role {
            AgentRole::Master => &self.master,
            AgentRole::Moderator => &self.moderator,
            AgentRole::Debater1 => &self.debater_1,
            AgentRole::Debater2 => &self.debater_2,
        }
    }

    pub(super) fn agent_mut(&mut self, role: AgentRole) -> &mut Agent {
        match role {
            AgentRole::Master => &mut self.master,
            AgentRole::Moderator => &mut self.moderator,
            AgentRole::Debater1 => &mut self.debater_1,
            AgentRole::Debater2 => &mut self.debater_2,
        }
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        AgentRole::ALL.iter().map(|role| self.agent(*role))
    }

    pub fn sides(&self) -> Option<&SideAssignments> {
        self.sides.as_ref()
    }

    pub fn agenda(&self) -> Option<&Agenda> {
        self.agenda.as_ref()
    }

    pub fn outcomes(&self) -> &[TopicOutcome] {
        &self.outcomes
    }

    pub fn final_verdict(&self) -> Option<&str> {
        self.final_verdict.as_deref()
    }

    /// Judged summaries gathered so far, in topic order.
    pub fn summaries(&self) -> Vec<String> {
        self.outcomes.iter().map(TopicOutcome::summary_entry).collect()
    }

    pub fn debates_for_each_talking_point(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .map(|o| o.debate_entry(&self.config.topic))
            .collect()
    }

    // ==================== Usage ====================

    /// Token totals over all four agents.
    pub fn totals(&self) -> UsageRecord {
        self.agents().map(Agent::token_usage).sum()
    }

    /// Cost over all four agents, each at its own rates.
    pub fn cost(&self) -> CostBreakdown {
        self.agents().map(Agent::cost_usage).sum()
    }

    pub fn usage_report(&self) -> Vec<AgentUsage> {
        self.agents().map(Agent::usage_summary).collect()
    }

    /// The finished debate, once the session reached `Done`.
    pub fn result(&self) -> Option<DebateResult> {
        if !self.is_done() {
            return None;
        }
        Some(DebateResult::new(
            self.config.topic.clone(),
            self.config.n_talking_points,
            self.config.n_rounds,
            self.sides.clone()?,
            self.agenda.as_ref()?,
            self.outcomes.clone(),
            self.final_verdict.clone()?,
            self.usage_report(),
        ))
    }

    // ==================== Orchestration helpers ====================

    pub(super) fn start_clock(&mut self, limit: Duration) {
        self.deadline = Some((Instant::now() + limit, limit));
    }

    pub(super) fn deadline_passed(&self) -> Option<Duration> {
        self.deadline
            .and_then(|(at, limit)| (Instant::now() >= at).then_some(limit))
    }

    pub(super) fn append(
        &mut self,
        role: AgentRole,
        kind: Role,
        text: String,
    ) -> Result<(), RunDebateError> {
        let phase = self.phase();
        self.agent_mut(role)
            .add_message(kind, text)
            .map_err(|source| agent_error(phase, role, source))
    }

    pub(super) fn truncate(&mut self, role: AgentRole, keep: usize) -> Result<(), RunDebateError> {
        let phase = self.phase();
        self.agent_mut(role)
            .truncate_to_first_n(keep)
            .map_err(|source| agent_error(phase, role, source))
    }
}

pub(super) fn agent_error(phase: DebatePhase, role: AgentRole, source: AgentError) -> RunDebateError {
    RunDebateError::Agent {
        phase,
        role,
        source,
    }
}
