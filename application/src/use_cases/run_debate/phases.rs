//! The four debate phases.
//!
//! Every phase appends an answer to memory only after the call returned it,
//! so an aborted phase leaves each memory exactly as the last successful
//! call found it.

use super::RunDebateUseCase;
use super::session::DebateSession;
use super::types::RunDebateError;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::DebateProgressNotifier;
use debate_domain::{
    Agenda, AgentRole, DebatePhase, Role, SideAssignments, TalkingPoint, TopicOutcome,
    TopicTranscript,
};
use tracing::{debug, info};

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    /// The master describes each debater's side, debater #1 first.
    pub(super) async fn assign_sides(
        &self,
        session: &mut DebateSession,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(), RunDebateError> {
        let phase = self.begin_phase(session, DebatePhase::AssignSides, progress)?;

        let first = self
            .prompts
            .master_assign_first
            .render(&[("topic", session.config.topic.as_str())])?;
        session.append(AgentRole::Master, Role::User, first)?;
        let debater_1 = self.ask(session, AgentRole::Master, progress).await?;
        session.append(AgentRole::Master, Role::Assistant, debater_1.clone())?;

        let second = self.prompts.master_assign_second.render(&[])?;
        session.append(AgentRole::Master, Role::User, second)?;
        let debater_2 = self.ask(session, AgentRole::Master, progress).await?;
        session.append(AgentRole::Master, Role::Assistant, debater_2.clone())?;

        session.sides = Some(SideAssignments {
            debater_1,
            debater_2,
        });
        progress.on_phase_complete(&phase);
        Ok(())
    }

    /// The moderator proposes the talking points; its answer is parsed into
    /// the agenda and stays in its memory for every later evaluation.
    pub(super) async fn set_agenda(
        &self,
        session: &mut DebateSession,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(), RunDebateError> {
        let phase = self.begin_phase(session, DebatePhase::SetAgenda, progress)?;
        let sides = self.sides_of(session)?;
        let config = session.config.clone();

        let request = self.prompts.moderator_agenda.render(&[
            ("topic", config.topic.as_str()),
            ("debater_1_side", sides.debater_1.as_str()),
            ("debater_2_side", sides.debater_2.as_str()),
            ("n_talking_points", config.n_talking_points.to_string().as_str()),
            ("n_rounds", config.n_rounds.to_string().as_str()),
            ("delimiter", config.agenda_delimiter.as_str()),
        ])?;
        session.append(AgentRole::Moderator, Role::User, request)?;
        let raw = self.ask(session, AgentRole::Moderator, progress).await?;
        session.append(AgentRole::Moderator, Role::Assistant, raw.clone())?;

        let agenda = Agenda::parse_expecting(raw, &config.agenda_delimiter, config.n_talking_points);
        info!(talking_points = agenda.len(), "Agenda set");
        session.tracker.fix_agenda(agenda.len())?;
        session.agenda = Some(agenda);
        progress.on_phase_complete(&phase);
        Ok(())
    }

    /// Debaters alternate for the configured rounds, then the moderator
    /// judges the transcript. Debater memories are reset before judging and
    /// the moderator's afterwards.
    pub(super) async fn debate_topic(
        &self,
        session: &mut DebateSession,
        index: usize,
        total: usize,
        point: &TalkingPoint,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(), RunDebateError> {
        let phase = self.begin_phase(session, DebatePhase::DebateTopic { index }, progress)?;
        progress.on_talking_point_start(index, total, point);
        let sides = self.sides_of(session)?;
        let topic = session.config.topic.clone();
        let n_rounds = session.config.n_rounds;
        let rounds = n_rounds.to_string();

        for (role, template, side) in [
            (
                AgentRole::Debater1,
                &self.prompts.debater_1_instruction,
                &sides.debater_1,
            ),
            (
                AgentRole::Debater2,
                &self.prompts.debater_2_instruction,
                &sides.debater_2,
            ),
        ] {
            let instruction = template.render(&[
                ("topic", topic.as_str()),
                ("side", side.as_str()),
                ("talking_point", point.as_str()),
                ("n_rounds", rounds.as_str()),
            ])?;
            session.append(role, Role::User, instruction)?;
        }

        let mut transcript = TopicTranscript::new();
        for round in 1..=n_rounds {
            debug!(talking_point = %point, round, "Round started");
            progress.on_round_start(round, n_rounds);
            transcript.begin_round(round);

            for speaker in [AgentRole::Debater1, AgentRole::Debater2] {
                let utterance = self.ask(session, speaker, progress).await?;
                transcript.record(speaker, &utterance);
                self.relay(session, speaker, &utterance)?;
            }
        }

        let retention = self.settings.retention;
        for role in [AgentRole::Debater1, AgentRole::Debater2] {
            if let Some(keep) = retention.prefix_for(role) {
                session.truncate(role, keep)?;
            }
        }

        let request = self.prompts.moderator_evaluation.render(&[
            ("talking_point", point.as_str()),
            ("transcript", transcript.as_str()),
        ])?;
        session.append(AgentRole::Moderator, Role::User, request)?;
        let evaluation = self.ask(session, AgentRole::Moderator, progress).await?;
        session.append(AgentRole::Moderator, Role::Assistant, evaluation.clone())?;
        if let Some(keep) = retention.prefix_for(AgentRole::Moderator) {
            session.truncate(AgentRole::Moderator, keep)?;
        }

        session
            .outcomes
            .push(TopicOutcome::new(point.clone(), evaluation, transcript.into_text()));
        progress.on_phase_complete(&phase);
        Ok(())
    }

    /// The master reads the agenda and every judged summary and names the
    /// champion.
    pub(super) async fn final_synthesis(
        &self,
        session: &mut DebateSession,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(), RunDebateError> {
        let phase = self.begin_phase(session, DebatePhase::FinalSynthesis, progress)?;

        let talking_points = session
            .agenda
            .as_ref()
            .map(|a| a.raw().to_string())
            .unwrap_or_default();
        let moderator_notes = session.summaries().join("\n");
        let request = self.prompts.master_final.render(&[
            ("talking_points", talking_points.as_str()),
            ("moderator_notes", moderator_notes.as_str()),
        ])?;
        session.append(AgentRole::Master, Role::User, request)?;
        let verdict = self.ask(session, AgentRole::Master, progress).await?;
        session.append(AgentRole::Master, Role::Assistant, verdict.clone())?;

        session.final_verdict = Some(verdict);
        progress.on_phase_complete(&phase);
        session.tracker.advance(DebatePhase::Done)?;
        Ok(())
    }

    /// The speaker keeps its own words; the opponent hears them framed as
    /// the other side's statement.
    fn relay(
        &self,
        session: &mut DebateSession,
        speaker: AgentRole,
        utterance: &str,
    ) -> Result<(), RunDebateError> {
        let own = self.prompts.own_answer.render(&[("utterance", utterance)])?;
        session.append(speaker, Role::Assistant, own)?;
        if let Some(opponent) = speaker.opponent() {
            let relayed = self
                .prompts
                .opponent_statement
                .render(&[("utterance", utterance)])?;
            session.append(opponent, Role::User, relayed)?;
        }
        Ok(())
    }

    fn sides_of(&self, session: &DebateSession) -> Result<SideAssignments, RunDebateError> {
        session
            .sides
            .clone()
            .ok_or(RunDebateError::Incomplete {
                phase: session.phase(),
            })
    }
}
