//! Run Debate use case
//!
//! Drives one debate through its phases:
//!
//! | Phase              | Speaker(s)              | Produces |
//! |--------------------|-------------------------|----------|
//! | 1. Assign sides    | master (twice)          | side of each debater |
//! | 2. Set agenda      | moderator               | talking points |
//! | 3. Debate topic    | debaters, then moderator| transcript and judged summary, per talking point |
//! | 4. Final synthesis | master                  | champion and verdict |
//!
//! Calls are strictly sequential. Every call can be bounded by a per-call
//! timeout, the whole run by a session deadline, and both by a
//! cancellation token.

mod phases;
mod session;
mod types;

pub use session::DebateSession;
pub use types::{RunDebateError, RunDebateInput};

use crate::agent::{Agent, AgentError};
use crate::config::DebateSettings;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{DebateProgressNotifier, NoProgress};
use crate::ports::tokenizer::TokenCounter;
use debate_domain::{AgentRole, DebatePhase, DebatePrompts, DebateResult, PromptTemplate};
use session::agent_error;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Use case for running a debate
pub struct RunDebateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    tokenizer: Arc<dyn TokenCounter>,
    prompts: DebatePrompts,
    settings: DebateSettings,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static> Clone for RunDebateUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            tokenizer: self.tokenizer.clone(),
            prompts: self.prompts.clone(),
            settings: self.settings.clone(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    pub fn new(gateway: Arc<G>, tokenizer: Arc<dyn TokenCounter>) -> Self {
        Self {
            gateway,
            tokenizer,
            prompts: DebatePrompts::default(),
            settings: DebateSettings::default(),
            cancellation_token: None,
        }
    }

    pub fn with_settings(mut self, settings: DebateSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_prompts(mut self, prompts: DebatePrompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn settings(&self) -> &DebateSettings {
        &self.settings
    }

    /// Run a debate end to end.
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateResult, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateResult, RunDebateError> {
        let mut session = self.prepare(input)?;
        self.run(&mut session, progress).await
    }

    /// Build the four agents with their role prompts.
    ///
    /// Use together with [`run`](Self::run) when usage must stay available
    /// after a failed debate.
    pub fn prepare(&self, input: RunDebateInput) -> Result<DebateSession, RunDebateError> {
        input.config.validate()?;

        Ok(DebateSession::new(
            input.config,
            self.build_agent(AgentRole::Master, &self.prompts.master_system)?,
            self.build_agent(AgentRole::Moderator, &self.prompts.moderator_system)?,
            self.build_agent(AgentRole::Debater1, &self.prompts.debater_1_system)?,
            self.build_agent(AgentRole::Debater2, &self.prompts.debater_2_system)?,
        ))
    }

    /// Drive a prepared session to its verdict.
    ///
    /// On failure the session keeps every agent's memory and ledger as they
    /// were when the failing call started.
    pub async fn run(
        &self,
        session: &mut DebateSession,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebateResult, RunDebateError> {
        if let Some(limit) = self.settings.session_timeout {
            session.start_clock(limit);
        }
        info!(
            topic = %session.config.topic,
            talking_points = session.config.n_talking_points,
            rounds = session.config.n_rounds,
            model = %self.settings.model,
            mode = %self.settings.mode,
            "Starting debate"
        );

        self.assign_sides(session, progress).await?;
        self.set_agenda(session, progress).await?;

        let points = session
            .agenda
            .as_ref()
            .map(|a| a.points().to_vec())
            .unwrap_or_default();
        for (index, point) in points.iter().enumerate() {
            self.debate_topic(session, index, points.len(), point, progress)
                .await?;
        }

        self.final_synthesis(session, progress).await?;

        let result = session.result().ok_or(RunDebateError::Incomplete {
            phase: session.phase(),
        })?;
        info!(
            total_tokens = result.totals.total_tokens,
            total_cost = result.cost.total_cost,
            "Debate finished"
        );
        Ok(result)
    }

    fn build_agent(
        &self,
        role: AgentRole,
        system: &PromptTemplate,
    ) -> Result<Agent, RunDebateError> {
        let gateway: Arc<dyn LlmGateway> = self.gateway.clone();
        let settings = &self.settings;
        let mut agent = Agent::new(role, gateway, self.tokenizer.clone())
            .with_model(settings.model.clone())
            .with_temperature(settings.temperature)
            .with_mode(settings.mode)
            .with_rates(settings.pricing.rates_for(role))
            .with_memory_budget(settings.memory_budget)
            .with_max_prompt_tokens(settings.max_prompt_tokens);
        agent
            .set_system_prompt(system.render(&[])?)
            .map_err(|source| agent_error(DebatePhase::Init, role, source))?;
        Ok(agent)
    }

    fn begin_phase(
        &self,
        session: &mut DebateSession,
        next: DebatePhase,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<DebatePhase, RunDebateError> {
        if self.is_cancelled() {
            return Err(RunDebateError::Cancelled { phase: next });
        }
        if let Some(limit) = session.deadline_passed() {
            return Err(RunDebateError::DeadlineExceeded { phase: next, limit });
        }
        session.tracker.advance(next)?;
        info!(phase = %next, "Phase started");
        progress.on_phase_start(&next);
        Ok(next)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// One completion for `role`, bounded by the per-call timeout, the
    /// session deadline and cancellation, resubmitted per the retry policy.
    async fn ask(
        &self,
        session: &mut DebateSession,
        role: AgentRole,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<String, RunDebateError> {
        let phase = session.phase();
        let retry = self.settings.retry;
        let call_timeout = self.settings.call_timeout;
        let deadline = session.deadline;
        let mut attempt = 1;

        loop {
            let agent = session.agent_mut(role);
            // A dropped `agent.ask` never reports its own failure.
            let call = async move {
                match call_timeout {
                    Some(limit) => match tokio::time::timeout(limit, agent.ask(progress)).await {
                        Ok(result) => result,
                        Err(_) => {
                            let e = AgentError::Gateway(GatewayError::Timeout);
                            progress.on_agent_turn_failed(role, &e.to_string());
                            Err(e)
                        }
                    },
                    None => agent.ask(progress).await,
                }
            };

            let outcome = tokio::select! {
                _ = cancelled(self.cancellation_token.as_ref()) => {
                    let e = RunDebateError::Cancelled { phase };
                    progress.on_agent_turn_failed(role, &e.to_string());
                    return Err(e);
                }
                _ = deadline_reached(deadline) => {
                    let limit = deadline.map(|(_, limit)| limit).unwrap_or_default();
                    let e = RunDebateError::DeadlineExceeded { phase, limit };
                    progress.on_agent_turn_failed(role, &e.to_string());
                    return Err(e);
                }
                result = call => result,
            };

            match outcome {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && retry.allows_another(attempt) => {
                    let delay = retry.delay_for(attempt);
                    warn!(
                        role = %role,
                        phase = %phase,
                        attempt,
                        max_attempts = retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying completion"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(source) => return Err(agent_error(phase, role, source)),
            }
        }
    }
}

async fn cancelled(token: Option<&CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

async fn deadline_reached(deadline: Option<(Instant, Duration)>) {
    match deadline {
        Some((at, _)) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RetryPolicy, SubmissionMode};
    use crate::test_support::{
        COMPLETION_TOKENS, DEBATER_1_SYSTEM, DEBATER_2_SYSTEM, FixedTokenCounter, MASTER_SYSTEM,
        MODERATOR_SYSTEM, ScriptedGateway, test_prompts,
    };
    use debate_domain::{DebateConfig, Message, MemoryBudget, Model, Role, UsageRecord};
    use std::sync::Mutex;

    fn use_case(
        gateway: ScriptedGateway,
        settings: DebateSettings,
    ) -> (RunDebateUseCase<ScriptedGateway>, Arc<ScriptedGateway>) {
        let gateway = Arc::new(gateway);
        let use_case = RunDebateUseCase::new(gateway.clone(), Arc::new(FixedTokenCounter::new()))
            .with_prompts(test_prompts())
            .with_settings(settings);
        (use_case, gateway)
    }

    fn blocking() -> DebateSettings {
        DebateSettings::default().with_mode(SubmissionMode::Blocking)
    }

    fn config(points: usize, rounds: usize) -> DebateConfig {
        DebateConfig::new("X vs Y")
            .with_talking_points(points)
            .with_rounds(rounds)
    }

    fn last_contents(requests: &[Vec<Message>]) -> Vec<String> {
        requests
            .iter()
            .map(|r| r.last().map(|m| m.content.clone()).unwrap_or_default())
            .collect()
    }

    #[derive(Default)]
    struct PhaseRecorder {
        started: Mutex<Vec<DebatePhase>>,
        completed: Mutex<Vec<DebatePhase>>,
        rounds: Mutex<Vec<usize>>,
    }

    impl DebateProgressNotifier for PhaseRecorder {
        fn on_phase_start(&self, phase: &DebatePhase) {
            self.started.lock().unwrap().push(*phase);
        }
        fn on_phase_complete(&self, phase: &DebatePhase) {
            self.completed.lock().unwrap().push(*phase);
        }
        fn on_round_start(&self, round: usize, _total: usize) {
            self.rounds.lock().unwrap().push(round);
        }
    }

    /// Counts agent turns and how they ended.
    #[derive(Default)]
    struct TurnRecorder {
        started: Mutex<usize>,
        failed: Mutex<Vec<(AgentRole, String)>>,
    }

    impl DebateProgressNotifier for TurnRecorder {
        fn on_phase_start(&self, _phase: &DebatePhase) {}
        fn on_phase_complete(&self, _phase: &DebatePhase) {}
        fn on_agent_turn_start(&self, _role: AgentRole) {
            *self.started.lock().unwrap() += 1;
        }
        fn on_agent_turn_failed(&self, role: AgentRole, error: &str) {
            self.failed.lock().unwrap().push((role, error.to_string()));
        }
    }

    #[tokio::test]
    async fn test_full_debate_two_points_one_round() {
        let (use_case, gateway) = use_case(ScriptedGateway::debate("Privacy; Cost"), blocking());
        let mut session = use_case.prepare(config(2, 1).into()).unwrap();
        let progress = PhaseRecorder::default();

        let result = use_case.run(&mut session, &progress).await.unwrap();

        assert_eq!(result.sides.debater_1, "Argue for X");
        assert_eq!(result.sides.debater_2, "Argue for Y");
        assert_eq!(result.agenda_raw, "Privacy; Cost");
        assert_eq!(result.topics.len(), 2);
        assert_eq!(result.topics[0].talking_point.as_str(), "Privacy");
        assert_eq!(result.topics[0].evaluation, "Winner for Privacy: Debater #1");
        assert_eq!(result.topics[1].evaluation, "Winner for Cost: Debater #1");
        assert_eq!(result.final_verdict, "Champion: Debater #1");

        // Exactly one synthesis call
        let finals = last_contents(&gateway.requests())
            .into_iter()
            .filter(|c| c.starts_with("FINAL"))
            .count();
        assert_eq!(finals, 1);

        // Retained memory shapes
        assert_eq!(session.agent(AgentRole::Debater1).messages().len(), 1);
        assert_eq!(session.agent(AgentRole::Debater2).messages().len(), 1);
        assert_eq!(session.agent(AgentRole::Moderator).messages().len(), 3);
        assert_eq!(session.agent(AgentRole::Master).messages().len(), 7);
        assert_eq!(
            session.agent(AgentRole::Moderator).messages()[2].content,
            "Privacy; Cost"
        );

        // 2 master + 1 agenda + 2 x (2 debater turns + 1 evaluation) + 1 synthesis
        assert_eq!(gateway.requests().len(), 10);

        let totals = session.totals();
        assert_eq!(
            totals.total_tokens,
            totals.prompt_tokens + totals.completion_tokens
        );
        assert_eq!(totals.completion_tokens, 10 * COMPLETION_TOKENS);
        assert_eq!(result.totals, totals);
        let per_agent: UsageRecord = result.agents.iter().map(|a| a.totals).sum();
        assert_eq!(per_agent, totals);
        assert!(result.cost.total_cost > 0.0);

        assert_eq!(
            session.phase_history(),
            &[
                DebatePhase::Init,
                DebatePhase::AssignSides,
                DebatePhase::SetAgenda,
                DebatePhase::DebateTopic { index: 0 },
                DebatePhase::DebateTopic { index: 1 },
                DebatePhase::FinalSynthesis,
                DebatePhase::Done,
            ]
        );
        assert_eq!(
            *progress.completed.lock().unwrap(),
            progress.started.lock().unwrap().clone()
        );
    }

    #[tokio::test]
    async fn test_synthesis_prompt_carries_agenda_and_summaries() {
        let (use_case, gateway) = use_case(ScriptedGateway::debate("Privacy; Cost"), blocking());

        use_case.execute(config(2, 1).into()).await.unwrap();

        let finals: Vec<String> = last_contents(&gateway.requests())
            .into_iter()
            .filter(|c| c.starts_with("FINAL"))
            .collect();
        assert_eq!(
            finals[0],
            "FINAL Privacy; Cost || Summary for Privacy: \nWinner for Privacy: Debater #1 \n\n\nSummary for Cost: \nWinner for Cost: Debater #1 \n\n"
        );
    }

    #[tokio::test]
    async fn test_debaters_alternate_starting_with_debater_1() {
        let (use_case, gateway) = use_case(ScriptedGateway::debate("Privacy; Cost"), blocking());
        let progress = PhaseRecorder::default();

        let result = use_case
            .execute_with_progress(config(2, 3).into(), &progress)
            .await
            .unwrap();

        let speakers: Vec<&str> = gateway
            .requests()
            .iter()
            .filter_map(|r| r.first().map(|m| m.content.clone()))
            .filter_map(|system| match system.as_str() {
                DEBATER_1_SYSTEM => Some("d1"),
                DEBATER_2_SYSTEM => Some("d2"),
                _ => None,
            })
            .collect();
        assert_eq!(speakers, ["d1", "d2"].repeat(6));

        for outcome in &result.topics {
            assert_eq!(outcome.transcript.matches("===== Round").count(), 3);
            assert!(outcome.transcript.starts_with("\n===== Round 1 =====\n\n\nDebater #1:\n"));
        }
        assert_eq!(*progress.rounds.lock().unwrap(), [1, 2, 3, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_cross_append_is_asymmetric() {
        let (use_case, gateway) = use_case(ScriptedGateway::debate("Privacy"), blocking());

        use_case.execute(config(1, 2).into()).await.unwrap();

        let d2 = gateway.requests_from(DEBATER_2_SYSTEM);
        // Round 1: instruction, then debater #1's words framed as the opponent's
        assert_eq!(d2[0].len(), 3);
        assert_eq!(d2[0][2], Message::user("OPP: d1 says #1"));

        let d1 = gateway.requests_from(DEBATER_1_SYSTEM);
        // Round 2: own answer as assistant, opponent reply as user
        assert_eq!(d1[1].len(), 4);
        assert_eq!(d1[1][1].role, Role::User);
        assert!(d1[1][1].content.starts_with("D1 X vs Y / Argue for X / Privacy / 2"));
        assert_eq!(d1[1][2], Message::assistant("d1 says #1"));
        assert_eq!(d1[1][3], Message::user("OPP: d2 says #1"));

        // Mirror on debater #2's side in round 2
        assert_eq!(d2[1].len(), 5);
        assert_eq!(d2[1][3], Message::assistant("d2 says #1"));
        assert_eq!(d2[1][4], Message::user("OPP: d1 says #2"));
    }

    #[tokio::test]
    async fn test_moderator_sees_agenda_at_every_evaluation() {
        let (use_case, gateway) = use_case(ScriptedGateway::debate("A; B; C"), blocking());

        use_case.execute(config(3, 1).into()).await.unwrap();

        let evaluations: Vec<Vec<Message>> = gateway
            .requests_from(MODERATOR_SYSTEM)
            .into_iter()
            .filter(|r| r.last().is_some_and(|m| m.content.starts_with("EVAL")))
            .collect();
        assert_eq!(evaluations.len(), 3);
        for request in &evaluations {
            assert_eq!(request.len(), 4);
            assert_eq!(request[2], Message::assistant("A; B; C"));
        }
    }

    #[tokio::test]
    async fn test_agenda_size_mismatch_uses_produced_items() {
        let (use_case, _) = use_case(ScriptedGateway::debate("A; B; C"), blocking());

        let result = use_case.execute(config(2, 1).into()).await.unwrap();

        assert_eq!(result.n_talking_points, 2);
        assert_eq!(result.topics.len(), 3);
        let points: Vec<&str> = result.topics.iter().map(|t| t.talking_point.as_str()).collect();
        assert_eq!(points, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_empty_agenda_goes_to_synthesis() {
        let (use_case, gateway) = use_case(ScriptedGateway::debate(" ; "), blocking());

        let result = use_case.execute(config(2, 1).into()).await.unwrap();

        assert!(result.topics.is_empty());
        assert!(gateway.requests_from(DEBATER_1_SYSTEM).is_empty());
        assert_eq!(result.final_verdict, "Champion: Debater #1");
    }

    #[tokio::test]
    async fn test_streaming_mode_counts_fragments() {
        let settings = DebateSettings::default().with_mode(SubmissionMode::Streaming);
        let (use_case, _) = use_case(ScriptedGateway::debate("Privacy"), settings);
        let mut session = use_case.prepare(config(1, 1).into()).unwrap();

        let result = use_case.run(&mut session, &NoProgress).await.unwrap();

        // "Argue for X" streams as three fragments
        let master = result.usage_for(AgentRole::Master).unwrap();
        assert_eq!(master.calls, 3);
        let first_call = session.agent(AgentRole::Master).ledger().records()[0];
        assert_eq!(first_call.completion_tokens, 3);
        assert_eq!(first_call.prompt_tokens, 20);
        assert_eq!(
            result.totals.total_tokens,
            result.totals.prompt_tokens + result.totals.completion_tokens
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_partial_usage_and_memory() {
        let gateway =
            ScriptedGateway::debate("Privacy").fail_once("AGENDA", GatewayError::Transient("429".into()));
        let (use_case, _) = use_case(gateway, blocking());
        let mut session = use_case.prepare(config(1, 1).into()).unwrap();

        let err = use_case.run(&mut session, &NoProgress).await.unwrap_err();

        assert_eq!(err.phase(), Some(DebatePhase::SetAgenda));
        assert_eq!(err.role(), Some(AgentRole::Moderator));
        assert!(err.is_retryable());
        assert_eq!(session.agent(AgentRole::Master).ledger().len(), 2);
        assert_eq!(session.totals(), session.agent(AgentRole::Master).token_usage());
        assert_eq!(session.agent(AgentRole::Moderator).messages().len(), 2);
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_retry_resubmits_identical_conversation() {
        let gateway =
            ScriptedGateway::debate("Privacy").fail_once("AGENDA", GatewayError::Timeout);
        let settings = blocking().with_retry(RetryPolicy::new(2, Duration::from_millis(1)));
        let (use_case, gateway) = use_case(gateway, settings);
        let mut session = use_case.prepare(config(1, 1).into()).unwrap();

        use_case.run(&mut session, &NoProgress).await.unwrap();

        let agenda_requests: Vec<Vec<Message>> = gateway
            .requests_from(MODERATOR_SYSTEM)
            .into_iter()
            .filter(|r| r.last().is_some_and(|m| m.content.starts_with("AGENDA")))
            .collect();
        assert_eq!(agenda_requests.len(), 2);
        assert_eq!(agenda_requests[0], agenda_requests[1]);
        assert_eq!(session.agent(AgentRole::Moderator).messages().len(), 3);
    }

    #[tokio::test]
    async fn test_protocol_error_is_not_retried() {
        let gateway = ScriptedGateway::debate("Privacy")
            .fail_once("ASSIGN1", GatewayError::Protocol("bad json".into()));
        let settings = blocking().with_retry(RetryPolicy::new(3, Duration::ZERO));
        let (use_case, gateway) = use_case(gateway, settings);

        let err = use_case.execute(config(1, 1).into()).await.unwrap_err();

        assert!(matches!(
            err,
            RunDebateError::Agent {
                source: AgentError::Gateway(GatewayError::Protocol(_)),
                ..
            }
        ));
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_call_timeout() {
        let gateway = ScriptedGateway::debate("Privacy").with_delay(Duration::from_millis(500));
        let settings = blocking().with_call_timeout(Some(Duration::from_millis(20)));
        let (use_case, _) = use_case(gateway, settings);
        let mut session = use_case.prepare(config(1, 1).into()).unwrap();
        let progress = TurnRecorder::default();

        let err = use_case.run(&mut session, &progress).await.unwrap_err();

        assert!(matches!(
            err,
            RunDebateError::Agent {
                phase: DebatePhase::AssignSides,
                role: AgentRole::Master,
                source: AgentError::Gateway(GatewayError::Timeout),
            }
        ));
        // The timed-out turn is reported as failed, so a spinner gets cleared
        assert_eq!(*progress.started.lock().unwrap(), 1);
        let failed = progress.failed.lock().unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, AgentRole::Master);
        assert!(session.totals().is_empty());
        assert_eq!(session.agent(AgentRole::Master).messages().len(), 2);
    }

    #[tokio::test]
    async fn test_session_deadline() {
        let gateway = ScriptedGateway::debate("Privacy").with_delay(Duration::from_millis(500));
        let settings = blocking().with_session_timeout(Some(Duration::from_millis(20)));
        let (use_case, _) = use_case(gateway, settings);

        let err = use_case.execute(config(1, 1).into()).await.unwrap_err();

        assert!(matches!(
            err,
            RunDebateError::DeadlineExceeded {
                phase: DebatePhase::AssignSides,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let (use_case, gateway) = use_case(ScriptedGateway::debate("Privacy"), blocking());
        let use_case = use_case.with_cancellation(token);

        let err = use_case.execute(config(1, 1).into()).await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(err.phase(), Some(DebatePhase::AssignSides));
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_mid_call() {
        let token = CancellationToken::new();
        let gateway = ScriptedGateway::debate("Privacy").with_delay(Duration::from_millis(500));
        let (use_case, _) = use_case(gateway, blocking());
        let use_case = use_case.with_cancellation(token.clone());

        let progress = TurnRecorder::default();

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });
        let err = use_case
            .execute_with_progress(config(1, 1).into(), &progress)
            .await
            .unwrap_err();
        canceller.await.unwrap();

        assert!(matches!(
            err,
            RunDebateError::Cancelled {
                phase: DebatePhase::AssignSides
            }
        ));
        assert_eq!(*progress.started.lock().unwrap(), 1);
        assert_eq!(
            *progress.failed.lock().unwrap(),
            [(AgentRole::Master, err.to_string())]
        );
    }

    #[tokio::test]
    async fn test_unsupported_model_aborts_streaming_debate() {
        let gateway = Arc::new(ScriptedGateway::debate("Privacy"));
        let use_case =
            RunDebateUseCase::new(gateway.clone(), Arc::new(FixedTokenCounter::rejecting("llama-3")))
                .with_prompts(test_prompts())
                .with_settings(
                    DebateSettings::default()
                        .with_model(Model::Custom("llama-3".into()))
                        .with_mode(SubmissionMode::Streaming),
                );

        let err = use_case.execute(config(1, 1).into()).await.unwrap_err();

        match err {
            RunDebateError::Agent { role, source, .. } => {
                assert_eq!(role, AgentRole::Master);
                assert!(source.is_unsupported_model());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn test_memory_budget_overflow_aborts() {
        let settings = blocking().with_memory_budget(MemoryBudget::max_messages(3));
        let (use_case, _) = use_case(ScriptedGateway::debate("Privacy"), settings);

        let err = use_case.execute(config(1, 1).into()).await.unwrap_err();

        // The master's fourth message (second side request) overflows
        assert_eq!(err.role(), Some(AgentRole::Master));
        assert_eq!(err.phase(), Some(DebatePhase::AssignSides));
    }

    #[tokio::test]
    async fn test_session_cannot_run_twice() {
        let (use_case, _) = use_case(ScriptedGateway::debate("Privacy"), blocking());
        let mut session = use_case.prepare(config(1, 1).into()).unwrap();
        use_case.run(&mut session, &NoProgress).await.unwrap();

        let err = use_case.run(&mut session, &NoProgress).await.unwrap_err();

        assert!(matches!(err, RunDebateError::Domain(_)));
    }

    #[test]
    fn test_prepare_rejects_invalid_config() {
        let (use_case, _) = use_case(ScriptedGateway::debate("Privacy"), blocking());

        let err = use_case.prepare(config(0, 1).into()).unwrap_err();

        assert!(matches!(err, RunDebateError::Domain(_)));
    }

    #[test]
    fn test_prepare_seeds_system_prompts() {
        let (use_case, _) = use_case(ScriptedGateway::debate("Privacy"), blocking());

        let session = use_case.prepare(config(1, 1).into()).unwrap();

        for (role, system) in [
            (AgentRole::Master, MASTER_SYSTEM),
            (AgentRole::Moderator, MODERATOR_SYSTEM),
            (AgentRole::Debater1, DEBATER_1_SYSTEM),
            (AgentRole::Debater2, DEBATER_2_SYSTEM),
        ] {
            assert_eq!(session.agent(role).messages(), &[Message::system(system)]);
        }
        assert_eq!(session.phase(), DebatePhase::Init);
    }
}
