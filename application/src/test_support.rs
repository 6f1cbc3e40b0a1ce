//! Scripted gateway and tokenizer for unit tests.

use crate::ports::llm_gateway::{
    Completion, CompletionRequest, GatewayError, LlmGateway, StreamHandle,
};
use crate::ports::tokenizer::{TokenCounter, TokenizerError};
use async_trait::async_trait;
use debate_domain::{DebatePrompts, Message, Model, PromptTemplate, StreamEvent, UsageRecord};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

pub(crate) const COMPLETION_TOKENS: u64 = 5;
pub(crate) const TOKENS_PER_MESSAGE: u64 = 10;

type Responder = Box<dyn Fn(&[Message], usize) -> String + Send + Sync>;

/// Gateway that answers from a responder closure and records every request.
///
/// The responder receives the conversation and how many times a conversation
/// with the same system prompt has been answered before.
pub(crate) struct ScriptedGateway {
    responder: Responder,
    requests: Mutex<Vec<Vec<Message>>>,
    answered: Mutex<HashMap<String, usize>>,
    failures: Mutex<Vec<(String, GatewayError)>>,
    delay: Option<Duration>,
    inconsistent_usage: bool,
    drop_stream_terminator: bool,
}

impl ScriptedGateway {
    pub fn new(responder: impl Fn(&[Message], usize) -> String + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
            answered: Mutex::new(HashMap::new()),
            failures: Mutex::new(Vec::new()),
            delay: None,
            inconsistent_usage: false,
            drop_stream_terminator: false,
        }
    }

    /// Answers the debate driven by [`test_prompts`] with `agenda`.
    pub fn debate(agenda: &str) -> Self {
        let agenda = agenda.to_string();
        Self::new(move |messages, n| debate_reply(messages, n, &agenda))
    }

    /// Fail the next request whose last message starts with `prefix`.
    pub fn fail_once(self, prefix: &str, error: GatewayError) -> Self {
        self.failures
            .lock()
            .unwrap()
            .push((prefix.to_string(), error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_inconsistent_usage(mut self) -> Self {
        self.inconsistent_usage = true;
        self
    }

    pub fn without_stream_terminator(mut self) -> Self {
        self.drop_stream_terminator = true;
        self
    }

    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests whose system prompt is `system`.
    pub fn requests_from(&self, system: &str) -> Vec<Vec<Message>> {
        self.requests()
            .into_iter()
            .filter(|r| r.first().is_some_and(|m| m.content == system))
            .collect()
    }

    async fn answer(&self, request: &CompletionRequest<'_>) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(request.messages.to_vec());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let last = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        {
            let mut failures = self.failures.lock().unwrap();
            if let Some(pos) = failures.iter().position(|(p, _)| last.starts_with(p)) {
                return Err(failures.remove(pos).1);
            }
        }

        let key = request
            .messages
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        let n = {
            let mut answered = self.answered.lock().unwrap();
            let count = answered.entry(key).or_insert(0);
            *count += 1;
            *count
        };
        Ok((self.responder)(request.messages, n))
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, GatewayError> {
        let text = self.answer(&request).await?;
        let prompt_tokens = request.messages.len() as u64 * TOKENS_PER_MESSAGE;
        let usage = if self.inconsistent_usage {
            UsageRecord {
                prompt_tokens,
                completion_tokens: COMPLETION_TOKENS,
                total_tokens: 1,
            }
        } else {
            UsageRecord::new(prompt_tokens, COMPLETION_TOKENS)
        };
        Ok(Completion { text, usage })
    }

    async fn complete_streaming(
        &self,
        request: CompletionRequest<'_>,
    ) -> Result<StreamHandle, GatewayError> {
        let text = self.answer(&request).await?;
        let (tx, rx) = mpsc::channel(64);
        // Role-only opener, as providers send it
        let _ = tx.send(Ok(StreamEvent::Delta(String::new()))).await;
        for fragment in text.split_inclusive(' ') {
            let _ = tx.send(Ok(StreamEvent::Delta(fragment.to_string()))).await;
        }
        if !self.drop_stream_terminator {
            let _ = tx.send(Ok(StreamEvent::Completed)).await;
        }
        Ok(StreamHandle::new(rx))
    }
}

/// Counts a fixed number of tokens per message.
pub(crate) struct FixedTokenCounter {
    pub unsupported: Option<String>,
}

impl FixedTokenCounter {
    pub fn new() -> Self {
        Self { unsupported: None }
    }

    pub fn rejecting(model: &str) -> Self {
        Self {
            unsupported: Some(model.to_string()),
        }
    }
}

impl TokenCounter for FixedTokenCounter {
    fn count_messages(&self, model: &Model, messages: &[Message]) -> Result<u64, TokenizerError> {
        if self.unsupported.as_deref() == Some(model.as_str()) {
            return Err(TokenizerError::UnsupportedModel(model.to_string()));
        }
        Ok(messages.len() as u64 * TOKENS_PER_MESSAGE)
    }
}

pub(crate) const MASTER_SYSTEM: &str = "SYS master";
pub(crate) const MODERATOR_SYSTEM: &str = "SYS moderator";
pub(crate) const DEBATER_1_SYSTEM: &str = "SYS debater 1";
pub(crate) const DEBATER_2_SYSTEM: &str = "SYS debater 2";

/// Short templates whose leading word tells the scripted gateway what is asked.
pub(crate) fn test_prompts() -> DebatePrompts {
    DebatePrompts {
        master_system: MASTER_SYSTEM.into(),
        master_assign_first: "ASSIGN1 {topic}".into(),
        master_assign_second: "ASSIGN2".into(),
        master_final: "FINAL {talking_points} || {moderator_notes}".into(),
        moderator_system: MODERATOR_SYSTEM.into(),
        moderator_agenda: PromptTemplate::new(
            "AGENDA {topic} | {debater_1_side} | {debater_2_side} | {n_talking_points} | {n_rounds} | {delimiter}",
        ),
        moderator_evaluation: "EVAL {talking_point} :: {transcript}".into(),
        debater_1_system: DEBATER_1_SYSTEM.into(),
        debater_1_instruction: "D1 {topic} / {side} / {talking_point} / {n_rounds}".into(),
        debater_2_system: DEBATER_2_SYSTEM.into(),
        debater_2_instruction: "D2 {topic} / {side} / {talking_point} / {n_rounds}".into(),
        own_answer: "{utterance}".into(),
        opponent_statement: "OPP: {utterance}".into(),
    }
}

fn debate_reply(messages: &[Message], n: usize, agenda: &str) -> String {
    let system = messages.first().map(|m| m.content.as_str()).unwrap_or("");
    let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");

    if last.starts_with("ASSIGN1") {
        return "Argue for X".to_string();
    }
    if last.starts_with("ASSIGN2") {
        return "Argue for Y".to_string();
    }
    if last.starts_with("AGENDA") {
        return agenda.to_string();
    }
    if let Some(rest) = last.strip_prefix("EVAL ") {
        let point = rest.split(" :: ").next().unwrap_or("");
        return format!("Winner for {}: Debater #1", point);
    }
    if last.starts_with("FINAL") {
        return "Champion: Debater #1".to_string();
    }
    match system {
        DEBATER_1_SYSTEM => format!("d1 says #{}", n),
        DEBATER_2_SYSTEM => format!("d2 says #{}", n),
        _ => format!("reply #{}", n),
    }
}
