//! Debate participants.
//!
//! An [`Agent`] owns one [`ConversationMemory`] and one [`UsageLedger`].
//! Asking never mutates the memory: the orchestrator appends the answer
//! only once the call has succeeded, so a failed or retried call leaves the
//! conversation exactly as it was.

pub mod error;

pub use error::AgentError;

use crate::config::SubmissionMode;
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::progress::DebateProgressNotifier;
use crate::ports::tokenizer::TokenCounter;
use debate_domain::{
    AgentRole, AgentUsage, ConversationMemory, CostBreakdown, CostRates, MemoryBudget, Message,
    Model, Role, StreamEvent, UsageLedger, UsageRecord,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// One LLM-backed participant of a debate.
pub struct Agent {
    role: AgentRole,
    model: Model,
    temperature: f32,
    mode: SubmissionMode,
    memory: ConversationMemory,
    ledger: UsageLedger,
    rates: CostRates,
    max_prompt_tokens: Option<u64>,
    gateway: Arc<dyn LlmGateway>,
    tokenizer: Arc<dyn TokenCounter>,
}

impl Agent {
    pub fn new(
        role: AgentRole,
        gateway: Arc<dyn LlmGateway>,
        tokenizer: Arc<dyn TokenCounter>,
    ) -> Self {
        Self {
            role,
            model: Model::default(),
            temperature: 0.0,
            mode: SubmissionMode::default(),
            memory: ConversationMemory::new(role.as_str()),
            ledger: UsageLedger::new(),
            rates: CostRates::default(),
            max_prompt_tokens: None,
            gateway,
            tokenizer,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_mode(mut self, mode: SubmissionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_rates(mut self, rates: CostRates) -> Self {
        self.rates = rates;
        self
    }

    pub fn with_memory_budget(mut self, budget: MemoryBudget) -> Self {
        self.memory = self.memory.with_budget(budget);
        self
    }

    pub fn with_max_prompt_tokens(mut self, limit: Option<u64>) -> Self {
        self.max_prompt_tokens = limit;
        self
    }

    // ==================== Accessors ====================

    pub fn role(&self) -> AgentRole {
        self.role
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn mode(&self) -> SubmissionMode {
        self.mode
    }

    pub fn rates(&self) -> CostRates {
        self.rates
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn messages(&self) -> &[Message] {
        self.memory.messages()
    }

    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    // ==================== Memory ====================

    pub fn set_system_prompt(&mut self, text: impl Into<String>) -> Result<(), AgentError> {
        Ok(self.memory.set_system(text)?)
    }

    pub fn add_message(&mut self, role: Role, text: impl Into<String>) -> Result<(), AgentError> {
        Ok(self.memory.append(role, text)?)
    }

    pub fn add_user_message(&mut self, text: impl Into<String>) -> Result<(), AgentError> {
        self.add_message(Role::User, text)
    }

    pub fn add_assistant_message(&mut self, text: impl Into<String>) -> Result<(), AgentError> {
        self.add_message(Role::Assistant, text)
    }

    pub fn truncate_to_system(&mut self) {
        self.memory.truncate_to_system();
    }

    pub fn truncate_to_first_n(&mut self, n: usize) -> Result<(), AgentError> {
        Ok(self.memory.truncate_to_first_n(n)?)
    }

    // ==================== Usage ====================

    /// Token totals over every successful call.
    pub fn token_usage(&self) -> UsageRecord {
        self.ledger.totals()
    }

    /// Cost of [`Agent::token_usage`] at this agent's rates.
    pub fn cost_usage(&self) -> CostBreakdown {
        self.ledger.cost(&self.rates)
    }

    pub fn usage_summary(&self) -> AgentUsage {
        AgentUsage {
            role: self.role,
            model: self.model.clone(),
            calls: self.ledger.len(),
            totals: self.token_usage(),
            cost: self.cost_usage(),
        }
    }

    // ==================== Completion ====================

    /// Submit the whole memory and return the reply.
    ///
    /// On success one usage record is added to the ledger. The reply is not
    /// appended to memory. On failure neither memory nor ledger change.
    pub async fn ask(&mut self, progress: &dyn DebateProgressNotifier) -> Result<String, AgentError> {
        if self.memory.is_empty() {
            return Err(AgentError::EmptyMemory { role: self.role });
        }

        let prompt_tokens = self.counted_prompt_tokens()?;

        debug!(
            role = %self.role,
            model = %self.model,
            mode = %self.mode,
            messages = self.memory.len(),
            "Submitting conversation"
        );
        progress.on_agent_turn_start(self.role);

        let result = match self.mode {
            SubmissionMode::Blocking => self.ask_blocking().await,
            SubmissionMode::Streaming => self.ask_streaming(prompt_tokens, progress).await,
        };

        match result {
            Ok((text, usage)) => {
                debug!(
                    role = %self.role,
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "Completion received"
                );
                self.ledger.record(usage);
                progress.on_agent_turn_end(self.role, &text);
                Ok(text)
            }
            Err(e) => {
                warn!(role = %self.role, error = %e, "Completion failed");
                progress.on_agent_turn_failed(self.role, &e.to_string());
                Err(e)
            }
        }
    }

    /// Prompt token count when streaming needs it or a limit applies.
    fn counted_prompt_tokens(&self) -> Result<Option<u64>, AgentError> {
        if self.mode == SubmissionMode::Blocking && self.max_prompt_tokens.is_none() {
            return Ok(None);
        }
        let tokens = self
            .tokenizer
            .count_messages(&self.model, self.memory.messages())?;
        if let Some(limit) = self.max_prompt_tokens
            && tokens > limit
        {
            return Err(AgentError::PromptBudgetExceeded {
                role: self.role,
                tokens,
                limit,
            });
        }
        Ok(Some(tokens))
    }

    fn request(&self) -> CompletionRequest<'_> {
        CompletionRequest::new(&self.model, self.memory.messages(), self.temperature)
    }

    async fn ask_blocking(&self) -> Result<(String, UsageRecord), AgentError> {
        let completion = self.gateway.complete(self.request()).await?;
        let usage = completion.usage;
        if usage.prompt_tokens + usage.completion_tokens != usage.total_tokens {
            return Err(GatewayError::Protocol(format!(
                "inconsistent usage: {} + {} != {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            ))
            .into());
        }
        Ok((completion.text, usage))
    }

    /// Prompt tokens come from the tokenizer; every non-empty fragment
    /// counts as one completion token.
    async fn ask_streaming(
        &self,
        prompt_tokens: Option<u64>,
        progress: &dyn DebateProgressNotifier,
    ) -> Result<(String, UsageRecord), AgentError> {
        let prompt_tokens = match prompt_tokens {
            Some(tokens) => tokens,
            None => self
                .tokenizer
                .count_messages(&self.model, self.memory.messages())?,
        };

        let mut handle = self.gateway.complete_streaming(self.request()).await?;
        let mut text = String::new();
        let mut fragments: u64 = 0;

        loop {
            match handle.next().await {
                Some(Ok(StreamEvent::Delta(chunk))) => {
                    if chunk.is_empty() {
                        continue;
                    }
                    fragments += 1;
                    progress.on_agent_chunk(self.role, &chunk);
                    text.push_str(&chunk);
                }
                Some(Ok(StreamEvent::Completed)) => break,
                Some(Err(e)) => return Err(e.into()),
                None => {
                    return Err(GatewayError::Protocol(
                        "stream ended without a termination signal".to_string(),
                    )
                    .into());
                }
            }
        }

        Ok((text, UsageRecord::new(prompt_tokens, fragments)))
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("role", &self.role)
            .field("model", &self.model)
            .field("mode", &self.mode)
            .field("messages", &self.memory.len())
            .field("calls", &self.ledger.len())
            .finish()
    }
}
