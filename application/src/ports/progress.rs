//! Progress notification port for debate execution

use debate_domain::{AgentRole, DebatePhase, TalkingPoint};

/// Callback for reporting debate progress.
///
/// Phase hooks are required; the finer-grained hooks default to no-ops.
pub trait DebateProgressNotifier: Send + Sync {
    fn on_phase_start(&self, phase: &DebatePhase);

    fn on_phase_complete(&self, phase: &DebatePhase);

    /// `index` is 0-based, `total` is the agenda length.
    fn on_talking_point_start(&self, _index: usize, _total: usize, _point: &TalkingPoint) {}

    /// `round` is 1-based.
    fn on_round_start(&self, _round: usize, _total: usize) {}

    fn on_agent_turn_start(&self, _role: AgentRole) {}

    /// A streamed fragment, in arrival order.
    fn on_agent_chunk(&self, _role: AgentRole, _chunk: &str) {}

    fn on_agent_turn_end(&self, _role: AgentRole, _text: &str) {}

    fn on_agent_turn_failed(&self, _role: AgentRole, _error: &str) {}
}

/// No-op progress notifier
pub struct NoProgress;

impl DebateProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &DebatePhase) {}
    fn on_phase_complete(&self, _phase: &DebatePhase) {}
}
