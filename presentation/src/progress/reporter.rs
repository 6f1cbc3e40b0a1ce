//! Progress reporting for debate execution
//!
//! Everything here writes to stderr so stdout carries only the final result.

use colored::Colorize;
use debate_application::DebateProgressNotifier;
use debate_domain::{AgentRole, DebatePhase, TalkingPoint};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with phase banners, live answers and a spinner while
/// blocking calls are in flight.
pub struct ProgressReporter {
    /// Echo streamed fragments as they arrive
    live_text: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new(live_text: bool) -> Self {
        Self {
            live_text,
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn take_spinner(&self) -> Option<ProgressBar> {
        self.spinner.lock().ok().and_then(|mut slot| slot.take())
    }

    fn speaker(role: AgentRole) -> colored::ColoredString {
        match role {
            AgentRole::Master => role.display_name().magenta().bold(),
            AgentRole::Moderator => role.display_name().blue().bold(),
            AgentRole::Debater1 => role.display_name().yellow().bold(),
            AgentRole::Debater2 => role.display_name().green().bold(),
        }
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &DebatePhase) {
        // Talking points get their own banner
        if matches!(phase, DebatePhase::DebateTopic { .. }) {
            return;
        }
        eprintln!("\n{} {}", "->".cyan(), phase.display_name().bold());
    }

    fn on_phase_complete(&self, _phase: &DebatePhase) {}

    fn on_talking_point_start(&self, index: usize, total: usize, point: &TalkingPoint) {
        eprintln!(
            "\n{} {}",
            format!("== Talking point {}/{} ==", index + 1, total)
                .cyan()
                .bold(),
            point
        );
    }

    fn on_round_start(&self, round: usize, total: usize) {
        eprintln!("{}", format!("-- Round {}/{} --", round, total).dimmed());
    }

    fn on_agent_turn_start(&self, role: AgentRole) {
        if self.live_text {
            eprint!("{}: ", Self::speaker(role));
            let _ = std::io::stderr().flush();
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(role.display_name());
        pb.set_message("thinking...");
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_agent_chunk(&self, _role: AgentRole, chunk: &str) {
        if self.live_text {
            eprint!("{}", chunk);
            let _ = std::io::stderr().flush();
        }
    }

    fn on_agent_turn_end(&self, role: AgentRole, text: &str) {
        if self.live_text {
            eprintln!("\n");
            return;
        }
        if let Some(pb) = self.take_spinner() {
            pb.finish_and_clear();
        }
        eprintln!("{}: {}\n", Self::speaker(role), text);
    }

    fn on_agent_turn_failed(&self, role: AgentRole, error: &str) {
        if let Some(pb) = self.take_spinner() {
            pb.abandon_with_message(format!("{} {}", "x".red(), error));
        } else {
            eprintln!("\n  {} {} ({})", "x".red(), role.display_name(), error);
        }
    }
}

/// Simple text-based progress (no live answers, no spinner)
pub struct SimpleProgress;

impl DebateProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &DebatePhase) {
        eprintln!("{} {}", "->".cyan(), phase.display_name().bold());
    }

    fn on_phase_complete(&self, _phase: &DebatePhase) {}

    fn on_agent_turn_end(&self, role: AgentRole, _text: &str) {
        eprintln!("  {} {}", "v".green(), role.display_name());
    }

    fn on_agent_turn_failed(&self, role: AgentRole, error: &str) {
        eprintln!("  {} {} ({})", "x".red(), role.display_name(), error);
    }
}
