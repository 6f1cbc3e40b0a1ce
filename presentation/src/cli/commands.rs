//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sides, agenda, every talking point and the verdict
    Full,
    /// Only the master's final verdict
    Verdict,
    /// JSON output
    Json,
}

impl From<OutputFormat> for debate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Verdict => Self::Verdict,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for ai-debate
#[derive(Parser, Debug)]
#[command(name = "ai-debate")]
#[command(author, version, about = "AI Debate - two LLM debaters argue, a moderator judges, a master decides")]
#[command(long_about = r#"
AI Debate stages a structured debate between language-model agents.

The debate has four stages:
1. Side assignment: the master gives each debater a position
2. Agenda: the moderator picks the talking points
3. Debate: per talking point, the debaters argue for N rounds and the
   moderator picks a winner
4. Verdict: the master names the overall champion

Configuration files are loaded from (in priority order):
1. DEBATE_* environment variables
2. --config <path>     Explicit config file
3. ./debate.toml       Project-level config
4. ~/.config/ai-debate/config.toml   Global config

Credentials come from [provider] or AZURE_OPENAI_ENDPOINT / AZURE_OPENAI_API_KEY.

Example:
  ai-debate "Tabs vs spaces"
  ai-debate -p 3 -r 2 -o full "Is remote work better than office work?"
"#)]
pub struct Cli {
    /// The debate topic
    pub topic: Option<String>,

    /// Number of talking points on the agenda
    #[arg(short = 'p', long, value_name = "N")]
    pub talking_points: Option<usize>,

    /// Rounds per talking point
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<usize>,

    /// Model (and default deployment) for every agent
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,

    /// Wait for complete answers instead of streaming them
    #[arg(long)]
    pub no_stream: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
