//! CLI entrypoint for ai-debate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use debate_application::{
    DebateProgressNotifier, NoProgress, RunDebateInput, RunDebateUseCase,
};
use debate_domain::{Model, OutputFormat};
use debate_infrastructure::{AzureOpenAiGateway, ChatTokenCounter, ConfigLoader, FileConfig};
use debate_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let topic = match cli.topic.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => bail!("A debate topic is required. Run with --help for usage."),
    };

    let settings = config.to_settings()?;
    let prompts = config.prompts()?;
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let azure = config.provider.to_azure_config()?;
    let gateway = Arc::new(AzureOpenAiGateway::new(azure).context("Failed to build HTTP client")?);
    let tokenizer = Arc::new(ChatTokenCounter::default());

    let cancellation = CancellationToken::new();
    let ctrl_c = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, aborting the current call");
            ctrl_c.cancel();
        }
    });

    let live_text = settings.mode.is_streaming();
    let use_case = RunDebateUseCase::new(gateway, tokenizer)
        .with_settings(settings)
        .with_prompts(prompts)
        .with_cancellation(cancellation);

    let input = RunDebateInput::from(config.debate.to_debate_config(topic));
    let mut session = use_case.prepare(input)?;

    info!(topic = %session.config().topic, "Starting ai-debate");

    let progress: Box<dyn DebateProgressNotifier> = if cli.quiet || format == OutputFormat::Json {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new(live_text))
    } else {
        Box::new(SimpleProgress)
    };

    match use_case.run(&mut session, progress.as_ref()).await {
        Ok(result) => {
            println!("{}", ConsoleFormatter::render(&result, format));
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("\nUsage so far ({}):", session.phase());
            eprint!(
                "{}",
                ConsoleFormatter::format_usage(
                    &session.usage_report(),
                    session.totals(),
                    session.cost()
                )
            );
            if e.is_cancelled() {
                std::process::exit(EXIT_CANCELLED);
            }
            Err(e.into())
        }
    }
}

fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(n) = cli.talking_points {
        config.debate.n_talking_points = n;
    }
    if let Some(n) = cli.rounds {
        config.debate.n_rounds = n;
    }
    if let Some(model) = &cli.model {
        config.debate.model = Model::from(model.as_str());
    }
    if let Some(t) = cli.temperature {
        config.debate.temperature = t;
    }
    if cli.no_stream {
        config.debate.streaming = false;
    }
}

/// Console logs go to stderr; `[logging] file` adds a plain-text copy.
fn init_logging(verbose: u8, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
