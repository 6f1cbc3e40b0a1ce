//! Presentation layer for ai-debate
//!
//! This crate contains CLI definitions, output formatters
//! and progress reporters.

pub mod cli {
    pub mod commands;
}
pub mod output {
    pub mod console;
}
pub mod progress {
    pub mod reporter;
}

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
