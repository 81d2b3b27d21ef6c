//! cmdcomplete - shell tab-completion demo
//!
//! Runs its own subcommands normally, and answers bash completion requests
//! for them when the completion variable is set.
//!
//! # Usage
//!
//! ```bash
//! eval "$(cmdcomplete completion)"
//! cmdcomplete run --level <TAB>
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cmdcomplete::cli::{self, CliInterface};
use cmdcomplete::config::LoggingConfig;
use cmdcomplete::error::Result;

/// Fallback when the program name cannot be read from argv
const DEFAULT_PROG_NAME: &str = "cmdcomplete";

/// Variable holding a `tracing` filter directive that overrides the level
const LOG_FILTER_VAR: &str = "CMDCOMPLETE_LOG";

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Answer a completion request if the completion variable is set
/// 2. Otherwise parse arguments, load configuration and initialize logging
/// 3. Run the selected subcommand
fn run() -> Result<()> {
    let prog_name = program_name();

    let completion_config = cli::completion::completion_config();
    if let Some(instruction) = cli::completion::instruction_from_env(&completion_config, &prog_name)
    {
        initialize_completion_logging(&completion_config.logging);
        match cli::command_tree() {
            Ok(root) => cli::completion::run(instruction, &root, &prog_name, &completion_config),
            Err(e) => debug!(error = %e, "command tree rejected"),
        }
        return Ok(());
    }

    let cli = CliInterface::new(&prog_name)?;
    initialize_logging(cli.config().logging.clone());
    cli::command_tree()?;
    cli.handle_subcommand()
}

/// Base name of the executable as invoked
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROG_NAME.to_string())
}

fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    let level = LevelFilter::from_level(logging.level.to_tracing_level());
    EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_FILTER_VAR)
        .from_env_lossy()
}

/// Initialize logging to stderr or the configured file
fn initialize_logging(logging: LoggingConfig) {
    let filter = env_filter(&logging);

    if let Some(path) = &logging.file_path {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                let subscriber = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file));
                if logging.timestamps {
                    subscriber.init();
                } else {
                    subscriber.without_time().init();
                }
                return;
            }
            Err(e) => eprintln!("Warning: cannot open log file {}: {}", path.display(), e),
        }
    }

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}

/// Initialize logging for a completion request
///
/// Anything written to the terminal would corrupt the shell's prompt, so
/// logs only go to a configured file and are dropped otherwise.
fn initialize_completion_logging(logging: &LoggingConfig) {
    let Some(path) = &logging.file_path else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(logging))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}
