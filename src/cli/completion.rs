//! Shell completion entry point
//!
//! The only place that reads the completion protocol from the process
//! environment. Everything it gathers is handed to
//! [`crate::completion::dispatch`] as plain data.

use std::env;
use std::io;

use tracing::debug;

use crate::command::CommandNode;
use crate::completion::{self, CompletionQuery, Instruction, Request, ScriptTemplate};
use crate::config::Config;

/// Configuration for completion mode
///
/// Clap has not parsed anything yet, so only the default file and the
/// environment apply. A broken configuration falls back to defaults because
/// completion must never print errors into the shell.
pub fn completion_config() -> Config {
    let mut config = Config::load_from_file(None).unwrap_or_default();
    if config.apply_env().is_err() || config.validate().is_err() {
        config = Config::default();
    }
    config
}

/// Read the completion instruction for `prog_name`, if one is set
pub fn instruction_from_env(config: &Config, prog_name: &str) -> Option<Instruction> {
    let var = config.complete_var_for(prog_name);
    env::var(&var).ok().as_deref().and_then(Instruction::parse)
}

/// Answer the instruction on stdout
///
/// Failures end in empty output; the shell never sees an error.
pub fn run(instruction: Instruction, root: &CommandNode, prog_name: &str, config: &Config) {
    let complete_var = config.complete_var_for(prog_name);
    let words_var = config.completion.words_var.as_str();
    let cword_var = config.completion.cword_var.as_str();

    let request = match instruction {
        Instruction::Source => Request::Source(
            ScriptTemplate::new(prog_name, &complete_var).with_vars(words_var, cword_var),
        ),
        Instruction::Complete => match CompletionQuery::from_env(words_var, cword_var) {
            Ok(query) => Request::Complete(query),
            Err(e) => {
                debug!(error = %e, "unusable completion environment");
                return;
            }
        },
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = completion::dispatch(root, prog_name, &request, &mut out) {
        debug!(error = %e, "failed to write completion output");
    }
}
