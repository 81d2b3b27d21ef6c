//! Shell completion for command trees
//!
//! This module answers bash completion requests for a program described by a
//! [`CommandNode`] tree.
//!
//! # Architecture
//!
//! - **Context**: walks the tree along the typed words to find the active command
//! - **Engine**: derives candidates from parse errors or from command structure
//! - **Query**: the typed words and cursor index of one request
//! - **Script**: the bash snippet that wires the shell to the program
//!
//! # Protocol
//!
//! The shell calls the program with a completion variable set to
//! `complete` (answer a query) or `source` (print the script). Only the
//! outermost entry point reads the environment; everything here takes plain
//! data.
//!
//! # Examples
//!
//! ```
//! use cmdcomplete::command::{CommandNode, Param};
//! use cmdcomplete::completion::{CompletionEngine, CompletionQuery};
//!
//! let root = CommandNode::group("prog")
//!     .subcommand(CommandNode::leaf("build"))
//!     .subcommand(CommandNode::leaf("run").param(Param::flag("verbose").long("verbose")));
//!
//! let engine = CompletionEngine::new(&root, "prog");
//! let query = CompletionQuery::new(["prog", "b"], 1);
//! assert_eq!(engine.complete(&query), vec!["build"]);
//! ```

mod context;
mod engine;
mod query;
pub mod script;

#[cfg(test)]
mod tests;

use std::io::{self, Write};

use tracing::debug;

use crate::command::CommandNode;

pub use context::{ResolvedContext, resolve_context};
pub use engine::CompletionEngine;
pub use query::CompletionQuery;
pub use script::ScriptTemplate;

/// Value of the completion variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Print the shell integration script
    Source,

    /// Answer a completion query
    Complete,
}

impl Instruction {
    /// Parse the completion variable's value; unknown values are not instructions
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "source" => Some(Self::Source),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }
}

/// A completion request with its input already gathered
#[derive(Debug, Clone)]
pub enum Request<'a> {
    /// Print the integration script
    Source(ScriptTemplate<'a>),

    /// Print candidates for a query, one per line
    Complete(CompletionQuery),
}

/// Serve one completion request, writing the result to `out`
///
/// Completing never fails on bad input; an unresolvable line simply writes
/// nothing. Only write errors are reported.
pub fn dispatch<W: Write>(
    root: &CommandNode,
    prog_name: &str,
    request: &Request<'_>,
    out: &mut W,
) -> io::Result<()> {
    match request {
        Request::Source(template) => {
            writeln!(out, "{}", template.render())?;
        }
        Request::Complete(query) => {
            debug!(words = ?query.words(), cword = query.cword(), "completion query");
            let engine = CompletionEngine::new(root, prog_name);
            for candidate in engine.complete(query) {
                writeln!(out, "{candidate}")?;
            }
        }
    }
    out.flush()
}
