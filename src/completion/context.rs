//! Context resolution
//!
//! Walks the command tree along a word list, descending into subcommands for
//! as long as the active command is a group and has a leftover word naming a
//! child.

use tracing::debug;

use crate::command::CommandNode;
use crate::parser::{self, ParseState};

/// The deepest command reached by a word list, with its parse state
#[derive(Debug, Clone)]
pub struct ResolvedContext<'a> {
    path: Vec<String>,
    state: ParseState<'a>,
}

impl<'a> ResolvedContext<'a> {
    /// Active command
    pub fn command(&self) -> &'a CommandNode {
        self.state.command()
    }

    /// Names from the program down to the active command
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn state(&self) -> &ParseState<'a> {
        &self.state
    }
}

/// Resolve the active command for `args` (program name excluded)
///
/// Returns `None` when a group's first leftover word is not one of its
/// children. Child names must match exactly.
pub fn resolve_context<'a>(
    root: &'a CommandNode,
    prog_name: &str,
    args: &[String],
) -> Option<ResolvedContext<'a>> {
    let mut path = vec![prog_name.to_string()];
    let mut state = parser::parse(root, args);

    while state.command().is_container() {
        let Some((name, rest)) = state.leftover().split_first() else {
            break;
        };

        let Some(child) = state.command().get_command(name) else {
            debug!(
                parent = state.command().name(),
                word = name.as_str(),
                "no such subcommand, giving up on context"
            );
            return None;
        };

        path.push(name.clone());
        let rest = rest.to_vec();
        state = parser::parse(child, &rest);
    }

    debug!(path = ?path, errors = state.errors().len(), "resolved context");
    Some(ResolvedContext { path, state })
}
