//! Completion engine - turns a query into candidate strings
//!
//! Candidates come from one of two phases:
//!
//! 1. **Error candidates**: the whole line, cursor word included, is resolved
//!    and the first parse error of the active command is inspected. A mistyped
//!    option offers its near matches; a missing or rejected value for a closed
//!    domain offers the domain.
//! 2. **Structural candidates**: only consulted when phase 1 yields nothing.
//!    The words before the cursor are resolved and the active command offers
//!    its option tokens (when the cursor word looks like an option) or its
//!    subcommand names.
//!
//! Either way the result keeps only candidates that start with the cursor
//! word, in production order.

use tracing::debug;

use super::context::{ResolvedContext, resolve_context};
use super::query::CompletionQuery;
use crate::command::CommandNode;
use crate::error::ParseError;

/// Main completion engine
#[derive(Debug, Clone)]
pub struct CompletionEngine<'a> {
    root: &'a CommandNode,
    prog_name: String,
}

impl<'a> CompletionEngine<'a> {
    /// Create an engine over a command tree
    ///
    /// # Arguments
    /// * `root` - Root of the command tree
    /// * `prog_name` - Name the program was invoked as
    pub fn new(root: &'a CommandNode, prog_name: impl Into<String>) -> Self {
        Self {
            root,
            prog_name: prog_name.into(),
        }
    }

    /// Compute the candidates for the word under the cursor
    pub fn complete(&self, query: &CompletionQuery) -> Vec<String> {
        let incomplete = query.incomplete();

        if let Some((candidates, prefix)) = self.error_candidates(query)
            && !candidates.is_empty()
        {
            debug!(count = candidates.len(), "completing from parse error");
            return filter_prefix(candidates, prefix);
        }

        let candidates = self.structural_candidates(query);
        debug!(count = candidates.len(), "completing from command structure");
        filter_prefix(candidates, incomplete)
    }

    /// Candidates derived from the first parse error of the full line
    ///
    /// Returns the candidates along with the text they must start with.
    fn error_candidates<'q>(&self, query: &'q CompletionQuery) -> Option<(Vec<String>, &'q str)> {
        let ctx = resolve_context(self.root, &self.prog_name, query.args_through_cursor())?;
        let error = ctx.state().first_error()?;
        debug!(%error, "first parse error");

        let incomplete = query.incomplete();
        let command = ctx.command();
        let (candidates, at_cursor) = match error {
            ParseError::NoSuchOption { possibilities, .. } => (possibilities.clone(), false),
            ParseError::MissingValue { token } => (
                command
                    .find_option(token)
                    .and_then(|param| param.domain().choices())
                    .map(<[String]>::to_vec)
                    .unwrap_or_default(),
                option_part(incomplete) == token.as_str(),
            ),
            ParseError::InvalidValue { param, value } => {
                let inline = command
                    .find_option(option_part(incomplete))
                    .is_some_and(|p| p.name() == param.as_str());
                (domain_of(&ctx, param), inline || incomplete == value.as_str())
            }
            ParseError::UnexpectedValue { .. } => (Vec::new(), false),
        };

        // Only the word that failed is split at `=`; anything else must be
        // extended as typed.
        let prefix = if at_cursor {
            value_part(incomplete)
        } else {
            incomplete
        };
        Some((candidates, prefix))
    }

    /// Option tokens or child names of the command before the cursor
    fn structural_candidates(&self, query: &CompletionQuery) -> Vec<String> {
        let Some(ctx) = resolve_context(self.root, &self.prog_name, query.args_before_cursor())
        else {
            return Vec::new();
        };
        let command = ctx.command();

        let names = if looks_like_option(query.incomplete()) {
            command.option_tokens()
        } else {
            command.list_commands()
        };
        names.into_iter().map(str::to_string).collect()
    }
}

/// Legal values of a closed-domain parameter on the active command
fn domain_of(ctx: &ResolvedContext<'_>, param: &str) -> Vec<String> {
    ctx.command()
        .find_param(param)
        .and_then(|p| p.domain().choices())
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}

/// Check whether the word starts like an option token
fn looks_like_option(word: &str) -> bool {
    word.chars().next().is_some_and(|c| !c.is_alphanumeric())
}

/// Token part of `--name=value`
fn option_part(word: &str) -> &str {
    match word.split_once('=') {
        Some((token, _)) if looks_like_option(token) => token,
        _ => word,
    }
}

/// Value part of `--name=value`; a lone `=` left by shell word splitting counts as empty
fn value_part(word: &str) -> &str {
    if word == "=" {
        return "";
    }
    match word.split_once('=') {
        Some((token, value)) if looks_like_option(token) => value,
        _ => word,
    }
}

fn filter_prefix(candidates: Vec<String>, prefix: &str) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|c| c.starts_with(prefix))
        .collect()
}
