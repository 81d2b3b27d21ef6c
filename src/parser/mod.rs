//! Tolerant command-line parser
//!
//! Parses a word list against the parameters of a single [`CommandNode`].
//! In resilient mode the parser never fails: it consumes what it can and
//! records every problem as a [`ParseError`] on the returned [`ParseState`].
//! Strict mode runs the same pass and raises the first recorded error.
//!
//! # Supported syntax
//!
//! - `--name value` and `--name=value` for long options
//! - `-n value`, `-nvalue` and clustered flags like `-abc` for short options
//! - `--` ends option processing
//! - Groups stop option processing at their first positional word, which
//!   names a child command; leaves allow options anywhere

use tracing::trace;

use crate::command::{CommandNode, Param, ParamKind};
use crate::error::ParseError;

/// Outcome of parsing words against one command
#[derive(Debug, Clone)]
pub struct ParseState<'a> {
    command: &'a CommandNode,
    leftover: Vec<String>,
    errors: Vec<ParseError>,
    values: Vec<(String, String)>,
}

impl<'a> ParseState<'a> {
    /// The command the words were parsed against
    pub fn command(&self) -> &'a CommandNode {
        self.command
    }

    /// Positional words not consumed by declared arguments
    pub fn leftover(&self) -> &[String] {
        &self.leftover
    }

    /// Every recorded error, in the order encountered
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn first_error(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Accepted `(parameter name, value)` pairs; flags record `"true"` or `"false"`
    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    /// Last value recorded for a parameter
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Parse `words` against `command`, collecting errors instead of failing
pub fn parse<'a>(command: &'a CommandNode, words: &[String]) -> ParseState<'a> {
    let mut parser = Parser::new(command);
    parser.run(words);
    trace!(
        command = command.name(),
        leftover = ?parser.state.leftover,
        errors = parser.state.errors.len(),
        "parsed words"
    );
    parser.state
}

/// Parse `words` against `command`, failing on the first error
pub fn parse_strict<'a>(
    command: &'a CommandNode,
    words: &[String],
) -> Result<ParseState<'a>, ParseError> {
    let mut state = parse(command, words);
    if state.errors.is_empty() {
        Ok(state)
    } else {
        Err(state.errors.swap_remove(0))
    }
}

/// Check whether a word is an option token rather than a positional value
fn is_option_like(word: &str) -> bool {
    word.len() > 1 && word.starts_with('-')
}

struct Parser<'a> {
    state: ParseState<'a>,
}

impl<'a> Parser<'a> {
    fn new(command: &'a CommandNode) -> Self {
        Self {
            state: ParseState {
                command,
                leftover: Vec::new(),
                errors: Vec::new(),
                values: Vec::new(),
            },
        }
    }

    fn run(&mut self, words: &[String]) {
        let command = self.state.command;
        let mut positionals: Vec<String> = Vec::new();
        let mut i = 0;

        while i < words.len() {
            let word = &words[i];
            i += 1;

            if word == "--" {
                positionals.extend_from_slice(&words[i..]);
                break;
            }

            if is_option_like(word) {
                i = if word.starts_with("--") {
                    self.long_option(word, words, i)
                } else {
                    self.short_options(word, words, i)
                };
                continue;
            }

            positionals.push(word.clone());
            if command.is_container() {
                positionals.extend_from_slice(&words[i..]);
                break;
            }
        }

        self.bind_arguments(positionals);
    }

    /// Handle `--name` or `--name=value`; returns the next word index
    fn long_option(&mut self, word: &str, words: &[String], next: usize) -> usize {
        let (token, inline) = match word.split_once('=') {
            Some((token, value)) => (token, Some(value)),
            None => (word, None),
        };

        let command = self.state.command;
        let Some(param) = command.find_option(token) else {
            let possibilities = command
                .option_tokens()
                .into_iter()
                .filter(|t| t.starts_with("--") && t.starts_with(token))
                .map(str::to_string)
                .collect();
            self.state.errors.push(ParseError::NoSuchOption {
                token: token.to_string(),
                possibilities,
            });
            return next;
        };

        match param.kind() {
            ParamKind::Flag => {
                if inline.is_some() {
                    self.state.errors.push(ParseError::UnexpectedValue {
                        token: token.to_string(),
                    });
                } else {
                    self.record_flag(param, token);
                }
                next
            }
            _ => match inline {
                Some(value) => {
                    self.record_value(param, value);
                    next
                }
                None => self.take_separate_value(param, token, words, next),
            },
        }
    }

    /// Handle `-x`, `-xvalue` and clusters like `-abc`; returns the next word index
    fn short_options(&mut self, word: &str, words: &[String], next: usize) -> usize {
        let command = self.state.command;
        let body = &word[1..];

        for (offset, c) in body.char_indices() {
            let token = format!("-{c}");
            let Some(param) = command.find_option(&token) else {
                self.state.errors.push(ParseError::NoSuchOption {
                    token,
                    possibilities: Vec::new(),
                });
                return next;
            };

            if param.kind() == ParamKind::Flag {
                self.record_flag(param, &token);
                continue;
            }

            let attached = &body[offset + c.len_utf8()..];
            if attached.is_empty() {
                return self.take_separate_value(param, &token, words, next);
            }
            self.record_value(param, attached);
            return next;
        }

        next
    }

    fn take_separate_value(
        &mut self,
        param: &Param,
        token: &str,
        words: &[String],
        next: usize,
    ) -> usize {
        match words.get(next) {
            Some(value) => {
                self.record_value(param, value);
                next + 1
            }
            None => {
                self.state.errors.push(ParseError::MissingValue {
                    token: token.to_string(),
                });
                next
            }
        }
    }

    fn record_flag(&mut self, param: &Param, token: &str) {
        let on = !param.secondary_opts().iter().any(|t| t == token);
        self.state
            .values
            .push((param.name().to_string(), on.to_string()));
    }

    fn record_value(&mut self, param: &Param, value: &str) {
        if param.domain().accepts(value) {
            self.state
                .values
                .push((param.name().to_string(), value.to_string()));
        } else {
            self.state.errors.push(ParseError::InvalidValue {
                param: param.name().to_string(),
                value: value.to_string(),
            });
        }
    }

    /// Feed positional words to declared arguments; the rest become leftover
    fn bind_arguments(&mut self, positionals: Vec<String>) {
        let command = self.state.command;
        let mut rest = positionals.into_iter();

        for param in command.arguments() {
            if param.is_multiple() {
                for value in rest.by_ref() {
                    self.record_value(param, &value);
                }
                break;
            }
            match rest.next() {
                Some(value) => self.record_value(param, &value),
                None => break,
            }
        }

        self.state.leftover = rest.collect();
    }
}
