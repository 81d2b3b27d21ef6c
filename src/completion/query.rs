//! Completion query input

use std::env;

use crate::error::{ConfigError, Result};

/// One shell completion request: the typed words and the cursor word index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionQuery {
    words: Vec<String>,
    cword: usize,
}

impl CompletionQuery {
    /// Create a query from already-split words
    ///
    /// `words[0]` is the program name. `cword` may point one past the last
    /// word when the cursor sits after trailing whitespace.
    pub fn new<I, S>(words: I, cword: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            cword,
        }
    }

    /// Create a query from a raw command line, splitting on whitespace
    pub fn from_line(line: &str, cword: usize) -> Self {
        Self::new(line.split_whitespace(), cword)
    }

    /// Read the query from the shell-provided environment variables
    pub fn from_env(words_var: &str, cword_var: &str) -> Result<Self> {
        let line =
            env::var(words_var).map_err(|_| ConfigError::MissingEnv(words_var.to_string()))?;
        let raw_cword =
            env::var(cword_var).map_err(|_| ConfigError::MissingEnv(cword_var.to_string()))?;
        let cword = raw_cword
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                field: cword_var.to_string(),
                value: raw_cword.clone(),
            })?;
        Ok(Self::from_line(&line, cword))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn cword(&self) -> usize {
        self.cword
    }

    /// The word under the cursor, empty when the cursor is past the last word
    pub fn incomplete(&self) -> &str {
        self.words.get(self.cword).map_or("", String::as_str)
    }

    /// Words strictly between the program name and the cursor
    pub fn args_before_cursor(&self) -> &[String] {
        let end = self.cword.min(self.words.len());
        self.words.get(1..end).unwrap_or(&[])
    }

    /// Words after the program name up to and including the cursor word
    pub fn args_through_cursor(&self) -> &[String] {
        let end = self.cword.saturating_add(1).min(self.words.len());
        self.words.get(1..end).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_word_at_cursor() {
        let query = CompletionQuery::new(["prog", "run", "--v"], 2);
        assert_eq!(query.incomplete(), "--v");
        assert_eq!(query.args_before_cursor(), ["run"]);
        assert_eq!(query.args_through_cursor(), ["run", "--v"]);
    }

    #[test]
    fn test_cursor_past_last_word() {
        let query = CompletionQuery::new(["prog", "run"], 2);
        assert_eq!(query.incomplete(), "");
        assert_eq!(query.args_before_cursor(), ["run"]);
        assert_eq!(query.args_through_cursor(), ["run"]);
    }

    #[test]
    fn test_cursor_on_program_name() {
        let query = CompletionQuery::new(["prog"], 0);
        assert_eq!(query.incomplete(), "prog");
        assert!(query.args_before_cursor().is_empty());
        assert!(query.args_through_cursor().is_empty());
    }

    #[test]
    fn test_huge_cursor_index() {
        let query = CompletionQuery::new(["prog", "run"], usize::MAX);
        assert_eq!(query.incomplete(), "");
        assert_eq!(query.args_before_cursor(), ["run"]);
        assert_eq!(query.args_through_cursor(), ["run"]);
    }

    #[test]
    fn test_from_line_splits_whitespace() {
        let query = CompletionQuery::from_line("  prog   run  --level ", 3);
        assert_eq!(query.words(), ["prog", "run", "--level"]);
        assert_eq!(query.cword(), 3);
    }

    #[test]
    fn test_from_env_missing_variable() {
        let err = CompletionQuery::from_env(
            "CMDCOMPLETE_TEST_UNSET_WORDS",
            "CMDCOMPLETE_TEST_UNSET_CWORD",
        )
        .unwrap_err();
        assert!(err.to_string().contains("CMDCOMPLETE_TEST_UNSET_WORDS"));
    }
}
