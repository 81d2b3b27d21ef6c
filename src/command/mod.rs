//! Command tree declaration model
//!
//! This module describes the commands a program exposes:
//! - **CommandNode**: a named node that is either a leaf or a group of children
//! - **Param**: an option, flag or positional argument owned by one node
//! - **ValueDomain**: whether a parameter accepts free-form values or a fixed set
//!
//! Trees are built once at startup, either with the builder methods below or
//! from a clap command via [`CommandNode::from_clap`], and are never mutated
//! while a completion query runs.
//!
//! # Examples
//!
//! ```
//! use cmdcomplete::command::{CommandNode, Param};
//!
//! let root = CommandNode::group("prog")
//!     .subcommand(CommandNode::leaf("build"))
//!     .subcommand(
//!         CommandNode::leaf("run").param(Param::flag("verbose").long("verbose")),
//!     );
//!
//! assert_eq!(root.list_commands(), vec!["build", "run"]);
//! assert!(root.get_command("run").is_some());
//! ```

mod clap_bridge;

use std::collections::HashSet;

use crate::error::DeclarationError;

/// Values a parameter accepts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValueDomain {
    /// Any string
    #[default]
    Open,

    /// One of a fixed, ordered set of strings
    Closed(Vec<String>),
}

impl ValueDomain {
    /// Legal values in declaration order, if the domain is closed
    pub fn choices(&self) -> Option<&[String]> {
        match self {
            Self::Open => None,
            Self::Closed(values) => Some(values),
        }
    }

    /// Check whether `value` belongs to the domain
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Open => true,
            Self::Closed(values) => values.iter().any(|v| v == value),
        }
    }
}

/// How a parameter consumes words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Option without a value (`--verbose`), optionally with negation tokens
    Flag,

    /// Option with exactly one mandatory value (`--level high`)
    Valued,

    /// Positional argument
    Argument,
}

/// A declared parameter of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    kind: ParamKind,
    opts: Vec<String>,
    secondary_opts: Vec<String>,
    domain: ValueDomain,
    multiple: bool,
    hidden: bool,
}

impl Param {
    fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            opts: Vec::new(),
            secondary_opts: Vec::new(),
            domain: ValueDomain::Open,
            multiple: false,
            hidden: false,
        }
    }

    /// Declare a boolean flag
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Flag)
    }

    /// Declare an option that takes one value
    pub fn option(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Valued)
    }

    /// Declare a positional argument
    pub fn argument(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Argument)
    }

    /// Add a short token, e.g. `short('v')` for `-v`
    pub fn short(mut self, c: char) -> Self {
        self.opts.push(format!("-{c}"));
        self
    }

    /// Add a long token, e.g. `long("verbose")` for `--verbose`
    pub fn long(mut self, name: &str) -> Self {
        self.opts.push(format!("--{name}"));
        self
    }

    /// Add a negation token, e.g. `negation("no-color")` for `--no-color`
    pub fn negation(mut self, name: &str) -> Self {
        self.secondary_opts.push(format!("--{name}"));
        self
    }

    /// Restrict values to a closed domain
    pub fn choices<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain = ValueDomain::Closed(values.into_iter().map(Into::into).collect());
        self
    }

    /// Let a positional argument swallow every remaining word
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Keep the parameter out of completion candidates
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Primary invocation tokens
    pub fn opts(&self) -> &[String] {
        &self.opts
    }

    /// Secondary (negation) tokens
    pub fn secondary_opts(&self) -> &[String] {
        &self.secondary_opts
    }

    pub fn domain(&self) -> &ValueDomain {
        &self.domain
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_option(&self) -> bool {
        self.kind != ParamKind::Argument
    }

    pub fn takes_value(&self) -> bool {
        self.kind == ParamKind::Valued
    }

    /// Check whether `token` is one of this parameter's primary or secondary tokens
    pub fn owns_token(&self, token: &str) -> bool {
        self.tokens().any(|t| t == token)
    }

    /// Primary tokens followed by secondary tokens
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.opts
            .iter()
            .chain(self.secondary_opts.iter())
            .map(String::as_str)
    }
}

/// Whether a node dispatches to children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// Executes directly
    Leaf,

    /// Dispatches to one of its named children
    Group { children: Vec<CommandNode> },
}

/// A node in the command tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    name: String,
    about: Option<String>,
    params: Vec<Param>,
    kind: CommandKind,
    hidden: bool,
}

impl CommandNode {
    /// Create a command without children
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: None,
            params: Vec::new(),
            kind: CommandKind::Leaf,
            hidden: false,
        }
    }

    /// Create a command that dispatches to children
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            kind: CommandKind::Group {
                children: Vec::new(),
            },
            ..Self::leaf(name)
        }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Attach a child command; a leaf becomes a group
    pub fn subcommand(mut self, child: CommandNode) -> Self {
        match &mut self.kind {
            CommandKind::Group { children } => children.push(child),
            CommandKind::Leaf => {
                self.kind = CommandKind::Group {
                    children: vec![child],
                }
            }
        }
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about_text(&self) -> Option<&str> {
        self.about.as_deref()
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, CommandKind::Group { .. })
    }

    /// Visible child names in declaration order; empty for leaves
    pub fn list_commands(&self) -> Vec<&str> {
        match &self.kind {
            CommandKind::Leaf => Vec::new(),
            CommandKind::Group { children } => children
                .iter()
                .filter(|c| !c.hidden)
                .map(|c| c.name.as_str())
                .collect(),
        }
    }

    /// Resolve a child by exact name
    pub fn get_command(&self, name: &str) -> Option<&CommandNode> {
        match &self.kind {
            CommandKind::Leaf => None,
            CommandKind::Group { children } => children.iter().find(|c| c.name == name),
        }
    }

    /// Find the option that owns `token`
    pub fn find_option(&self, token: &str) -> Option<&Param> {
        self.params
            .iter()
            .filter(|p| p.is_option())
            .find(|p| p.owns_token(token))
    }

    /// Find a parameter by its name
    pub fn find_param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Positional arguments in declaration order
    pub fn arguments(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().filter(|p| !p.is_option())
    }

    /// Every visible option token, primary before secondary per parameter
    pub fn option_tokens(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.is_option() && !p.hidden)
            .flat_map(Param::tokens)
            .collect()
    }

    /// Check token and child-name uniqueness for this node and its descendants
    pub fn validate(&self) -> Result<(), DeclarationError> {
        let mut seen = HashSet::new();
        for param in self.params.iter().filter(|p| p.is_option()) {
            if param.opts.is_empty() {
                return Err(DeclarationError::NoTokens {
                    command: self.name.clone(),
                    param: param.name.clone(),
                });
            }
            for token in param.tokens() {
                if !seen.insert(token) {
                    return Err(DeclarationError::DuplicateToken {
                        command: self.name.clone(),
                        token: token.to_string(),
                    });
                }
            }
        }

        if let CommandKind::Group { children } = &self.kind {
            let mut names = HashSet::new();
            for child in children {
                if !names.insert(child.name.as_str()) {
                    return Err(DeclarationError::DuplicateCommand {
                        parent: self.name.clone(),
                        name: child.name.clone(),
                    });
                }
                child.validate()?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> CommandNode {
        CommandNode::group("prog")
            .param(Param::flag("debug").long("debug").negation("no-debug"))
            .subcommand(CommandNode::leaf("build"))
            .subcommand(CommandNode::leaf("secret").hidden(true))
            .subcommand(
                CommandNode::leaf("run")
                    .param(Param::flag("verbose").short('v').long("verbose"))
                    .param(Param::option("level").long("level").choices(["low", "high"])),
            )
    }

    #[test]
    fn test_list_commands_skips_hidden() {
        let root = sample_tree();
        assert_eq!(root.list_commands(), vec!["build", "run"]);
    }

    #[test]
    fn test_get_command_exact_match_only() {
        let root = sample_tree();
        assert!(root.get_command("run").is_some());
        assert!(root.get_command("secret").is_some());
        assert!(root.get_command("ru").is_none());
        assert!(root.get_command("RUN").is_none());
    }

    #[test]
    fn test_leaf_has_no_children() {
        let root = sample_tree();
        let build = root.get_command("build").unwrap();
        assert!(!build.is_container());
        assert!(build.list_commands().is_empty());
        assert!(build.get_command("anything").is_none());
    }

    #[test]
    fn test_subcommand_turns_leaf_into_group() {
        let node = CommandNode::leaf("remote").subcommand(CommandNode::leaf("add"));
        assert!(node.is_container());
        assert_eq!(node.list_commands(), vec!["add"]);
    }

    #[test]
    fn test_option_tokens_include_negations() {
        let root = sample_tree();
        assert_eq!(root.option_tokens(), vec!["--debug", "--no-debug"]);

        let run = root.get_command("run").unwrap();
        assert_eq!(run.option_tokens(), vec!["-v", "--verbose", "--level"]);
    }

    #[test]
    fn test_find_option_by_token() {
        let root = sample_tree();
        let run = root.get_command("run").unwrap();
        assert_eq!(run.find_option("-v").map(Param::name), Some("verbose"));
        assert_eq!(
            run.find_option("--level").map(|p| p.domain().clone()),
            Some(ValueDomain::Closed(vec!["low".into(), "high".into()]))
        );
        assert!(run.find_option("--missing").is_none());
    }

    #[test]
    fn test_domain_accepts() {
        let domain = ValueDomain::Closed(vec!["a".into(), "b".into()]);
        assert!(domain.accepts("a"));
        assert!(!domain.accepts("c"));
        assert!(!domain.accepts(""));
        assert!(ValueDomain::Open.accepts("anything"));
    }

    #[test]
    fn test_validate_accepts_sample_tree() {
        assert!(sample_tree().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_token() {
        let node = CommandNode::leaf("x")
            .param(Param::flag("a").long("same"))
            .param(Param::flag("b").long("b").negation("same"));
        assert_eq!(
            node.validate(),
            Err(DeclarationError::DuplicateToken {
                command: "x".into(),
                token: "--same".into(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_child() {
        let node = CommandNode::group("x")
            .subcommand(CommandNode::leaf("a"))
            .subcommand(CommandNode::leaf("a"));
        assert!(matches!(
            node.validate(),
            Err(DeclarationError::DuplicateCommand { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_option_without_tokens() {
        let node = CommandNode::leaf("x").param(Param::option("level"));
        assert!(matches!(node.validate(), Err(DeclarationError::NoTokens { .. })));
    }
}
