//! Bash integration script
//!
//! The rendered script defines a shell function that re-invokes the program
//! with the completion variable set to `complete`, passing the current words
//! and cursor index through the environment, and registers that function as
//! the completion handler for the program.

pub const DEFAULT_WORDS_VAR: &str = "COMP_WORDS";
pub const DEFAULT_CWORD_VAR: &str = "COMP_CWORD";

const COMPLETION_SCRIPT: &str = r#"
%complete_func%() {
    COMPREPLY=( $( env %words_var%="${COMP_WORDS[*]}" \
                   %cword_var%=$COMP_CWORD \
                   %complete_var%=complete $1 ) )
    return 0
}

complete -F %complete_func% -o default %prog_name%
"#;

/// Inputs for rendering the completion script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTemplate<'a> {
    prog_name: &'a str,
    complete_var: &'a str,
    words_var: &'a str,
    cword_var: &'a str,
}

impl<'a> ScriptTemplate<'a> {
    pub fn new(prog_name: &'a str, complete_var: &'a str) -> Self {
        Self {
            prog_name,
            complete_var,
            words_var: DEFAULT_WORDS_VAR,
            cword_var: DEFAULT_CWORD_VAR,
        }
    }

    /// Use different variable names for the word list and cursor index
    pub fn with_vars(mut self, words_var: &'a str, cword_var: &'a str) -> Self {
        self.words_var = words_var;
        self.cword_var = cword_var;
        self
    }

    pub fn render(&self) -> String {
        let script = COMPLETION_SCRIPT
            .replace("%complete_func%", &completion_function_name(self.prog_name))
            .replace("%words_var%", self.words_var)
            .replace("%cword_var%", self.cword_var)
            .replace("%complete_var%", self.complete_var)
            .replace("%prog_name%", self.prog_name);
        format!("{};", script.trim())
    }
}

/// Render the completion script with the default variable names
pub fn render(prog_name: &str, complete_var: &str) -> String {
    ScriptTemplate::new(prog_name, complete_var).render()
}

/// Shell function name for a program, e.g. `_mytool_completion` for `my-tool`
pub fn completion_function_name(prog_name: &str) -> String {
    let ident: String = prog_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    format!("_{ident}_completion")
}

/// Default completion variable for a program, e.g. `_MY_TOOL_COMPLETE` for `my-tool`
pub fn default_complete_var(prog_name: &str) -> String {
    let ident: String = prog_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("_{ident}_COMPLETE")
}
