use std::{fmt, io};

/// Crate-wide `Result` type using [`CompleteError`] as the error.
pub type Result<T> = std::result::Result<T, CompleteError>;

/// Top-level error type for cmdcomplete operations.
#[derive(Debug)]
pub enum CompleteError {
    /// Configuration errors.
    Config(ConfigError),

    /// Invalid command tree declaration.
    Declaration(DeclarationError),

    /// Raised only by strict parsing; resilient parsing records these instead.
    Parse(ParseError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Errors recorded while parsing words against a command's parameters.
///
/// The tolerant parser never returns these through `Err`; they are collected
/// in order on the parse state so completion can look at the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Option token not declared on the active command.
    NoSuchOption {
        /// The token as typed, without any `=value` suffix.
        token: String,
        /// Declared tokens that start with `token`.
        possibilities: Vec<String>,
    },

    /// A value-taking option appeared without its value.
    MissingValue { token: String },

    /// A value outside a closed domain was supplied.
    InvalidValue {
        /// Name of the parameter that rejected the value.
        param: String,
        value: String,
    },

    /// A flag was given an inline `=value`.
    UnexpectedValue { token: String },
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// A required environment variable is absent.
    MissingEnv(String),
}

/// Errors in a command tree declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// Two parameters of one command share an invocation token.
    DuplicateToken { command: String, token: String },

    /// Two children of one group share a name.
    DuplicateCommand { parent: String, name: String },

    /// An option was declared without any invocation token.
    NoTokens { command: String, param: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for CompleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompleteError::Config(e) => write!(f, "Configuration error: {e}"),
            CompleteError::Declaration(e) => write!(f, "Declaration error: {e}"),
            CompleteError::Parse(e) => write!(f, "{e}"),
            CompleteError::Io(e) => write!(f, "I/O error: {e}"),
            CompleteError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoSuchOption {
                token,
                possibilities,
            } => {
                write!(f, "no such option: {token}")?;
                match possibilities.as_slice() {
                    [] => Ok(()),
                    [one] => write!(f, " (did you mean {one}?)"),
                    many => write!(f, " (possible options: {})", many.join(", ")),
                }
            }
            ParseError::MissingValue { token } => write!(f, "{token} option requires an argument"),
            ParseError::InvalidValue { param, value } => {
                write!(f, "invalid value for {param}: '{value}'")
            }
            ParseError::UnexpectedValue { token } => {
                write!(f, "{token} option does not take a value")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::MissingEnv(name) => write!(f, "Environment variable {name} is not set"),
        }
    }
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationError::DuplicateToken { command, token } => {
                write!(f, "command '{command}' declares '{token}' more than once")
            }
            DeclarationError::DuplicateCommand { parent, name } => {
                write!(f, "group '{parent}' declares subcommand '{name}' more than once")
            }
            DeclarationError::NoTokens { command, param } => {
                write!(f, "option '{param}' of command '{command}' has no tokens")
            }
        }
    }
}

impl std::error::Error for CompleteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompleteError::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ParseError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for DeclarationError {}

/* ========================= Conversions to CompleteError ========================= */

impl From<io::Error> for CompleteError {
    fn from(err: io::Error) -> Self {
        CompleteError::Io(err)
    }
}

impl From<ConfigError> for CompleteError {
    fn from(err: ConfigError) -> Self {
        CompleteError::Config(err)
    }
}

impl From<DeclarationError> for CompleteError {
    fn from(err: DeclarationError) -> Self {
        CompleteError::Declaration(err)
    }
}

impl From<ParseError> for CompleteError {
    fn from(err: ParseError) -> Self {
        CompleteError::Parse(err)
    }
}

impl From<String> for CompleteError {
    fn from(msg: String) -> Self {
        CompleteError::Generic(msg)
    }
}

impl From<&str> for CompleteError {
    fn from(msg: &str) -> Self {
        CompleteError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_such_option_display() {
        let err = ParseError::NoSuchOption {
            token: "--verb".into(),
            possibilities: vec!["--verbose".into()],
        };
        assert_eq!(err.to_string(), "no such option: --verb (did you mean --verbose?)");

        let err = ParseError::NoSuchOption {
            token: "-x".into(),
            possibilities: Vec::new(),
        };
        assert_eq!(err.to_string(), "no such option: -x");
    }

    #[test]
    fn test_missing_value_display() {
        let err = ParseError::MissingValue {
            token: "--level".into(),
        };
        assert_eq!(err.to_string(), "--level option requires an argument");
    }

    #[test]
    fn test_conversion_into_complete_error() {
        let err: CompleteError = ConfigError::MissingEnv("COMP_CWORD".into()).into();
        assert!(matches!(err, CompleteError::Config(ConfigError::MissingEnv(_))));
        assert_eq!(
            err.to_string(),
            "Configuration error: Environment variable COMP_CWORD is not set"
        );
    }
}
