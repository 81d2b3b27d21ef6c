//! cmdcomplete Library
//!
//! Tab-completion for programs with nested subcommands. Given the words typed
//! so far and the cursor position, the library finds the active command and
//! produces the candidates a shell should offer for the word under the cursor.
//!
//! # Modules
//!
//! - `cli`: Command-line interface of the demo binary
//! - `command`: Command tree declaration model
//! - `completion`: Context resolution, candidate engine and bash script
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `parser`: Tolerant word parser
//!
//! # Example
//!
//! ```
//! use cmdcomplete::command::{CommandNode, Param};
//! use cmdcomplete::completion::{CompletionEngine, CompletionQuery};
//!
//! let root = CommandNode::group("prog").param(
//!     Param::option("level")
//!         .long("level")
//!         .choices(["low", "medium", "high"]),
//! );
//!
//! let engine = CompletionEngine::new(&root, "prog");
//! let query = CompletionQuery::new(["prog", "--level=m"], 1);
//! assert_eq!(engine.complete(&query), vec!["medium"]);
//! ```

pub mod cli;
pub mod command;
pub mod completion;
pub mod config;
pub mod error;
pub mod parser;

// Re-export commonly used types
pub use command::{CommandNode, Param, ValueDomain};
pub use completion::{CompletionEngine, CompletionQuery};
pub use config::Config;
pub use error::{CompleteError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
