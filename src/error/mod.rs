//! Error handling module for cmdcomplete.
//!
//! Two families of errors live here:
//! - Parse errors, which the tolerant parser records as plain data on a
//!   [`ParseState`](crate::parser::ParseState) and which the completion
//!   engine inspects to derive candidates
//! - Application errors (configuration, declaration, I/O) that flow through
//!   the crate-wide [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use cmdcomplete::error::{CompleteError, ParseError, Result};
//!
//! fn strict() -> Result<()> {
//!     Err(ParseError::MissingValue { token: "--level".into() }.into())
//! }
//!
//! assert!(matches!(strict(), Err(CompleteError::Parse(_))));
//! ```

pub mod kinds;

pub use kinds::{CompleteError, ConfigError, DeclarationError, ParseError, Result};
