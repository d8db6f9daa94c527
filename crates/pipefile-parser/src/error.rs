//! Parser error types
//!
//! Every syntax error names the position it was found at; the message is
//! complete when created and is passed up unchanged.

use pipefile_core::SourcePos;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// A document or configuration file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A block was closed with the other kind of bracket
    #[error("Unexpected right bracket '{found}' at {pos}, right bracket '{expected}' was expected here")]
    MismatchedBracket {
        pos: SourcePos,
        found: String,
        expected: String,
    },

    /// The document ended inside a block
    #[error("Missing right bracket '{expected}' at {pos}")]
    MissingRightBracket { pos: SourcePos, expected: String },

    /// The document ended between a procedure header and its body
    #[error("Missing left bracket for procedure declared at {pos}")]
    MissingLeftBracket { pos: SourcePos },

    /// Something other than a bracket follows a procedure header
    #[error("Unexpected line at {pos}, only '{{' or '{{{{' was expected here")]
    ExpectedLeftBracket { pos: SourcePos },

    /// An attribute comment between a procedure header and its body
    #[error("Unexpected attribute line at {pos}")]
    UnexpectedAttribute { pos: SourcePos },

    /// A right bracket outside of any block
    #[error("Unexpected right bracket '{found}' at {pos} outside of any block")]
    UnmatchedRightBracket { pos: SourcePos, found: String },

    /// The document ended inside a quoted or continued command
    #[error("Unexpected end of file at {pos} while reading a command")]
    UnexpectedEof { pos: SourcePos },

    /// A command line that can not be tokenized
    #[error("Error when parsing shell command at {pos}:\n   {line}\n   {marker}")]
    MalformedCommand {
        pos: SourcePos,
        line: String,
        marker: String,
    },

    /// A procedure name declared twice
    #[error("Duplicated procedure '{name}' at {pos}, previous definition of '{name}' was in {previous}")]
    DuplicateProcedure {
        name: String,
        pos: SourcePos,
        previous: SourcePos,
    },

    /// A configuration file line that is not a variable definition
    #[error("Invalid syntax of configuration file at {pos}, only global variable definitions are allowed")]
    InvalidConfLine { pos: SourcePos },

    /// An included file that does not exist
    #[error("Included file {path} not found, included at {pos}")]
    IncludeNotFound { path: String, pos: SourcePos },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
