//! Error types for pipefile core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// A procedure call names the same option twice
    #[error("Duplicated option '{option}' in call to procedure '{procedure}': {command_line}")]
    DuplicatedOption {
        procedure: String,
        option: String,
        command_line: String,
    },

    /// A procedure name filter is not a valid regular expression
    #[error("Invalid procedure name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
