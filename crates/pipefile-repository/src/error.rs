//! Error types for the repository layer

use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur while loading or saving documents
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Syntax or configuration error in a document
    #[error(transparent)]
    Parse(#[from] pipefile_parser::ParseError),

    /// Error raised by the document model after loading
    #[error(transparent)]
    Model(#[from] pipefile_core::CoreError),

    /// I/O error while writing a document
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
