//! Pipefile Core - document model for pipefile pipelines
//!
//! This crate provides the pieces shared by the parser and the repository:
//! - The document model: procedures, blocks and command items
//! - Shell command tokenizing and quoting
//! - Promotion of shell lines into procedure calls after loading
//! - Serialization back to the document text format
//! - Error types

pub mod ast;
pub mod error;
pub mod rewrite;
pub mod serializer;
pub mod shell;
pub mod traits;

// Re-export commonly used types
pub use ast::{
    Block, BlockTree, BracketKind, CommandItem, CommandKind, Pipeline, ProcArgs, ProcCall,
    Procedure, ShellCommand, SourcePos,
};
pub use error::{CoreError, Result};
pub use serializer::PipelineWriter;
pub use shell::PosixShellEncoder;
pub use traits::{FileSystemProbe, ShellEncoder};
