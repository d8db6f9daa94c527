//! Pipefile Parser - text to document model
//!
//! This crate reads pipefile documents into a [`pipefile_core::Pipeline`]:
//! - [`LineSource`]: physical lines of a file with positions
//! - [`line`]: classification of single lines
//! - [`BlockParser`]: recursive parsing of `{ }` and `{{ }}` blocks
//! - [`PipelineLoader`]: the whole document, includes and `.conf` siblings

pub mod block_parser;
pub mod conf;
pub mod config;
pub mod error;
pub mod line;
pub mod loader;
pub mod source;

// Re-export main parser types
pub use block_parser::BlockParser;
pub use conf::ConfigVars;
pub use config::LoadOptions;
pub use error::{ParseError, Result};
pub use line::LineKind;
pub use loader::{LoadedPipeline, PipelineLoader};
pub use source::LineSource;
