//! Document model for pipefile pipelines
//!
//! This module contains the in-memory representation of a loaded document:
//! - Procedure arguments and command items
//! - Blocks (sequential or parallel groups of items)
//! - Procedures and the pipeline that owns every block
//! - Source positions for diagnostics

pub mod block;
pub mod command;
pub mod pipeline;
pub mod position;
pub mod proc_args;
pub mod procedure;
pub mod tree;

pub use block::{Block, BracketKind};
pub use command::{CommandItem, CommandKind, ProcCall, ShellCommand};
pub use pipeline::Pipeline;
pub use position::SourcePos;
pub use proc_args::ProcArgs;
pub use procedure::Procedure;
pub use tree::BlockTree;
