//! Shell command handling
//!
//! The document treats shell command lines as opaque text, but it still needs
//! to know where words and statements begin and end: to join continuation
//! lines, to split `a; b` into separate items and to recognize procedure calls.

pub mod buffer;
pub mod lexer;
pub mod quote;

pub use buffer::CommandBuffer;
pub use lexer::{tokenize, LexOutcome, Malformed, Statement};
pub use quote::{unquote, PosixShellEncoder};
