//! Capabilities the document model consumes but does not implement
//!
//! - [`ShellEncoder`]: quoting values when writing procedure calls back out
//! - [`FileSystemProbe`]: file checks needed while loading documents

use std::path::{Path, PathBuf};

/// Produces shell-safe literals for re-emitted values
pub trait ShellEncoder {
    /// Quote `value` so a shell reads it back as exactly `value`
    fn quote(&self, value: &str) -> String;
}

/// Read-only questions about the file system
///
/// Loading needs these to resolve `include` targets and the `.conf` sibling
/// of a document; the repository layer provides the local implementation.
pub trait FileSystemProbe: Send + Sync {
    /// Whether something exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` carries an executable permission bit
    fn is_executable(&self, path: &Path) -> bool;

    /// Whether `path` looks like a text file rather than a binary
    fn is_text_file(&self, path: &Path) -> bool;

    /// Directory part of `path`, `.` when there is none
    fn dir_name(&self, path: &Path) -> PathBuf;
}
