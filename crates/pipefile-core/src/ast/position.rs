//! Source positions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line in a source file, displayed as `file(line)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePos {
    pub file: String,
    pub line: usize,
}

impl SourcePos {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.file, self.line)
    }
}
