//! Line-by-line access to a document

use crate::error::{ParseError, Result};
use pipefile_core::SourcePos;
use std::fs;
use std::path::Path;

/// Physical lines of a named document with a read cursor
///
/// The cursor starts before the first line; [`LineSource::read_line`] moves
/// it forward. Positions are reported as `file(line)`.
#[derive(Debug, Clone)]
pub struct LineSource {
    filename: String,
    lines: Vec<String>,
    line_no: usize,
}

impl LineSource {
    /// Read a whole file
    ///
    /// The file is closed before this returns, whatever happens later.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_text(path.display().to_string(), &text))
    }

    /// Use in-memory text as a document named `filename`
    pub fn from_text(filename: impl Into<String>, text: &str) -> Self {
        Self {
            filename: filename.into(),
            lines: text.lines().map(String::from).collect(),
            line_no: 0,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Line under the cursor, empty before the first read
    pub fn current_line(&self) -> &str {
        if self.line_no == 0 {
            return "";
        }
        self.lines
            .get(self.line_no - 1)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Move to the next line, false at end of file
    pub fn read_line(&mut self) -> bool {
        if self.line_no < self.lines.len() {
            self.line_no += 1;
            true
        } else {
            false
        }
    }

    /// Position of the line under the cursor
    pub fn pos(&self) -> SourcePos {
        SourcePos::new(self.filename.clone(), self.line_no)
    }
}
