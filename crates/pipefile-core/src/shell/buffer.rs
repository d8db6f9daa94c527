//! Joining physical lines into one command string

use super::lexer::{tokenize, LexOutcome};

/// Accumulates physical lines until they form a complete command
///
/// A line ending in `\` is joined to the next one without the backslash and
/// without a newline; any other unfinished line is joined with a newline,
/// which is the case of a quote spanning several lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuffer {
    text: String,
}

impl CommandBuffer {
    /// Start a buffer with the first physical line
    pub fn new(first_line: &str) -> Self {
        Self {
            text: first_line.trim().to_string(),
        }
    }

    /// Append the next physical line
    pub fn push_line(&mut self, line: &str) {
        if self.text.ends_with('\\') {
            self.text.pop();
        } else {
            self.text.push('\n');
        }
        self.text.push_str(line.trim());
    }

    /// Joined text so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tokenize the joined text
    pub fn tokenize(&self) -> LexOutcome {
        tokenize(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslash_continuation_joins_without_newline() {
        let mut buffer = CommandBuffer::new("cmd \\");
        assert!(buffer.tokenize().is_unfinished());

        buffer.push_line("  more");
        assert_eq!(buffer.text(), "cmd more");
        match buffer.tokenize() {
            LexOutcome::Complete(statements) => {
                assert_eq!(statements.len(), 1);
                assert_eq!(statements[0].head(), "cmd");
                assert_eq!(statements[0].args(), &["more".to_string()]);
            }
            other => panic!("Expected complete, got {:?}", other),
        }
    }

    #[test]
    fn test_open_quote_continuation_inserts_newline() {
        let mut buffer = CommandBuffer::new("echo \"first");
        assert!(buffer.tokenize().is_unfinished());

        buffer.push_line("second\"");
        assert_eq!(buffer.text(), "echo \"first\nsecond\"");
        assert!(matches!(buffer.tokenize(), LexOutcome::Complete(_)));
    }
}
