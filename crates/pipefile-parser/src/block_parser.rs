//! Recursive parsing of bracketed blocks and command lines
//!
//! Nested blocks are appended to the pipeline's block table as soon as they
//! are closed and referenced from their parent by index. The parent itself
//! is returned to the caller, which decides where it goes.

use crate::error::{ParseError, Result};
use crate::line;
use crate::source::LineSource;
use pipefile_core::shell::{CommandBuffer, LexOutcome};
use pipefile_core::{Block, BracketKind, CommandItem, Pipeline};

/// Parser for the body of one block
pub struct BlockParser<'a> {
    source: &'a mut LineSource,
    pipeline: &'a mut Pipeline,
}

impl<'a> BlockParser<'a> {
    pub fn new(source: &'a mut LineSource, pipeline: &'a mut Pipeline) -> Self {
        Self { source, pipeline }
    }

    /// Parse a block whose opening bracket is on the current line
    ///
    /// Reads up to and including the matching closing bracket. Blank and
    /// comment lines inside the block are skipped.
    pub fn parse_block(&mut self, bracket: BracketKind) -> Result<Block> {
        let mut block = Block::new(bracket.is_parallel());

        loop {
            if !self.source.read_line() {
                return Err(ParseError::MissingRightBracket {
                    pos: self.source.pos(),
                    expected: bracket.close().to_string(),
                });
            }

            let current = self.source.current_line().to_string();
            if let Some(found) = line::right_bracket(&current) {
                if found != bracket {
                    return Err(ParseError::MismatchedBracket {
                        pos: self.source.pos(),
                        found: found.close().to_string(),
                        expected: bracket.close().to_string(),
                    });
                }
                return Ok(block);
            }

            if let Some(nested) = line::left_bracket(&current) {
                let child = self.parse_block(nested)?;
                let index = self.pipeline.append_block(child);
                block.append_block(index);
            } else if line::is_empty_line(&current) || line::is_comment_line(&current) {
                continue;
            } else {
                for item in self.read_command(bracket.is_parallel())? {
                    block.push(item);
                }
            }
        }
    }

    /// Read the command starting on the current line
    ///
    /// Follows continuation lines until the text tokenizes, then splits the
    /// text into items with [`Pipeline::command_items`].
    pub fn read_command(&mut self, parallel: bool) -> Result<Vec<CommandItem>> {
        let mut buffer = CommandBuffer::new(self.source.current_line());

        let statements = loop {
            match buffer.tokenize() {
                LexOutcome::Complete(statements) => break statements,
                LexOutcome::Unfinished => {
                    if !self.source.read_line() {
                        return Err(ParseError::UnexpectedEof {
                            pos: self.source.pos(),
                        });
                    }
                    buffer.push_line(self.source.current_line());
                }
                LexOutcome::Malformed(malformed) => {
                    return Err(ParseError::MalformedCommand {
                        pos: self.source.pos(),
                        line: buffer.text().to_string(),
                        marker: malformed.marker(buffer.text()),
                    });
                }
            }
        };

        Ok(self
            .pipeline
            .command_items(buffer.text(), &statements, parallel))
    }
}
