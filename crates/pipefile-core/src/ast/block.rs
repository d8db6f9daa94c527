//! Blocks: ordered groups of command items

use super::command::CommandItem;
use serde::{Deserialize, Serialize};

/// Bracket flavour of a block
///
/// `{ }` groups run their items one after another, `{{ }}` groups may run
/// them concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketKind {
    Sequential,
    Parallel,
}

impl BracketKind {
    pub fn from_parallel(parallel: bool) -> Self {
        if parallel {
            BracketKind::Parallel
        } else {
            BracketKind::Sequential
        }
    }

    pub fn is_parallel(self) -> bool {
        self == BracketKind::Parallel
    }

    /// `{` or `{{`
    pub fn open(self) -> &'static str {
        match self {
            BracketKind::Sequential => "{",
            BracketKind::Parallel => "{{",
        }
    }

    /// `}` or `}}`
    pub fn close(self) -> &'static str {
        match self {
            BracketKind::Sequential => "}",
            BracketKind::Parallel => "}}",
        }
    }
}

/// Ordered command items plus their execution intent
///
/// The parallel flag is metadata for the executor: items of a sequential
/// block depend on the ones before them, items of a parallel block do not.
/// Nested blocks are referenced by index through [`CommandItem::block`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    items: Vec<CommandItem>,
    parallel: bool,
}

impl Block {
    /// Create an empty block
    pub fn new(parallel: bool) -> Self {
        Self {
            items: Vec::new(),
            parallel,
        }
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn bracket(&self) -> BracketKind {
        BracketKind::from_parallel(self.parallel)
    }

    pub fn items(&self) -> &[CommandItem] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [CommandItem] {
        &mut self.items
    }

    pub fn push(&mut self, item: CommandItem) {
        self.items.push(item);
    }

    /// Append a reference to the block at `index`
    pub fn append_block(&mut self, index: usize) {
        self.items.push(CommandItem::block(index));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove all items and reset to sequential
    pub fn clear(&mut self) {
        self.items.clear();
        self.parallel = false;
    }

    /// Description for dumps
    pub fn detail(&self) -> String {
        match self.items.len() {
            0 => "<empty>".to_string(),
            1 => self.items[0].detail(),
            n => {
                let mut s = format!(" (parallel = {}) {} items:", self.parallel, n);
                for (i, item) in self.items.iter().enumerate() {
                    s.push_str(&format!("\n  [{}]{}", i, item.detail()));
                }
                s
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets() {
        assert_eq!(BracketKind::Sequential.open(), "{");
        assert_eq!(BracketKind::Parallel.close(), "}}");
        assert!(Block::new(true).bracket().is_parallel());
    }

    #[test]
    fn test_clear_resets_parallel() {
        let mut block = Block::new(true);
        block.push(CommandItem::from_line("echo hi"));
        block.clear();
        assert!(block.is_empty());
        assert!(!block.is_parallel());
    }

    #[test]
    fn test_detail() {
        let mut block = Block::new(false);
        assert_eq!(block.detail(), "<empty>");

        block.push(CommandItem::from_line("echo hi"));
        assert!(block.detail().starts_with("type='shell'"));

        block.append_block(2);
        let detail = block.detail();
        assert!(detail.contains("(parallel = false) 2 items:"));
        assert!(detail.contains("[1]type='block', name='block', blockIndex=2"));
    }
}
