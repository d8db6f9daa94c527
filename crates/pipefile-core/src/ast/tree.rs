//! Owned tree view of a block

use super::command::CommandKind;
use super::pipeline::Pipeline;
use serde::Serialize;

/// A block with its references resolved into nested values
///
/// A block holding exactly one item is represented by that item, since
/// running it is the same as running the item. Two documents that build equal
/// trees for the same block run the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockTree {
    Shell(String),
    Proc {
        name: String,
        args: Vec<(String, String)>,
    },
    Sequential(Vec<BlockTree>),
    Parallel(Vec<BlockTree>),
}

impl Pipeline {
    /// Tree view of the block at `index`
    pub fn tree(&self, index: usize) -> BlockTree {
        let block = self.block(index);
        if block.len() == 1 {
            return self.item_tree(block.items()[0].kind());
        }
        let children = block
            .items()
            .iter()
            .map(|item| self.item_tree(item.kind()))
            .collect();
        if block.is_parallel() {
            BlockTree::Parallel(children)
        } else {
            BlockTree::Sequential(children)
        }
    }

    /// Tree view of the default block
    pub fn default_tree(&self) -> BlockTree {
        self.tree(0)
    }

    fn item_tree(&self, kind: &CommandKind) -> BlockTree {
        match kind {
            CommandKind::Shell(shell) => BlockTree::Shell(shell.command_line.clone()),
            CommandKind::Proc(call) => BlockTree::Proc {
                name: call.name.clone(),
                args: call
                    .args
                    .iter()
                    .map(|(n, v)| (n.to_string(), v.to_string()))
                    .collect(),
            },
            CommandKind::Block { index } => self.tree(*index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, CommandItem};

    #[test]
    fn test_single_item_blocks_collapse() {
        let mut pipeline = Pipeline::new();
        let mut inner = Block::new(true);
        inner.push(CommandItem::from_line("a"));
        inner.push(CommandItem::from_line("b"));
        let inner = pipeline.append_block(inner);

        let mut wrapper = Block::new(false);
        wrapper.append_block(inner);
        let wrapper = pipeline.append_block(wrapper);
        pipeline.default_block_mut().append_block(wrapper);

        assert_eq!(
            pipeline.default_tree(),
            BlockTree::Parallel(vec![
                BlockTree::Shell("a".to_string()),
                BlockTree::Shell("b".to_string()),
            ])
        );
    }

    #[test]
    fn test_empty_block_is_empty_sequence() {
        assert_eq!(Pipeline::new().default_tree(), BlockTree::Sequential(vec![]));
    }
}
