//! The pipeline: owner of every block and procedure of a document
//!
//! Blocks live in a flat table and refer to each other by index, so the
//! parser can append a nested block and reference it right away. Index 0 is
//! the default block, holding whatever the document runs outside procedures.

use super::block::Block;
use super::command::CommandItem;
use super::position::SourcePos;
use super::proc_args::ProcArgs;
use super::procedure::Procedure;
use crate::error::Result;
use crate::rewrite;
use crate::shell::{tokenize, LexOutcome, Statement};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index of the default block
pub const DEFAULT_BLOCK: usize = 0;

/// A loaded pipeline document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Block table, index 0 is the default block
    blocks: Vec<Block>,

    /// Procedures by name
    procedures: BTreeMap<String, Procedure>,

    /// Where each procedure was declared
    declarations: BTreeMap<String, SourcePos>,
}

impl Pipeline {
    /// Create a pipeline with an empty sequential default block
    pub fn new() -> Self {
        Self::with_default_parallel(false)
    }

    /// Create a pipeline whose default block has the given parallel flag
    pub fn with_default_parallel(parallel: bool) -> Self {
        Self {
            blocks: vec![Block::new(parallel)],
            procedures: BTreeMap::new(),
            declarations: BTreeMap::new(),
        }
    }

    // =========================================================================
    // Block table
    // =========================================================================

    /// Append a block to the table and return its index
    pub fn append_block(&mut self, block: Block) -> usize {
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Block at `index`
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn block(&self, index: usize) -> &Block {
        &self.blocks[index]
    }

    /// Mutable block at `index`
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn block_mut(&mut self, index: usize) -> &mut Block {
        &mut self.blocks[index]
    }

    pub fn default_block(&self) -> &Block {
        &self.blocks[DEFAULT_BLOCK]
    }

    pub fn default_block_mut(&mut self) -> &mut Block {
        &mut self.blocks[DEFAULT_BLOCK]
    }

    pub fn has_any_default_command(&self) -> bool {
        !self.default_block().is_empty()
    }

    // =========================================================================
    // Procedures
    // =========================================================================

    /// Remember where a procedure is declared
    pub fn record_declaration(&mut self, name: impl Into<String>, pos: SourcePos) {
        self.declarations.insert(name.into(), pos);
    }

    /// Where a procedure was declared, if it was
    pub fn declared_at(&self, name: &str) -> Option<&SourcePos> {
        self.declarations.get(name)
    }

    /// Register a procedure
    ///
    /// # Panics
    /// Panics if a procedure with the same name exists; the loader reports
    /// redefinitions as syntax errors before getting here.
    pub fn add_procedure(&mut self, procedure: Procedure) {
        assert!(
            !self.procedures.contains_key(&procedure.name),
            "procedure '{}' registered twice",
            procedure.name
        );
        self.procedures.insert(procedure.name.clone(), procedure);
    }

    pub fn has_procedure(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    pub fn procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.get(name)
    }

    /// Procedures in name order
    pub fn procedures(&self) -> impl Iterator<Item = &Procedure> {
        self.procedures.values()
    }

    pub fn procedure_names(&self) -> impl Iterator<Item = &str> {
        self.procedures.keys().map(String::as_str)
    }

    /// Root block index of a procedure
    ///
    /// # Panics
    /// Panics if no procedure is named `name`; check with [`Pipeline::has_procedure`].
    pub fn block_index(&self, name: &str) -> usize {
        match self.procedures.get(name) {
            Some(procedure) => procedure.block_index,
            None => panic!("unknown procedure '{}'", name),
        }
    }

    /// Root block of a procedure
    ///
    /// # Panics
    /// Panics if no procedure is named `name`.
    pub fn procedure_block(&self, name: &str) -> &Block {
        self.block(self.block_index(name))
    }

    /// Names of the procedures matching a regular expression, in name order
    ///
    /// An empty pattern matches every name.
    pub fn proc_name_list(&self, pattern: &str) -> Result<Vec<String>> {
        let re = Regex::new(pattern)?;
        Ok(self
            .procedures
            .keys()
            .filter(|name| re.is_match(name))
            .cloned()
            .collect())
    }

    // =========================================================================
    // Default block helpers
    // =========================================================================

    pub fn clear_default_block(&mut self) {
        self.default_block_mut().clear();
    }

    /// Fill the empty default block with shell command lines
    ///
    /// Lines are split into items the way a loaded document is, see
    /// [`Pipeline::command_items`].
    ///
    /// # Panics
    /// Panics if the default block is not empty.
    pub fn set_default_shell_commands<S: AsRef<str>>(&mut self, parallel: bool, lines: &[S]) {
        assert!(self.default_block().is_empty(), "default block is already populated");
        self.default_block_mut().set_parallel(parallel);
        for line in lines {
            let line = line.as_ref().trim();
            let items = match tokenize(line) {
                LexOutcome::Complete(statements) => self.command_items(line, &statements, parallel),
                _ => vec![CommandItem::from_line(line)],
            };
            for item in items {
                self.default_block_mut().push(item);
            }
        }
    }

    /// Fill the empty default block with a single procedure call
    ///
    /// # Panics
    /// Panics if the default block is not empty.
    pub fn set_default_proc_call(&mut self, name: impl Into<String>, args: ProcArgs) {
        let block = self.default_block_mut();
        assert!(block.is_empty(), "default block is already populated");
        block.push(CommandItem::proc_call(name, args));
    }

    /// Items standing for one complete command line of a block
    ///
    /// Each statement becomes one item. In a parallel block the statements of
    /// one line must still run in order: they go into a new sequential block,
    /// appended here, and a single reference to it is returned. A line with a
    /// statement that is a lone bracket stays one item, since that statement
    /// on a line of its own would read back as a bracket.
    pub fn command_items(
        &mut self,
        command_line: &str,
        statements: &[Statement],
        parallel: bool,
    ) -> Vec<CommandItem> {
        if statements.len() > 1 && statements.iter().any(Statement::is_bracket) {
            return vec![CommandItem::from_statements(command_line, statements)];
        }

        let items: Vec<CommandItem> = statements.iter().map(CommandItem::from_statement).collect();
        if !parallel || items.len() < 2 {
            return items;
        }

        let mut wrapper = Block::new(false);
        for item in items {
            wrapper.push(item);
        }
        let index = self.append_block(wrapper);
        log::debug!("{} statement(s) wrapped in sequential block {}", statements.len(), index);
        vec![CommandItem::block(index)]
    }

    // =========================================================================
    // Post-load processing
    // =========================================================================

    /// Turn shell lines that call a known procedure into procedure calls
    ///
    /// Must run after the whole document is loaded so that calls to
    /// procedures declared further down resolve.
    pub fn final_check_after_load(&mut self) -> Result<()> {
        let promoted = rewrite::promote_procedure_calls(self)?;
        log::debug!("{} shell command(s) promoted to procedure calls", promoted);
        Ok(())
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Detailed description of the block table
    pub fn dump_string(&self) -> String {
        let mut s = format!("===== pipeline dump - {} block(s):\n", self.blocks.len());
        for (i, block) in self.blocks.iter().enumerate() {
            s.push_str(&format!("block[{}]: {}\n", i, block.detail()));
        }
        s.push_str("===== pipeline dump end =====");
        s
    }

    /// Write [`Pipeline::dump_string`] to the debug log
    pub fn dump(&self) {
        for line in self.dump_string().lines() {
            log::debug!("{}", line);
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Pipeline {
        let mut pipeline = Pipeline::new();
        for name in ["build", "build_docs", "test"] {
            let mut block = Block::new(false);
            block.push(CommandItem::from_line(&format!("echo {}", name)));
            let index = pipeline.append_block(block);
            pipeline.add_procedure(Procedure::new(name, index));
        }
        pipeline
    }

    #[test]
    fn test_new_pipeline_has_empty_default_block() {
        let pipeline = Pipeline::new();
        assert_eq!(pipeline.block_count(), 1);
        assert!(!pipeline.has_any_default_command());
        assert!(Pipeline::with_default_parallel(true).default_block().is_parallel());
    }

    #[test]
    fn test_procedure_lookup() {
        let pipeline = sample();
        assert!(pipeline.has_procedure("test"));
        assert!(!pipeline.has_procedure("deploy"));
        assert_eq!(pipeline.block_index("build"), 1);
        assert_eq!(pipeline.procedure_block("test").len(), 1);
    }

    #[test]
    #[should_panic(expected = "unknown procedure 'deploy'")]
    fn test_unknown_procedure_panics() {
        sample().block_index("deploy");
    }

    #[test]
    fn test_proc_name_list() {
        let pipeline = sample();
        assert_eq!(pipeline.proc_name_list("").unwrap(), vec!["build", "build_docs", "test"]);
        assert_eq!(pipeline.proc_name_list("^build").unwrap(), vec!["build", "build_docs"]);
        assert!(pipeline.proc_name_list("(").is_err());
    }

    #[test]
    fn test_default_block_helpers() {
        let mut pipeline = sample();
        pipeline.set_default_shell_commands(true, &["  echo a ", "echo b"]);
        assert!(pipeline.has_any_default_command());
        assert!(pipeline.default_block().is_parallel());
        assert_eq!(
            pipeline.default_block().items()[0].as_shell().unwrap().command_line,
            "echo a"
        );

        pipeline.clear_default_block();
        assert!(!pipeline.has_any_default_command());

        pipeline.set_default_proc_call("build", ProcArgs::new().with("target", "x"));
        assert_eq!(pipeline.default_block().items()[0].as_proc().unwrap().name, "build");
    }

    #[test]
    fn test_default_shell_commands_split_statements() {
        let mut pipeline = Pipeline::new();
        pipeline.set_default_shell_commands(false, &["a; b", "c # note"]);
        let names: Vec<&str> = pipeline.default_block().items().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parallel_default_shell_commands_wrap_statements() {
        let mut pipeline = Pipeline::new();
        pipeline.set_default_shell_commands(true, &["a; b", "c"]);
        let items = pipeline.default_block().items();
        assert_eq!(items.len(), 2);
        let wrapper = pipeline.block(items[0].block_index().unwrap());
        assert!(!wrapper.is_parallel());
        assert_eq!(wrapper.len(), 2);
    }

    #[test]
    fn test_line_with_bracket_statement_stays_whole() {
        let mut pipeline = Pipeline::new();
        pipeline.set_default_shell_commands(true, &["{ make a; make b; }"]);
        let items = pipeline.default_block().items();
        assert_eq!(items.len(), 1);
        let shell = items[0].as_shell().unwrap();
        assert_eq!(shell.command_line, "{ make a; make b; }");
        assert_eq!(shell.head, "{");
        assert_eq!(pipeline.block_count(), 1);
    }

    #[test]
    #[should_panic(expected = "already populated")]
    fn test_set_default_on_populated_block_panics() {
        let mut pipeline = Pipeline::new();
        pipeline.set_default_shell_commands(false, &["echo a"]);
        pipeline.set_default_proc_call("build", ProcArgs::new());
    }

    #[test]
    fn test_dump_string() {
        let dump = sample().dump_string();
        assert!(dump.starts_with("===== pipeline dump - 4 block(s):"));
        assert!(dump.contains("block[0]: <empty>"));
        assert!(dump.contains("block[1]: type='shell', name='echo', shellCmd='echo build'"));
    }
}
