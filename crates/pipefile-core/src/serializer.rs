//! Rendering a pipeline back to document text
//!
//! Output layout:
//!
//! ```text
//! #@ key: value
//! name() {
//!     <item>
//!     {{
//!         <item>
//!     }}
//! }
//!
//! <default block>
//! ```
//!
//! Procedures come first, in name order, separated by blank lines. The
//! default block follows after one more blank line: bare when it holds a
//! single item, bracketed otherwise. Items are indented with tabs.

use crate::ast::{CommandItem, CommandKind, Pipeline, Procedure};
use crate::traits::ShellEncoder;

/// Renders a pipeline with a given value encoder
pub struct PipelineWriter<'a> {
    pipeline: &'a Pipeline,
    encoder: &'a dyn ShellEncoder,
}

impl<'a> PipelineWriter<'a> {
    pub fn new(pipeline: &'a Pipeline, encoder: &'a dyn ShellEncoder) -> Self {
        Self { pipeline, encoder }
    }

    /// Render the whole document
    pub fn render(&self) -> String {
        let mut out = self
            .pipeline
            .procedures()
            .map(|procedure| self.render_procedure(procedure))
            .collect::<Vec<_>>()
            .join("\n");

        let default_block = self.pipeline.default_block();
        if !default_block.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            if default_block.len() == 1 {
                out.push_str(&self.render_item(&default_block.items()[0], ""));
            } else {
                out.push_str(&self.render_block(0, ""));
            }
        }
        out
    }

    /// Render one procedure with its attribute comments
    pub fn render_procedure(&self, procedure: &Procedure) -> String {
        let mut s = String::new();
        for (key, value) in &procedure.attributes {
            s.push_str(&format!("#@ {}: {}\n", key, value));
        }
        s.push_str(&procedure.name);
        s.push_str("() ");
        s.push_str(&self.render_block(procedure.block_index, ""));
        s
    }

    /// Render the block at `index` with its brackets
    pub fn render_block(&self, index: usize, indent: &str) -> String {
        let block = self.pipeline.block(index);
        let bracket = block.bracket();
        let inner = format!("{}\t", indent);

        let mut s = format!("{}{}\n", indent, bracket.open());
        for item in block.items() {
            s.push_str(&self.render_item(item, &inner));
        }
        s.push_str(&format!("{}{}\n", indent, bracket.close()));
        s
    }

    /// Render one item, terminated by a newline
    pub fn render_item(&self, item: &CommandItem, indent: &str) -> String {
        match item.kind() {
            CommandKind::Block { index } => self.render_block(*index, indent),
            _ => {
                let line = item.render_line(self.encoder).unwrap_or_default();
                format!("{}{}\n", indent, line)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Block, ProcArgs};
    use crate::shell::PosixShellEncoder;

    #[test]
    fn test_empty_pipeline_renders_nothing() {
        let pipeline = Pipeline::new();
        assert_eq!(PipelineWriter::new(&pipeline, &PosixShellEncoder).render(), "");
    }

    #[test]
    fn test_procedures_and_default_block() {
        let mut pipeline = Pipeline::new();

        let mut inner = Block::new(true);
        inner.push(CommandItem::from_line("make a"));
        inner.push(CommandItem::from_line("make b"));
        let inner = pipeline.append_block(inner);

        let mut body = Block::new(false);
        body.push(CommandItem::from_line("echo start"));
        body.append_block(inner);
        let body = pipeline.append_block(body);
        pipeline.add_procedure(
            Procedure::new("build", body)
                .with_attributes(vec![("desc".to_string(), "build all".to_string())]),
        );

        let empty = pipeline.append_block(Block::new(false));
        pipeline.add_procedure(Procedure::new("alpha", empty));

        pipeline.set_default_proc_call("build", ProcArgs::new().with("mode", "fast run"));

        let text = PipelineWriter::new(&pipeline, &PosixShellEncoder).render();
        assert_eq!(
            text,
            "alpha() {\n}\n\
             \n\
             #@ desc: build all\n\
             build() {\n\
             \techo start\n\
             \t{{\n\
             \t\tmake a\n\
             \t\tmake b\n\
             \t}}\n\
             }\n\
             \n\
             build mode='fast run'\n"
        );
    }

    #[test]
    fn test_multi_item_default_block_is_bracketed() {
        let mut pipeline = Pipeline::new();
        pipeline.set_default_shell_commands(true, &["a", "b"]);
        let text = PipelineWriter::new(&pipeline, &PosixShellEncoder).render();
        assert_eq!(text, "{{\n\ta\n\tb\n}}\n");
    }
}
