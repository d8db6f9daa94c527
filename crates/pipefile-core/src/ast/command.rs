//! Command items: the units a block schedules

use super::proc_args::ProcArgs;
use crate::shell::{tokenize, LexOutcome, Statement};
use crate::traits::ShellEncoder;
use serde::{Deserialize, Serialize};

/// An opaque shell invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellCommand {
    /// Full command text as written in the document
    pub command_line: String,

    /// First word, quoting retained
    pub head: String,

    /// Remaining words, quoting retained
    pub args: Vec<String>,
}

/// A call to a named procedure with keyword arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcCall {
    pub name: String,
    pub args: ProcArgs,
}

/// What a command item does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CommandKind {
    /// Run a shell command line
    Shell(ShellCommand),

    /// Call a procedure
    Proc(ProcCall),

    /// Run a block of the pipeline's block table, by index
    Block { index: usize },
}

/// One scheduled unit of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandItem {
    /// Display name, used by executors for labels and log names
    name: String,

    kind: CommandKind,
}

impl CommandItem {
    /// Shell item from already tokenized words
    pub fn shell(command_line: impl Into<String>, head: impl Into<String>, args: Vec<String>) -> Self {
        let command_line = command_line.into();
        Self {
            name: display_name(&command_line),
            kind: CommandKind::Shell(ShellCommand {
                command_line,
                head: head.into(),
                args,
            }),
        }
    }

    /// Shell item from one tokenized statement
    pub fn from_statement(statement: &Statement) -> Self {
        Self::shell(
            statement.text.clone(),
            statement.head(),
            statement.args().to_vec(),
        )
    }

    /// Shell item from a raw command line
    ///
    /// A line holding several statements keeps them in one item; see
    /// [`CommandItem::from_statements`]. A line that does not tokenize gets no
    /// words at all.
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        match tokenize(line) {
            LexOutcome::Complete(statements) => Self::from_statements(line, &statements),
            _ => Self::shell(line, "", Vec::new()),
        }
    }

    /// One shell item for a whole command line of several statements
    ///
    /// The `;` separators show up as words so the item is never taken for a
    /// procedure call.
    pub fn from_statements(command_line: &str, statements: &[Statement]) -> Self {
        let mut words: Vec<String> = Vec::new();
        for (i, statement) in statements.iter().enumerate() {
            if i > 0 {
                words.push(";".to_string());
            }
            words.extend(statement.words.iter().cloned());
        }
        if words.is_empty() {
            return Self::shell(command_line, "", Vec::new());
        }
        let head = words.remove(0);
        Self::shell(command_line, head, words)
    }

    /// Procedure call item
    pub fn proc_call(name: impl Into<String>, args: ProcArgs) -> Self {
        let name = name.into();
        Self {
            name: name.clone(),
            kind: CommandKind::Proc(ProcCall { name, args }),
        }
    }

    /// Reference to a block of the pipeline
    pub fn block(index: usize) -> Self {
        Self {
            name: "block".to_string(),
            kind: CommandKind::Block { index },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    /// `shell`, `proc` or `block`
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            CommandKind::Shell(_) => "shell",
            CommandKind::Proc(_) => "proc",
            CommandKind::Block { .. } => "block",
        }
    }

    pub fn as_shell(&self) -> Option<&ShellCommand> {
        match &self.kind {
            CommandKind::Shell(shell) => Some(shell),
            _ => None,
        }
    }

    pub fn as_proc(&self) -> Option<&ProcCall> {
        match &self.kind {
            CommandKind::Proc(call) => Some(call),
            _ => None,
        }
    }

    pub fn block_index(&self) -> Option<usize> {
        match self.kind {
            CommandKind::Block { index } => Some(index),
            _ => None,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, CommandKind::Block { .. })
    }

    /// Single line text of a shell or procedure item
    ///
    /// Returns `None` for block references, which need the pipeline to render.
    pub fn render_line(&self, encoder: &dyn ShellEncoder) -> Option<String> {
        match &self.kind {
            CommandKind::Shell(shell) => Some(shell.command_line.clone()),
            CommandKind::Proc(call) => Some(format!("{}{}", call.name, call.args.render(encoder))),
            CommandKind::Block { .. } => None,
        }
    }

    /// One line description for dumps
    pub fn detail(&self) -> String {
        let mut s = format!("type='{}', name='{}'", self.type_name(), self.name);
        match &self.kind {
            CommandKind::Shell(shell) => {
                s.push_str(&format!(", shellCmd='{}'", shell.command_line));
            }
            CommandKind::Proc(call) => {
                let args: Vec<String> = call.args.iter().map(|(n, v)| format!("{}={}", n, v)).collect();
                s.push_str(&format!(", procName='{}', procArgs={{{}}}", call.name, args.join(" ")));
            }
            CommandKind::Block { index } => {
                s.push_str(&format!(", blockIndex={}", index));
            }
        }
        s
    }
}

/// Label derived from a command line
///
/// Keeps `[-_+0-9A-Za-z]` of the first word; falls back to `shell`.
fn display_name(command_line: &str) -> String {
    let name: String = command_line
        .chars()
        .take_while(|c| !c.is_whitespace())
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        .collect();
    if name.is_empty() {
        "shell".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::PosixShellEncoder;

    #[test]
    fn test_display_name_is_sanitized_head() {
        assert_eq!(CommandItem::from_line("./build.sh --fast").name(), "buildsh");
        assert_eq!(CommandItem::from_line("make-all x").name(), "make-all");
        assert_eq!(CommandItem::from_line("$(pwd)").name(), "pwd");
        assert_eq!(CommandItem::from_line("'*'").name(), "shell");
    }

    #[test]
    fn test_proc_and_block_names() {
        assert_eq!(CommandItem::proc_call("build", ProcArgs::new()).name(), "build");
        assert_eq!(CommandItem::block(3).name(), "block");
        assert_eq!(CommandItem::block(3).block_index(), Some(3));
    }

    #[test]
    fn test_variant_accessors() {
        let item = CommandItem::from_line("echo hi");
        assert!(item.as_shell().is_some());
        assert!(item.as_proc().is_none());
        assert_eq!(item.block_index(), None);
        assert_eq!(item.type_name(), "shell");
    }

    #[test]
    fn test_from_line_with_several_statements() {
        let item = CommandItem::from_line("build a=1; rm x");
        let shell = item.as_shell().unwrap();
        assert_eq!(shell.head, "build");
        assert_eq!(shell.args, vec!["a=1", ";", "rm", "x"]);
        assert_eq!(shell.command_line, "build a=1; rm x");
    }

    #[test]
    fn test_from_line_that_does_not_tokenize() {
        let item = CommandItem::from_line("echo \"open");
        let shell = item.as_shell().unwrap();
        assert_eq!(shell.head, "");
        assert!(shell.args.is_empty());
    }

    #[test]
    fn test_render_line() {
        let call = CommandItem::proc_call("deploy", ProcArgs::new().with("env", "prod a"));
        assert_eq!(call.render_line(&PosixShellEncoder).unwrap(), "deploy env='prod a'");
        assert!(CommandItem::block(1).render_line(&PosixShellEncoder).is_none());
    }
}
