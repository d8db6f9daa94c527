//! Promotion of shell lines into procedure calls
//!
//! After loading, a shell item whose command word names a procedure of the
//! pipeline becomes a procedure call, provided every argument has the form
//! `name=value`. Anything else stays a plain shell command.

use crate::ast::{CommandItem, Pipeline, ProcArgs};
use crate::error::{CoreError, Result};
use crate::shell::unquote;
use std::collections::HashSet;

/// Promote every eligible item of every block, returning how many changed
pub fn promote_procedure_calls(pipeline: &mut Pipeline) -> Result<usize> {
    let names: HashSet<String> = pipeline.procedure_names().map(String::from).collect();
    let mut promoted = 0;
    for block in pipeline.blocks_mut() {
        for item in block.items_mut() {
            if let Some(call) = promote(item, &names)? {
                log::debug!("promoted '{}' to a procedure call", item.name());
                *item = call;
                promoted += 1;
            }
        }
    }
    Ok(promoted)
}

/// The procedure call `item` stands for, if any
///
/// Fails only when the call names an option twice.
pub fn promote(item: &CommandItem, procedures: &HashSet<String>) -> Result<Option<CommandItem>> {
    let shell = match item.as_shell() {
        Some(shell) => shell,
        None => return Ok(None),
    };
    if !procedures.contains(&shell.head) {
        return Ok(None);
    }

    let mut args = ProcArgs::new();
    for word in &shell.args {
        let (name, value) = match split_option(word) {
            Some(option) => option,
            None => return Ok(None),
        };
        if args.has(name) {
            return Err(CoreError::DuplicatedOption {
                procedure: shell.head.clone(),
                option: name.to_string(),
                command_line: shell.command_line.clone(),
            });
        }
        args.add(name, unquote(value));
    }
    Ok(Some(CommandItem::proc_call(shell.head.clone(), args)))
}

/// Split `name=value`, where name is made of word characters
fn split_option(word: &str) -> Option<(&str, &str)> {
    let eq = word.find('=')?;
    let name = &word[..eq];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((name, &word[eq + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_option() {
        assert_eq!(split_option("target=release"), Some(("target", "release")));
        assert_eq!(split_option("a=b=c"), Some(("a", "b=c")));
        assert_eq!(split_option("empty="), Some(("empty", "")));
        assert_eq!(split_option("bad-token"), None);
        assert_eq!(split_option("=x"), None);
        assert_eq!(split_option("my-opt=x"), None);
        assert_eq!(split_option("'a'=x"), None);
    }

    #[test]
    fn test_promotes_known_procedure() {
        let item = CommandItem::from_line("build target=release msg='a b'");
        let call = promote(&item, &names(&["build"])).unwrap().unwrap();
        let call = call.as_proc().unwrap();
        assert_eq!(call.name, "build");
        assert_eq!(call.args.get("target"), Some("release"));
        assert_eq!(call.args.get("msg"), Some("a b"));
    }

    #[test]
    fn test_leaves_other_items_alone() {
        let procs = names(&["build"]);
        for line in ["make build", "build bad-token", "build a=1 | tee log", "build a=1; b"] {
            let item = CommandItem::from_line(line);
            assert!(promote(&item, &procs).unwrap().is_none(), "{}", line);
        }
        assert!(promote(&CommandItem::block(1), &procs).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_option_is_an_error() {
        let item = CommandItem::from_line("build a=1 a=2");
        let err = promote(&item, &names(&["build"])).unwrap_err();
        assert!(err.to_string().contains("Duplicated option 'a'"));
    }
}
