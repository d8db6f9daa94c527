//! Configuration files: variable definitions only
//!
//! Included files and the `.conf` sibling of a document may hold blank
//! lines, comments and `name = value` lines. Anything else is an error.

use crate::error::{ParseError, Result};
use crate::line::{classify, LineKind};
use crate::source::LineSource;
use std::collections::BTreeMap;
use std::path::Path;

/// Global variables collected while loading, last definition wins
pub type ConfigVars = BTreeMap<String, String>;

/// Read a configuration file into `vars`
pub fn load_conf_file(path: &Path, vars: &mut ConfigVars) -> Result<()> {
    let mut source = LineSource::open(path)?;
    load_conf_source(&mut source, vars)
}

/// Read configuration lines from an open source into `vars`
pub fn load_conf_source(source: &mut LineSource, vars: &mut ConfigVars) -> Result<()> {
    let mut count = 0;
    while source.read_line() {
        match classify(source.current_line()) {
            LineKind::Empty | LineKind::Comment | LineKind::Attribute => {}
            LineKind::Variable { name, value } => {
                vars.insert(name, value);
                count += 1;
            }
            _ => return Err(ParseError::InvalidConfLine { pos: source.pos() }),
        }
    }
    log::debug!("{} variable(s) read from {}", count, source.filename());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_and_comments() {
        let mut source = LineSource::from_text("a.conf", "# globals\n\nA = 1\nB=two words\nA = 3\n");
        let mut vars = ConfigVars::new();
        load_conf_source(&mut source, &mut vars).unwrap();
        assert_eq!(vars.get("A").map(String::as_str), Some("3"));
        assert_eq!(vars.get("B").map(String::as_str), Some("two words"));
    }

    #[test]
    fn test_command_line_is_rejected() {
        let mut source = LineSource::from_text("a.conf", "A = 1\necho hi\n");
        let err = load_conf_source(&mut source, &mut ConfigVars::new()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidConfLine { ref pos } if pos.line == 2));
    }

    #[test]
    fn test_procedure_header_is_rejected() {
        let mut source = LineSource::from_text("a.conf", "build() {\n}\n");
        assert!(load_conf_source(&mut source, &mut ConfigVars::new()).is_err());
    }
}
