//! Classification of single document lines
//!
//! The top-level loop asks [`classify`] what a line is; inside blocks the
//! parser uses the individual predicates, since a block only cares about
//! brackets, blank lines, comments and commands.

use pipefile_core::BracketKind;

const COMMENT_MARKER: char = '#';
const ATTRIBUTE_MARKER: &str = "#@";
const INCLUDE_KEYWORD: &str = "include";

/// What a line is, tested in this order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `include <file>`
    Include(String),
    /// `name()` with an optional opening bracket on the same line
    FunctionHeader {
        name: String,
        bracket: Option<BracketKind>,
    },
    /// `{` or `{{` alone on the line
    LeftBracket(BracketKind),
    /// `}` or `}}` alone on the line
    RightBracket(BracketKind),
    /// Nothing but whitespace
    Empty,
    /// `#@ key: value`, well formed or not
    Attribute,
    /// Any other `#` line
    Comment,
    /// `name = value`
    Variable { name: String, value: String },
    /// Anything else is a shell command
    Command,
}

/// Classify a line
pub fn classify(line: &str) -> LineKind {
    if let Some(target) = include_target(line) {
        return LineKind::Include(target);
    }
    if let Some((name, bracket)) = function_header(line) {
        return LineKind::FunctionHeader { name, bracket };
    }
    if let Some(bracket) = left_bracket(line) {
        return LineKind::LeftBracket(bracket);
    }
    if let Some(bracket) = right_bracket(line) {
        return LineKind::RightBracket(bracket);
    }
    if is_empty_line(line) {
        return LineKind::Empty;
    }
    if is_attribute_line(line) {
        return LineKind::Attribute;
    }
    if is_comment_line(line) {
        return LineKind::Comment;
    }
    if let Some((name, value)) = variable(line) {
        return LineKind::Variable { name, value };
    }
    LineKind::Command
}

pub fn is_empty_line(line: &str) -> bool {
    line.trim().is_empty()
}

/// Comment lines, attribute comments included
pub fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_MARKER)
}

pub fn is_attribute_line(line: &str) -> bool {
    line.trim_start().starts_with(ATTRIBUTE_MARKER)
}

/// Key and value of a `#@ key: value` line
///
/// Keys are made of `[A-Za-z0-9_.-]`; the value may be empty.
pub fn parse_attribute(line: &str) -> Option<(String, String)> {
    let rest = line.trim().strip_prefix(ATTRIBUTE_MARKER)?;
    let (key, value) = rest.split_once(':')?;
    let key = key.trim();
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// Bracket that is the only thing on the line
pub fn left_bracket(line: &str) -> Option<BracketKind> {
    bracket_token(line.trim(), "{", "{{")
}

/// Closing bracket that is the only thing on the line
pub fn right_bracket(line: &str) -> Option<BracketKind> {
    bracket_token(line.trim(), "}", "}}")
}

fn bracket_token(token: &str, single: &str, double: &str) -> Option<BracketKind> {
    if token == single {
        Some(BracketKind::Sequential)
    } else if token == double {
        Some(BracketKind::Parallel)
    } else {
        None
    }
}

/// File named by an `include` line
///
/// The name may be wrapped in double quotes, single quotes or `<>`.
pub fn include_target(line: &str) -> Option<String> {
    let rest = line.trim().strip_prefix(INCLUDE_KEYWORD)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let target = rest.trim();
    let target = strip_pair(target, '"', '"')
        .or_else(|| strip_pair(target, '\'', '\''))
        .or_else(|| strip_pair(target, '<', '>'))
        .unwrap_or(target);
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}

fn strip_pair(s: &str, open: char, close: char) -> Option<&str> {
    if s.len() >= 2 && s.starts_with(open) && s.ends_with(close) {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

/// Name and same-line bracket of a `name()` header
///
/// Names start with a letter or `_` and go on with `[A-Za-z0-9_.-]`.
/// Anything after `)` other than `{` or `{{` makes the line a command.
pub fn function_header(line: &str) -> Option<(String, Option<BracketKind>)> {
    let line = line.trim();
    let name_len = identifier_len(line, |c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if name_len == 0 {
        return None;
    }
    let (name, rest) = line.split_at(name_len);
    let rest = rest.trim_start().strip_prefix('(')?;
    let rest = rest.trim_start().strip_prefix(')')?;
    let rest = rest.trim();
    if rest.is_empty() {
        return Some((name.to_string(), None));
    }
    let bracket = left_bracket(rest)?;
    Some((name.to_string(), Some(bracket)))
}

/// `name = value` with `name` a plain identifier
pub fn variable(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    let name_len = identifier_len(line, |c| c.is_ascii_alphanumeric() || c == '_');
    if name_len == 0 {
        return None;
    }
    let (name, rest) = line.split_at(name_len);
    let value = rest.trim_start().strip_prefix('=')?;
    Some((name.to_string(), value.trim().to_string()))
}

/// Length of the identifier at the start of `s`
fn identifier_len(s: &str, is_tail: impl Fn(char) -> bool) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    chars
        .find(|(_, c)| !is_tail(*c))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
