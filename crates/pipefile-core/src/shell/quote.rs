//! Removing and re-applying shell quoting on single words

use crate::traits::ShellEncoder;

/// Remove the quoting of a word produced by the tokenizer
///
/// Single quoted spans are copied literally, double quoted spans have their
/// escapes decoded and a bare backslash keeps the character after it.
pub fn unquote(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    out.push(q);
                }
            }
            '"' => {
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' => match chars.next() {
                            Some('t') => out.push('\t'),
                            Some('r') => out.push('\r'),
                            Some('n') => out.push('\n'),
                            Some('b') => out.push('\u{8}'),
                            Some('x') => out.push(decode_digits(&mut chars, 16)),
                            Some('0') => out.push(decode_digits(&mut chars, 8)),
                            Some(other) => {
                                out.push('\\');
                                out.push(other);
                            }
                            None => out.push('\\'),
                        },
                        other => out.push(other),
                    }
                }
            }
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn decode_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, radix: u32) -> char {
    let mut value = 0u32;
    for _ in 0..2 {
        match chars.peek().and_then(|d| d.to_digit(radix)) {
            Some(d) => {
                value = value * radix + d;
                chars.next();
            }
            None => break,
        }
    }
    char::from_u32(value).unwrap_or('\u{fffd}')
}

/// Characters that never need quoting
fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '@' | '%' | '+' | ',' | '=')
}

/// POSIX style quoting
///
/// Plain values are emitted bare, values with control characters use double
/// quotes with `\xHH` style escapes, everything else is single quoted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixShellEncoder;

impl ShellEncoder for PosixShellEncoder {
    fn quote(&self, value: &str) -> String {
        if value.is_empty() {
            return "''".to_string();
        }
        if value.chars().all(is_plain) {
            return value.to_string();
        }

        if value.chars().any(char::is_control) {
            let mut out = String::from("\"");
            for c in value.chars() {
                match c {
                    '\t' => out.push_str("\\t"),
                    '\r' => out.push_str("\\r"),
                    '\n' => out.push_str("\\n"),
                    '\u{8}' => out.push_str("\\b"),
                    '"' | '\\' | '$' | '`' => out.push_str(&format!("\\x{:02x}", c as u32)),
                    c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
                    c => out.push(c),
                }
            }
            out.push('"');
            return out;
        }

        let mut out = String::from("'");
        for c in value.chars() {
            if c == '\'' {
                out.push_str("'\\''");
            } else {
                out.push(c);
            }
        }
        out.push('\'');
        out
    }
}
