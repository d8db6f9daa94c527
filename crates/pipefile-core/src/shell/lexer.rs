//! Shell command line tokenizer
//!
//! Splits a (possibly multi-line) command string into statements and words.
//! Words keep their original quoting: `'a b'` stays `'a b'` and `"c\td"`
//! stays `"c\td"`, so the text can be handed to a real shell later.
//!
//! Statements are separated by an unquoted `;` or newline. A `#` starting a
//! word opens a comment that runs to the end of the line. The control
//! operators `|`, `||`, `&` and `&&` never split a statement; they are
//! emitted as standalone words of the statement they appear in.

/// One command invocation found in a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Source text of the statement, trimmed
    pub text: String,

    /// Command word followed by argument words, quoting retained
    pub words: Vec<String>,
}

impl Statement {
    /// The command word
    pub fn head(&self) -> &str {
        self.words.first().map(String::as_str).unwrap_or("")
    }

    /// The argument words following the command word
    pub fn args(&self) -> &[String] {
        if self.words.is_empty() {
            &[]
        } else {
            &self.words[1..]
        }
    }

    /// Whether the statement is nothing but `{`, `}`, `{{` or `}}`
    pub fn is_bracket(&self) -> bool {
        self.words.len() == 1 && matches!(self.words[0].as_str(), "{" | "}" | "{{" | "}}")
    }
}

/// A structural violation found while tokenizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed {
    /// Byte offset of the offending character
    pub offset: usize,

    /// Human readable description
    pub message: String,
}

impl Malformed {
    /// Caret line pointing at the offending character of `input`
    ///
    /// Meant to be printed right under the input line it was produced for.
    pub fn marker(&self, input: &str) -> String {
        let end = self.offset.min(input.len());
        let prefix = &input[..end];
        // Only the part after the last newline shares a row with the caret
        let column = match prefix.rfind('\n') {
            Some(nl) => prefix[nl + 1..].chars().count(),
            None => prefix.chars().count(),
        };
        format!("{}^ {}", " ".repeat(column), self.message)
    }
}

/// Result of tokenizing a command string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexOutcome {
    /// The input is a complete command string
    Complete(Vec<Statement>),

    /// The input ends inside a quote or right after a bare backslash;
    /// more input is needed
    Unfinished,

    /// The input can never become valid
    Malformed(Malformed),
}

impl LexOutcome {
    pub fn is_unfinished(&self) -> bool {
        matches!(self, LexOutcome::Unfinished)
    }
}

enum Halt {
    Unfinished,
    Malformed(Malformed),
}

type Step = std::result::Result<(), Halt>;

struct Lexer<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    index: usize,
    statements: Vec<Statement>,
    words: Vec<String>,
    word: String,
    statement_start: usize,
}

/// Tokenize a command string
pub fn tokenize(input: &str) -> LexOutcome {
    let mut lexer = Lexer::new(input);
    match lexer.run() {
        Ok(()) => LexOutcome::Complete(lexer.statements),
        Err(Halt::Unfinished) => LexOutcome::Unfinished,
        Err(Halt::Malformed(m)) => LexOutcome::Malformed(m),
    }
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().collect(),
            index: 0,
            statements: Vec::new(),
            words: Vec::new(),
            word: String::new(),
            statement_start: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|&(_, c)| c)
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.index + ahead).map(|&(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|&(o, _)| o)
            .unwrap_or(self.input.len())
    }

    /// Consume the current character into the current word
    fn take(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.word.push(c);
        self.index += 1;
        Some(c)
    }

    fn malformed(&self, offset: usize, message: String) -> Halt {
        Halt::Malformed(Malformed { offset, message })
    }

    fn run(&mut self) -> Step {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.finish_word();
                    self.index += 1;
                }
                '\n' | ';' => {
                    self.finish_word();
                    let at = self.offset();
                    self.finish_statement(at, c == ';')?;
                    self.index += 1;
                    self.statement_start = self.offset();
                }
                '|' => self.operator(c),
                '&' => {
                    // `2>&1`, `<&3` and `&>file` are redirections, not operators
                    let redirect = self.word.ends_with('>')
                        || self.word.ends_with('<')
                        || self.peek_at(1) == Some('>');
                    if redirect {
                        self.take();
                    } else {
                        self.operator(c);
                    }
                }
                '\'' => self.single_quoted()?,
                '"' => self.double_quoted()?,
                '\\' => self.bare_escape()?,
                '#' if self.word.is_empty() => self.comment(),
                _ => {
                    self.take();
                }
            }
        }
        self.finish_word();
        let end = self.input.len();
        self.finish_statement(end, false)
    }

    /// Skip a comment up to, not including, the next newline
    fn comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.index += 1;
        }
    }

    fn operator(&mut self, c: char) {
        self.finish_word();
        self.take();
        if self.peek() == Some(c) {
            self.take();
        }
        self.finish_word();
    }

    fn finish_word(&mut self) {
        if !self.word.is_empty() {
            self.words.push(std::mem::take(&mut self.word));
        }
    }

    fn finish_statement(&mut self, end: usize, explicit: bool) -> Step {
        if self.words.is_empty() {
            if explicit {
                return Err(self.malformed(end, "unexpected ';' without a command".to_string()));
            }
            return Ok(());
        }
        let text = self.input[self.statement_start..end].trim().to_string();
        let words = std::mem::take(&mut self.words);
        self.statements.push(Statement { text, words });
        Ok(())
    }

    fn single_quoted(&mut self) -> Step {
        self.take();
        loop {
            match self.take() {
                None => return Err(Halt::Unfinished),
                Some('\'') => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn double_quoted(&mut self) -> Step {
        self.take();
        loop {
            let start = self.offset();
            match self.take() {
                None => return Err(Halt::Unfinished),
                Some('"') => return Ok(()),
                Some('\\') => self.quoted_escape(start)?,
                Some(_) => {}
            }
        }
    }

    /// Validate the escape following a backslash inside double quotes
    fn quoted_escape(&mut self, backslash: usize) -> Step {
        let kind = match self.take() {
            None => return Err(Halt::Unfinished),
            Some(k) => k,
        };
        match kind {
            't' | 'r' | 'n' | 'b' => Ok(()),
            'x' => self.escape_digits(backslash, 'x', |d| d.is_ascii_hexdigit()),
            '0' => self.escape_digits(backslash, '0', |d| ('0'..='7').contains(&d)),
            other => Err(self.malformed(
                backslash,
                format!("unsupported escape sequence '\\{}'", other),
            )),
        }
    }

    fn escape_digits(&mut self, backslash: usize, kind: char, valid: fn(char) -> bool) -> Step {
        for _ in 0..2 {
            match self.peek() {
                None => return Err(Halt::Unfinished),
                Some(d) if valid(d) => {
                    self.take();
                }
                Some(_) => {
                    let what = if kind == 'x' { "hexadecimal" } else { "octal" };
                    return Err(self.malformed(
                        backslash,
                        format!("'\\{}' must be followed by two {} digits", kind, what),
                    ));
                }
            }
        }
        Ok(())
    }

    fn bare_escape(&mut self) -> Step {
        self.take();
        match self.take() {
            None => Err(Halt::Unfinished),
            Some(_) => Ok(()),
        }
    }
}
