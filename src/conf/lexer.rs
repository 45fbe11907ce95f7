//! Tokenizer for configuration text.
//!
//! A file is a sequence of words and the punctuation `;`, `{` and `}`. Words are
//! either bare (ending at whitespace or punctuation) or quoted with `"` or `'`.
//! A backslash escapes the next character in both forms. `#` at the start of a
//! word begins a comment that runs to the end of the line.

use std::fmt;

/// Kind of a lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare or quoted word, with escapes resolved
    Word(String),
    /// `;`
    Semicolon,
    /// `{`
    BlockStart,
    /// `}`
    BlockEnd,
}

/// A token and the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line number
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A quoted word was still open at end of input
    UnterminatedQuote { line: usize },
    /// Input ended right after a backslash
    DanglingEscape { line: usize },
}

impl LexError {
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedQuote { line } | Self::DanglingEscape { line } => *line,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote { .. } => write!(f, "unterminated quoted string"),
            Self::DanglingEscape { .. } => write!(f, "unexpected end of file after \"\\\""),
        }
    }
}

impl std::error::Error for LexError {}

/// Splits `source` into tokens.
///
/// # Errors
///
/// Returns an error for an unterminated quote or a trailing backslash.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            ';' | '{' | '}' => {
                chars.next();
                let kind = match c {
                    ';' => TokenKind::Semicolon,
                    '{' => TokenKind::BlockStart,
                    _ => TokenKind::BlockEnd,
                };
                tokens.push(Token { kind, line });
            }
            '"' | '\'' => {
                chars.next();
                let start = line;
                let mut word = String::new();
                loop {
                    match chars.next() {
                        None => return Err(LexError::UnterminatedQuote { line: start }),
                        Some(q) if q == c => break,
                        Some('\\') => {
                            let escaped = chars
                                .next()
                                .ok_or(LexError::DanglingEscape { line })?;
                            if escaped == '\n' {
                                line += 1;
                            }
                            word.push(unescape(escaped));
                        }
                        Some(ch) => {
                            if ch == '\n' {
                                line += 1;
                            }
                            word.push(ch);
                        }
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Word(word),
                    line: start,
                });
            }
            _ => {
                let mut word = String::new();
                while let Some(ch) =
                    chars.next_if(|&ch| !ch.is_whitespace() && !matches!(ch, ';' | '{' | '}'))
                {
                    if ch == '\\' {
                        let escaped = chars.next().ok_or(LexError::DanglingEscape { line })?;
                        if escaped == '\n' {
                            line += 1;
                        }
                        word.push(escaped);
                    } else {
                        word.push(ch);
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Word(word),
                    line,
                });
            }
        }
    }

    Ok(tokens)
}

const fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}
