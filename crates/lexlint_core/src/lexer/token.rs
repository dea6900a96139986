//! Token and position types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in source text.
///
/// Uses 1-indexed lines and 0-indexed columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (0-indexed).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Identifier,
    Keyword,
    Operator,
    Number,
    String,
    Regex,
    Comment,
    /// End of input.
    Eof,
}

/// A lexed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token. String tokens hold their contents without
    /// delimiters; comment tokens hold their body.
    pub value: String,
    pub start: Position,
    /// One past the last character.
    pub end: Position,
    /// Sequence number, starting at 0.
    pub nr: usize,
    /// Reserved word matched by this token, compared case-insensitively.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<&'static str>,
    /// The previous non-comment token was a bare `.`.
    pub preceded_by_dot: bool,
    /// Delimiter of string tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<char>,
}

impl Token {
    pub fn is_operator(&self, value: &str) -> bool {
        self.kind == TokenKind::Operator && self.value == value
    }

    /// Returns the reserved word this token acts as. Property names never do.
    pub fn effective_keyword(&self) -> Option<&'static str> {
        if self.preceded_by_dot {
            None
        } else {
            self.keyword
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
