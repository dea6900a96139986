//! Context-sensitive, single-pass lexer.
//!
//! The lexer reads one physical line at a time and keeps a one-character
//! cursor over it. Sub-scanners for numbers, strings, regular expressions,
//! template literals and comments share that cursor and may back up by
//! exactly one character. Lint checks that only need lexical context are
//! reported while tokens are produced.

mod comment;
mod mega;
mod number;
mod regexp;
pub mod scan;
mod string;
mod token;

use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::RuleConfiguration;
use crate::diagnostic::Diagnostic;
use crate::globals::GlobalMap;
use crate::line_buffer::LineBuffer;
use crate::reporter::Reporter;
use crate::rule::RuleCode;

pub use token::{Position, Token, TokenKind};

/// Position and cause of a fatal lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("lexing stopped at {line}:{column} ({code})")]
pub struct LexAbort {
    pub code: RuleCode,
    pub line: usize,
    pub column: usize,
}

/// Output of a completed lex pass.
#[derive(Debug, Clone)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    /// Configured globals with `/*global*/` declarations layered on top.
    pub globals: GlobalMap,
    /// Names registered by `/*property*/` directives.
    pub properties: BTreeSet<String>,
}

/// A lex pass that stopped on a fatal error.
#[derive(Debug, Clone, Error)]
#[error("{cause}")]
pub struct Aborted {
    #[source]
    pub cause: LexAbort,
    /// Diagnostics gathered up to and including the fatal one.
    pub diagnostics: Vec<Diagnostic>,
}

type LexResult<T> = Result<T, LexAbort>;

/// Lexer state for one pass over a source text.
pub struct Lexer<'a> {
    lines: &'a LineBuffer,
    report: Reporter<'a>,

    /// Index of the current line; 0 before the first read.
    line: usize,
    /// Current line, tabs replaced outside template literals.
    chars: Vec<char>,
    /// Column of the next unread character.
    pos: usize,
    /// Last character read; `None` past the end of the line.
    ch: Option<char>,
    snippet: String,

    /// Start of the token being lexed.
    from: usize,
    from_line: usize,
    /// Start of the open template literal.
    from_mega: usize,
    line_mega: usize,

    mode_mega: bool,
    /// A regex literal was seen on the current line.
    mode_regexp: bool,
    /// Directives are still allowed.
    mode_directive: bool,
    /// The first token opened an object or array.
    mode_json: bool,

    /// The current line is exempt from the long-line check.
    line_exempt: bool,
    line_finished: bool,

    tokens: Vec<Token>,
    /// Previous token, comments included.
    prev: Option<usize>,
    /// Previous token, comments excluded.
    prev_expr: Option<usize>,

    globals: GlobalMap,
    properties: BTreeSet<String>,
}

impl<'a> Lexer<'a> {
    pub fn new(lines: &'a LineBuffer, config: &'a RuleConfiguration) -> Self {
        Self {
            lines,
            report: Reporter::new(config, lines),
            line: 0,
            chars: Vec::new(),
            pos: 0,
            ch: None,
            snippet: String::new(),
            from: 0,
            from_line: 0,
            from_mega: 0,
            line_mega: 0,
            mode_mega: false,
            mode_regexp: false,
            mode_directive: true,
            mode_json: false,
            line_exempt: false,
            line_finished: true,
            tokens: Vec::new(),
            prev: None,
            prev_expr: None,
            globals: config.globals(),
            properties: BTreeSet::new(),
        }
    }

    /// Lexes the whole source.
    pub fn run(mut self) -> Result<Lexed, Aborted> {
        let lines = self.lines;
        for issue in lines.issues() {
            self.report.rule(issue.code, issue.line, 1, &[]);
        }

        match self.tokenize() {
            Ok(()) => Ok(Lexed {
                tokens: self.tokens,
                diagnostics: self.report.into_diagnostics(),
                globals: self.globals,
                properties: self.properties,
            }),
            Err(cause) => Err(Aborted {
                cause,
                diagnostics: self.report.into_diagnostics(),
            }),
        }
    }

    fn tokenize(&mut self) -> LexResult<()> {
        let lines = self.lines;
        if lines.line(1).is_ok_and(|line| line.text.starts_with("#!")) {
            self.read_line();
            self.line_exempt = true;
            self.pos = self.chars.len();
        }

        let mut index = self.lex_token()?;
        self.mode_json = self.tokens[index].is_operator("{") || self.tokens[index].is_operator("[");

        while self.tokens[index].kind != TokenKind::Eof {
            index = self.lex_token()?;
        }
        Ok(())
    }

    /// Lexes the next token and returns its index.
    fn lex_token(&mut self) -> LexResult<usize> {
        loop {
            while self.remaining().is_empty() {
                if !self.read_line() {
                    if self.mode_mega {
                        return Err(self.fatal(
                            RuleCode::UnclosedMega,
                            self.line_mega,
                            self.from_mega + 1,
                            &[],
                        ));
                    }
                    self.mark_start();
                    return Ok(self.push_token(TokenKind::Eof, String::new()));
                }
            }

            let blank = self
                .remaining()
                .iter()
                .take_while(|c| c.is_whitespace())
                .count();
            if blank == 0 {
                break;
            }
            self.pos += blank;
        }

        if !self.mode_mega {
            self.line_exempt = false;
        }
        self.mark_start();
        let rest = self.remaining();

        let len = scan::identifier_len(rest);
        if len > 0 {
            self.take(len);
            return Ok(self.lex_identifier());
        }

        let len = scan::number_len(rest);
        if len > 0 {
            self.take(len);
            return self.lex_number();
        }

        let len = scan::operator_len(rest);
        if len > 0 {
            self.take(len);
            return match self.snippet.as_str() {
                "\"" => self.lex_string('"'),
                "'" => self.lex_string('\''),
                "`" => self.lex_megastring(),
                "//" | "/*" => self.lex_comment(),
                "/" => self.lex_slash_or_regexp(),
                _ => Ok(self.push_token(TokenKind::Operator, self.snippet.clone())),
            };
        }

        let unexpected = rest[0].to_string();
        Err(self.fatal(
            RuleCode::UnexpectedCharA,
            self.line,
            self.pos + 1,
            &[&unexpected],
        ))
    }

    fn lex_identifier(&mut self) -> usize {
        let value = self.snippet.clone();
        let keyword = scan::keyword(&value);
        let kind = if keyword.is_some() && !self.after_dot() {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };

        let index = self.push_token(kind, value);
        self.tokens[index].keyword = keyword;
        index
    }

    /// Moves to the next line. Returns false past the last line.
    fn read_line(&mut self) -> bool {
        self.finish_line();

        let lines = self.lines;
        if self.line >= lines.last_index() {
            self.pos = self.chars.len();
            self.ch = None;
            return false;
        }

        self.line += 1;
        self.pos = 0;
        self.ch = None;
        self.mode_regexp = false;
        self.line_finished = false;
        self.line_exempt = self.mode_mega;

        let Ok(line) = lines.line(self.line) else {
            return false;
        };
        self.chars = line.text.chars().collect();

        if !self.mode_mega {
            if let Some(tab) = self.chars.iter().position(|&c| c == '\t') {
                self.report.rule(RuleCode::NoTabs, self.line, tab + 1, &[]);
                for c in self.chars.iter_mut().filter(|c| **c == '\t') {
                    *c = ' ';
                }
            }

            let trailing = self
                .chars
                .iter()
                .rev()
                .take_while(|c| c.is_whitespace())
                .count();
            if trailing > 0 {
                let column = self.chars.len() - trailing + 1;
                self.report
                    .rule(RuleCode::NoIrregularWhitespace, self.line, column, &[]);
            }
        }

        true
    }

    /// Runs the long-line check once for the line being left.
    fn finish_line(&mut self) {
        if self.line == 0 || self.line_finished {
            return;
        }
        self.line_finished = true;

        if self.line_exempt || self.mode_regexp || self.mode_json {
            return;
        }

        let max = self.report.config().max_line_length();
        let len = self.lines.line(self.line).map(|l| l.len()).unwrap_or(0);
        if len > max {
            let limit = max.to_string();
            self.report
                .rule(RuleCode::NoLongLines, self.line, max, &[&limit]);
        }
    }

    /// Stops the pass, finishing the current line first.
    fn fatal(&mut self, code: RuleCode, line: usize, column: usize, args: &[&str]) -> LexAbort {
        self.finish_line();
        self.report.fatal(code, line, column, args)
    }

    fn remaining(&self) -> &[char] {
        self.chars.get(self.pos..).unwrap_or(&[])
    }

    fn mark_start(&mut self) {
        self.from = self.pos;
        self.from_line = self.line;
    }

    /// Moves `len` characters into a fresh snippet.
    fn take(&mut self, len: usize) {
        self.snippet = self.remaining().iter().take(len).collect();
        self.pos += len;
    }

    /// Reads the next character into the snippet. Past the end of the line
    /// the character is `None` and a space is appended.
    fn char_after(&mut self) -> Option<char> {
        self.ch = self.chars.get(self.pos).copied();
        self.snippet.push(self.ch.unwrap_or(' '));
        self.pos += 1;
        self.ch
    }

    /// Like [`Lexer::char_after`], but the current character must be `expected`.
    fn expect_after(&mut self, expected: char) -> LexResult<Option<char>> {
        match self.ch {
            Some(c) if c == expected => Ok(self.char_after()),
            Some(c) => Err(self.fatal(
                RuleCode::ExpectedAB,
                self.line,
                self.pos,
                &[&expected.to_string(), &c.to_string()],
            )),
            None => Err(self.fatal(
                RuleCode::ExpectedA,
                self.line,
                self.pos.saturating_sub(1),
                &[&expected.to_string()],
            )),
        }
    }

    /// Backs up one character.
    fn char_before(&mut self) -> Option<char> {
        self.ch = self.snippet.pop();
        self.pos = self.pos.saturating_sub(1);
        self.ch
    }

    /// Reads a run of digits of `radix`, then the character after it.
    fn read_digits(&mut self, radix: u32, quiet: bool) -> usize {
        let digits: String = self
            .remaining()
            .iter()
            .take_while(|c| c.is_digit(radix))
            .collect();
        let len = digits.len();

        if !quiet && len == 0 {
            self.report.rule(
                RuleCode::ExpectedDigitsAfterA,
                self.line,
                self.pos,
                &[&self.snippet],
            );
        }

        self.pos += len;
        self.snippet.push_str(&digits);
        self.char_after();
        len
    }

    fn after_dot(&self) -> bool {
        self.prev_expr
            .is_some_and(|index| self.tokens[index].is_operator("."))
    }

    fn prev_expr_token(&self) -> Option<&Token> {
        self.prev_expr.map(|index| &self.tokens[index])
    }

    /// Appends a token spanning from the marked start to the cursor.
    fn push_token(&mut self, kind: TokenKind, value: String) -> usize {
        let nr = self.tokens.len();
        let token = Token {
            kind,
            value,
            start: Position::new(self.from_line, self.from),
            end: Position::new(self.line, self.pos),
            nr,
            keyword: None,
            preceded_by_dot: matches!(kind, TokenKind::Identifier | TokenKind::Keyword)
                && self.after_dot(),
            quote: None,
        };

        if let Some(prev) = self.prev.map(|index| &self.tokens[index]) {
            let touching = prev.end == token.start;
            let loose = matches!(token.kind, TokenKind::Comment | TokenKind::Regex)
                || token.is_operator("/");
            if touching && loose && matches!(prev.kind, TokenKind::Comment | TokenKind::Regex) {
                let (a, b) = (prev.value.clone(), token.value.clone());
                self.report.rule(
                    RuleCode::NoIrregularWhitespace,
                    self.line,
                    self.pos,
                    &[&a, &b],
                );
            }

            if prev.is_operator(".") && token.kind == TokenKind::Number {
                self.report.rule(
                    RuleCode::NoFloatingDecimal,
                    self.line,
                    self.pos,
                    &[&token.value],
                );
            }
        }

        if !matches!(kind, TokenKind::Comment | TokenKind::Eof) {
            self.mode_directive = false;
        }
        if kind != TokenKind::Comment {
            self.prev_expr = Some(nr);
        }
        self.prev = Some(nr);
        self.tokens.push(token);
        nr
    }
}
