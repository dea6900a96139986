//! Quoted strings and escape sequences.

use super::{LexResult, Lexer, TokenKind};
use crate::rule::RuleCode;

impl Lexer<'_> {
    /// Lexes a `'` or `"` string. The opening quote has been consumed.
    pub(super) fn lex_string(&mut self, quote: char) -> LexResult<usize> {
        self.snippet.clear();
        self.char_after();

        loop {
            match self.ch {
                None => {
                    return Err(self.fatal(
                        RuleCode::UnclosedString,
                        self.line,
                        self.pos,
                        &[],
                    ));
                }
                Some('\\') => self.char_after_escape(&quote.to_string())?,
                Some('`') => {
                    if self.mode_mega {
                        self.report.rule(RuleCode::UnexpectedA, self.line, self.pos, &["`"]);
                    }
                    self.char_after();
                }
                Some(c) if c == quote => {
                    self.snippet.pop();
                    let index = self.push_token(TokenKind::String, self.snippet.clone());
                    self.tokens[index].quote = Some(quote);
                    return Ok(index);
                }
                Some(_) => {
                    self.char_after();
                }
            }
        }
    }

    /// Validates the escape sequence starting at the current backslash.
    ///
    /// `extra` lists characters that may be escaped in this context on top of
    /// the common set.
    pub(super) fn char_after_escape(&mut self, extra: &str) -> LexResult<()> {
        self.expect_after('\\')?;

        match self.ch {
            None => {
                return Err(self.fatal(
                    RuleCode::UnclosedString,
                    self.line,
                    self.pos,
                    &[],
                ));
            }
            Some('/' | '\\' | '`' | 'b' | 'f' | 'n' | 'r' | 't') => {
                self.char_after();
            }
            Some('u') => {
                if self.expect_after('u')? == Some('{') {
                    if self.mode_json {
                        self.report.error(RuleCode::UnexpectedA, self.line, self.pos, &["{"]);
                    }
                    if self.read_digits(16, false) > 5 {
                        self.report.rule(RuleCode::TooManyDigits, self.line, self.pos, &[]);
                    }
                    if self.ch != Some('}') {
                        let found = self.ch.map(String::from).unwrap_or_default();
                        self.report.rule(
                            RuleCode::ExpectedABeforeB,
                            self.line,
                            self.pos,
                            &["}", &found],
                        );
                    }
                    self.char_after();
                } else {
                    self.char_before();
                    if self.read_digits(16, true) < 4 {
                        self.report
                            .rule(RuleCode::ExpectedFourDigits, self.line, self.pos, &[]);
                    }
                }
            }
            Some(c) if extra.contains(c) => {
                self.char_after();
            }
            Some(c) => {
                let escaped = c.to_string();
                self.report.rule(
                    RuleCode::UnexpectedABeforeB,
                    self.line,
                    self.pos,
                    &["\\", &escaped],
                );
            }
        }
        Ok(())
    }
}
