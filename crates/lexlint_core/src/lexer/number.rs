//! Number literals.

use super::{LexResult, Lexer, TokenKind};
use crate::rule::RuleCode;

impl Lexer<'_> {
    /// Finishes a number whose leading digits are in the snippet.
    pub(super) fn lex_number(&mut self) -> LexResult<usize> {
        let bare_zero = self.snippet == "0";

        match self.char_after() {
            Some(prefix @ ('b' | 'o' | 'x')) if bare_zero => {
                let radix = match prefix {
                    'b' => 2,
                    'o' => 8,
                    _ => 16,
                };
                self.read_digits(radix, false);
                if self.ch == Some('n') {
                    self.char_after();
                }
            }
            _ => {
                if self.ch == Some('.') {
                    self.read_digits(10, false);
                }
                if matches!(self.ch, Some('e' | 'E')) {
                    self.char_after();
                    if !matches!(self.ch, Some('+' | '-')) {
                        self.char_before();
                    }
                    self.read_digits(10, false);
                }
            }
        }

        if let Some(c) = self.ch
            && c.is_ascii_alphanumeric()
        {
            let offending = c.to_string();
            let head: String = self
                .snippet
                .chars()
                .take(self.snippet.chars().count() - 1)
                .collect();
            return Err(self.fatal(
                RuleCode::InvalidNumeric,
                self.line,
                self.pos,
                &[&offending, &head],
            ));
        }

        self.char_before();
        Ok(self.push_token(TokenKind::Number, self.snippet.clone()))
    }
}
