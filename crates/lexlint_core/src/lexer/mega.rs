//! Backtick template literals.

use super::{LexResult, Lexer, TokenKind};
use crate::rule::RuleCode;

enum Stop {
    Backslash,
    Interpolation,
    Close,
}

impl Lexer<'_> {
    /// Lexes a template literal whose opening backtick is in the snippet.
    ///
    /// Text between interpolations becomes string tokens quoted with a
    /// backtick. Interpolated expressions are lexed as ordinary tokens.
    pub(super) fn lex_megastring(&mut self) -> LexResult<usize> {
        if self.mode_mega {
            return Err(self.fatal(RuleCode::ExpectedAB, self.line, self.pos, &["}", "`"]));
        }

        self.from_mega = self.from;
        self.line_mega = self.line;
        self.mode_mega = true;
        self.push_token(TokenKind::Operator, "`".to_string());

        let mut text = String::new();
        self.mark_start();

        loop {
            let rest = self.remaining();
            let found = rest.iter().enumerate().find_map(|(i, &c)| match c {
                '\\' => Some((i, Stop::Backslash)),
                '`' => Some((i, Stop::Close)),
                '$' if rest.get(i + 1) == Some(&'{') => Some((i, Stop::Interpolation)),
                _ => None,
            });

            let Some((skip, stop)) = found else {
                text.extend(rest);
                text.push('\n');
                if !self.read_line() {
                    return Err(self.fatal(
                        RuleCode::UnclosedMega,
                        self.line_mega,
                        self.from_mega + 1,
                        &[],
                    ));
                }
                continue;
            };

            text.extend(&rest[..skip]);
            self.pos += skip;

            match stop {
                Stop::Backslash => {
                    let escaped: String = self.remaining().iter().take(2).collect();
                    self.pos += escaped.chars().count();
                    text.push_str(&escaped);
                }
                Stop::Interpolation => {
                    self.push_mega_part(std::mem::take(&mut text));

                    self.mark_start();
                    self.pos += 2;
                    self.push_token(TokenKind::Operator, "${".to_string());

                    loop {
                        let index = self.lex_token()?;
                        if self.tokens[index].is_operator("{") {
                            return Err(self.fatal(
                                RuleCode::ExpectedAB,
                                self.line,
                                self.pos,
                                &["}", "{"],
                            ));
                        }
                        if self.tokens[index].is_operator("}") {
                            break;
                        }
                    }
                    self.mark_start();
                }
                Stop::Close => {
                    self.push_mega_part(text);

                    self.mark_start();
                    self.pos += 1;
                    self.mode_mega = false;
                    return Ok(self.push_token(TokenKind::Operator, "`".to_string()));
                }
            }
        }
    }

    fn push_mega_part(&mut self, text: String) {
        let index = self.push_token(TokenKind::String, text);
        self.tokens[index].quote = Some('`');
    }
}
