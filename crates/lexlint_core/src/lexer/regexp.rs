//! Slash disambiguation and regular-expression literals.

use super::{LexResult, Lexer, TokenKind};
use crate::rule::RuleCode;

/// Keywords after which a regex literal is legal but suspicious.
const REGEXP_AFTER_KEYWORD: &[&str] = &[
    "case",
    "delete",
    "in",
    "instanceof",
    "new",
    "typeof",
    "void",
    "yield",
];

const ESCAPES_IN_GROUP: &str = "BbDdSsWw^${}[]():=!.|*+?";
const ESCAPES_IN_CLASS: &str = "BbDdSsWw-[]^";
const FLAGS: &str = "gimuy";

/// Scanner state shared by the recursive group and class matchers.
#[derive(Debug, Default)]
struct RegexScan {
    /// The pattern anchors on line boundaries.
    multiline: bool,
    /// The last class atom opened a range.
    range: bool,
}

enum Slash {
    Regexp,
    SuspiciousRegexp,
    WrappedRegexp,
    Division,
}

impl Lexer<'_> {
    /// Decides whether the `/` in the snippet starts a regex or divides.
    pub(super) fn lex_slash_or_regexp(&mut self) -> LexResult<usize> {
        let slash = match self.prev_expr_token() {
            None => Slash::Regexp,
            Some(token) => match token.effective_keyword() {
                Some(keyword) if REGEXP_AFTER_KEYWORD.contains(&keyword) => Slash::SuspiciousRegexp,
                Some("return") => Slash::Regexp,
                _ if token.kind != TokenKind::Operator => Slash::Division,
                _ => match token.value.chars().last() {
                    Some(
                        '!' | '%' | '&' | '*' | '+' | '-' | '/' | ';' | '<' | '>' | '^' | '{'
                        | '|' | '}' | '~',
                    ) => Slash::WrappedRegexp,
                    Some('(' | ',' | ':' | '=' | '?' | '[') => Slash::Regexp,
                    _ => Slash::Division,
                },
            },
        };

        match slash {
            Slash::Regexp => self.lex_regexp(),
            Slash::SuspiciousRegexp => {
                let index = self.lex_regexp()?;
                let value = self.tokens[index].value.clone();
                self.report
                    .error(RuleCode::UnexpectedA, self.line, self.pos, &[&value]);
                Ok(index)
            }
            Slash::WrappedRegexp => {
                let index = self.lex_regexp()?;
                self.report
                    .rule(RuleCode::WrapRegexp, self.line, self.pos, &[]);
                Ok(index)
            }
            Slash::Division => {
                if self.remaining().first() == Some(&'=') {
                    self.pos += 1;
                    self.snippet = "/=".to_string();
                    self.report
                        .rule(RuleCode::UnexpectedA, self.line, self.pos, &["/="]);
                }
                Ok(self.push_token(TokenKind::Operator, self.snippet.clone()))
            }
        }
    }

    /// Lexes a regex literal whose opening `/` has been consumed.
    fn lex_regexp(&mut self) -> LexResult<usize> {
        let mut scan = RegexScan::default();
        self.mode_regexp = true;

        self.snippet.clear();
        self.char_after();
        if self.ch == Some('=') {
            self.report
                .rule(RuleCode::InvalidRegex, self.line, self.pos, &["/", "="]);
        }
        self.regexp_group(&mut scan)?;

        self.snippet.pop();
        let body = self.snippet.clone();
        self.expect_after('/')?;

        let mut flags = String::new();
        while let Some(c) = self.ch
            && c.is_ascii_alphabetic()
        {
            if !FLAGS.contains(c) || flags.contains(c) {
                let flag = c.to_string();
                self.report
                    .rule(RuleCode::InvalidRegex, self.line, self.pos, &[&body, &flag]);
            }
            flags.push(c);
            self.char_after();
        }

        self.char_before();
        if let Some(c @ ('/' | '*')) = self.ch {
            let found = c.to_string();
            return Err(self.fatal(
                RuleCode::InvalidRegex,
                self.line,
                self.from + 1,
                &[&body, &found],
            ));
        }

        let index = self.push_token(TokenKind::Regex, format!("/{}/{}", body, flags));
        if scan.multiline && !flags.contains('m') {
            self.report.rule(RuleCode::MissingM, self.line, self.pos, &[]);
        }
        Ok(index)
    }

    /// Matches a sequence of factors up to `)`, `]`, `/` or the end of line.
    fn regexp_group(&mut self, scan: &mut RegexScan) -> LexResult<()> {
        if let None | Some(')' | ']') = self.ch {
            let found = self.ch.map(String::from).unwrap_or_default();
            self.report.rule(
                RuleCode::ExpectedRegexpFactorA,
                self.line,
                self.pos,
                &[&found],
            );
        }

        loop {
            match self.ch {
                None | Some(')' | '/' | ']') => return Ok(()),
                Some('$') => {
                    if self.remaining().first() != Some(&'/') {
                        scan.multiline = true;
                    }
                    self.char_after();
                }
                Some('(') => {
                    self.expect_after('(')?;
                    if self.ch == Some('?') {
                        self.expect_after('?')?;
                        if matches!(self.ch, Some('=' | '!')) {
                            self.char_after();
                        } else {
                            self.expect_after(':')?;
                        }
                    } else if self.ch == Some(':') {
                        self.report
                            .rule(RuleCode::InvalidRegex, self.line, self.pos, &[":"]);
                    }
                    self.regexp_group(scan)?;
                    self.expect_after(')')?;
                }
                Some(c @ ('*' | '+' | '?' | '{' | '}')) => {
                    let found = c.to_string();
                    self.report
                        .rule(RuleCode::InvalidRegex, self.line, self.pos, &[&found]);
                    self.char_after();
                }
                Some('[') => self.regexp_class(scan)?,
                Some('\\') => self.char_after_escape(ESCAPES_IN_GROUP)?,
                Some('^') => {
                    if self.snippet != "^" {
                        scan.multiline = true;
                    }
                    self.char_after();
                }
                Some('`') => {
                    if self.mode_mega {
                        self.report
                            .rule(RuleCode::InvalidRegex, self.line, self.pos, &["`"]);
                    }
                    self.char_after();
                }
                Some(_) => {
                    self.char_after();
                }
            }

            self.regexp_quantifier()?;
        }
    }

    /// Matches an optional quantifier after a factor.
    fn regexp_quantifier(&mut self) -> LexResult<()> {
        match self.ch {
            Some('*' | '+') => {
                if self.char_after() == Some('?') {
                    self.char_after();
                }
            }
            Some('?') => {
                if self.char_after() == Some('?') {
                    self.report
                        .rule(RuleCode::InvalidRegex, self.line, self.pos, &["?"]);
                    self.char_after();
                }
            }
            Some('{') => {
                if self.read_digits(10, true) == 0 {
                    self.report
                        .rule(RuleCode::InvalidRegex, self.line, self.pos, &[","]);
                }
                if self.ch == Some(',') {
                    self.read_digits(10, true);
                }
                if self.expect_after('}')? == Some('?') {
                    self.report
                        .rule(RuleCode::InvalidRegex, self.line, self.pos, &["?"]);
                    self.char_after();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Matches a character class.
    fn regexp_class(&mut self, scan: &mut RegexScan) -> LexResult<()> {
        self.expect_after('[')?;
        if self.ch == Some('^') {
            self.char_after();
        }

        loop {
            match self.ch {
                None | Some(']') => {
                    if scan.range {
                        self.report.rule(
                            RuleCode::InvalidRegex,
                            self.line,
                            self.pos.saturating_sub(1),
                            &["]"],
                        );
                        scan.range = false;
                    }
                    self.expect_after(']')?;
                    return Ok(());
                }
                Some(c @ ('-' | '/' | '[' | '^')) => {
                    let found = c.to_string();
                    self.report
                        .rule(RuleCode::InvalidRegex, self.line, self.pos, &[&found]);
                }
                Some('\\') => {
                    self.char_after_escape(ESCAPES_IN_CLASS)?;
                    self.char_before();
                }
                Some('`') => {
                    if self.mode_mega {
                        self.report
                            .rule(RuleCode::UnexpectedA, self.line, self.pos, &["`"]);
                    }
                }
                Some(_) => {}
            }

            self.char_after();
            scan.range = false;
            if self.ch == Some('-') {
                scan.range = true;
                self.char_after();
            }
        }
    }
}
