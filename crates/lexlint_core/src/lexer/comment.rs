//! Line and block comments, including `jslint`, `global` and `property`
//! directives.

use std::sync::OnceLock;

use regex::Regex;

use super::{LexResult, Lexer, Position, TokenKind, scan};
use crate::config::ENVIRONMENTS;
use crate::globals::{self, GlobalOrigin};
use crate::rule::{OptionFlag, RuleCode, RuleLevel};

const DIRECTIVES: &[&str] = &["jslint", "property", "global"];

/// One `key[:true|false]` item of a directive body.
#[derive(Debug, PartialEq, Eq)]
struct DirectivePart {
    key: String,
    value: Option<bool>,
}

impl Lexer<'_> {
    /// Lexes a comment whose opener (`//` or `/*`) is in the snippet.
    pub(super) fn lex_comment(&mut self) -> LexResult<usize> {
        let index = if self.snippet == "//" {
            let value: String = self.remaining().iter().collect();
            self.pos = self.chars.len();
            let index = self.push_token(TokenKind::Comment, value);
            if self.mode_mega {
                self.report
                    .rule(RuleCode::UnexpectedComment, self.line, self.pos, &[]);
            }
            index
        } else {
            self.lex_block_comment()?
        };

        let value = self.tokens[index].value.clone();
        let start = self.tokens[index].start;

        if has_todo(&value) && !self.report.flag(OptionFlag::Devel) {
            self.report
                .rule(RuleCode::TodoComment, start.line, start.column + 1, &[]);
        }

        if let Some((directive, body)) = split_directive(&value) {
            if self.mode_directive {
                self.apply_directive(directive, body, start);
            } else {
                self.report.rule(
                    RuleCode::MisplacedDirectiveA,
                    start.line,
                    start.column + 1,
                    &[directive],
                );
            }
        }

        Ok(index)
    }

    fn lex_block_comment(&mut self) -> LexResult<usize> {
        if self.remaining().first() == Some(&'/') {
            self.report
                .rule(RuleCode::UnexpectedA, self.line, self.pos, &["/"]);
        }

        let mut parts: Vec<String> = Vec::new();
        let close = loop {
            let rest = self.remaining();
            if let Some(ii) = find(rest, &['*', '/']) {
                break ii;
            }
            if let Some(ii) = find(rest, &['/', '*']) {
                self.report
                    .rule(RuleCode::NestedComment, self.line, self.pos + ii + 1, &[]);
            }
            parts.push(self.remaining().iter().collect());

            if !self.read_line() {
                return Err(self.fatal(
                    RuleCode::UnclosedComment,
                    self.from_line,
                    self.from + 1,
                    &[],
                ));
            }
        };

        let head = &self.remaining()[..close];
        let nested = find(head, &['/', '*'])
            .or_else(|| (head.last() == Some(&'/')).then(|| head.len() - 1));
        let last: String = head.iter().collect();
        if let Some(jj) = nested {
            self.report
                .rule(RuleCode::NestedComment, self.line, self.pos + jj + 1, &[]);
        }

        parts.push(last);
        self.pos += close + 2;
        Ok(self.push_token(TokenKind::Comment, parts.join(" ")))
    }

    fn apply_directive(&mut self, directive: &str, body: &str, start: Position) {
        let (line, column) = (start.line, start.column + 1);
        let (items, malformed) = parse_directive_body(body);

        for DirectivePart { key, value } in items {
            match directive {
                "global" => {
                    if let Some(value) = value {
                        let option = format!("{}:{}", key, value);
                        self.report
                            .rule(RuleCode::BadOptionA, line, column, &[&option]);
                    }
                    self.globals.insert(key, GlobalOrigin::UserDefined);
                }
                "jslint" => {
                    let enabled = value.unwrap_or(true);
                    if let Ok(flag) = key.parse::<OptionFlag>() {
                        self.report.set_flag(flag, enabled);
                        let environment = ENVIRONMENTS.iter().find(|(f, _)| *f == flag);
                        if let Some(&(_, origin)) = environment
                            && enabled
                        {
                            globals::overlay(&mut self.globals, origin);
                        }
                    } else if let Ok(code) = key.parse::<RuleCode>() {
                        let level = if enabled {
                            code.enabled_level()
                        } else {
                            RuleLevel::Off
                        };
                        self.report.set_rule(code, level);
                    } else {
                        self.report.rule(RuleCode::BadOptionA, line, column, &[&key]);
                    }
                }
                _ => {
                    self.properties.insert(key);
                }
            }
        }

        if let Some(rest) = malformed {
            self.report
                .rule(RuleCode::BadDirectiveA, line, column, &[&rest]);
        }
    }
}

/// Index of the first occurrence of `pair` in `s`.
fn find(s: &[char], pair: &[char; 2]) -> Option<usize> {
    s.windows(2).position(|w| w == pair)
}

static TODO_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// Matches `todo`, `TODO`, `TO DO` or `HACK` as whole words.
fn has_todo(text: &str) -> bool {
    TODO_PATTERN
        .get_or_init(|| Regex::new(r"\b(?:todo|TODO|TO\sDO|HACK)\b").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

/// Splits `jslint browser` into the directive name and its body.
fn split_directive(text: &str) -> Option<(&'static str, &str)> {
    DIRECTIVES.iter().find_map(|&name| {
        let rest = text.strip_prefix(name)?;
        let body = rest.trim_start();
        (rest.starts_with(char::is_whitespace)).then_some((name, body))
    })
}

/// Parses a comma-separated directive body.
///
/// Returns the well-formed items and, if parsing stopped early, the
/// unparsed remainder.
fn parse_directive_body(body: &str) -> (Vec<DirectivePart>, Option<String>) {
    let chars: Vec<char> = body.chars().collect();
    let mut items = Vec::new();
    let mut at = 0;

    while at < chars.len() {
        let rest = &chars[at..];
        let key_len = scan::identifier_len(rest);
        if key_len == 0 {
            return (items, Some(rest.iter().collect()));
        }

        let key: String = rest[..key_len].iter().collect();
        let mut len = key_len;
        let mut value = None;

        if rest.get(len) == Some(&':') {
            let blank = rest[len + 1..]
                .iter()
                .take_while(|c| c.is_whitespace())
                .count();
            let after: String = rest[len + 1 + blank..].iter().take(5).collect();
            if after.starts_with("true") {
                value = Some(true);
                len += 1 + blank + 4;
            } else if after.starts_with("false") {
                value = Some(false);
                len += 1 + blank + 5;
            }
        }
        if rest.get(len) == Some(&',') {
            len += 1;
        }
        len += rest[len..].iter().take_while(|c| c.is_whitespace()).count();

        items.push(DirectivePart { key, value });
        at += len;
    }

    (items, None)
}

#[cfg(test)]
mod tests {
    use super::super::tests::{codes, lex, lex_with};
    use super::*;
    use crate::config::RuleConfiguration;
    use crate::diagnostic::Severity;
    use crate::globals::GlobalOrigin;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_line_comment() {
        let lexed = lex("x; // note here");
        let comment = &lexed.tokens[2];
        assert_eq!(comment.kind, TokenKind::Comment);
        assert_eq!(comment.value, " note here");
        assert_eq!(lexed.tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_block_comment_spanning_lines() {
        let lexed = lex("/* one\n   two */ x");
        assert_eq!(lexed.tokens[0].value, " one    two ");
        assert_eq!(lexed.tokens[0].start, Position::new(1, 0));
        assert_eq!(lexed.tokens[0].end, Position::new(2, 9));
        assert_eq!(lexed.tokens[1].value, "x");
    }

    #[test]
    fn test_unclosed_comment_points_at_opening() {
        let aborted = lex_with("x;\n  /* open\nstill", &RuleConfiguration::new()).unwrap_err();
        assert_eq!(aborted.cause.code, RuleCode::UnclosedComment);
        assert_eq!((aborted.cause.line, aborted.cause.column), (2, 3));
        assert_eq!(aborted.diagnostics[0].message, "Unclosed comment.");
    }

    #[rstest]
    #[case::opener_inside("/* a /* b */", 6)]
    #[case::opener_on_earlier_line("/* a /*\n*/", 6)]
    #[case::slash_before_close("/* a /*/", 6)]
    fn test_nested_comment(#[case] source: &str, #[case] column: usize) {
        let lexed = lex(source);
        assert_eq!(codes(&lexed.diagnostics), vec![RuleCode::NestedComment]);
        assert_eq!(lexed.diagnostics[0].column, column);
        assert_eq!(lexed.diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn test_slash_after_opener() {
        let lexed = lex("/*/ x */");
        assert_eq!(codes(&lexed.diagnostics), vec![RuleCode::UnexpectedA]);
        assert_eq!(lexed.diagnostics[0].message, "Unexpected '/'.");
    }

    #[test]
    fn test_comment_inside_interpolation() {
        let lexed = lex("`${a // b\n}`");
        assert_eq!(codes(&lexed.diagnostics), vec![RuleCode::UnexpectedComment]);
        assert_eq!(lexed.diagnostics[0].severity, Severity::Error);
    }

    #[rstest]
    #[case::lower("// todo: fix", true)]
    #[case::upper("/* TODO */", true)]
    #[case::spaced("// TO DO later", true)]
    #[case::hack("// HACK", true)]
    #[case::inside_word("// mastodon", false)]
    #[case::mixed_case("// Todo", false)]
    #[case::two_spaces("// TO  DO", false)]
    fn test_todo_comment(#[case] source: &str, #[case] reported: bool) {
        let lexed = lex(source);
        let expected = if reported {
            vec![RuleCode::TodoComment]
        } else {
            vec![]
        };
        assert_eq!(codes(&lexed.diagnostics), expected);
    }

    #[test]
    fn test_todo_allowed_with_devel() {
        let config = RuleConfiguration::new().with_flag(OptionFlag::Devel, true);
        let lexed = lex_with("// TODO", &config).unwrap();
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_todo_reported_at_comment_start() {
        let lexed = lex("x;\n  // later todo");
        let diag = &lexed.diagnostics[0];
        assert_eq!((diag.line, diag.column), (2, 3));
    }

    #[test]
    fn test_global_directive() {
        let lexed = lex("/*global foo, bar*/\nfoo(bar);");
        assert_eq!(lexed.globals["foo"], GlobalOrigin::UserDefined);
        assert_eq!(lexed.globals["bar"], GlobalOrigin::UserDefined);
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_global_with_value_is_bad_option() {
        let lexed = lex("/*global aa:false*/");
        assert_eq!(codes(&lexed.diagnostics), vec![RuleCode::BadOptionA]);
        assert_eq!(lexed.diagnostics[0].message, "Bad option 'aa:false'.");
        assert_eq!(lexed.globals["aa"], GlobalOrigin::UserDefined);
    }

    #[test]
    fn test_jslint_directive_enables_environment() {
        let lexed = lex("/*jslint browser*/");
        assert_eq!(lexed.globals["document"], GlobalOrigin::Browser);
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_jslint_directive_sets_flag() {
        let lexed = lex("/*jslint devel: true*/\n// TODO");
        assert!(lexed.diagnostics.is_empty());

        let lexed = lex("/*jslint devel:false*/\n// TODO");
        assert_eq!(codes(&lexed.diagnostics), vec![RuleCode::TodoComment]);
    }

    #[test]
    fn test_jslint_directive_toggles_rule() {
        let lexed = lex("/*jslint no_tabs*/\nx\t= 1;");
        assert_eq!(codes(&lexed.diagnostics), vec![RuleCode::NoTabs]);

        let lexed = lex("/*jslint wrap_regexp:false*/\nx = a + /b/;");
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_jslint_unknown_option() {
        let lexed = lex("/*jslint undefined*/");
        assert_eq!(codes(&lexed.diagnostics), vec![RuleCode::BadOptionA]);
        assert_eq!(lexed.diagnostics[0].message, "Bad option 'undefined'.");
    }

    #[test]
    fn test_property_directive() {
        let lexed = lex("/*property alpha, beta*/");
        let names: Vec<_> = lexed.properties.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_bad_directive_keeps_earlier_items() {
        let lexed = lex("/*global ok, !bad*/");
        assert_eq!(codes(&lexed.diagnostics), vec![RuleCode::BadDirectiveA]);
        assert_eq!(lexed.diagnostics[0].message, "Bad directive '!bad'.");
        assert_eq!(lexed.globals["ok"], GlobalOrigin::UserDefined);
        assert!(!lexed.globals.contains_key("bad"));
    }

    #[test]
    fn test_misplaced_directive() {
        let lexed = lex("0\n/*global aa*/");
        assert_eq!(codes(&lexed.diagnostics), vec![RuleCode::MisplacedDirectiveA]);
        assert_eq!(
            lexed.diagnostics[0].message,
            "Place the '/*global*/' directive before the first statement."
        );
        assert!(!lexed.globals.contains_key("aa"));
    }

    #[test]
    fn test_directives_after_comments_still_allowed() {
        let lexed = lex("// header\n/*global aa*/\naa();");
        assert!(lexed.diagnostics.is_empty());
        assert!(lexed.globals.contains_key("aa"));
    }

    #[test]
    fn test_directive_needs_whitespace() {
        assert_eq!(split_directive("globalfoo"), None);
        assert_eq!(split_directive("global"), None);
        assert_eq!(split_directive("global  a, b"), Some(("global", "a, b")));
    }

    #[test]
    fn test_parse_directive_body() {
        let (items, rest) = parse_directive_body("a, b: false,c:true d");
        let expected = vec![
            DirectivePart { key: "a".to_string(), value: None },
            DirectivePart { key: "b".to_string(), value: Some(false) },
            DirectivePart { key: "c".to_string(), value: Some(true) },
            DirectivePart { key: "d".to_string(), value: None },
        ];
        assert_eq!(items, expected);
        assert_eq!(rest, None);
    }
}
