//! Integration tests for the verify entry points.
//!
//! These tests go through the public API only and check the guarantees
//! callers rely on: determinism, rule suppression, abort behavior and
//! position clamping.

use std::fs;
use std::path::PathBuf;

use lexlint_core::{
    Linter, LinterConfig, RuleCode, RuleConfiguration, RuleLevel, Severity, TokenKind, tokenize,
    verify,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

const SAMPLE: &str = "\
/*jslint browser*/
/*global app*/
const re = /^[a-z]+$/i;
let total = 0x1F + 2.5e3;
let label = `sum: ${total}`;
if (re.test(label)) {
    app.run(total / 2);
}
";

fn codes(source: &str, config: &RuleConfiguration) -> Vec<RuleCode> {
    verify(source, config).iter().map(|d| d.code).collect()
}

#[test]
fn test_sample_is_clean() {
    let diagnostics = verify(SAMPLE, &RuleConfiguration::new());
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_sample_tokens() {
    let lexed = tokenize(SAMPLE, &RuleConfiguration::new()).unwrap();
    let regexes: Vec<_> = lexed
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Regex)
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(regexes, vec!["/^[a-z]+$/i"]);
    assert!(lexed.globals.contains_key("app"));
    assert!(lexed.globals.contains_key("document"));
    assert_eq!(lexed.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_verify_is_deterministic() {
    let source = "x = a + /b$/;\n// TODO\n`${`";
    let config = RuleConfiguration::new();
    let first = verify(source, &config);
    for _ in 0..3 {
        assert_eq!(verify(source, &config), first);
    }
}

#[test]
fn test_unclosed_string_single_error() {
    let diagnostics = verify("\"abc", &RuleConfiguration::new());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, RuleCode::UnclosedString);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].line, 1);
}

#[test]
fn test_invalid_numeric_halts() {
    let source = "123abc\n\"never reached";
    assert_eq!(
        codes(source, &RuleConfiguration::new()),
        vec![RuleCode::InvalidNumeric]
    );
}

#[test]
fn test_fatal_code_off_still_halts() {
    let config = RuleConfiguration::new().with_rule(RuleCode::InvalidNumeric, RuleLevel::Off);
    assert!(codes("123abc\n\"never reached", &config).is_empty());
}

#[rstest]
#[case::at_limit("x = 123456", 0)]
#[case::over_limit("x = 1234567", 1)]
fn test_long_lines(#[case] source: &str, #[case] expected: usize) {
    let config = RuleConfiguration::new()
        .with_rule(RuleCode::NoLongLines, RuleLevel::Warn)
        .with_max_line_length(10);
    let long: Vec<_> = codes(source, &config)
        .into_iter()
        .filter(|c| *c == RuleCode::NoLongLines)
        .collect();
    assert_eq!(long.len(), expected);
}

#[test]
fn test_long_line_checked_before_fatal_error() {
    let config = RuleConfiguration::new()
        .with_rule(RuleCode::NoLongLines, RuleLevel::Warn)
        .with_max_line_length(10);
    assert_eq!(
        codes("x = \"abcdefghijk", &config),
        vec![RuleCode::NoLongLines, RuleCode::UnclosedString]
    );
}

#[rstest]
#[case::code_after_close("x = `a\nb` + 1234567890;", vec![2])]
#[case::close_ends_line("x = `a\nb 1234567890`\n;", vec![])]
#[case::inside_interpolation("x = `${\n1234567890 + 1}`\n;", vec![])]
fn test_long_line_after_template_close(#[case] source: &str, #[case] expected: Vec<usize>) {
    let config = RuleConfiguration::new()
        .with_rule(RuleCode::NoLongLines, RuleLevel::Warn)
        .with_max_line_length(10);
    let lines: Vec<_> = verify(source, &config)
        .into_iter()
        .filter(|d| d.code == RuleCode::NoLongLines)
        .map(|d| d.line)
        .collect();
    assert_eq!(lines, expected);
}

#[rstest]
#[case::wrap_regexp("x = a + /b/;", RuleCode::WrapRegexp)]
#[case::missing_m("x = /a$b/;", RuleCode::MissingM)]
#[case::todo("// TODO", RuleCode::TodoComment)]
#[case::nested_comment("/* a /* b */", RuleCode::NestedComment)]
fn test_rule_off_never_appears(#[case] source: &str, #[case] code: RuleCode) {
    assert_eq!(codes(source, &RuleConfiguration::new()), vec![code]);

    let config = RuleConfiguration::new().with_rule(code, RuleLevel::Off);
    assert!(codes(source, &config).is_empty());
}

#[test]
fn test_columns_are_clamped() {
    let config = RuleConfiguration::new()
        .with_rule(RuleCode::NoLongLines, RuleLevel::Warn)
        .with_max_line_length(0);
    for diagnostic in verify("ab\n\ncd", &config) {
        let len = diagnostic.source_line.chars().count().max(1);
        assert!(diagnostic.column >= 1 && diagnostic.column <= len);
    }
}

#[test]
fn test_quiet_line_suppresses_rules_only() {
    let config = RuleConfiguration::new();
    assert!(codes("x = a + /b/; //jslint-quiet", &config).is_empty());
    assert_eq!(
        codes("\"abc //jslint-quiet", &config),
        vec![RuleCode::UnclosedString]
    );
}

#[test]
fn test_lint_files_collects_failures() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.js");
    let bad = dir.path().join("bad.js");
    fs::write(&good, "let a = 1;\n").unwrap();
    fs::write(&bad, "let b = 'open\n").unwrap();
    let missing = dir.path().join("missing.js");

    let linter = Linter::new(LinterConfig::new());
    let (successes, failures) = linter.lint_files(&[good.clone(), bad.clone(), missing.clone()]);

    let paths: Vec<PathBuf> = successes.iter().map(|r| r.path.clone()).collect();
    assert_eq!(paths, vec![good, bad]);
    assert!(!successes[0].has_errors());
    assert!(successes[1].has_errors());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, missing);
}

#[test]
fn test_linter_from_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".lexlint.jsonc"),
        r#"{
            // comments are allowed
            "options": {"wrap_regexp": "error", "devel": true}
        }"#,
    )
    .unwrap();

    let path = LinterConfig::discover(dir.path()).unwrap();
    let linter = Linter::new(LinterConfig::from_file(path).unwrap());
    let result = linter.lint_source("inline.js", "x = a + /b/;\n// TODO");

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, RuleCode::WrapRegexp);
    assert!(result.has_errors());
}
