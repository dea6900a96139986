//! Severity resolution and diagnostic collection.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::RuleConfiguration;
use crate::diagnostic::{Diagnostic, Severity};
use crate::lexer::LexAbort;
use crate::line_buffer::LineBuffer;
use crate::rule::{OptionFlag, RuleCode, RuleLevel};

/// Collects diagnostics for one lint pass.
///
/// Levels are resolved in order: in-source `/*jslint*/` overrides, then the
/// configuration, then the default passed by the caller.
#[derive(Debug)]
pub struct Reporter<'a> {
    config: &'a RuleConfiguration,
    lines: &'a LineBuffer,
    rule_overrides: BTreeMap<RuleCode, RuleLevel>,
    flag_overrides: BTreeMap<OptionFlag, bool>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Reporter<'a> {
    pub fn new(config: &'a RuleConfiguration, lines: &'a LineBuffer) -> Self {
        Self {
            config,
            lines,
            rule_overrides: BTreeMap::new(),
            flag_overrides: BTreeMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn config(&self) -> &RuleConfiguration {
        self.config
    }

    /// Effective level of `code`, falling back to `default`.
    pub fn level(&self, code: RuleCode, default: RuleLevel) -> RuleLevel {
        self.rule_overrides
            .get(&code)
            .copied()
            .or_else(|| self.config.rule_level(code))
            .unwrap_or(default)
    }

    /// Effective value of an option flag.
    pub fn flag(&self, flag: OptionFlag) -> bool {
        self.flag_overrides
            .get(&flag)
            .copied()
            .unwrap_or_else(|| self.config.flag(flag))
    }

    /// Overrides the level of `code` for the rest of the pass.
    pub fn set_rule(&mut self, code: RuleCode, level: RuleLevel) {
        self.rule_overrides.insert(code, level);
    }

    /// Overrides an option flag for the rest of the pass.
    pub fn set_flag(&mut self, flag: OptionFlag, enabled: bool) {
        self.flag_overrides.insert(flag, enabled);
    }

    /// Reports `code` at its default level.
    pub fn rule(&mut self, code: RuleCode, line: usize, column: usize, args: &[&str]) {
        self.emit(code, code.default_level(), line, column, args);
    }

    /// Reports `code` at error level unless configured otherwise.
    pub fn error(&mut self, code: RuleCode, line: usize, column: usize, args: &[&str]) {
        self.emit(code, RuleLevel::Error, line, column, args);
    }

    /// Records a fatal error and returns the abort value.
    ///
    /// Fatal errors ignore quiet lines and always report at error severity.
    /// A code configured `off` still aborts, silently.
    pub fn fatal(&mut self, code: RuleCode, line: usize, column: usize, args: &[&str]) -> LexAbort {
        let (line, column) = self.clamp(line, column);
        if self.level(code, RuleLevel::Error) != RuleLevel::Off {
            let diagnostic = self.build(code, Severity::Error, line, column, args);
            self.diagnostics.push(diagnostic);
        }
        debug!("Lexing stopped at {}:{} ({})", line, column, code);
        LexAbort { code, line, column }
    }

    #[cfg(test)]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn emit(&mut self, code: RuleCode, default: RuleLevel, line: usize, column: usize, args: &[&str]) {
        let severity = match self.level(code, default) {
            RuleLevel::Off => return,
            RuleLevel::Warn => Severity::Warning,
            RuleLevel::Error => Severity::Error,
        };

        let (line, column) = self.clamp(line, column);
        if self.lines.is_quiet(line) {
            return;
        }

        let diagnostic = self.build(code, severity, line, column, args);
        self.diagnostics.push(diagnostic);
    }

    fn build(
        &self,
        code: RuleCode,
        severity: Severity,
        line: usize,
        column: usize,
        args: &[&str],
    ) -> Diagnostic {
        let text = self
            .lines
            .line(line)
            .map(|l| l.text.clone())
            .unwrap_or_default();

        Diagnostic::new(code, code.message(args))
            .with_severity(severity)
            .with_location(line, column)
            .with_source_line(text)
    }

    /// Clamps a position into the source: lines into `[1, last]`, columns
    /// into `[1, max(1, len)]`.
    fn clamp(&self, line: usize, column: usize) -> (usize, usize) {
        let line = self.lines.clamp(line);
        let len = self.lines.line(line).map(|l| l.len()).unwrap_or(0);
        (line, column.clamp(1, len.max(1)))
    }
}
