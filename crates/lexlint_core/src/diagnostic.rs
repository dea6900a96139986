//! Diagnostic types for lint results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rule::RuleCode;

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A positioned lint message.
///
/// `line` and `column` are both 1-based and always point into the source:
/// the column never exceeds the length of its line (or 1 for empty lines).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// The rule that generated this diagnostic.
    pub code: RuleCode,

    /// The diagnostic message.
    pub message: String,

    pub line: usize,

    pub column: usize,

    /// Text of the offending line.
    #[serde(default)]
    pub source_line: String,
}

impl Diagnostic {
    /// Creates a new error diagnostic at line 1, column 1.
    pub fn new(code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            line: 1,
            column: 1,
            source_line: String::new(),
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    /// Attaches the text of the offending line.
    pub fn with_source_line(mut self, text: impl Into<String>) -> Self {
        self.source_line = text.into();
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
