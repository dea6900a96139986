//! Lint result types.

use std::path::PathBuf;

use serde::Serialize;

use crate::diagnostic::{Diagnostic, Severity};

/// Result of linting a single file.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    /// Path to the linted file.
    pub path: PathBuf,

    /// Diagnostics found in the file, in emission order.
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    /// Creates a new lint result.
    pub fn new(path: PathBuf, diagnostics: Vec<Diagnostic>) -> Self {
        Self { path, diagnostics }
    }

    /// Returns true if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Returns the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns the number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Summary of linting multiple files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LintSummary {
    /// Total files processed.
    pub files_checked: usize,

    /// Total diagnostics found.
    pub total_diagnostics: usize,

    /// Diagnostics with error severity.
    pub errors: usize,

    /// Diagnostics with warning severity.
    pub warnings: usize,

    /// Files with at least one error diagnostic.
    pub files_with_errors: usize,
}

impl LintSummary {
    /// Creates a summary from results.
    pub fn from_results(results: &[LintResult]) -> Self {
        let mut summary = Self::default();

        for result in results {
            summary.files_checked += 1;
            summary.total_diagnostics += result.diagnostics.len();
            summary.errors += result.error_count();
            summary.warnings += result.warning_count();
            if result.has_errors() {
                summary.files_with_errors += 1;
            }
        }

        summary
    }
}
