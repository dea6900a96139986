//! Conversion of diagnostics into editor-facing records.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, Severity};
use crate::result::LintResult;

/// A zero-based position as editors expect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorPosition {
    pub line: usize,
    pub column: usize,
}

/// One diagnostic in the shape editor integrations consume.
///
/// Positions are zero-based and half-open. Diagnostics carry a single
/// point, so the range covers the one character at `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorReport {
    pub severity: Severity,
    pub file: PathBuf,
    pub start: EditorPosition,
    pub end: EditorPosition,
    pub message: String,
    pub code: String,
}

impl EditorReport {
    pub fn from_diagnostic(file: &Path, diagnostic: &Diagnostic) -> Self {
        let start = EditorPosition {
            line: diagnostic.line.saturating_sub(1),
            column: diagnostic.column.saturating_sub(1),
        };
        let end = EditorPosition {
            column: start.column + 1,
            ..start
        };

        Self {
            severity: diagnostic.severity,
            file: file.to_path_buf(),
            start,
            end,
            message: diagnostic.message.clone(),
            code: diagnostic.code.to_string(),
        }
    }
}

/// Converts every diagnostic of `result`.
pub fn editor_reports(result: &LintResult) -> Vec<EditorReport> {
    result
        .diagnostics
        .iter()
        .map(|d| EditorReport::from_diagnostic(&result.path, d))
        .collect()
}
