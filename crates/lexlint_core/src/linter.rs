//! Lint entry points.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{LinterConfig, RuleConfiguration};
use crate::diagnostic::Diagnostic;
use crate::error::LinterError;
use crate::file_linter::lint_file_internal;
use crate::lexer::{Aborted, Lexed, Lexer};
use crate::line_buffer::LineBuffer;
use crate::parallel_linter;
use crate::result::LintResult;

/// Result type for [`Linter::lint_files`].
///
/// Contains a tuple of:
/// - Successful lint results
/// - Failed files with their errors (path and error)
pub type LintFilesResult = (Vec<LintResult>, Vec<(PathBuf, LinterError)>);

/// Lexes `source`, returning the token stream and everything gathered with
/// it.
///
/// On a fatal error only the diagnostics collected up to the abort are
/// available.
pub fn tokenize(source: &str, config: &RuleConfiguration) -> Result<Lexed, Aborted> {
    let lines = LineBuffer::new(source);
    Lexer::new(&lines, config).run()
}

/// Runs one lint pass over `source` and returns its diagnostics in emission
/// order.
pub fn verify(source: &str, config: &RuleConfiguration) -> Vec<Diagnostic> {
    let diagnostics = match tokenize(source, config) {
        Ok(lexed) => lexed.diagnostics,
        Err(aborted) => {
            debug!("Pass aborted: {}", aborted);
            aborted.diagnostics
        }
    };
    debug!("Verified source, {} diagnostics", diagnostics.len());
    diagnostics
}

/// Like [`verify`], with the configuration given as a raw JSON document.
///
/// An absent (`null`) or malformed configuration yields no diagnostics.
pub fn verify_value(source: &str, config: &serde_json::Value) -> Vec<Diagnostic> {
    if config.is_null() {
        debug!("No configuration given, skipping");
        return Vec::new();
    }

    match LinterConfig::from_value(config.clone()) {
        Ok(config) => verify(source, &config.resolve()),
        Err(e) => {
            debug!("Skipping lint: {}", e);
            Vec::new()
        }
    }
}

/// The linter front end.
///
/// Holds a loaded configuration and lints sources and files against it.
#[derive(Debug, Clone)]
pub struct Linter {
    /// Configuration resolved against the rule catalog.
    rules: RuleConfiguration,
}

impl Linter {
    /// Creates a new linter with the given configuration.
    pub fn new(config: LinterConfig) -> Self {
        Self {
            rules: config.resolve(),
        }
    }

    pub fn rules(&self) -> &RuleConfiguration {
        &self.rules
    }

    /// Lints an in-memory source reported under `path`.
    pub fn lint_source(&self, path: impl Into<PathBuf>, source: &str) -> LintResult {
        LintResult::new(path.into(), verify(source, &self.rules))
    }

    /// Lints a single file.
    pub fn lint_file(&self, path: &Path) -> Result<LintResult, LinterError> {
        lint_file_internal(path, &self.rules)
    }

    /// Lints files in parallel.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintFilesResult {
        parallel_linter::lint_files(paths, &self.rules)
    }
}
