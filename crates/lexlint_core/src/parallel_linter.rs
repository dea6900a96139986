//! Parallel file linting logic.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::warn;

use crate::config::RuleConfiguration;
use crate::error::LinterError;
use crate::file_linter::lint_file_internal;
use crate::linter::LintFilesResult;
use crate::result::LintResult;

/// Lints `paths` in parallel, one independent pass per file.
///
/// A file that cannot be read is collected as a failure; it does not stop
/// the others. Results keep the order of `paths`.
pub fn lint_files(paths: &[PathBuf], config: &RuleConfiguration) -> LintFilesResult {
    let results: Vec<Result<LintResult, (PathBuf, LinterError)>> = paths
        .par_iter()
        .map(|path| lint_file_internal(path, config).map_err(|e| (path.clone(), e)))
        .collect();

    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(lint_result) => successes.push(lint_result),
            Err((path, error)) => {
                warn!("Failed to lint {}: {}", path.display(), error);
                failures.push((path, error));
            }
        }
    }

    (successes, failures)
}
