//! Single file linting logic.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::RuleConfiguration;
use crate::error::LinterError;
use crate::linter::verify;
use crate::result::LintResult;

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const BOM: char = '\u{feff}';

pub fn lint_file_internal(
    path: &Path,
    config: &RuleConfiguration,
) -> Result<LintResult, LinterError> {
    debug!("Linting {}", path.display());

    let metadata = fs::metadata(path).map_err(|e| {
        LinterError::file(format!(
            "Failed to read metadata for {}: {}",
            path.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(LinterError::file(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(LinterError::file(format!(
            "File size exceeds limit of {} bytes: {}",
            MAX_FILE_SIZE,
            path.display()
        )));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    let source = content.strip_prefix(BOM).unwrap_or(&content);
    let diagnostics = verify(source, config);
    debug!("{}: {} diagnostics", path.display(), diagnostics.len());

    Ok(LintResult::new(path.to_path_buf(), diagnostics))
}
