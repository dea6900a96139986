//! Lint command implementation

use std::path::PathBuf;

use lexlint_core::{Linter, LinterConfig};
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::output::output_results;

pub fn run_lint(cli: &Cli, paths: &[PathBuf], format: OutputFormat) -> Result<bool> {
    let config = load_config(cli)?;
    let linter = Linter::new(config);

    let (results, failures) = linter.lint_files(paths);

    if !failures.is_empty() {
        eprintln!("\n{} file(s) failed to lint:", failures.len());
        for (path, error) in &failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }

    let has_errors = output_results(&results, format)?;

    Ok(has_errors || !failures.is_empty())
}

/// Loads `--config` if given, otherwise the nearest discovered config.
pub fn load_config(cli: &Cli) -> Result<LinterConfig> {
    match cli.config {
        Some(ref path) => LinterConfig::from_file(path).into_diagnostic(),
        None => find_config(),
    }
}

pub fn find_config() -> Result<LinterConfig> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    if let Some(path) = LinterConfig::discover(&cwd) {
        return LinterConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LinterConfig::new())
}
