//! JSON output formatters

use lexlint_core::{EditorReport, LintResult, editor_reports};
use miette::{IntoDiagnostic, Result};

pub fn output_json(results: &[LintResult]) -> Result<()> {
    let output: Vec<_> = results
        .iter()
        .map(|r| {
            serde_json::json!({
                "path": r.path.display().to_string(),
                "diagnostics": r.diagnostics,
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}

pub fn output_report(results: &[LintResult]) -> Result<()> {
    let reports: Vec<EditorReport> = results.iter().flat_map(editor_reports).collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&reports).into_diagnostic()?
    );
    Ok(())
}
