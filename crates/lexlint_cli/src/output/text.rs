//! Text output formatter

use lexlint_core::{LintResult, LintSummary};

pub fn output_text(results: &[LintResult]) {
    for result in results {
        if result.diagnostics.is_empty() {
            continue;
        }

        println!("\n{}:", result.path.display());
        for diag in &result.diagnostics {
            println!(
                "  {}:{} {} [{}]: {}",
                diag.line, diag.column, diag.severity, diag.code, diag.message
            );
        }
    }

    let summary = LintSummary::from_results(results);

    println!();
    println!(
        "Checked {} files, found {} issues ({} errors, {} warnings)",
        summary.files_checked, summary.total_diagnostics, summary.errors, summary.warnings
    );
}
