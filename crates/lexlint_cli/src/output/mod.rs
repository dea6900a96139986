//! Output formatting module

mod json;
mod text;

use lexlint_core::LintResult;
use miette::Result;

use crate::cli::OutputFormat;

pub fn output_results(results: &[LintResult], format: OutputFormat) -> Result<bool> {
    let has_errors = results.iter().any(|r| r.has_errors());

    match format {
        OutputFormat::Json => json::output_json(results)?,
        OutputFormat::Report => json::output_report(results)?,
        OutputFormat::Text => text::output_text(results),
    }

    Ok(has_errors)
}
