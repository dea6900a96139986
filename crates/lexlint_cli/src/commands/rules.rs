//! Rules command implementation

use lexlint_core::{Linter, OptionFlag, RuleCode, RuleConfiguration};
use miette::Result;

use crate::cli::Cli;
use crate::commands::lint::load_config;

/// Prints every rule code with its effective level, then the option flags.
pub fn run_rules(cli: &Cli) -> Result<()> {
    let linter = Linter::new(load_config(cli)?);
    print!("{}", render(linter.rules()));
    Ok(())
}

fn render(rules: &RuleConfiguration) -> String {
    let mut out = String::from("Rules:\n");
    for code in RuleCode::ALL {
        out.push_str(&format!("  {:<28} {}\n", code.as_str(), rules.level(*code)));
    }

    out.push_str("\nOptions:\n");
    out.push_str(&format!(
        "  {:<28} {}\n",
        "max_line_length",
        rules.max_line_length()
    ));
    for flag in OptionFlag::ALL {
        out.push_str(&format!("  {:<28} {}\n", flag.as_str(), rules.flag(*flag)));
    }
    out
}
