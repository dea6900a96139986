//! # lexlint_core
//!
//! Lexer and lint engine for lexlint.
//!
//! This crate provides:
//! - A context-sensitive lexer for JavaScript-like source that reports
//!   lexical lint diagnostics while it tokenizes
//! - Rule configuration loading and resolution
//! - Single-file and parallel linting
//! - Conversion of diagnostics for editor integrations
//!
//! ## Example
//!
//! ```rust
//! use lexlint_core::{RuleCode, RuleConfiguration, verify};
//!
//! let diagnostics = verify("x = a + /b/;", &RuleConfiguration::new());
//! assert_eq!(diagnostics[0].code, RuleCode::WrapRegexp);
//! ```

mod config;
mod diagnostic;
mod error;
mod file_linter;
pub mod globals;
pub mod lexer;
pub mod line_buffer;
mod linter;
mod parallel_linter;
pub mod report;
mod reporter;
mod result;
mod rule;

pub use config::{DEFAULT_MAX_LINE_LENGTH, LinterConfig, OptionValue, RuleConfiguration};
pub use diagnostic::{Diagnostic, Severity};
pub use error::LinterError;
pub use file_linter::MAX_FILE_SIZE;
pub use globals::{GlobalMap, GlobalOrigin};
pub use lexer::{Aborted, LexAbort, Lexed, Position, Token, TokenKind};
pub use linter::{LintFilesResult, Linter, tokenize, verify, verify_value};
pub use report::{EditorPosition, EditorReport, editor_reports};
pub use result::{LintResult, LintSummary};
pub use rule::{OptionFlag, RuleCode, RuleLevel};
