//! Physical lines of a source text.
//!
//! Lines are indexed from 1. Index 0 holds an empty sentinel so that line
//! numbers reported to users can be used as indices directly.

use thiserror::Error;

use crate::rule::RuleCode;

const DISABLE_MARKER: &str = "/*jslint-disable*/";
const ENABLE_MARKER: &str = "/*jslint-enable*/";
const QUIET_MARKER: &str = "//jslint-quiet";

/// Errors raised by line lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("line {index} is out of range (last line is {last})")]
    OutOfRange { index: usize, last: usize },
}

/// One physical line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Line text without its terminator.
    pub text: String,
    /// Set by a trailing `//jslint-quiet`; rule diagnostics on this line are dropped.
    pub quiet: bool,
}

impl Line {
    fn from_text(text: &str) -> Self {
        Self {
            quiet: text.trim_end().ends_with(QUIET_MARKER),
            text: text.to_string(),
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A problem found while applying line directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineIssue {
    pub code: RuleCode,
    pub line: usize,
}

/// Immutable, indexed view of the lines of a source text.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<Line>,
    issues: Vec<LineIssue>,
}

impl LineBuffer {
    /// Splits `source` on `\n`, `\r\n` and bare `\r`.
    ///
    /// Lines inside a `/*jslint-disable*/` ... `/*jslint-enable*/` region,
    /// markers included, are blanked.
    pub fn new(source: &str) -> Self {
        let mut lines = vec![Line::default()];
        lines.extend(split_lines(source).into_iter().map(Line::from_text));

        let mut issues = Vec::new();
        let mut open: Option<usize> = None;

        for (index, line) in lines.iter_mut().enumerate().skip(1) {
            let trimmed = line.text.trim();
            if trimmed == DISABLE_MARKER {
                open.get_or_insert(index);
                *line = Line::default();
            } else if trimmed == ENABLE_MARKER {
                if open.take().is_some() {
                    *line = Line::default();
                } else {
                    issues.push(LineIssue {
                        code: RuleCode::UnopenedEnable,
                        line: index,
                    });
                }
            } else if open.is_some() {
                *line = Line::default();
            }
        }

        if let Some(line) = open {
            issues.push(LineIssue {
                code: RuleCode::UnclosedDisable,
                line,
            });
        }

        Self { lines, issues }
    }

    /// Returns line `index`.
    pub fn line(&self, index: usize) -> Result<&Line, LineError> {
        self.lines.get(index).ok_or(LineError::OutOfRange {
            index,
            last: self.last_index(),
        })
    }

    /// Highest valid index.
    pub fn last_index(&self) -> usize {
        self.lines.len() - 1
    }

    /// Clamps `index` into `[1, last_index]`.
    pub fn clamp(&self, index: usize) -> usize {
        index.clamp(1, self.last_index().max(1))
    }

    /// Returns whether line `index` is marked quiet. Out-of-range lines are not.
    pub fn is_quiet(&self, index: usize) -> bool {
        self.lines.get(index).is_some_and(|line| line.quiet)
    }

    /// Problems found while applying line directives, in line order.
    pub fn issues(&self) -> &[LineIssue] {
        &self.issues
    }
}

fn split_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = source.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&source[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&source[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&source[start..]);
    lines
}
