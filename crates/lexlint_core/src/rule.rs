//! Rule codes, rule levels and option flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tri-state level of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    /// The rule never reports.
    Off,
    /// The rule reports warnings.
    #[serde(alias = "warning")]
    Warn,
    /// The rule reports errors.
    Error,
}

impl FromStr for RuleLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown rule level '{}'", other)),
        }
    }
}

impl fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleLevel::Off => f.write_str("off"),
            RuleLevel::Warn => f.write_str("warn"),
            RuleLevel::Error => f.write_str("error"),
        }
    }
}

/// Stable identifier of a lint check.
///
/// The serialized form is the snake_case code used in configuration files and
/// in `/*jslint*/` directives, e.g. `no_long_lines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCode {
    NoLongLines,
    NoTabs,
    NoIrregularWhitespace,
    NoFloatingDecimal,
    InvalidNumeric,
    InvalidRegex,
    UnclosedString,
    UnclosedComment,
    UnclosedMega,
    UnclosedDisable,
    UnopenedEnable,
    UnexpectedCharA,
    UnexpectedA,
    UnexpectedABeforeB,
    UnexpectedComment,
    ExpectedA,
    ExpectedAB,
    ExpectedABeforeB,
    ExpectedDigitsAfterA,
    ExpectedFourDigits,
    ExpectedRegexpFactorA,
    TooManyDigits,
    MissingM,
    WrapRegexp,
    NestedComment,
    TodoComment,
    MisplacedDirectiveA,
    BadOptionA,
    BadDirectiveA,
}

impl RuleCode {
    /// Every rule code the lexer can raise.
    pub const ALL: &'static [RuleCode] = &[
        RuleCode::NoLongLines,
        RuleCode::NoTabs,
        RuleCode::NoIrregularWhitespace,
        RuleCode::NoFloatingDecimal,
        RuleCode::InvalidNumeric,
        RuleCode::InvalidRegex,
        RuleCode::UnclosedString,
        RuleCode::UnclosedComment,
        RuleCode::UnclosedMega,
        RuleCode::UnclosedDisable,
        RuleCode::UnopenedEnable,
        RuleCode::UnexpectedCharA,
        RuleCode::UnexpectedA,
        RuleCode::UnexpectedABeforeB,
        RuleCode::UnexpectedComment,
        RuleCode::ExpectedA,
        RuleCode::ExpectedAB,
        RuleCode::ExpectedABeforeB,
        RuleCode::ExpectedDigitsAfterA,
        RuleCode::ExpectedFourDigits,
        RuleCode::ExpectedRegexpFactorA,
        RuleCode::TooManyDigits,
        RuleCode::MissingM,
        RuleCode::WrapRegexp,
        RuleCode::NestedComment,
        RuleCode::TodoComment,
        RuleCode::MisplacedDirectiveA,
        RuleCode::BadOptionA,
        RuleCode::BadDirectiveA,
    ];

    /// Returns the snake_case code.
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleCode::NoLongLines => "no_long_lines",
            RuleCode::NoTabs => "no_tabs",
            RuleCode::NoIrregularWhitespace => "no_irregular_whitespace",
            RuleCode::NoFloatingDecimal => "no_floating_decimal",
            RuleCode::InvalidNumeric => "invalid_numeric",
            RuleCode::InvalidRegex => "invalid_regex",
            RuleCode::UnclosedString => "unclosed_string",
            RuleCode::UnclosedComment => "unclosed_comment",
            RuleCode::UnclosedMega => "unclosed_mega",
            RuleCode::UnclosedDisable => "unclosed_disable",
            RuleCode::UnopenedEnable => "unopened_enable",
            RuleCode::UnexpectedCharA => "unexpected_char_a",
            RuleCode::UnexpectedA => "unexpected_a",
            RuleCode::UnexpectedABeforeB => "unexpected_a_before_b",
            RuleCode::UnexpectedComment => "unexpected_comment",
            RuleCode::ExpectedA => "expected_a",
            RuleCode::ExpectedAB => "expected_a_b",
            RuleCode::ExpectedABeforeB => "expected_a_before_b",
            RuleCode::ExpectedDigitsAfterA => "expected_digits_after_a",
            RuleCode::ExpectedFourDigits => "expected_four_digits",
            RuleCode::ExpectedRegexpFactorA => "expected_regexp_factor_a",
            RuleCode::TooManyDigits => "too_many_digits",
            RuleCode::MissingM => "missing_m",
            RuleCode::WrapRegexp => "wrap_regexp",
            RuleCode::NestedComment => "nested_comment",
            RuleCode::TodoComment => "todo_comment",
            RuleCode::MisplacedDirectiveA => "misplaced_directive_a",
            RuleCode::BadOptionA => "bad_option_a",
            RuleCode::BadDirectiveA => "bad_directive_a",
        }
    }

    /// Level used when neither the configuration nor a directive sets one.
    pub const fn default_level(self) -> RuleLevel {
        match self {
            RuleCode::NoLongLines | RuleCode::NoTabs | RuleCode::NoIrregularWhitespace => {
                RuleLevel::Off
            }
            RuleCode::NestedComment
            | RuleCode::UnexpectedComment
            | RuleCode::ExpectedABeforeB => RuleLevel::Error,
            _ => RuleLevel::Warn,
        }
    }

    /// Level a rule takes when switched on with a bare `true`.
    pub const fn enabled_level(self) -> RuleLevel {
        match self.default_level() {
            RuleLevel::Off => RuleLevel::Warn,
            level => level,
        }
    }

    /// Formats the human-readable message for this code.
    ///
    /// Empty arguments count as absent, so codes with optional captures pick
    /// the shorter wording.
    pub fn message(self, args: &[&str]) -> String {
        let arg = |i: usize| args.get(i).copied().unwrap_or("");
        let (a, b) = (arg(0), arg(1));

        match self {
            RuleCode::NoLongLines => format!("Line is longer than {} characters.", a),
            RuleCode::NoTabs => "Use spaces, not tabs.".to_string(),
            RuleCode::NoIrregularWhitespace => match (a.is_empty(), b.is_empty()) {
                (false, false) => {
                    format!("Invalid or irregular whitespace between '{}' and '{}'.", a, b)
                }
                (false, true) => format!("Invalid or irregular whitespace near '{}'.", a),
                _ => "Invalid or irregular whitespace.".to_string(),
            },
            RuleCode::NoFloatingDecimal => {
                if a.is_empty() {
                    "A decimal point must be preceded or followed by a number.".to_string()
                } else {
                    format!(
                        "A decimal point must be preceded or followed by a number in '{}'.",
                        a
                    )
                }
            }
            RuleCode::InvalidNumeric => format!("Invalid character in numeric literal '{}'.", a),
            RuleCode::InvalidRegex => match (a.is_empty(), b.is_empty()) {
                (false, false) => format!("Invalid REGEX '{}', unexpected '{}'.", a, b),
                (false, true) => format!("Unexpected '{}' in REGEX.", a),
                _ => "Invalid REGEX.".to_string(),
            },
            RuleCode::UnclosedString => "Unclosed string.".to_string(),
            RuleCode::UnclosedComment => "Unclosed comment.".to_string(),
            RuleCode::UnclosedMega => "Unclosed mega literal.".to_string(),
            RuleCode::UnclosedDisable => {
                "Directive '/*jslint-disable*/' was not closed with '/*jslint-enable*/'."
                    .to_string()
            }
            RuleCode::UnopenedEnable => {
                "Directive '/*jslint-enable*/' was not opened with '/*jslint-disable*/'."
                    .to_string()
            }
            RuleCode::UnexpectedCharA => format!("Unexpected character '{}'.", a),
            RuleCode::UnexpectedA => format!("Unexpected '{}'.", a),
            RuleCode::UnexpectedABeforeB => format!("Unexpected '{}' before '{}'.", a, b),
            RuleCode::UnexpectedComment => "Unexpected comment.".to_string(),
            RuleCode::ExpectedA => format!("Expected '{}'.", a),
            RuleCode::ExpectedAB => format!("Expected '{}' and instead saw '{}'.", a, b),
            RuleCode::ExpectedABeforeB => format!("Expected '{}' before '{}'.", a, b),
            RuleCode::ExpectedDigitsAfterA => format!("Expected digits after '{}'.", a),
            RuleCode::ExpectedFourDigits => "Expected four digits after '\\u'.".to_string(),
            RuleCode::ExpectedRegexpFactorA => {
                format!("Expected a regexp factor and instead saw '{}'.", a)
            }
            RuleCode::TooManyDigits => "Too many digits.".to_string(),
            RuleCode::MissingM => {
                "Expected 'm' flag on a multiline regular expression.".to_string()
            }
            RuleCode::WrapRegexp => "Wrap this regexp in parens to avoid confusion.".to_string(),
            RuleCode::NestedComment => "Nested comment.".to_string(),
            RuleCode::TodoComment => "Unexpected TODO comment.".to_string(),
            RuleCode::MisplacedDirectiveA => {
                format!("Place the '/*{}*/' directive before the first statement.", a)
            }
            RuleCode::BadOptionA => format!("Bad option '{}'.", a),
            RuleCode::BadDirectiveA => format!("Bad directive '{}'.", a),
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("unknown rule code '{}'", s))
    }
}

/// Boolean options recognized in configuration and in `/*jslint*/` directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionFlag {
    Beta,
    Bitwise,
    Browser,
    Convert,
    Couch,
    Devel,
    Ecma,
    Eval,
    For,
    Getset,
    Indent2,
    Long,
    Name,
    Node,
    Single,
    TestCause,
    TestInternalError,
    This,
    Trace,
    Unordered,
    Variable,
    White,
}

impl OptionFlag {
    pub const ALL: &'static [OptionFlag] = &[
        OptionFlag::Beta,
        OptionFlag::Bitwise,
        OptionFlag::Browser,
        OptionFlag::Convert,
        OptionFlag::Couch,
        OptionFlag::Devel,
        OptionFlag::Ecma,
        OptionFlag::Eval,
        OptionFlag::For,
        OptionFlag::Getset,
        OptionFlag::Indent2,
        OptionFlag::Long,
        OptionFlag::Name,
        OptionFlag::Node,
        OptionFlag::Single,
        OptionFlag::TestCause,
        OptionFlag::TestInternalError,
        OptionFlag::This,
        OptionFlag::Trace,
        OptionFlag::Unordered,
        OptionFlag::Variable,
        OptionFlag::White,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OptionFlag::Beta => "beta",
            OptionFlag::Bitwise => "bitwise",
            OptionFlag::Browser => "browser",
            OptionFlag::Convert => "convert",
            OptionFlag::Couch => "couch",
            OptionFlag::Devel => "devel",
            OptionFlag::Ecma => "ecma",
            OptionFlag::Eval => "eval",
            OptionFlag::For => "for",
            OptionFlag::Getset => "getset",
            OptionFlag::Indent2 => "indent2",
            OptionFlag::Long => "long",
            OptionFlag::Name => "name",
            OptionFlag::Node => "node",
            OptionFlag::Single => "single",
            OptionFlag::TestCause => "test_cause",
            OptionFlag::TestInternalError => "test_internal_error",
            OptionFlag::This => "this",
            OptionFlag::Trace => "trace",
            OptionFlag::Unordered => "unordered",
            OptionFlag::Variable => "variable",
            OptionFlag::White => "white",
        }
    }
}

impl FromStr for OptionFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionFlag::ALL
            .iter()
            .copied()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| format!("unknown option '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_code_round_trips_through_str() {
        for code in RuleCode::ALL {
            assert_eq!(code.as_str().parse::<RuleCode>(), Ok(*code));
        }
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        for code in RuleCode::ALL {
            let json = serde_json::to_string(code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert!("no_such_rule".parse::<RuleCode>().is_err());
        assert!("undeclared_a".parse::<RuleCode>().is_err());
    }

    #[rstest]
    #[case(RuleCode::NoLongLines, RuleLevel::Off, RuleLevel::Warn)]
    #[case(RuleCode::NoTabs, RuleLevel::Off, RuleLevel::Warn)]
    #[case(RuleCode::NoFloatingDecimal, RuleLevel::Warn, RuleLevel::Warn)]
    #[case(RuleCode::NestedComment, RuleLevel::Error, RuleLevel::Error)]
    fn test_levels(
        #[case] code: RuleCode,
        #[case] default: RuleLevel,
        #[case] enabled: RuleLevel,
    ) {
        assert_eq!(code.default_level(), default);
        assert_eq!(code.enabled_level(), enabled);
    }

    #[rstest]
    #[case(RuleCode::NoLongLines, &["80"], "Line is longer than 80 characters.")]
    #[case(
        RuleCode::NoIrregularWhitespace,
        &["/a/", "//x"],
        "Invalid or irregular whitespace between '/a/' and '//x'."
    )]
    #[case(RuleCode::NoIrregularWhitespace, &[], "Invalid or irregular whitespace.")]
    #[case(RuleCode::InvalidRegex, &["a", "q"], "Invalid REGEX 'a', unexpected 'q'.")]
    #[case(RuleCode::InvalidRegex, &["?"], "Unexpected '?' in REGEX.")]
    #[case(RuleCode::ExpectedAB, &["}", "{"], "Expected '}' and instead saw '{'.")]
    #[case(
        RuleCode::MisplacedDirectiveA,
        &["global"],
        "Place the '/*global*/' directive before the first statement."
    )]
    fn test_messages(#[case] code: RuleCode, #[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(code.message(args), expected);
    }

    #[test]
    fn test_rule_level_parse() {
        assert_eq!("warning".parse::<RuleLevel>(), Ok(RuleLevel::Warn));
        assert_eq!("off".parse::<RuleLevel>(), Ok(RuleLevel::Off));
        assert!("loud".parse::<RuleLevel>().is_err());
    }

    #[test]
    fn test_option_flag_parse() {
        assert_eq!("test_cause".parse::<OptionFlag>(), Ok(OptionFlag::TestCause));
        assert!("no_tabs".parse::<OptionFlag>().is_err());
    }
}
