//! Lexeme matchers over the unread part of a line.
//!
//! Each matcher returns the length in characters of the lexeme at the start
//! of `s`, or 0 when there is none.

/// Reserved words, matched against lower-cased identifiers.
pub const KEYWORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "true",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "private",
    "protected",
    "public",
    "return",
    "super",
    "switch",
    "static",
    "this",
    "throw",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Returns the reserved word `word` spells, ignoring case.
pub fn keyword(word: &str) -> Option<&'static str> {
    let lower = word.to_ascii_lowercase();
    KEYWORDS.iter().copied().find(|k| *k == lower)
}

pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

pub fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
pub fn identifier_len(s: &[char]) -> usize {
    match s.first() {
        Some(&c) if is_identifier_start(c) => {
            1 + s[1..].iter().take_while(|&&c| is_identifier_part(c)).count()
        }
        _ => 0,
    }
}

/// `0n?` or `[1-9][0-9]*n?`
pub fn number_len(s: &[char]) -> usize {
    let digits = match s.first() {
        Some('0') => 1,
        Some('1'..='9') => 1 + s[1..].iter().take_while(|c| c.is_ascii_digit()).count(),
        _ => return 0,
    };
    if s.get(digits) == Some(&'n') {
        digits + 1
    } else {
        digits
    }
}

/// Operators and punctuation, including quotes, the backtick and comment
/// openers. `/=` is not matched here; the slash is disambiguated later.
pub fn operator_len(s: &[char]) -> usize {
    let Some(&first) = s.first() else {
        return 0;
    };
    let at = |i: usize| s.get(i).copied();
    let then_eq = |i: usize| if at(i) == Some('=') { i + 1 } else { i };

    match first {
        '(' | ')' | '{' | '}' | '[' | ']' | ',' | ':' | ';' | '\'' | '"' | '~' | '`' => 1,
        '?' => match at(1) {
            Some('?') => then_eq(2),
            Some('.') => 2,
            _ => 1,
        },
        '=' => match at(1) {
            Some('=') => then_eq(2),
            Some('>') => 2,
            _ => 1,
        },
        '.' => s.iter().take_while(|&&c| c == '.').count(),
        '*' => match at(1) {
            Some('*') => then_eq(2),
            Some('/') | Some('=') => 2,
            _ => 1,
        },
        '/' => match at(1) {
            Some('*') | Some('/') => 2,
            _ => 1,
        },
        '+' | '-' => {
            if at(1) == Some(first) || at(1) == Some('=') {
                2
            } else {
                1
            }
        }
        '^' | '%' => then_eq(1),
        '&' | '|' => match at(1) {
            Some(c) if c == first => then_eq(2),
            Some('=') => 2,
            _ => 1,
        },
        '>' => {
            let run = s.iter().take(3).take_while(|&&c| c == '>').count();
            then_eq(run)
        }
        '<' => {
            let run = if at(1) == Some('<') { 2 } else { 1 };
            then_eq(run)
        }
        '!' => match at(1) {
            Some('!') => 2,
            Some('=') => then_eq(2),
            _ => 1,
        },
        _ => 0,
    }
}
