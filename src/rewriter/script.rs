//! Script detection by Unicode code-point ranges

use serde::{Deserialize, Serialize};

/// Writing system a query is typed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Arabic,
    Latin,
    Unknown,
}

/// Arabic, Arabic Supplement, Arabic Extended-A and both presentation-form blocks
const ARABIC_RANGES: &[(char, char)] = &[
    ('\u{0600}', '\u{06FF}'),
    ('\u{0750}', '\u{077F}'),
    ('\u{08A0}', '\u{08FF}'),
    ('\u{FB50}', '\u{FDFF}'),
    ('\u{FE70}', '\u{FEFF}'),
];

fn is_arabic(c: char) -> bool {
    ARABIC_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&c))
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Ordered rules; the first one with a matching character wins
const SCRIPT_RULES: &[(Script, fn(char) -> bool)] =
    &[(Script::Arabic, is_arabic), (Script::Latin, is_latin)];

/// Classify text as Arabic-script, Latin or unknown
pub fn detect_script(text: &str) -> Script {
    SCRIPT_RULES
        .iter()
        .find(|(_, matches)| text.chars().any(matches))
        .map(|(script, _)| *script)
        .unwrap_or(Script::Unknown)
}
