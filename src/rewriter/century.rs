//! Century phrase extraction ("17th century" → 1601..=1700)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Earliest and latest centuries a query may name
const MIN_CENTURY: u32 = 1;
const MAX_CENTURY: u32 = 21;

/// `<1-2 digits><ordinal suffix?><century|centuries>`
static CENTURY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})\s*(?:st|nd|rd|th)?\s*(?:century|centuries)\b")
        .expect("Invalid regex")
});

/// Inclusive calendar year range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl YearRange {
    /// Year range covered by the ordinal century `n`, if `n` is within 1..=21
    pub fn for_century(n: u32) -> Option<Self> {
        if !(MIN_CENTURY..=MAX_CENTURY).contains(&n) {
            return None;
        }
        let n = n as i32;
        Some(Self {
            from: (n - 1) * 100 + 1,
            to: n * 100,
        })
    }

    /// Check if a single year falls inside the range
    pub fn contains(&self, year: i32) -> bool {
        (self.from..=self.to).contains(&year)
    }

    /// Check if `[start, end]` shares at least one year with the range
    pub fn overlaps(&self, start: i32, end: i32) -> bool {
        start <= self.to && end >= self.from
    }

    /// Ordinal century this range was built from
    pub fn century(&self) -> u32 {
        (self.to / 100).max(0) as u32
    }
}

/// Find the first valid century number mentioned in the text
pub fn extract_century_number(text: &str) -> Option<u32> {
    CENTURY_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .find(|n| (MIN_CENTURY..=MAX_CENTURY).contains(n))
}

/// Extract the year range of the first century phrase in the text
pub fn extract_century(text: &str) -> Option<YearRange> {
    extract_century_number(text).and_then(YearRange::for_century)
}

/// English ordinal for a number: 1st, 2nd, 3rd, 11th, 21st
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
