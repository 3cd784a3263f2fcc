//! Poetry tokenizer
//!
//! Splits normalized text on whitespace and punctuation in both scripts and
//! drops a short list of function words.

use crate::rewriter::normalize;
use std::collections::HashSet;

/// Arabic comma, semicolon, question mark and full stop
const ARABIC_PUNCTUATION: &[char] = &['\u{060C}', '\u{061B}', '\u{061F}', '\u{06D4}'];

/// Function words that carry no search signal
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "the", "of", "in", "on", "to", "is", "by", "۽", "جو", "جي", "جا", "کي",
    "تي", "۾", "کان",
];

fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || ARABIC_PUNCTUATION.contains(&c)
        || matches!(c, '“' | '”' | '‘' | '’' | '«' | '»' | '…')
}

/// Split already-normalized text into bare words, keeping stopwords
pub(crate) fn split_terms(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(is_separator).filter(|t| !t.is_empty())
}

/// Tokenizer used for both index building and query terms
#[derive(Debug, Clone, Default)]
pub struct PoetryTokenizer;

impl PoetryTokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Tokenize text, keeping repeated terms
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        split_terms(&normalize(text))
            .filter(|t| !STOPWORDS.contains(t))
            .map(str::to_string)
            .collect()
    }

    /// Tokenize several texts and deduplicate, preserving first-seen order
    pub fn unique_terms<'a, I>(&self, texts: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for text in texts {
            for token in self.tokenize(text) {
                if seen.insert(token.clone()) {
                    result.push(token);
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_english() {
        let tokenizer = PoetryTokenizer::new();
        let tokens = tokenizer.tokenize("The Beloved, and the Rain!");
        assert_eq!(tokens, vec!["beloved", "rain"]);
    }

    #[test]
    fn test_tokenize_sindhi_punctuation() {
        let tokenizer = PoetryTokenizer::new();
        let tokens = tokenizer.tokenize("عشق، محبت ۽ وطن؟");
        assert_eq!(tokens, vec!["عشق", "محبت", "وطن"]);
    }

    #[test]
    fn test_tokenize_strips_diacritics() {
        let tokenizer = PoetryTokenizer::new();
        assert_eq!(tokenizer.tokenize("عِشْق"), vec!["عشق"]);
    }

    #[test]
    fn test_tokenize_keeps_repeats() {
        let tokenizer = PoetryTokenizer::new();
        assert_eq!(tokenizer.tokenize("rain rain").len(), 2);
    }

    #[test]
    fn test_unique_terms() {
        let tokenizer = PoetryTokenizer::new();
        let terms = tokenizer.unique_terms(["ishq ghazal", "ishq", "love"]);
        assert_eq!(terms, vec!["ishq", "ghazal", "love"]);
    }

    #[test]
    fn test_empty_text() {
        let tokenizer = PoetryTokenizer::new();
        assert!(tokenizer.tokenize("   ").is_empty());
        assert!(tokenizer.tokenize("...").is_empty());
    }

    #[test]
    fn test_split_terms_keeps_stopwords() {
        let terms: Vec<_> = split_terms("ishq, ۽ the ghazal?").collect();
        assert_eq!(terms, vec!["ishq", "۽", "the", "ghazal"]);
    }
}
