//! Query rewriter implementation
//!
//! Normalizes a raw search string, extracts century/theme/form filters and
//! describes every applied rewrite with a pill.

use super::century::{extract_century, ordinal, YearRange};
use super::lexicon::{detect_form, detect_theme, form_label};
use super::{detect_script, normalize, Lang, Script};
use crate::tokenizer::split_terms;
use serde::{Deserialize, Serialize};

/// Filters extracted from a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_range: Option<YearRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
}

impl QueryFilters {
    /// True when no filter was extracted
    pub fn is_empty(&self) -> bool {
        self.year_range.is_none() && self.theme.is_none() && self.form.is_none()
    }
}

/// Result of rewriting a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewrittenQuery {
    /// Text exactly as typed
    pub original: String,
    /// Normalized text
    pub normalized: String,
    /// Language the query was issued in
    pub lang: Lang,
    /// Detected script of the original text
    pub script: Script,
    /// Whitespace-split tokens of the normalized text
    pub tokens: Vec<String>,
    /// Synonym expansion of the matched theme
    pub expansions: Vec<String>,
    /// Extracted filters
    pub filters: QueryFilters,
    /// Human-readable labels for each applied rewrite, in order
    pub pills: Vec<String>,
}

fn century_pill(century: u32, lang: Lang) -> String {
    match lang {
        Lang::En => format!("{} century", ordinal(century)),
        Lang::Sd => format!("{} صدي", century),
    }
}

fn theme_pill(label: &str, lang: Lang) -> String {
    match lang {
        Lang::En => format!("theme: {}", label),
        Lang::Sd => format!("موضوع: {}", label),
    }
}

fn form_pill(form: &str, lang: Lang) -> String {
    let label = form_label(form, lang);
    match lang {
        Lang::En => format!("form: {}", label),
        Lang::Sd => format!("صنف: {}", label),
    }
}

/// Rewrite a raw query for the given language.
///
/// Pure and infallible: parts that do not match leave their field empty.
pub fn rewrite_query(text: &str, lang: Lang) -> RewrittenQuery {
    let normalized = normalize(text);
    let script = detect_script(text);
    let token_refs: Vec<&str> = normalized.split_whitespace().collect();
    // Keywords are matched without punctuation glued to them ("ishq," "غزل؟")
    let words: Vec<&str> = split_terms(&normalized).collect();

    let mut filters = QueryFilters::default();
    let mut expansions = Vec::new();
    let mut pills = Vec::new();

    if let Some(range) = extract_century(&normalized) {
        pills.push(century_pill(range.century(), lang));
        filters.year_range = Some(range);
    }

    if let Some(entry) = detect_theme(&words) {
        filters.theme = Some(entry.key.to_string());
        expansions = entry.synonyms.iter().map(|s| s.to_string()).collect();
        pills.push(theme_pill(entry.label(lang), lang));
    }

    if let Some(form) = detect_form(&words) {
        filters.form = Some(form.to_string());
        pills.push(form_pill(form, lang));
    }

    tracing::debug!(
        "Rewrote query '{}' ({}, {:?}): {} token(s), filters={:?}",
        text,
        lang,
        script,
        token_refs.len(),
        filters
    );

    RewrittenQuery {
        original: text.to_string(),
        tokens: token_refs.iter().map(|t| t.to_string()).collect(),
        normalized,
        lang,
        script,
        expansions,
        filters,
        pills,
    }
}
