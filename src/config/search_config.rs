//! Search configuration structures
//!
//! Defines the per-query options for the searcher.

use crate::rewriter::Lang;
use serde::{Deserialize, Serialize};

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Language the query is issued in
    pub lang: Lang,
    /// Number of results to return
    pub top_k: usize,
    /// Enable query rewriting (filters and synonym expansion)
    pub enable_rewrite: bool,
    /// Explicit theme filter, overrides a detected theme
    pub theme_filter: Option<String>,
    /// Explicit form filter, overrides a detected form
    pub form_filter: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lang: Lang::default(),
            top_k: 10,
            enable_rewrite: true,
            theme_filter: None,
            form_filter: None,
        }
    }
}

impl SearchConfig {
    /// Create a new search configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query language
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    /// Set the number of results to return
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set whether to enable query rewriting
    pub fn with_rewrite(mut self, enable: bool) -> Self {
        self.enable_rewrite = enable;
        self
    }

    /// Set the theme filter
    pub fn with_theme_filter(mut self, theme: Option<String>) -> Self {
        self.theme_filter = theme;
        self
    }

    /// Set the form filter
    pub fn with_form_filter(mut self, form: Option<String>) -> Self {
        self.form_filter = form;
        self
    }
}
