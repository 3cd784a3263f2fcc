//! Search module
//!
//! This module provides the searcher and its result types.

mod searcher;

pub use searcher::Searcher;

use crate::loader::Poem;
use crate::rewriter::{Lang, RewrittenQuery};
use serde::{Deserialize, Serialize};

/// Search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Poem ID
    pub poem_id: String,
    /// Relevance score (0.0 for filter-only matches)
    pub score: f32,
    /// Poem title
    pub title: String,
    /// Poet display name
    pub poet: String,
    /// URL slug
    pub slug: String,
    /// Language of the poem
    pub lang: Lang,
    /// First couplet
    pub snippet: String,
}

impl SearchResult {
    /// Create a search result from a stored poem
    pub fn from_poem(poem: &Poem, score: f32) -> Self {
        Self {
            poem_id: poem.id.clone(),
            score,
            title: poem.title.clone(),
            poet: poem.poet.name.clone(),
            slug: poem.slug.clone(),
            lang: poem.lang,
            snippet: poem.snippet(),
        }
    }
}

/// A rewritten query together with its ranked results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub query: RewrittenQuery,
    pub results: Vec<SearchResult>,
}
