//! Searcher implementation
//!
//! Rewrites the query, ranks poems with BM25 over the query terms and theme
//! expansions, then applies the extracted filters.

use super::{SearchOutcome, SearchResult};
use crate::config::SearchConfig;
use crate::index::{Bm25Index, Docstore, BM25_FILE, DOCSTORE_FILE};
use crate::loader::Poem;
use crate::rewriter::lexicon::{self, ThemeEntry};
use crate::rewriter::{rewrite_query, QueryFilters, RewrittenQuery};
use crate::tokenizer::PoetryTokenizer;
use anyhow::Result;
use std::cmp::Ordering;
use std::path::Path;

/// Main searcher over a poetry index
pub struct Searcher {
    /// BM25 index
    bm25_index: Bm25Index,
    /// Poem store
    docstore: Docstore,
    /// Tokenizer shared with the index
    tokenizer: PoetryTokenizer,
}

impl Searcher {
    /// Create a new searcher from an index directory
    pub fn new<P: AsRef<Path>>(index_dir: P) -> Result<Self> {
        let index_dir = index_dir.as_ref();

        let bm25_path = index_dir.join(BM25_FILE);
        let docstore_path = index_dir.join(DOCSTORE_FILE);

        let bm25_index = if bm25_path.exists() {
            Bm25Index::load_from_file(&bm25_path)?
        } else {
            tracing::warn!("No BM25 index at {:?}, searching an empty index", bm25_path);
            Bm25Index::new()
        };

        let docstore = if docstore_path.exists() {
            Docstore::load_from_file(&docstore_path)?
        } else {
            Docstore::new()
        };

        tracing::info!("Loaded index from {:?}: {} poems", index_dir, docstore.len());

        Ok(Self {
            bm25_index,
            docstore,
            tokenizer: PoetryTokenizer::new(),
        })
    }

    /// Create an in-memory searcher over the given poems
    pub fn from_poems(poems: Vec<Poem>) -> Self {
        let mut docstore = Docstore::new();
        for poem in poems {
            docstore.add(poem);
        }
        let mut ordered: Vec<&Poem> = docstore.poems().collect();
        ordered.sort_by(|a, b| a.id.cmp(&b.id));
        let bm25_index = Bm25Index::build(ordered);

        Self {
            bm25_index,
            docstore,
            tokenizer: PoetryTokenizer::new(),
        }
    }

    /// Search with the given configuration
    pub fn search(&self, query: &str, config: &SearchConfig) -> SearchOutcome {
        let mut rewritten = rewrite_query(query, config.lang);
        if !config.enable_rewrite {
            rewritten.expansions.clear();
            rewritten.filters = QueryFilters::default();
            rewritten.pills.clear();
        }

        let filters = Self::effective_filters(&rewritten, config);
        let terms = self.query_terms(&rewritten);
        let scores = self.bm25_index.score(&terms);

        let mut ranked: Vec<(&Poem, f32)> = if filters.is_empty() {
            scores
                .iter()
                .filter_map(|(id, score)| self.docstore.get(id).map(|p| (p, *score)))
                .collect()
        } else {
            self.docstore
                .poems()
                .filter(|poem| Self::passes(poem, &filters))
                .map(|poem| (poem, scores.get(&poem.id).copied().unwrap_or(0.0)))
                .collect()
        };

        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });

        let results: Vec<SearchResult> = ranked
            .into_iter()
            .take(config.top_k)
            .map(|(poem, score)| SearchResult::from_poem(poem, score))
            .collect();

        tracing::debug!(
            "Search '{}' matched {} poem(s) with {} term(s)",
            query,
            results.len(),
            terms.len()
        );

        SearchOutcome {
            query: rewritten,
            results,
        }
    }

    /// Filters from the rewrite, with explicit config filters taking priority
    fn effective_filters(rewritten: &RewrittenQuery, config: &SearchConfig) -> QueryFilters {
        let mut filters = rewritten.filters.clone();
        if let Some(theme) = &config.theme_filter {
            filters.theme = Some(theme.trim().to_lowercase());
        }
        if let Some(form) = &config.form_filter {
            filters.form = Some(form.trim().to_lowercase());
        }
        filters
    }

    /// Normalized query terms plus theme expansions, deduplicated
    fn query_terms(&self, rewritten: &RewrittenQuery) -> Vec<String> {
        let texts = std::iter::once(rewritten.normalized.as_str())
            .chain(rewritten.expansions.iter().map(String::as_str));
        self.tokenizer.unique_terms(texts)
    }

    fn passes(poem: &Poem, filters: &QueryFilters) -> bool {
        filters
            .year_range
            .as_ref()
            .map_or(true, |range| poem.in_period(range))
            && filters.theme.as_deref().map_or(true, |t| poem.has_tag(t))
            && filters.form.as_deref().map_or(true, |f| poem.has_form(f))
    }

    /// Get document store reference
    pub fn docstore(&self) -> &Docstore {
        &self.docstore
    }

    /// Known themes with the number of poems tagged with each
    pub fn theme_counts(&self) -> Vec<(&'static ThemeEntry, usize)> {
        lexicon::THEMES
            .iter()
            .map(|entry| (entry, self.docstore.get_by_tag(entry.key).len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Poet;
    use crate::rewriter::Lang;

    fn corpus() -> Vec<Poem> {
        let latif = Poet::new("p1", "Shah Latif", "shah-latif").with_lifespan(Some(1689), Some(1752));
        let sachal =
            Poet::new("p2", "Sachal Sarmast", "sachal-sarmast").with_lifespan(Some(1739), Some(1829));
        let ayaz = Poet::new("p3", "Shaikh Ayaz", "shaikh-ayaz").with_lifespan(Some(1923), Some(1997));

        vec![
            Poem::with_id("1", "ishq-kafi", "Kafi of ishq", Lang::En, sachal)
                .with_form("ghazal")
                .with_tags(&["love", "mysticism"])
                .with_couplet(&["ishq burns like fire", "the beloved is near"]),
            Poem::with_id("2", "sasui", "Sur Sasui", Lang::En, latif.clone())
                .with_year(1740)
                .with_tags(&["separation"])
                .with_couplet(&["the desert and the mountain"]),
            Poem::with_id("3", "ghazal-watan", "Watan", Lang::Sd, ayaz)
                .with_form("ghazal")
                .with_tags(&["homeland", "love"])
                .with_couplet(&["وطن جي محبت", "عشق جو گيت"]),
            Poem::with_id("4", "latif-ghazal", "Love ghazal", Lang::En, latif)
                .with_form("ghazal")
                .with_tags(&["love"])
                .with_couplet(&["love of the beloved"]),
        ]
    }

    #[test]
    fn test_searcher_with_empty_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let searcher = Searcher::new(temp_dir.path()).unwrap();
        let outcome = searcher.search("ishq", &SearchConfig::new());
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_plain_keyword_search() {
        let searcher = Searcher::from_poems(corpus());
        let outcome = searcher.search("desert", &SearchConfig::new().with_lang(Lang::En));
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].poem_id, "2");
        assert!(outcome.query.filters.is_empty());
    }

    #[test]
    fn test_theme_expansion_reaches_other_script() {
        let searcher = Searcher::from_poems(corpus());
        // "pyar" is a love synonym; the expansion pulls in "عشق" and "محبت"
        let outcome = searcher.search("pyar", &SearchConfig::new());
        let ids: Vec<_> = outcome.results.iter().map(|r| r.poem_id.as_str()).collect();
        assert_eq!(outcome.query.filters.theme.as_deref(), Some("love"));
        assert!(ids.contains(&"3"));
        assert!(!ids.contains(&"2"));
    }

    #[test]
    fn test_full_rewrite_filters() {
        let searcher = Searcher::from_poems(corpus());
        let outcome = searcher.search(
            "17th century ishq ghazal",
            &SearchConfig::new().with_lang(Lang::En),
        );

        // Only Latif (1689-1752) lived in the 17th century and wrote a love ghazal
        let ids: Vec<_> = outcome.results.iter().map(|r| r.poem_id.as_str()).collect();
        assert_eq!(ids, vec!["4"]);
        assert_eq!(
            outcome.query.pills,
            vec!["17th century", "theme: love", "form: ghazal"]
        );
    }

    #[test]
    fn test_filter_only_matches_have_zero_score() {
        let searcher = Searcher::from_poems(corpus());
        let outcome = searcher.search("18th century", &SearchConfig::new().with_lang(Lang::En));
        let ids: Vec<_> = outcome.results.iter().map(|r| r.poem_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
        assert!(outcome.results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_rewrite_disabled() {
        let searcher = Searcher::from_poems(corpus());
        let config = SearchConfig::new().with_lang(Lang::En).with_rewrite(false);
        let outcome = searcher.search("18th century", &config);
        assert!(outcome.query.filters.is_empty());
        assert!(outcome.query.pills.is_empty());
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_explicit_filters_override() {
        let searcher = Searcher::from_poems(corpus());
        let config = SearchConfig::new()
            .with_theme_filter(Some("Homeland".to_string()))
            .with_form_filter(Some("ghazal".to_string()));
        let outcome = searcher.search("", &config);
        let ids: Vec<_> = outcome.results.iter().map(|r| r.poem_id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_top_k_limits_results() {
        let searcher = Searcher::from_poems(corpus());
        let outcome = searcher.search("ghazal", &SearchConfig::new().with_top_k(2));
        assert_eq!(outcome.results.len(), 2);
    }

    #[test]
    fn test_theme_counts() {
        let searcher = Searcher::from_poems(corpus());
        let counts = searcher.theme_counts();
        let love = counts.iter().find(|(t, _)| t.key == "love").unwrap();
        assert_eq!(love.1, 3);
    }
}
