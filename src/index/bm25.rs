//! BM25 Index implementation
//!
//! Provides keyword-based ranking of poems using the BM25 algorithm.

use crate::loader::Poem;
use crate::tokenizer::PoetryTokenizer;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// BM25 parameters
const BM25_K1: f32 = 1.2;
const BM25_B: f32 = 0.75;

/// BM25 search index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bm25Index {
    /// Poem IDs in index order
    doc_ids: Vec<String>,
    /// Inverted index: term -> list of (doc_index, term_frequency)
    inverted_index: HashMap<String, Vec<(usize, usize)>>,
    /// Poem lengths (number of tokens)
    doc_lengths: Vec<usize>,
    /// Average document length
    avg_doc_length: f32,
    /// Total number of documents
    num_docs: usize,
}

impl Default for Bm25Index {
    fn default() -> Self {
        Self::new()
    }
}

impl Bm25Index {
    /// Create a new empty BM25 index
    pub fn new() -> Self {
        Self {
            doc_ids: Vec::new(),
            inverted_index: HashMap::new(),
            doc_lengths: Vec::new(),
            avg_doc_length: 0.0,
            num_docs: 0,
        }
    }

    /// Build an index from poems
    pub fn build<'a, I>(poems: I) -> Self
    where
        I: IntoIterator<Item = &'a Poem>,
    {
        let tokenizer = PoetryTokenizer::new();
        let mut index = Self::new();
        let mut total_length = 0usize;

        for (doc_idx, poem) in poems.into_iter().enumerate() {
            let tokens = tokenizer.tokenize(&poem.index_text());
            let doc_len = tokens.len();

            index.doc_ids.push(poem.id.clone());
            index.doc_lengths.push(doc_len);
            total_length += doc_len;

            let mut term_freqs: HashMap<String, usize> = HashMap::new();
            for token in tokens {
                *term_freqs.entry(token).or_insert(0) += 1;
            }

            for (term, freq) in term_freqs {
                index
                    .inverted_index
                    .entry(term)
                    .or_default()
                    .push((doc_idx, freq));
            }
        }

        index.num_docs = index.doc_ids.len();
        if index.num_docs > 0 {
            index.avg_doc_length = total_length as f32 / index.num_docs as f32;
        }

        tracing::info!(
            "Built BM25 index: {} poems, {} unique terms",
            index.num_docs,
            index.inverted_index.len()
        );

        index
    }

    /// Score every poem that matches at least one term.
    ///
    /// Terms are expected to be tokenized with [`PoetryTokenizer`]; duplicates
    /// are counted once.
    pub fn score(&self, terms: &[String]) -> HashMap<String, f32> {
        let mut scores: HashMap<usize, f32> = HashMap::new();
        if self.num_docs == 0 {
            return HashMap::new();
        }

        let mut seen = std::collections::HashSet::new();
        for term in terms {
            if !seen.insert(term.as_str()) {
                continue;
            }
            let Some(postings) = self.inverted_index.get(term) else {
                continue;
            };

            let df = postings.len() as f32;
            let idf = ((self.num_docs as f32 - df + 0.5) / (df + 0.5) + 1.0).ln();

            for &(doc_idx, freq) in postings {
                let tf = freq as f32;
                let doc_len = self.doc_lengths[doc_idx] as f32;
                let numerator = tf * (BM25_K1 + 1.0);
                let denominator =
                    tf + BM25_K1 * (1.0 - BM25_B + BM25_B * (doc_len / self.avg_doc_length));
                *scores.entry(doc_idx).or_insert(0.0) += idf * (numerator / denominator);
            }
        }

        scores
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .map(|(doc_idx, score)| (self.doc_ids[doc_idx].clone(), score))
            .collect()
    }

    /// Top-k poems by BM25 score, ties broken by poem ID
    pub fn search(&self, terms: &[String], top_k: usize) -> Vec<(String, f32)> {
        let mut ranked: Vec<(String, f32)> = self.score(terms).into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(top_k);
        ranked
    }

    /// Save index to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load index from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read BM25 index from {:?}", path))?;
        let index = serde_json::from_str(&content).with_context(|| "Failed to parse BM25 index")?;
        Ok(index)
    }

    /// Get document count
    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    /// Check if index is empty
    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    /// Get average document length
    pub fn avg_doc_length(&self) -> f32 {
        self.avg_doc_length
    }
}
