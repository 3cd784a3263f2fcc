//! Index Builder implementation
//!
//! Provides the pipeline for building the on-disk index from a JSONL corpus.

use super::{Bm25Index, Docstore, IndexMetadata};
use crate::loader::{JsonlLoader, Poem};
use anyhow::{Context, Result};
use std::path::Path;

/// File names inside an index directory
pub const BM25_FILE: &str = "bm25_index.json";
pub const DOCSTORE_FILE: &str = "docstore.json";
pub const METADATA_FILE: &str = "metadata.json";

/// What a build run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Indices were written
    Built { doc_count: usize },
    /// Existing indices already match the corpus
    UpToDate { doc_count: usize },
}

/// Index builder for creating the search indices
#[derive(Debug, Default)]
pub struct IndexBuilder {
    /// Rebuild even when the corpus hash is unchanged
    force: bool,
}

impl IndexBuilder {
    /// Create a new index builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild even when the existing index is current
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Build all indices from a corpus file
    pub fn build(&self, input: &Path, output_dir: &Path) -> Result<BuildOutcome> {
        self.build_with_progress(input, output_dir, |_, _, _| {})
    }

    /// Build indices from a corpus file with progress reporting
    pub fn build_with_progress<F>(
        &self,
        input: &Path,
        output_dir: &Path,
        progress: F,
    ) -> Result<BuildOutcome>
    where
        F: Fn(usize, usize, &str),
    {
        progress(1, 5, "Reading corpus...");
        let bytes = std::fs::read(input)
            .with_context(|| format!("Failed to read corpus file: {:?}", input))?;
        let corpus_hash = IndexMetadata::hash_corpus(&bytes);

        let metadata_path = output_dir.join(METADATA_FILE);
        if !self.force && Self::index_files_present(output_dir) {
            match IndexMetadata::load_from_file(&metadata_path) {
                Ok(existing) if existing.is_current(&corpus_hash) => {
                    tracing::info!("Index at {:?} is up to date, skipping build", output_dir);
                    progress(5, 5, "Index is up to date");
                    return Ok(BuildOutcome::UpToDate {
                        doc_count: existing.doc_count,
                    });
                }
                Ok(_) => tracing::info!("Corpus changed, rebuilding index"),
                Err(e) => tracing::warn!("Ignoring unreadable index metadata: {}", e),
            }
        }

        let poems = JsonlLoader::load_from_reader(bytes.as_slice())?;
        self.build_from_poems_with_progress(poems, corpus_hash, output_dir, progress, 2)
    }

    /// All three index files exist in the directory
    fn index_files_present(output_dir: &Path) -> bool {
        [BM25_FILE, DOCSTORE_FILE, METADATA_FILE]
            .iter()
            .all(|file| output_dir.join(file).exists())
    }

    /// Build indices from pre-loaded poems with progress reporting
    ///
    /// Useful for stdin input or corpora assembled in code.
    pub fn build_from_poems_with_progress<F>(
        &self,
        poems: Vec<Poem>,
        corpus_hash: String,
        output_dir: &Path,
        progress: F,
        start_step: usize,
    ) -> Result<BuildOutcome>
    where
        F: Fn(usize, usize, &str),
    {
        let doc_count = poems.len();
        let total_steps = start_step + 3;

        progress(start_step, total_steps, "Building document store...");
        let mut metadata = IndexMetadata::new(doc_count, corpus_hash);
        let mut docstore = Docstore::new();
        for poem in poems {
            if docstore.contains(&poem.id) {
                tracing::warn!("Duplicate poem id '{}', keeping the last one", poem.id);
            }
            docstore.add(poem);
        }
        for poem in docstore.poems() {
            *metadata
                .lang_counts
                .entry(poem.lang.to_string())
                .or_insert(0) += 1;
        }
        metadata.doc_count = docstore.len();

        progress(start_step + 1, total_steps, "Building BM25 index...");
        let mut ordered: Vec<&Poem> = docstore.poems().collect();
        ordered.sort_by(|a, b| a.id.cmp(&b.id));
        let bm25_index = Bm25Index::build(ordered);
        tracing::info!(
            "BM25 index over {} poems, average length {:.1} terms",
            bm25_index.len(),
            bm25_index.avg_doc_length()
        );

        progress(start_step + 2, total_steps, "Saving indices...");
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create index directory {:?}", output_dir))?;

        bm25_index.save_to_file(&output_dir.join(BM25_FILE))?;
        docstore.save_to_file(&output_dir.join(DOCSTORE_FILE))?;
        metadata.save_to_file(&output_dir.join(METADATA_FILE))?;

        progress(total_steps, total_steps, "Done!");

        Ok(BuildOutcome::Built {
            doc_count: metadata.doc_count,
        })
    }

    /// Build indices from pre-loaded poems (convenience method)
    pub fn build_from_poems(&self, poems: Vec<Poem>, output_dir: &Path) -> Result<BuildOutcome> {
        let serialized = serde_json::to_vec(&poems)?;
        let corpus_hash = IndexMetadata::hash_corpus(&serialized);
        self.build_from_poems_with_progress(poems, corpus_hash, output_dir, |_, _, _| {}, 1)
    }
}
