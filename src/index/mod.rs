//! Index module
//!
//! This module provides the BM25 index, the poem store and the build pipeline.

mod bm25;
mod builder;
mod docstore;
mod metadata;

pub use bm25::Bm25Index;
pub use builder::{BuildOutcome, IndexBuilder, BM25_FILE, DOCSTORE_FILE, METADATA_FILE};
pub use docstore::Docstore;
pub use metadata::IndexMetadata;
