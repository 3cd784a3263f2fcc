//! sukhan: search helpers for a bilingual Sindhi/English poetry archive
//!
//! The core is a deterministic query rewriter: it normalizes a free-text
//! query, pulls out a century range, a theme and a poetic form, expands theme
//! synonyms across both scripts, and returns display pills for the UI. Around
//! it sit a BM25 index over the poem corpus, an admin user store, and the
//! robots.txt / sitemap generators.
//!
//! # Modules
//!
//! - `rewriter`: Query normalization and rewriting
//! - `tokenizer`: Sindhi/English term splitting
//! - `loader`: Poem records and JSONL corpus loading
//! - `index`: BM25 index, poem store and build pipeline
//! - `search`: Rewrite-aware search over the index
//! - `auth`: Password hashing and the user store
//! - `site`: robots.txt and sitemap rendering
//! - `config`: Application and search configuration
//! - `error`: Boundary error type

pub mod auth;
pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod rewriter;
pub mod search;
pub mod site;
pub mod tokenizer;

// Re-export commonly used types
pub use config::{AppConfig, SearchConfig};
pub use error::{SukhanError, SukhanResult};
pub use loader::Poem;
pub use rewriter::{rewrite_query, Lang, RewrittenQuery};
pub use search::SearchResult;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
