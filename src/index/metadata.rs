//! Index Metadata implementation
//!
//! Records what an index directory was built from, so an unchanged corpus
//! does not trigger a rebuild.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// Current schema version of the on-disk index
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// Index metadata with schema version and corpus fingerprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Number of poems
    pub doc_count: usize,
    /// Poems per language tag
    #[serde(default)]
    pub lang_counts: BTreeMap<String, usize>,
    /// Index creation timestamp
    pub created_at: String,
    /// Schema version for compatibility checking
    #[serde(default)]
    pub schema_version: String,
    /// SHA-256 of the serialized corpus
    #[serde(default)]
    pub corpus_hash: String,
}

impl IndexMetadata {
    /// Create new metadata with current schema version
    pub fn new(doc_count: usize, corpus_hash: String) -> Self {
        Self {
            doc_count,
            lang_counts: BTreeMap::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            corpus_hash,
        }
    }

    /// Hash arbitrary corpus bytes
    pub fn hash_corpus(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hex::encode(hasher.finalize())
    }

    /// Check if an index built from `corpus_hash` can be reused as-is
    pub fn is_current(&self, corpus_hash: &str) -> bool {
        self.schema_version == CURRENT_SCHEMA_VERSION && self.corpus_hash == corpus_hash
    }

    /// Save metadata to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load metadata from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read index metadata from {:?}", path))?;
        let metadata: Self = serde_json::from_str(&content)?;
        Ok(metadata)
    }
}
