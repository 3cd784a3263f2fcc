//! Document Store implementation
//!
//! Holds full poem records keyed by ID.

use crate::loader::{Poem, Poet};
use crate::rewriter::Lang;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Document store for retrieving full poem content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Docstore {
    /// Poems indexed by ID
    poems: HashMap<String, Poem>,
}

impl Docstore {
    /// Create a new empty document store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a poem to the store, replacing any poem with the same ID
    pub fn add(&mut self, poem: Poem) {
        self.poems.insert(poem.id.clone(), poem);
    }

    /// Get a poem by ID
    pub fn get(&self, poem_id: &str) -> Option<&Poem> {
        self.poems.get(poem_id)
    }

    /// Check if a poem exists
    pub fn contains(&self, poem_id: &str) -> bool {
        self.poems.contains_key(poem_id)
    }

    /// All poems, in no particular order
    pub fn poems(&self) -> impl Iterator<Item = &Poem> {
        self.poems.values()
    }

    /// Poems in one language, sorted by slug
    pub fn poems_in(&self, lang: Lang) -> Vec<&Poem> {
        let mut poems: Vec<_> = self.poems.values().filter(|p| p.lang == lang).collect();
        poems.sort_by(|a, b| a.slug.cmp(&b.slug));
        poems
    }

    /// Get poems carrying a tag
    pub fn get_by_tag(&self, tag: &str) -> Vec<&Poem> {
        self.poems.values().filter(|p| p.has_tag(tag)).collect()
    }

    /// Tags with the number of poems carrying each, sorted by tag
    pub fn list_tags(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for poem in self.poems.values() {
            for tag in &poem.tags {
                *counts.entry(tag.to_lowercase()).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }

    /// Distinct forms present in the corpus, sorted
    pub fn list_forms(&self) -> Vec<String> {
        let mut forms: Vec<String> = self
            .poems
            .values()
            .filter_map(|p| p.form.as_ref().map(|f| f.to_lowercase()))
            .collect();
        forms.sort();
        forms.dedup();
        forms
    }

    /// Distinct poets with their poem counts, sorted by name
    pub fn list_poets(&self) -> Vec<(Poet, usize)> {
        let mut by_id: HashMap<&str, (&Poet, usize)> = HashMap::new();
        for poem in self.poems.values() {
            by_id
                .entry(poem.poet.id.as_str())
                .or_insert((&poem.poet, 0))
                .1 += 1;
        }
        let mut poets: Vec<(Poet, usize)> = by_id
            .into_values()
            .map(|(poet, count)| (poet.clone(), count))
            .collect();
        poets.sort_by(|a, b| a.0.name.cmp(&b.0.name));
        poets
    }

    /// Save store to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load store from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read docstore from {:?}", path))?;

        let store = serde_json::from_str(&content).with_context(|| "Failed to parse docstore")?;
        Ok(store)
    }

    /// Remove a poem by ID
    pub fn remove(&mut self, poem_id: &str) {
        self.poems.remove(poem_id);
    }

    /// Get poem count
    pub fn len(&self) -> usize {
        self.poems.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.poems.is_empty()
    }
}
