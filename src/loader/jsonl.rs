//! JSONL corpus loader
//!
//! Loads poems from JSONL format (one JSON object per line), from a file or
//! from any reader such as stdin.

use super::Poem;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// JSONL loader for reading poems from a reader
pub struct JsonlLoader;

impl JsonlLoader {
    /// Load poems from a reader (e.g., stdin)
    ///
    /// Each line should be a valid JSON representation of a Poem.
    /// Empty lines and lines starting with # are skipped.
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Poem>> {
        let buf_reader = BufReader::new(reader);
        let mut poems = Vec::new();
        let mut line_number = 0;

        for line_result in buf_reader.lines() {
            line_number += 1;
            let line = line_result.context(format!("Failed to read line {}", line_number))?;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let poem: Poem = serde_json::from_str(trimmed)
                .with_context(|| format!("Failed to parse JSON at line {}: {}", line_number, trimmed))?;

            poems.push(poem);
        }

        tracing::debug!("Loaded {} poems from {} lines", poems.len(), line_number);
        Ok(poems)
    }

    /// Load poems from a string
    pub fn load_from_string(content: &str) -> Result<Vec<Poem>> {
        Self::load_from_reader(content.as_bytes())
    }

    /// Load poems from a JSONL file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Poem>> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open corpus file: {:?}", path.as_ref()))?;
        Self::load_from_reader(file)
    }
}
