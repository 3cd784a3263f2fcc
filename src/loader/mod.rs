//! Corpus loading module
//!
//! This module defines the poem records and loads them from JSONL.

mod jsonl;
mod poem;

pub use jsonl::JsonlLoader;
pub use poem::{Couplet, Poem, Poet};
