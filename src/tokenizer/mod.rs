//! Tokenizer module
//!
//! This module splits Sindhi and English poetry text into index terms.

mod poetry;

pub(crate) use poetry::split_terms;
pub use poetry::PoetryTokenizer;
