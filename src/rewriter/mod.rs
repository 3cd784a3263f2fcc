//! Query rewriter module
//!
//! This module turns a raw search string into a normalized query with
//! extracted century, theme and form filters.

pub mod century;
mod lang;
pub mod lexicon;
mod normalize;
mod query_rewriter;
mod script;

pub use century::{extract_century, YearRange};
pub use lang::Lang;
pub use normalize::normalize;
pub use query_rewriter::{rewrite_query, QueryFilters, RewrittenQuery};
pub use script::{detect_script, Script};
