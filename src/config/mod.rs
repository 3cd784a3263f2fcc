//! Configuration module for sukhan
//!
//! Application settings (file + environment) and per-query search options.

pub mod app_config;
pub mod path_resolver;
mod search_config;

pub use app_config::AppConfig;
pub use search_config::SearchConfig;
