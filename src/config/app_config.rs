//! Application configuration module for sukhan
//!
//! Provides TOML-based configuration with environment variable override support.
//! Priority: CLI args > Environment variables > Config file > Defaults

use super::path_resolver;
use crate::rewriter::Lang;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory for search indices (default: .sukhan)
    #[serde(default = "default_index_dir")]
    index_dir: String,

    /// Default query language: sd or en
    #[serde(default = "default_lang")]
    default_lang: String,

    /// Default number of results to return
    #[serde(default = "default_top_k")]
    default_top_k: usize,

    /// Public base URL used in robots.txt and sitemaps
    #[serde(default = "default_site_url")]
    site_url: String,

    /// SQLite file holding admin users
    #[serde(default = "default_users_db")]
    users_db: String,
}

fn default_index_dir() -> String {
    ".sukhan".to_string()
}

fn default_lang() -> String {
    "sd".to_string()
}

fn default_top_k() -> usize {
    10
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_users_db() -> String {
    path_resolver::get_data_dir()
        .join("users.db")
        .to_string_lossy()
        .to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
            default_lang: default_lang(),
            default_top_k: default_top_k(),
            site_url: default_site_url(),
            users_db: default_users_db(),
        }
    }
}

impl AppConfig {
    /// Create config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: AppConfig =
            toml::from_str(&content).map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        Ok(config)
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(index_dir) = std::env::var("SUKHAN_INDEX_DIR") {
            config.index_dir = index_dir;
        }

        if let Ok(lang) = std::env::var("SUKHAN_LANG") {
            config.default_lang = lang;
        }

        if let Ok(top_k) = std::env::var("SUKHAN_TOP_K") {
            if let Ok(n) = top_k.parse() {
                config.default_top_k = n;
            } else {
                tracing::warn!("Ignoring non-numeric SUKHAN_TOP_K '{}'", top_k);
            }
        }

        if let Ok(url) = std::env::var("SUKHAN_SITE_URL") {
            config.site_url = url;
        }

        if let Ok(db) = std::env::var("SUKHAN_USERS_DB") {
            config.users_db = db;
        }

        config
    }

    /// Load the layered configuration: default file (if present) overridden by env
    pub fn load() -> Result<Self> {
        let path = path_resolver::get_default_config_path();
        let file_config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        let merged = file_config.merge_with(&Self::from_env());
        merged.validate()?;
        Ok(merged)
    }

    /// Merge with another config (other takes priority for non-default values)
    pub fn merge_with(&self, other: &Self) -> Self {
        fn pick<T: PartialEq + Clone>(mine: &T, theirs: &T, default: T) -> T {
            if *theirs != default {
                theirs.clone()
            } else {
                mine.clone()
            }
        }

        Self {
            index_dir: pick(&self.index_dir, &other.index_dir, default_index_dir()),
            default_lang: pick(&self.default_lang, &other.default_lang, default_lang()),
            default_top_k: pick(&self.default_top_k, &other.default_top_k, default_top_k()),
            site_url: pick(&self.site_url, &other.site_url, default_site_url()),
            users_db: pick(&self.users_db, &other.users_db, default_users_db()),
        }
    }

    /// Override index_dir
    pub fn with_index_dir(mut self, dir: &str) -> Self {
        self.index_dir = dir.to_string();
        self
    }

    /// Override default_top_k
    pub fn with_default_top_k(mut self, k: usize) -> Self {
        self.default_top_k = k;
        self
    }

    /// Override default_lang
    pub fn with_default_lang(mut self, lang: &str) -> Self {
        self.default_lang = lang.to_string();
        self
    }

    /// Override site_url
    pub fn with_site_url(mut self, url: &str) -> Self {
        self.site_url = url.to_string();
        self
    }

    /// Override users_db
    pub fn with_users_db(mut self, path: &str) -> Self {
        self.users_db = path.to_string();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_top_k == 0 {
            return Err(anyhow!("default_top_k must be greater than 0"));
        }

        self.default_lang.parse::<Lang>()?;

        if !(self.site_url.starts_with("http://") || self.site_url.starts_with("https://")) {
            return Err(anyhow!(
                "Invalid site_url '{}'. Must start with http:// or https://",
                self.site_url
            ));
        }

        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))
    }

    // Getters
    pub fn index_dir(&self) -> &str {
        &self.index_dir
    }

    /// Default language; falls back to Sindhi when the stored tag is invalid
    pub fn default_lang(&self) -> Lang {
        self.default_lang.parse().unwrap_or_default()
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// Site URL without a trailing slash
    pub fn site_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    pub fn users_db(&self) -> &str {
        &self.users_db
    }
}
