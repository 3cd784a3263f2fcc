//! Site language tags

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language a query is issued in, and the language of a poem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// Sindhi (Perso-Arabic script)
    #[default]
    Sd,
    /// English
    En,
}

impl Lang {
    /// All supported languages in URL order
    pub const ALL: [Lang; 2] = [Lang::Sd, Lang::En];

    /// Two-letter tag used in URLs and config
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Sd => "sd",
            Lang::En => "en",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sd" => Ok(Lang::Sd),
            "en" => Ok(Lang::En),
            other => Err(anyhow!("Unsupported language '{}'. Valid languages: sd, en", other)),
        }
    }
}
