//! Path resolution for sukhan
//!
//! Expands `~`, resolves relative paths against the working directory and
//! locates the XDG config and data directories.

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "sukhan";

/// Expand a leading `~` or `~/` to the home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        // "~user" and plain paths stay as they are
        _ => return Ok(PathBuf::from(path)),
    };
    let home = std::env::var("HOME").map_err(|_| anyhow!("HOME environment variable not set"))?;
    Ok(PathBuf::from(format!("{}{}", home, rest)))
}

/// Resolve a path to an absolute path, expanding `~` first
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = expand_home(path)?;
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(current_dir.join(expanded))
}

/// Resolve for display, falling back to the input on failure
pub fn resolve_lossy(path: &str) -> String {
    resolve_path(path)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string())
}

/// `$<xdg_var>/sukhan`, else `~/<home_rel>/sukhan`, else `<home_rel>/sukhan`
fn xdg_dir(xdg_var: &str, home_rel: &[&str]) -> PathBuf {
    if let Ok(dir) = std::env::var(xdg_var) {
        return PathBuf::from(dir).join(APP_DIR);
    }
    let mut base = std::env::var("HOME").map(PathBuf::from).unwrap_or_default();
    base.extend(home_rel);
    base.join(APP_DIR)
}

/// XDG config directory: $XDG_CONFIG_HOME/sukhan or ~/.config/sukhan
pub fn get_config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

/// XDG data directory: $XDG_DATA_HOME/sukhan or ~/.local/share/sukhan
pub fn get_data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

/// Default config file path
pub fn get_default_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}
