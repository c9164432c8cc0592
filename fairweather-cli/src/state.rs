use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Directory holding config.toml and optional catalogs.
///
/// `FAIRWEATHER_HOME` overrides the default `~/.fairweather`.
pub fn fairweather_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FAIRWEATHER_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".fairweather"))
}

pub fn ensure_fairweather_home() -> Result<PathBuf> {
    let dir = fairweather_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
