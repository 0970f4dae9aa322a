use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$CARTEIRA_HOME`, or `~/.carteira`.
pub fn carteira_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CARTEIRA_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".carteira"))
}

pub fn ensure_carteira_home() -> Result<PathBuf> {
    let dir = carteira_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
