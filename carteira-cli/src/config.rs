use anyhow::{Context, Result};
use carteira_api::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::ensure_carteira_home;

/// Overrides `api.base_url` when set.
pub const API_URL_ENV: &str = "CARTEIRA_API_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub timeout_secs: u64,
    /// The development backend runs with a self-signed certificate.
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Width of the progress bars on the dashboard, in cells.
    pub bar_width: usize,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            accept_invalid_certs: false,
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self { bar_width: 20 }
    }
}

impl Config {
    /// Connection settings, with the environment override applied.
    pub fn client_config(&self) -> ClientConfig {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.api.base_url.clone());

        ClientConfig {
            base_url,
            timeout: Duration::from_secs(self.api.timeout_secs.max(1)),
            accept_invalid_certs: self.api.accept_invalid_certs,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_carteira_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.api.base_url, "https://localhost:7188/api/v1");
        assert_eq!(cfg.display.bar_width, 20);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[api]\nbase_url = \"http://localhost:5000/api/v1\"\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:5000/api/v1");
        assert_eq!(cfg.api.timeout_secs, 15);
        assert_eq!(cfg.display, DisplaySection::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.api.accept_invalid_certs = true;
        cfg.display.bar_width = 32;
        save_config_to(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[api\nbase_url = 3").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
