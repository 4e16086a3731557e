use anyhow::{Context, Result};
use finpulse_core::Currency;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_ledger_path, ensure_finpulse_home, finpulse_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSection {
    #[serde(default)]
    pub currency: Currency,
    /// IANA name; decides which calendar month is "current"
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Defaults to `ledger.json` in the finpulse home
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSection {
    /// EnvFilter directive; RUST_LOG wins when set
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_timezone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            timezone: default_timezone(),
            ledger_file: None,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Config {
    pub fn ledger_path(&self) -> Result<PathBuf> {
        match &self.general.ledger_file {
            Some(p) => Ok(p.clone()),
            None => default_ledger_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(finpulse_home()?.join("config.toml"))
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

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    ensure_finpulse_home()?;
    let p = config_path()?;
    save_config_to(cfg, &p)?;
    Ok(p)
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
    let p = save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
