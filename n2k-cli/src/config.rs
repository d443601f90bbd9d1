//! Configuration loading and parsing
//!
//! The CLI flags cover everything; a config.toml is just a way to keep a
//! replay setup around. Flags given on the command line win over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration (loaded from config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Capture file to replay (.raw or .n2k)
    pub replay: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Re-emit matching traffic as RAW records to this file
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Print every decoded PGN
    #[serde(default)]
    pub dump_pgns: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Pass only PGNs from the catalog's unseen table
    #[serde(default)]
    pub unseen: bool,
    /// Pass only PGNs absent from the catalog
    #[serde(default)]
    pub unknown: bool,
    /// Pass only this PGN
    #[serde(default)]
    pub pgn: Option<u32>,
}

/// Load and parse a config.toml
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: AppConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}
