//! Service configuration resolution
//!
//! Each setting is resolved with the following priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const ENV_DATABASE: &str = "REVNOTE_DATABASE";
pub const ENV_SOURCE: &str = "REVNOTE_SOURCE";
pub const ENV_BIND: &str = "REVNOTE_BIND";
pub const ENV_LOG: &str = "REVNOTE_LOG";

pub const DEFAULT_DATABASE: &str = "comments.db";
pub const DEFAULT_SOURCE: &str = "comments.csv";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// SQLite database file
    pub database_path: PathBuf,
    /// CSV file read by the bulk loader
    pub source_path: PathBuf,
    /// Listen address (`host:port`)
    pub bind_address: String,
    /// Default tracing filter directive
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE),
            source_path: PathBuf::from(DEFAULT_SOURCE),
            bind_address: DEFAULT_BIND.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub bind: Option<String>,
    pub log_level: Option<String>,
    /// Explicit config file; must exist and parse when given
    pub config_file: Option<PathBuf>,
}

/// On-disk TOML configuration, all keys optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub database: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub bind: Option<String>,
    pub log_level: Option<String>,
}

impl ServiceConfig {
    /// Resolve from CLI overrides, process environment and config file
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let file = match &overrides.config_file {
            Some(path) => Some(load_toml_config(path)?),
            None => load_default_toml_config(),
        };

        Ok(Self::resolve_layers(
            overrides,
            |key| std::env::var(key).ok(),
            file.unwrap_or_default(),
        ))
    }

    /// Merge already-loaded layers in priority order
    pub fn resolve_layers<F>(overrides: &ConfigOverrides, env: F, file: TomlConfig) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            database_path: overrides
                .database
                .clone()
                .or_else(|| env(ENV_DATABASE).map(PathBuf::from))
                .or(file.database)
                .unwrap_or(defaults.database_path),
            source_path: overrides
                .source
                .clone()
                .or_else(|| env(ENV_SOURCE).map(PathBuf::from))
                .or(file.source)
                .unwrap_or(defaults.source_path),
            bind_address: overrides
                .bind
                .clone()
                .or_else(|| env(ENV_BIND))
                .or(file.bind)
                .unwrap_or(defaults.bind_address),
            log_level: overrides
                .log_level
                .clone()
                .or_else(|| env(ENV_LOG))
                .or(file.log_level)
                .unwrap_or(defaults.log_level),
        }
    }
}

/// Default config file location (`~/.config/revnote/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("revnote").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

/// Missing default config is normal; a broken one is skipped with a warning
fn load_default_toml_config() -> Option<TomlConfig> {
    let path = default_config_path()?;
    if !path.exists() {
        return None;
    }

    match load_toml_config(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring config file: {}", e);
            None
        }
    }
}
