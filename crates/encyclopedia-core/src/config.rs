//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/encyclopedia/config.toml)
//! 3. Environment variables (ENCYCLOPEDIA_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "ENCYCLOPEDIA";

/// Default address the web server listens on
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one markdown file per entry
    #[serde(default = "default_entries_dir")]
    pub entries_dir: PathBuf,

    /// Address the web server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Log level for the encyclopedia crates (defaults to info)
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entries_dir: default_entries_dir(),
            bind_address: default_bind_address(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (ENCYCLOPEDIA_ENTRIES_DIR, ENCYCLOPEDIA_BIND,
    ///    ENCYCLOPEDIA_LOG_LEVEL)
    /// 2. Config file (~/.config/encyclopedia/config.toml or ENCYCLOPEDIA_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_ENTRIES_DIR", ENV_PREFIX)) {
            self.entries_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_BIND", ENV_PREFIX)) {
            if !val.is_empty() {
                self.bind_address = val;
            }
        }

        // Empty string clears it
        if let Ok(val) = std::env::var(format!("{}_LOG_LEVEL", ENV_PREFIX)) {
            self.log_level = if val.is_empty() { None } else { Some(val) };
        }
    }

    /// Effective log level
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Get the config file path
    ///
    /// Can be overridden with ENCYCLOPEDIA_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("encyclopedia")
            .join("config.toml")
    }
}

/// Get the default entries directory
fn default_entries_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("encyclopedia")
        .join("entries")
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}
