//! Configuration management for syndicate lookups.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The registry search page the lookup client replays.
pub const DEFAULT_ENDPOINT: &str = "https://data.eea.org.eg/lastpaid.aspx";

/// Main application configuration.
///
/// This is loaded from `~/.config/syndicate/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Form-replay client settings
    pub lookup: LookupConfig,
    /// Sequential batch settings
    pub batch: BatchConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.lookup.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SYNDICATE_ENDPOINT`: Override the search page URL
    /// - `SYNDICATE_TIMEOUT_SECS`: Override the per-request timeout
    /// - `SYNDICATE_USER_AGENT`: Override the `User-Agent` header
    /// - `SYNDICATE_DELAY_MS`: Override the pause between batch lookups
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok());
        config.lookup.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable source.
    ///
    /// Unparseable numeric values are ignored, matching an unset variable.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = var("SYNDICATE_ENDPOINT") {
            tracing::debug!("Override lookup.endpoint from env: {}", val);
            self.lookup.endpoint = val;
        }

        if let Some(val) = var("SYNDICATE_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.lookup.timeout_secs = secs;
                tracing::debug!("Override lookup.timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = var("SYNDICATE_USER_AGENT") {
            tracing::debug!("Override lookup.user_agent from env: {}", val);
            self.lookup.user_agent = val;
        }

        if let Some(val) = var("SYNDICATE_DELAY_MS") {
            if let Ok(ms) = val.parse() {
                self.batch.delay_between_lookups_ms = ms;
                tracing::debug!("Override batch.delay_between_lookups_ms from env: {}", ms);
            }
        }
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/syndicate/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("eg", "syndicate", "syndicate").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Form-replay client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LookupConfig {
    /// Search page URL; both the GET and the POST target it
    pub endpoint: String,
    /// Timeout applied to each of the two requests, in seconds
    pub timeout_secs: u64,
    /// `User-Agent` header sent on both requests
    pub user_agent: String,
}

impl LookupConfig {
    /// Check that the settings can produce a working client.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lookup.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "lookup.endpoint".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "lookup.endpoint".to_string(),
                reason: format!("must be an http(s) URL, got '{endpoint}'"),
            });
        }

        Ok(())
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 15,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

/// Sequential batch settings used by the command-line shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BatchConfig {
    /// Pause between consecutive lookups in milliseconds
    pub delay_between_lookups_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay_between_lookups_ms: 500,
        }
    }
}
