//! Configuration loading for the AgentDesk console.
//!
//! All fields are required. No defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub refresh_interval_ms: u64,
    pub log_path: PathBuf,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or AGENTDESK_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: TuiConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.theme.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "must not be empty".to_string(),
            });
        }
        if self.theme.name.to_ascii_lowercase() != "synthbrute" {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "only 'synthbrute' is supported".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("AGENTDESK_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
