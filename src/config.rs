//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Campaign backend connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// WhatsApp business rules
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhatsAppConfig {
    /// Template that is scheduled three times (+0, +7, +10 days)
    #[serde(default = "default_triple_schedule_template")]
    pub triple_schedule_template: String,

    /// Template whose log rows offer "send second/third reminder now"
    #[serde(default = "default_followup_template")]
    pub followup_template: String,

    /// Initial value of both template parameters
    #[serde(default = "default_parameter_value")]
    pub default_parameter_value: String,
}

fn default_triple_schedule_template() -> String {
    "payment112".to_string()
}

fn default_followup_template() -> String {
    "payment_reminder_first".to_string()
}

fn default_parameter_value() -> String {
    "https://flashfirejobs.com/pricing".to_string()
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            triple_schedule_template: default_triple_schedule_template(),
            followup_template: default_followup_template(),
            default_parameter_value: default_parameter_value(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in default_config_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CAMPAIGN_DESK_API_URL") {
            self.backend.base_url = url;
        }
        if let Some(timeout) = lookup("CAMPAIGN_DESK_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.backend.request_timeout_secs = secs;
            }
        }

        if let Some(level) = lookup("CAMPAIGN_DESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CAMPAIGN_DESK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Candidate config files, most specific first
pub fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("campaign-desk").join("config.toml")),
        Some(PathBuf::from("./campaign-desk.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Campaign Desk Configuration
#
# Environment variables override these settings:
# - CAMPAIGN_DESK_API_URL
# - CAMPAIGN_DESK_TIMEOUT_SECS
# - CAMPAIGN_DESK_LOG_LEVEL
# - CAMPAIGN_DESK_LOG_FORMAT

[backend]
# Base URL of the campaign backend (endpoint paths are appended)
base_url = "http://localhost:8000/api"

# Request timeout in seconds
request_timeout_secs = 10

[whatsapp]
# Template scheduled three times: at the chosen time, +7 days and +10 days
triple_schedule_template = "payment112"

# Template whose logs offer sending the second/third reminder immediately
followup_template = "payment_reminder_first"

# Initial value for the {{2}} and {{3}} template parameters
default_parameter_value = "https://flashfirejobs.com/pricing"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for machines)
format = "pretty"
"#
    .to_string()
}
