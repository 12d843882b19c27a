//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::dataset::{DEFAULT_ATTRACTION_COLUMN, DEFAULT_INDEX_COLUMN, DEFAULT_REGION_COLUMN};
use crate::pipeline::DEFAULT_BIN_COUNT;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub charts: ChartsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Source dataset configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: String,

    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    #[serde(default = "default_region_column")]
    pub region_column: String,

    #[serde(default = "default_attraction_column")]
    pub attraction_column: String,

    #[serde(default = "default_index_column")]
    pub index_column: String,
}

fn default_dataset_path() -> String {
    "Tourism-Lebanon-2023.csv".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_region_column() -> String {
    DEFAULT_REGION_COLUMN.to_string()
}

fn default_attraction_column() -> String {
    DEFAULT_ATTRACTION_COLUMN.to_string()
}

fn default_index_column() -> String {
    DEFAULT_INDEX_COLUMN.to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            delimiter: default_delimiter(),
            region_column: default_region_column(),
            attraction_column: default_attraction_column(),
            index_column: default_index_column(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chart rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChartsConfig {
    #[serde(default = "default_bin_count")]
    pub bin_count: usize,

    /// Restrict the attraction proportion chart to governorate-level rows
    #[serde(default = "default_governorate_level_only")]
    pub governorate_level_only: bool,
}

fn default_bin_count() -> usize {
    DEFAULT_BIN_COUNT
}

fn default_governorate_level_only() -> bool {
    true
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            bin_count: default_bin_count(),
            governorate_level_only: default_governorate_level_only(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

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
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from the first default location that exists, or environment.
    ///
    /// A config file that exists but cannot be loaded is an error.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("tourism-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/tourism-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        if let Some(path) = config_paths.iter().flatten().find(|p| p.exists()) {
            let config = Self::load_with_env(path).inspect_err(|e| {
                tracing::error!("Failed to load config from {:?}: {}", path, e);
            })?;
            tracing::info!("Loaded config from {:?}", path);
            return Ok(config);
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Reject settings that would make every render fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.charts.bin_count == 0 {
            return Err(ConfigError::Invalid(
                "charts.bin_count must be at least 1".to_string(),
            ));
        }
        if self.dataset.delimiter.len() != 1 {
            return Err(ConfigError::Invalid(format!(
                "dataset.delimiter must be a single byte, got {:?}",
                self.dataset.delimiter
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a key lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("TOURISM_DATASET_PATH") {
            self.dataset.path = path;
        }

        if let Some(host) = lookup("TOURISM_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("TOURISM_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid TOURISM_API_PORT: {}", port),
            }
        }

        if let Some(level) = lookup("TOURISM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("TOURISM_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Tourism Dashboard Configuration
#
# Environment variables override these settings:
# - TOURISM_DATASET_PATH
# - TOURISM_API_HOST
# - TOURISM_API_PORT
# - TOURISM_LOG_LEVEL
# - TOURISM_LOG_FORMAT

[dataset]
# Delimited source file, loaded once at startup
path = "Tourism-Lebanon-2023.csv"

# Field delimiter (single character)
delimiter = ","

# Column headers the dashboard reads
region_column = "{DEFAULT_REGION_COLUMN}"
attraction_column = "{DEFAULT_ATTRACTION_COLUMN}"
index_column = "{DEFAULT_INDEX_COLUMN}"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8501

[charts]
# Number of equal-width tourism index bins
bin_count = {DEFAULT_BIN_COUNT}

# Only count governorate-level rows in the attraction proportion chart
governorate_level_only = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    )
}
