//! Configuration loading for `tessera-inspect`.
//!
//! The configuration lives in `tessera-config.yaml` at the workspace root.
//! Every field has a default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding [`SchemaConfig::path`].
pub const SCHEMA_ENV: &str = "TESSERA_SCHEMA";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InspectConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where the type schema is read from.
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl InspectConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.schema.apply_env_override(std::env::var_os(SCHEMA_ENV).map(PathBuf::from));
        Ok(config)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// Schema source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchemaConfig {
    /// Path of the type schema YAML file.
    #[serde(default = "default_schema_path")]
    pub path: PathBuf,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            path: default_schema_path(),
        }
    }
}

impl SchemaConfig {
    fn apply_env_override(&mut self, path: Option<PathBuf>) {
        if let Some(path) = path {
            self.path = path;
        }
    }
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("schemas/core-types.yaml")
}
