//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file (path in
//! `CASABOOK_CONFIG`) with `CASABOOK_HOST` / `CASABOOK_PORT` environment
//! overrides on top.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for {variable}: '{value}'")]
    InvalidEnv { variable: String, value: String },
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Resolve configuration: `CASABOOK_CONFIG` file if set, defaults
    /// otherwise, then `CASABOOK_HOST` / `CASABOOK_PORT` overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("CASABOOK_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(host) = std::env::var("CASABOOK_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("CASABOOK_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                variable: "CASABOOK_PORT".to_string(),
                value: port,
            })?;
        }
        Ok(config)
    }

    /// The address to bind, as `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
