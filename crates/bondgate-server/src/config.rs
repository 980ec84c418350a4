//! Server configuration.

use std::path::Path;

use bondgate_core::validate::Validate;
use bondgate_core::{CoreError, ScreeningPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading the server configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`ServerConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The embedded policy failed validation.
    #[error(transparent)]
    Policy(#[from] CoreError),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Thresholds applied by every pipeline
    #[serde(default)]
    pub policy: ScreeningPolicy,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            policy: ScreeningPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file and validate its policy.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text and validate its policy.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.policy.validate_or_error()?;
        Ok(config)
    }

    /// Socket address string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
