//! Configuration types for chatpane.
//!
//! The configuration names the chat server and the UI poll interval. It is
//! stored as JSON and can be overridden from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "CHATPANE_ENDPOINT";

/// Main configuration for chatpane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the chat server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Path of the chat route on the server.
    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    /// How often the UI polls for input and finished replies.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_chat_path() -> String {
    "/chat".into()
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Load from `path` when given, otherwise start from defaults, then
    /// apply the environment override.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint;
            }
        }
        Ok(config)
    }

    /// Apply a command-line endpoint, which beats every other source.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Option<&str>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint.to_string();
        }
        self
    }

    /// Full URL of the chat route.
    pub fn chat_url(&self) -> Result<String, ConfigError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }

        let base = endpoint.trim_end_matches('/');
        let path = self.chat_path.trim();
        if path.starts_with('/') {
            Ok(format!("{base}{path}"))
        } else {
            Ok(format!("{base}/{path}"))
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            chat_path: default_chat_path(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Endpoint is not an http(s) URL.
    #[error("Invalid endpoint (expected http:// or https://): {0}")]
    InvalidEndpoint(String),
}
