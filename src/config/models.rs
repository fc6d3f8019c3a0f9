//! Configuration data structures for the cosmos-index facade.
//!
//! This module defines the schema for the application settings: the local
//! HTTP listener, the Cosmos platform connection and logging output.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
///
/// Unknown keys in any source are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, upload limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Cosmos platform connection settings.
    #[serde(default)]
    pub cosmos: CosmosConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size in bytes, uploads included.
    /// Default: `104857600` (100 MiB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Settings for the upstream Cosmos platform connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct CosmosConfig {
    /// API key sent with every platform request.
    /// Only validated when the client is built.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the Cosmos platform.
    /// Default: `https://platform.cosmos-suite.ai`
    #[serde(default = "default_api_server")]
    pub api_server: String,

    /// Request timeout in seconds.
    /// Default: `120`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Whether to call the platform health endpoint at startup.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub health_check: bool,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Keep the key out of debug output
impl std::fmt::Debug for CosmosConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_key = if self.api_key.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("CosmosConfig")
            .field("api_key", &api_key)
            .field("api_server", &self.api_server)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("health_check", &self.health_check)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for CosmosConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_server: default_api_server(),
            timeout_seconds: default_timeout(),
            health_check: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024
}

fn default_api_server() -> String {
    "https://platform.cosmos-suite.ai".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
