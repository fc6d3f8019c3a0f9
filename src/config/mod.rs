// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{IndexError, Result};
use config::{Config, Environment, File};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Flat environment names accepted alongside the prefixed form.
const FLAT_ENV_KEYS: &[(&str, &str)] = &[
    ("COSMOS_API_KEY", "cosmos.api_key"),
    ("API_SERVER", "cosmos.api_server"),
    ("BACKEND_PORT", "server.port"),
];

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// See [`AppConfig::load_with`] for the precedence rules.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::load_with(config_path, std::env::vars().collect())
    }

    /// Load configuration from multiple sources with precedence:
    /// 1. Flat environment names (`COSMOS_API_KEY`, `API_SERVER`, `BACKEND_PORT`)
    /// 2. Prefixed environment variables (`COSMOS_INDEX__SECTION__KEY`)
    /// 3. Config file (explicit path, or the default locations)
    /// 4. Defaults (lowest)
    pub fn load_with(config_path: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        let mut builder = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?);

        // An explicit file must exist; the default locations are optional
        builder = match config_path {
            Some(path) => builder.add_source(File::from(path.to_path_buf()).required(true)),
            None => builder
                .add_source(File::from(Self::home_config_path()).required(false))
                .add_source(File::with_name("cosmos-index").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("COSMOS_INDEX")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone().into_iter().collect())),
        );

        for (var, key) in FLAT_ENV_KEYS {
            builder = builder
                .set_override_option(*key, env.get(*var).cloned())
                .map_err(|e| IndexError::Config(e.to_string()))?;
        }

        let config = builder
            .build()
            .map_err(|e| IndexError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| IndexError::Config(e.to_string()))
    }

    fn home_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cosmos-index")
            .join("config.toml")
    }
}
