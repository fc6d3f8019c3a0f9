// CLI module for cosmos-index
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// cosmos-index - HTTP facade for Cosmos file indexes
#[derive(Parser, Debug)]
#[command(name = "cosmos-index", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (replaces the default locations)
    #[arg(short, long, env = "COSMOS_INDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind, overriding the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overriding the config file
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply CLI overrides, which take precedence over every other source.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
