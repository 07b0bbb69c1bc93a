//! Application configuration
//!
//! Values come from built-in defaults, then an optional `cosmobot.toml`
//! next to the binary, then `COSMOBOT_*` environment variables (a `.env`
//! file is loaded into the environment first).

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Where character sheets are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Single JSON document, compatible with the original bot's data file
    Json,
    /// Embedded SQLite database
    Sqlite,
    /// Volatile map, lost on restart
    Memory,
}

/// Application configuration loaded from file and environment
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Interface the HTTP server binds to
    pub server_host: IpAddr,
    /// HTTP server port (command endpoint and keep-alive)
    pub server_port: u16,

    pub storage_backend: StorageBackend,
    /// Path of the JSON data document
    pub data_file: PathBuf,
    /// SQLite connection URL
    pub sqlite_url: String,

    /// Prefix every chat command starts with
    pub command_prefix: String,
}

impl AppConfig {
    /// Load configuration from defaults, `cosmobot.toml` and the environment
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("server_host", "0.0.0.0")?
            .set_default("server_port", 8080)?
            .set_default("storage_backend", "json")?
            .set_default("data_file", "data/cosmo_data.json")?
            .set_default("sqlite_url", "sqlite://data/cosmo.db?mode=rwc")?
            .set_default("command_prefix", "!")?
            .add_source(config::File::with_name("cosmobot").required(false))
            .add_source(config::Environment::with_prefix("COSMOBOT").try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration values")?;

        if config.command_prefix.trim().is_empty() {
            anyhow::bail!("COSMOBOT_COMMAND_PREFIX cannot be empty");
        }

        Ok(config)
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }
}
