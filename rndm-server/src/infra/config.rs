use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use rndm_core::search::SearchSettings;

/// Application configuration, loaded from a TOML file with environment
/// overrides applied on top.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed by the CORS layer. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration. Missing file path means defaults; environment
    /// variables win over file values either way.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path).with_context(|| {
                    format!("reading config file {}", path.display())
                })?;
                toml::from_str(&raw).with_context(|| {
                    format!("parsing config file {}", path.display())
                })?
            }
            None => Config::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL")
            && !url.is_empty()
        {
            self.database.url = url;
        }

        if let Ok(key) = std::env::var("TMDB_API_KEY")
            && !key.is_empty()
        {
            self.search.tmdb_api_key = key;
        }

        if let Ok(host) = std::env::var("RNDM_HOST")
            && !host.is_empty()
        {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("RNDM_PORT")
            && let Ok(port) = port.parse::<u16>()
        {
            self.server.port = port;
        }
    }
}
