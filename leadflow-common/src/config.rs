//! Server configuration resolution
//!
//! Values resolve in priority order: command line, then environment
//! (clap folds those two tiers together), then TOML config file, then
//! compiled default.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5003;
pub const DEFAULT_DATABASE_PATH: &str = "./leadflow.db";
pub const DEFAULT_NATIONALIZE_URL: &str = "https://api.nationalize.io";

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listening port
    pub port: u16,
    /// Exact origin for the CORS allow-list; permissive CORS when unset
    pub cors_origin: Option<String>,
    /// SQLite database path
    pub database_path: PathBuf,
    /// Base URL of the nationality-prediction API
    pub nationalize_url: String,
}

/// Optional overrides read from the TOML config file tier.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub port: Option<u16>,
    pub cors_origin: Option<String>,
    pub database: Option<PathBuf>,
    pub nationalize_url: Option<String>,
}

impl ConfigFile {
    /// Load `$LEADFLOW_CONFIG` if set, else `leadflow.toml` in the working
    /// directory. A missing file is not an error; it yields the empty
    /// overlay.
    pub fn load() -> Result<ConfigFile> {
        let path = match std::env::var("LEADFLOW_CONFIG") {
            Ok(p) => PathBuf::from(p),
            Err(_) => PathBuf::from("leadflow.toml"),
        };

        if !path.exists() {
            return Ok(ConfigFile::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

impl ServerConfig {
    /// Merge CLI/env-tier overrides with the config file tier and defaults.
    pub fn resolve(
        port: Option<u16>,
        cors_origin: Option<String>,
        database: Option<PathBuf>,
        nationalize_url: Option<String>,
        file: ConfigFile,
    ) -> ServerConfig {
        ServerConfig {
            port: port.or(file.port).unwrap_or(DEFAULT_PORT),
            cors_origin: cors_origin.or(file.cors_origin),
            database_path: database
                .or(file.database)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            nationalize_url: nationalize_url
                .or(file.nationalize_url)
                .unwrap_or_else(|| DEFAULT_NATIONALIZE_URL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ServerConfig::resolve(None, None, None, None, ConfigFile::default());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.cors_origin, None);
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.nationalize_url, DEFAULT_NATIONALIZE_URL);
    }

    #[test]
    fn cli_tier_beats_config_file_tier() {
        let file = ConfigFile {
            port: Some(8080),
            cors_origin: Some("https://file.example".to_string()),
            database: Some(PathBuf::from("/tmp/file.db")),
            nationalize_url: None,
        };
        let config = ServerConfig::resolve(
            Some(9000),
            None,
            Some(PathBuf::from("/tmp/cli.db")),
            None,
            file,
        );
        assert_eq!(config.port, 9000);
        // Unset on the CLI tier falls through to the file tier
        assert_eq!(config.cors_origin.as_deref(), Some("https://file.example"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/cli.db"));
        assert_eq!(config.nationalize_url, DEFAULT_NATIONALIZE_URL);
    }

    #[test]
    fn config_file_parses_partial_keys() {
        let file: ConfigFile = toml::from_str("port = 6000\n").unwrap();
        assert_eq!(file.port, Some(6000));
        assert_eq!(file.cors_origin, None);

        let config = ServerConfig::resolve(None, None, None, None, file);
        assert_eq!(config.port, 6000);
    }
}
