//! Runtime configuration loaded from a JSON file.
//!
//! The file path defaults to `config.import.json` and can be changed with the
//! `WRITINGS_CONFIG` environment variable. Every section is optional; missing
//! values fall back to the defaults below. `WRITINGS_ENV` overrides the
//! `environment` key so one file can serve several deployments.

use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config.import.json";
const CONFIG_PATH_VAR: &str = "WRITINGS_CONFIG";
const ENVIRONMENT_VAR: &str = "WRITINGS_ENV";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Deployment environment. Decides how many files a single import may touch.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Development,
    Staging,
    Testing,
    #[serde(other)]
    Other,
}

impl Environment {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "production" => Environment::Production,
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "testing" => Environment::Testing,
            _ => Environment::Other,
        }
    }

    /// Maximum number of directory entries an import visits. `None` means no limit.
    pub fn max_files(self) -> Option<usize> {
        match self {
            Environment::Production => None,
            Environment::Development => Some(50),
            Environment::Staging => Some(100),
            Environment::Testing => Some(20),
            Environment::Other => Some(50),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("writings.sqlite"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FoldersConfig {
    /// Directory holding the raw `<source>-<id>-<page>.txt` files.
    pub source: PathBuf,
    /// Directory receiving the cleaned copies.
    pub destination: PathBuf,
}

impl Default for FoldersConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("original_texts"),
            destination: PathBuf::from("cleaned_texts"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
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

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub folders: FoldersConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolves the config file from the environment, falling back to
    /// defaults when the file does not exist.
    pub fn from_env() -> Result<Config, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = if path.exists() {
            Config::load(&path)?
        } else {
            warn!("Config file {:?} not found, using defaults", path);
            Config::default()
        };

        if let Ok(name) = std::env::var(ENVIRONMENT_VAR) {
            config.environment = Environment::from_name(&name);
        }

        Ok(config)
    }
}
