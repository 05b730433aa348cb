use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::app_store::{DEFAULT_LOOKUP_URL, DEFAULT_STORE_URL};
use crate::version::UpdateLevel;

/// Timeout for the catalog lookup in milliseconds (10 seconds)
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration for a host that checks for forced updates
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub level: UpdateLevel,
    pub app: AppConfig,
    pub catalog: CatalogConfig,
}

/// Identity of the installed app
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Catalog identifier, used for the lookup and the store page
    pub app_id: Option<String>,
    /// Version string of the installed build
    pub installed_version: Option<String>,
}

/// Catalog endpoint configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    pub lookup_url: String,
    pub store_url: String,
    /// Storefront country code, e.g. "jp"
    pub country: Option<String>,
    /// Lookup timeout in milliseconds
    pub timeout: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            store_url: DEFAULT_STORE_URL.to_string(),
            country: None,
            timeout: DEFAULT_LOOKUP_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the data directory for force-update.
/// Uses $XDG_DATA_HOME/force-update if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/force-update,
/// or ./force-update if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("force-update.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("force-update")
}
