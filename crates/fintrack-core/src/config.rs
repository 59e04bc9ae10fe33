//! Configuration loading
//!
//! Loads from `~/.local/share/fintrack/config/fintrack.toml` if it exists,
//! otherwise from the defaults embedded at build time. Keys missing from the
//! file keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::history::HISTORY_KEY;

/// Default config embedded at compile time
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/fintrack.toml");

/// Database file name used by the sqlite backend when no path is configured
const DEFAULT_DB_FILE: &str = "fintrack.db";

/// Directory name used by the file backend when no path is configured
const DEFAULT_STORE_DIR: &str = "store";

/// Which persistence collaborator holds the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    File,
    Sqlite,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Sqlite => "sqlite",
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "sqlite" | "db" => Ok(Self::Sqlite),
            _ => Err(format!("Unknown storage backend: {}", s)),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Store directory (file) or database file (sqlite); `None` means the default location
    pub path: Option<PathBuf>,
    pub history_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            history_key: HISTORY_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// Configured path, or the backend's default under the data directory
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }
        let data_dir = default_data_dir()?;
        Some(match self.backend {
            StorageBackend::File => data_dir.join(DEFAULT_STORE_DIR),
            StorageBackend::Sqlite => data_dir.join(DEFAULT_DB_FILE),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub storage: StorageConfig,
}

impl Config {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }
}

/// Per-user data directory (`~/.local/share/fintrack` on Linux)
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("fintrack"))
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    default_data_dir().map(|d| d.join("config").join("fintrack.toml"))
}

/// Load configuration
///
/// An explicit path must exist. Without one, the default override location
/// is used when present, else the embedded defaults.
pub fn load_config(override_path: Option<&Path>) -> Result<Config> {
    let content = if let Some(path) = override_path {
        fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?
    } else if let Some(default_path) = default_config_path().filter(|p| p.exists()) {
        fs::read_to_string(&default_path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config {}: {}",
                default_path.display(),
                e
            ))
        })?
    } else {
        DEFAULT_CONFIG.to_string()
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    storage: Option<RawStorage>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    backend: Option<String>,
    path: Option<PathBuf>,
    history_key: Option<String>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(storage) = raw.storage {
        if let Some(backend) = storage.backend {
            config.storage.backend = backend.parse().map_err(Error::Config)?;
        }
        if let Some(path) = storage.path {
            config.storage.path = Some(path);
        }
        if let Some(key) = storage.history_key {
            if key.trim().is_empty() {
                return Err(Error::Config("history_key must not be empty".to_string()));
            }
            config.storage.history_key = key;
        }
    }

    Ok(config)
}
