use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{MotivadError, Result};

/// Storage key holding the full reminder array
pub const DEFAULT_STORAGE_KEY: &str = "reminders";

/// Global motivad configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between ad scans in watch mode
    #[serde(default = "default_scan_interval")]
    pub scan_interval_secs: u64,

    /// Key under which reminders are stored
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Quote file or URL used instead of the bundled quotes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotes_path: Option<String>,

    /// Selectors matched in addition to the built-in ad selectors
    #[serde(default)]
    pub extra_selectors: Vec<String>,
}

fn default_scan_interval() -> u64 {
    60
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_interval_secs: default_scan_interval(),
            storage_key: default_storage_key(),
            quotes_path: None,
            extra_selectors: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| MotivadError::ConfigError(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "motivad")
            .ok_or_else(|| MotivadError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "motivad")
            .ok_or_else(|| MotivadError::ConfigError("Could not determine data directory".into()))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Get the storage database path
    ///
    /// Supports MOTIVAD_DB environment variable for test isolation
    pub fn db_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("MOTIVAD_DB") {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::data_dir()?.join("motivad.db"))
    }
}
