//! Configuration file handling.
//!
//! Settings live in `<config dir>/subseek/config.toml`. Every field has a
//! default, so a missing file or a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tracks::DEFAULT_SUBTITLE_URL_TEMPLATE;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "SUBSEEK_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub player: PlayerConfig,
}

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Root of the REST API
    pub base_url: String,
    /// Root under which video and subtitle files are served
    pub media_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/".to_string(),
            media_url: "http://127.0.0.1:8000/media/".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Playback behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Start playback after a seek lands
    pub autoplay: bool,
    /// Subtitle language shown by default
    pub preferred_language: Option<String>,
    /// Give up on a pending seek after this long; wait forever when unset
    pub metadata_timeout_secs: Option<u64>,
    /// Delay between simulated load steps in `play`
    pub load_step_ms: u64,
    pub subtitle_url_template: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            preferred_language: None,
            metadata_timeout_secs: None,
            load_step_ms: 150,
            subtitle_url_template: DEFAULT_SUBTITLE_URL_TEMPLATE.to_string(),
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `$SUBSEEK_CONFIG` if set, else `<config dir>/subseek/config.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("subseek").join("config.toml"))
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = self.to_toml()?;
        fs::write(path, content).map_err(write_err)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
