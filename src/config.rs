//! Configuration handling for DialogBind

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Checked before the per-user file
pub const LOCAL_CONFIG: &str = "dialogbind.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window title used when a call does not pass one
    pub title: String,
    /// Backend to use instead of auto-detection; `DIALOGBIND_BACKEND` still wins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Set to false to silence `play_sound`
    pub sounds: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: crate::dialog::DEFAULT_TITLE.to_string(),
            backend: None,
            sounds: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `~/.config/dialogbind/config.toml` or the platform equivalent
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dialogbind").join("config.toml"))
    }

    /// Load from the working directory, then the user config dir, else defaults
    pub fn discover() -> Result<Self, ConfigError> {
        let candidates = std::iter::once(PathBuf::from(LOCAL_CONFIG)).chain(Self::user_path());
        Self::discover_in(candidates)
    }

    fn discover_in<I>(candidates: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in candidates {
            if path.exists() {
                debug!("Loading config from {}", path.display());
                return Self::load(&path);
            }
        }
        debug!("No config file found, using defaults");
        Ok(Config::default())
    }
}
