// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::measurement::PLACEHOLDER_CODE;
use crate::ProjectStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Studio name printed at the top of technical sheets
    pub studio_name: String,

    /// Width in mm given to a newly started measurement set
    pub default_width: u32,

    /// Height in mm given to a newly started measurement set
    pub default_height: u32,

    /// Reference code used when a set is saved without one
    pub placeholder_code: String,

    /// Project store location (defaults to the platform data dir)
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            studio_name: "ARISTA ESTUDIO".to_string(),
            default_width: 800,
            default_height: 1200,
            placeholder_code: PLACEHOLDER_CODE.to_string(),
            store_path: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl Config {
    /// Get the default config file path (~/.config/medidor/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("medidor").join("config.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => match Self::load(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save config to default path
    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::ReadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)?;
        Ok(path)
    }

    /// Where the project store lives: the configured override or the default
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_path.clone().or_else(ProjectStore::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str("default_width = 1500\n").unwrap();
        assert_eq!(config.default_width, 1500);
        assert_eq!(config.default_height, 1200);
        assert_eq!(config.placeholder_code, "S/C");
        assert!(config.store_path.is_none());
    }

    #[test]
    fn config_roundtrip() {
        let config = Config {
            studio_name: "Taller Norte".to_string(),
            store_path: Some(PathBuf::from("/tmp/medidor/projects.bin")),
            ..Config::default()
        };

        let path = std::env::temp_dir().join("medidor_test_config.toml");
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.store_path(), Some(PathBuf::from("/tmp/medidor/projects.bin")));

        let _ = std::fs::remove_file(&path);
    }
}
