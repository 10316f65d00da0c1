//! Configuration management for the winmine CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use winmine::Settings;

/// Settings together with the file they came from
#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
    pub settings: Settings,
}

impl Config {
    /// Get the path to the default config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("winmine");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path` (or the default location); missing files give defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::config_path()?,
        };
        let settings = Self::read_settings(&path)?;
        Ok(Self { path, settings })
    }

    fn read_settings(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(&self.settings).context("Failed to serialize config")?;

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write config to {}", self.path.display()))?;

        Ok(())
    }
}
