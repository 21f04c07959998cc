//! Configuration management for dexloc CLI

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use dexloc::PropagationStrategy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Directory holding title bundles
    pub data_dir: Option<PathBuf>,
    /// Directory built catalogs are written to
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub strategy: Option<PropagationStrategy>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("dexloc");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Format from the command line, else the configured one, else JSON
    pub fn format_or(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.format).unwrap_or_default()
    }

    pub fn strategy_or(&self, flag: Option<PropagationStrategy>) -> PropagationStrategy {
        flag.or(self.strategy).unwrap_or_default()
    }

    /// Resolve a bundle path, falling back to the data dir for relative paths
    /// that do not exist as given
    pub fn resolve_bundle(&self, bundle: &Path) -> PathBuf {
        if bundle.is_relative() && !bundle.exists() {
            if let Some(dir) = &self.data_dir {
                return dir.join(bundle);
            }
        }
        bundle.to_path_buf()
    }
}
