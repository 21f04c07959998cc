//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up dexloc defaults.

use crate::cli::OutputFormat;
use crate::config::Config;
use anyhow::Result;
use dexloc::PropagationStrategy;
use std::path::PathBuf;

/// Requested changes to the stored configuration
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub strategy: Option<PropagationStrategy>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.data_dir.is_none()
            && self.output_dir.is_none()
            && self.format.is_none()
            && self.strategy.is_none()
    }

    /// Apply to `config`, returning a description of each change
    fn apply(self, config: &mut Config) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(dir) = self.data_dir {
            changes.push(format!("Data directory: {}", dir.display()));
            config.data_dir = Some(dir);
        }
        if let Some(dir) = self.output_dir {
            changes.push(format!("Output directory: {}", dir.display()));
            config.output_dir = Some(dir);
        }
        if let Some(format) = self.format {
            changes.push(format!("Format: {}", format.extension()));
            config.format = Some(format);
        }
        if let Some(strategy) = self.strategy {
            changes.push(format!("Strategy: {}", strategy));
            config.strategy = Some(strategy);
        }
        changes
    }
}

/// Handle the configure command
pub fn handle(update: ConfigUpdate, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if update.is_empty() {
        show_usage();
        return Ok(());
    }

    for change in update.apply(&mut config) {
        println!("{}", change);
    }
    config.save()?;
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.data_dir {
        Some(dir) => println!("Data directory: {}", dir.display()),
        None => println!("No data directory configured"),
    }
    match &config.output_dir {
        Some(dir) => println!("Output directory: {}", dir.display()),
        None => println!("Output directory: current directory"),
    }
    println!("Format: {}", config.format_or(None).extension());
    println!("Strategy: {}", config.strategy_or(None));

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: dexloc configure --data-dir DIR [--output-dir DIR]");
    println!("   or: dexloc configure --format json|csv --strategy first-reached|minimax");
    println!("   or: dexloc configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_apply_update() {
        let mut config = Config::default();
        let update = ConfigUpdate {
            format: Some(OutputFormat::Csv),
            strategy: Some(PropagationStrategy::Minimax),
            ..Default::default()
        };
        assert!(!update.is_empty());

        let changes = update.apply(&mut config);
        assert_eq!(changes, vec!["Format: csv", "Strategy: minimax"]);
        assert_eq!(config.format, Some(OutputFormat::Csv));
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_empty_update() {
        assert!(ConfigUpdate::default().is_empty());
    }
}
