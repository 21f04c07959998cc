//! Core CLI definitions

use clap::{Parser, Subcommand};
use dexloc::{PropagationStrategy, Title};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dexloc")]
#[command(about = "Per-species encounter catalog builder", long_about = None)]
pub struct Cli {
    /// Show debug diagnostics (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write diagnostics to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Catalog output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an encounter catalog from a title bundle
    #[command(visible_alias = "b")]
    Build {
        /// Title bundle (.json, .yaml); relative paths also resolve against the configured data dir
        bundle: PathBuf,

        /// Output file (default: <output dir>/<title>_encounters.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (uses configured default if not provided)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Evolution propagation strategy (first-reached, minimax)
        #[arg(short, long)]
        strategy: Option<PropagationStrategy>,

        /// Override the title declared in the bundle (sv, swsh, bdsp, pla, lgpe)
        #[arg(short, long)]
        title: Option<Title>,
    },

    /// List the evolved forms reachable from a species and their minimum levels
    #[command(visible_alias = "e")]
    Evolutions {
        /// Title bundle
        bundle: PathBuf,

        /// National dex number
        species: u16,

        /// Form number
        #[arg(long, default_value_t = 0)]
        form: u8,

        /// Evolution propagation strategy (first-reached, minimax)
        #[arg(short, long)]
        strategy: Option<PropagationStrategy>,
    },

    /// Show the records of one species in a built catalog
    Show {
        /// Catalog JSON produced by `dexloc build`
        catalog: PathBuf,

        /// Dex key (e.g. "25" or "128-2")
        dex_key: String,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default directory holding title bundles
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Set default directory for built catalogs
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Set default propagation strategy
        #[arg(long)]
        strategy: Option<PropagationStrategy>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from([
            "dexloc", "-v", "build", "sv.json", "-o", "out.csv", "--format", "csv", "--strategy",
            "minimax", "--title", "swsh",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Build {
                bundle,
                output,
                format,
                strategy,
                title,
            } => {
                assert_eq!(bundle, PathBuf::from("sv.json"));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert_eq!(format, Some(OutputFormat::Csv));
                assert_eq!(strategy, Some(PropagationStrategy::Minimax));
                assert_eq!(title, Some(Title::Swsh));
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_parse_evolutions_defaults() {
        let cli = Cli::try_parse_from(["dexloc", "evolutions", "sv.json", "900"]).unwrap();
        match cli.command {
            Commands::Evolutions {
                species,
                form,
                strategy,
                ..
            } => {
                assert_eq!(species, 900);
                assert_eq!(form, 0);
                assert_eq!(strategy, None);
            }
            _ => panic!("expected evolutions"),
        }
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["dexloc", "build", "sv.json", "--strategy", "bfs"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
