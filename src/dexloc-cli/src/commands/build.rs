//! Catalog build command handler

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::output;
use anyhow::{Context, Result};
use dexloc::{BuildReport, PropagationStrategy, Title, TitleData};
use std::path::{Path, PathBuf};

/// Handle the build command
pub fn handle(
    bundle: &Path,
    output: Option<&Path>,
    format: Option<OutputFormat>,
    strategy: Option<PropagationStrategy>,
    title: Option<Title>,
) -> Result<()> {
    let config = Config::load()?;
    let bundle = config.resolve_bundle(bundle);
    let format = config.format_or(format);
    let strategy = config.strategy_or(strategy);

    let mut data = TitleData::load(&bundle)
        .with_context(|| format!("Failed to load title bundle {}", bundle.display()))?;
    if let Some(title) = title {
        data.title = title;
    }

    let (catalog, report) = data
        .build_catalog(strategy)
        .with_context(|| format!("Failed to build catalog for {}", data.title.name()))?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(&config, data.title, format));

    if let Err(e) = output::write_catalog(&catalog, format, &output) {
        tracing::error!(path = %output.display(), error = %e, "Failed to write catalog");
        return Err(e);
    }

    println!(
        "Wrote {} records for {} species to {}",
        catalog.record_count(),
        catalog.len(),
        output.display()
    );
    print_report(&report);

    Ok(())
}

/// `<output dir>/<title>_encounters.<ext>`, output dir defaulting to the cwd
fn default_output(config: &Config, title: Title, format: OutputFormat) -> PathBuf {
    let name = format!("{}_encounters.{}", title, format.extension());
    match &config.output_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn print_report(report: &BuildReport) {
    println!(
        "  {} raw entries from {} collections",
        report.entries_seen, report.collections
    );
    if report.derived > 0 {
        println!("  {} records derived from evolutions", report.derived);
    }
    if report.merged > 0 {
        println!("  {} merged into existing records", report.merged);
    }
    for (reason, count) in &report.skipped {
        println!("  {} skipped: {}", count, reason);
    }
}
