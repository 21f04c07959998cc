//! Catalog inspection command handler

use anyhow::{Context, Result};
use dexloc::{Catalog, EncounterRecord, SpeciesFormKey};
use std::path::Path;

/// Handle the show command
pub fn handle(catalog_path: &Path, dex_key: &str) -> Result<()> {
    let key = SpeciesFormKey::parse_dex_key(dex_key)
        .with_context(|| format!("Invalid dex key '{}' (expected e.g. 25 or 128-2)", dex_key))?;

    let contents = std::fs::read_to_string(catalog_path)
        .with_context(|| format!("Failed to read {}", catalog_path.display()))?;
    let catalog: Catalog = serde_json::from_str(&contents).context("Failed to parse catalog")?;

    let records = catalog.get(key);
    if records.is_empty() {
        println!("No encounters for {}", key);
        return Ok(());
    }

    println!("{} ({}): {} encounters\n", records[0].species_name, key, records.len());
    println!(
        "{:<28} {:<24} {:>7}  {:<12} {:<10}",
        "Location", "Method", "Levels", "Version", "Gender"
    );
    println!("{}", "-".repeat(85));
    for record in records {
        println!("{}", format_record(record));
    }

    Ok(())
}

fn format_record(record: &EncounterRecord) -> String {
    let levels = if record.min_level == record.max_level {
        record.min_level.to_string()
    } else {
        format!("{}-{}", record.min_level, record.max_level)
    };

    let mut notes = Vec::new();
    if record.flags.alpha {
        notes.push("alpha");
    }
    if record.flags.underground {
        notes.push("underground");
    }
    if record.flags.can_gigantamax {
        notes.push("gigantamax");
    }
    if record.shiny_locked {
        notes.push("shiny locked");
    }
    if record.is_gift {
        notes.push("gift");
    }
    if record.fateful {
        notes.push("fateful");
    }

    let mut line = format!(
        "{:<28} {:<24} {:>7}  {:<12} {:<10}",
        record.location_name,
        record.encounter_type.to_string(),
        levels,
        record.version_availability,
        record.gender_ratio.to_string()
    );
    if !notes.is_empty() {
        line.push_str(&format!(" [{}]", notes.join(", ")));
    }
    line.trim_end().to_string()
}
