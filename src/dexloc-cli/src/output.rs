//! Catalog writers

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use dexloc::record::SizeKind;
use dexloc::{Catalog, EncounterRecord};
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &[&str] = &[
    "dex",
    "species",
    "form",
    "species_name",
    "location_id",
    "location_name",
    "min_level",
    "max_level",
    "encounter_type",
    "shiny_locked",
    "is_gift",
    "fixed_ball",
    "flawless_ivs",
    "fateful",
    "version_availability",
    "gender_ratio",
    "alpha",
    "underground",
    "can_gigantamax",
    "size_kind",
    "size_value",
];

/// Escape a string for CSV output
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn csv_row(record: &EncounterRecord) -> String {
    let size_kind = match record.size.kind {
        SizeKind::Random => "random",
        SizeKind::Value => "value",
    };
    let fields = [
        record.species_form.dex_key(),
        record.species_form.species.to_string(),
        record.species_form.form.to_string(),
        escape_csv(&record.species_name),
        record.location_id.to_string(),
        escape_csv(&record.location_name),
        record.min_level.to_string(),
        record.max_level.to_string(),
        escape_csv(&record.encounter_type.to_string()),
        record.shiny_locked.to_string(),
        record.is_gift.to_string(),
        escape_csv(record.fixed_ball.as_deref().unwrap_or("")),
        record.flawless_ivs.to_string(),
        record.fateful.to_string(),
        escape_csv(&record.version_availability),
        record.gender_ratio.to_string(),
        record.flags.alpha.to_string(),
        record.flags.underground.to_string(),
        record.flags.can_gigantamax.to_string(),
        size_kind.to_string(),
        record.size.value.to_string(),
    ];
    fields.join(",")
}

/// Render a catalog in the requested format
pub fn render(catalog: &Catalog, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(catalog).context("Failed to serialize catalog")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => {
            let mut csv = CSV_HEADER.join(",");
            csv.push('\n');
            for record in catalog.records() {
                csv.push_str(&csv_row(record));
                csv.push('\n');
            }
            Ok(csv)
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the catalog to `path`, replacing it only once fully written
pub fn write_catalog(catalog: &Catalog, format: OutputFormat, path: &Path) -> Result<()> {
    let content = render(catalog, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let staging = staging_path(path);
    let written = fs::write(&staging, content)
        .with_context(|| format!("Failed to write {}", staging.display()))
        .and_then(|()| {
            fs::rename(&staging, path)
                .with_context(|| format!("Failed to move catalog into {}", path.display()))
        });

    if written.is_err() {
        let _ = fs::remove_file(&staging);
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexloc::{
        EncounterType, GenderRatio, SizeClass, SpeciesFormKey, TitleFlags, VariantPair,
    };
    use tempfile::TempDir;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.merge(
            EncounterRecord {
                species_name: "Fawnling".to_string(),
                species_form: SpeciesFormKey::new(900, 0),
                location_id: 12,
                location_name: "Meadow, North".to_string(),
                min_level: 5,
                max_level: 7,
                encounter_type: EncounterType::TeraRaid {
                    stars: 5,
                    region: "Paldea".to_string(),
                },
                shiny_locked: false,
                is_gift: false,
                fixed_ball: None,
                flawless_ivs: 0,
                fateful: false,
                version_availability: "Both".to_string(),
                gender_ratio: GenderRatio::Mixed,
                flags: TitleFlags::default(),
                size: SizeClass::from_scale(Some(255)),
            },
            &VariantPair::new("A", "B"),
        );
        catalog
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_render_csv() {
        let csv = render(&catalog(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split(',').count(), CSV_HEADER.len());
        assert_eq!(
            lines[1],
            "900,900,0,Fawnling,12,\"Meadow, North\",5,7,5★ Tera Raid Paldea,false,false,,0,false,Both,Mixed,false,false,false,value,255"
        );
    }

    #[test]
    fn test_write_json_replaces_atomically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("sv_encounters.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        write_catalog(&catalog(), OutputFormat::Json, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.starts_with('\u{feff}'));
        let back: Catalog = serde_json::from_str(&written).unwrap();
        assert_eq!(back.record_count(), 1);
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_write_failure_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("catalog.json");

        assert!(write_catalog(&catalog(), OutputFormat::Json, &path).is_err());
        assert!(!path.exists());
    }
}
