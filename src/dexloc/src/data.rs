//! Title data bundles
//!
//! A bundle is one JSON or YAML file carrying everything a build needs for
//! one title: species table, names, locations, evolutions and the ordered
//! raw source collections. Extra collections may sit in a `sources/`
//! directory next to the bundle.

use crate::builder::{BuildError, BuildReport, CatalogBuilder};
use crate::catalog::Catalog;
use crate::evolution::{EvolutionEdge, EvolutionGraph};
use crate::propagate::PropagationStrategy;
use crate::source::SourceCollection;
use crate::species::{PersonalInfo, SpeciesFormKey, SpeciesTable};
use crate::title::{ProfileOverride, Title, TitleProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory next to a bundle holding supplemental collections
pub const SOURCES_DIR: &str = "sources";

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Directory scan error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Unsupported data format: {0}")]
    UnsupportedFormat(String),

    #[error("Duplicate species entry: {0}")]
    DuplicateSpecies(SpeciesFormKey),
}

pub type DataResult<T> = Result<T, DataError>;

/// One row of the species table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesEntry {
    pub species: u16,
    #[serde(default)]
    pub form: u8,
    #[serde(flatten)]
    pub info: PersonalInfo,
}

/// Everything one title build reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleData {
    pub title: Title,
    #[serde(default)]
    pub profile: ProfileOverride,
    #[serde(default)]
    pub species: Vec<SpeciesEntry>,
    #[serde(default)]
    pub species_names: BTreeMap<u16, String>,
    #[serde(default)]
    pub locations: BTreeMap<u16, String>,
    #[serde(default)]
    pub evolutions: Vec<EvolutionEdge>,
    #[serde(default)]
    pub sources: Vec<SourceCollection>,
    /// Collection files, relative to the bundle, that may be absent
    #[serde(default)]
    pub optional_sources: Vec<PathBuf>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

enum Format {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> DataResult<Format> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("json") => Ok(Format::Json),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
    }
}

fn read_file<T: serde::de::DeserializeOwned>(path: &Path) -> DataResult<T> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path)?;
    match format {
        Format::Json => Ok(serde_json::from_str(&content)?),
        Format::Yaml => Ok(serde_yaml::from_str(&content)?),
    }
}

impl TitleData {
    /// Load a bundle, choosing the parser by file extension
    pub fn load<P: AsRef<Path>>(path: P) -> DataResult<Self> {
        let path = path.as_ref();
        let mut data: TitleData = read_file(path)?;
        data.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(
            path = %path.display(),
            title = %data.title,
            species = data.species.len(),
            collections = data.sources.len(),
            "Loaded title bundle"
        );
        Ok(data)
    }

    pub fn from_json_str(json: &str) -> DataResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Directory supplemental and optional collections are resolved against
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Title profile with the bundle's overrides applied
    pub fn profile(&self) -> TitleProfile {
        self.title.profile().apply(&self.profile)
    }

    pub fn species_table(&self) -> DataResult<SpeciesTable> {
        let mut table = SpeciesTable::new();
        for entry in &self.species {
            let key = SpeciesFormKey::new(entry.species, entry.form);
            if table.insert(key, entry.info.clone()).is_some() {
                return Err(DataError::DuplicateSpecies(key));
            }
        }
        for (species, name) in &self.species_names {
            table.set_name(*species, name.clone());
        }
        Ok(table)
    }

    /// Evolution graph over the species in `table`
    pub fn graph(&self, table: &SpeciesTable) -> EvolutionGraph {
        EvolutionGraph::build(self.evolutions.as_slice(), table.keys())
    }

    /// Inline collections, then `sources/*.json|yaml` in file-name order,
    /// then optional collections that exist
    pub fn collections(&self) -> DataResult<Vec<SourceCollection>> {
        let mut collections = self.sources.clone();
        let Some(base_dir) = &self.base_dir else {
            return Ok(collections);
        };

        let sources_dir = base_dir.join(SOURCES_DIR);
        if sources_dir.is_dir() {
            for entry in walkdir::WalkDir::new(&sources_dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = entry?;
                if !entry.file_type().is_file() || format_of(entry.path()).is_err() {
                    continue;
                }
                let collection: SourceCollection = read_file(entry.path())?;
                tracing::debug!(
                    path = %entry.path().display(),
                    collection = %collection.name,
                    entries = collection.len(),
                    "Loaded supplemental collection"
                );
                collections.push(collection);
            }
        }

        for relative in &self.optional_sources {
            let path = base_dir.join(relative);
            if !path.exists() {
                tracing::warn!(path = %path.display(), "Optional source not found, skipping");
                continue;
            }
            collections.push(read_file(&path)?);
        }

        Ok(collections)
    }

    /// Load every collection and build the catalog
    pub fn build_catalog(
        &self,
        strategy: PropagationStrategy,
    ) -> Result<(Catalog, BuildReport), BuildError> {
        let table = self.species_table()?;
        let graph = self.graph(&table);
        let collections = self.collections()?;

        CatalogBuilder::new(&table, &self.locations, &graph, self.profile())
            .with_strategy(strategy)
            .build(&collections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gender::GenderRatio;
    use std::fs;
    use tempfile::TempDir;

    const BUNDLE: &str = r#"{
        "title": "sv",
        "profile": { "variants": { "first": "A", "second": "B" } },
        "species": [
            { "species": 900 },
            { "species": 901, "gender": 0 },
            { "species": 902, "fixed_gender": "genderless" }
        ],
        "species_names": { "900": "Fawnling", "901": "Stagmaw", "902": "Elkorn" },
        "locations": { "12": "Test Meadow" },
        "evolutions": [
            { "from": { "species": 900 }, "to": { "species": 901 }, "level": 16 },
            { "from": { "species": 901 }, "to": { "species": 902 }, "level": 20, "level_up": 32 }
        ],
        "sources": [
            { "name": "slots_a", "version": "A", "entries": [
                { "species": 900, "location": 12, "level_min": 5, "level_max": 7, "method": "wild" }
            ] }
        ],
        "optional_sources": ["extra/missing.json"]
    }"#;

    fn key(species: u16) -> SpeciesFormKey {
        SpeciesFormKey::new(species, 0)
    }

    #[test]
    fn test_parse_bundle() {
        let data = TitleData::from_json_str(BUNDLE).unwrap();
        assert_eq!(data.title, Title::Sv);
        assert_eq!(data.profile().variants.first, "A");

        let table = data.species_table().unwrap();
        assert_eq!(table.len(), 3);

        let graph = data.graph(&table);
        assert_eq!(graph.required_level(key(901), key(902)), Some(32));
    }

    #[test]
    fn test_duplicate_species_rejected() {
        let mut data = TitleData::from_json_str(BUNDLE).unwrap();
        data.species.push(data.species[0].clone());
        assert!(matches!(
            data.species_table(),
            Err(DataError::DuplicateSpecies(k)) if k == key(900)
        ));
    }

    #[test]
    fn test_build_from_bundle_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("title.json");
        fs::write(&path, BUNDLE).unwrap();

        let sources = dir.path().join(SOURCES_DIR);
        fs::create_dir(&sources).unwrap();
        fs::write(
            sources.join("b_slots.json"),
            r#"{ "name": "slots_b", "version": "B", "entries": [
                { "species": 900, "location": 12, "level_min": 4, "level_max": 7, "method": "wild" }
            ] }"#,
        )
        .unwrap();
        fs::write(sources.join("notes.txt"), "ignored").unwrap();

        let data = TitleData::load(&path).unwrap();
        let collections = data.collections().unwrap();
        let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["slots_a", "slots_b"]);

        let (catalog, report) = data.build_catalog(PropagationStrategy::FirstReached).unwrap();
        assert_eq!(catalog.record_count(), 3);
        assert_eq!(report.collections, 2);

        let base = &catalog.get(key(900))[0];
        assert_eq!((base.min_level, base.max_level), (4, 7));
        assert_eq!(base.version_availability, "Both");

        assert_eq!(catalog.get(key(901))[0].gender_ratio, GenderRatio::Male);
        let elkorn = &catalog.get(key(902))[0];
        assert_eq!(elkorn.min_level, 32);
        assert_eq!(elkorn.gender_ratio, GenderRatio::Genderless);
    }

    #[test]
    fn test_yaml_bundle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("title.yml");
        fs::write(
            &path,
            "title: lgpe\nspecies:\n  - species: 25\nspecies_names:\n  25: Pikachu\nsources:\n  - name: statics\n    entries:\n      - species: 25\n        location: 3\n        level_min: 10\n        method: gift\n",
        )
        .unwrap();

        let data = TitleData::load(&path).unwrap();
        let (catalog, _) = data.build_catalog(PropagationStrategy::default()).unwrap();
        let record = &catalog.get(key(25))[0];
        assert!(record.is_gift);
        assert_eq!(record.location_name, "Unknown Location 3");
        assert_eq!(record.version_availability, "Both");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("title.toml");
        fs::write(&path, "title = 'sv'").unwrap();
        assert!(matches!(TitleData::load(&path), Err(DataError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_bundle_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = TitleData::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(DataError::Io(_))));
    }
}
