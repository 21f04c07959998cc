//! Catalog builder
//!
//! Feeds every raw encounter of a title through the propagator and routes
//! the anchor record plus every derived record through the catalog merge.
//! Species, locations and evolutions are injected read-only.

use crate::catalog::{Catalog, MergeOutcome};
use crate::data::DataError;
use crate::evolution::EvolutionGraph;
use crate::gender::resolve_gender;
use crate::location::{placeholder_name, LocationDirectory};
use crate::propagate::{PropagationError, PropagationStrategy, Propagator};
use crate::record::EncounterRecord;
use crate::source::{RawEncounter, SourceCollection};
use crate::species::SpeciesDirectory;
use crate::title::{MissingLocation, TitleProfile};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to load encounter sources: {0}")]
    Data(#[from] DataError),

    #[error("Evolution propagation failed: {0}")]
    Propagation(#[from] PropagationError),
}

/// Why a raw entry contributed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    UnknownSpecies,
    NotInGame,
    MissingName,
    UnnamedLocation,
    InvalidLevels,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownSpecies => write!(f, "species/form not in directory"),
            SkipReason::NotInGame => write!(f, "species/form not present in title"),
            SkipReason::MissingName => write!(f, "missing species name"),
            SkipReason::UnnamedLocation => write!(f, "unnamed location"),
            SkipReason::InvalidLevels => write!(f, "inverted level range"),
        }
    }
}

/// Counters collected over one build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub collections: usize,
    pub entries_seen: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
    pub appended: usize,
    pub merged: usize,
    /// Records produced by evolution propagation
    pub derived: usize,
}

impl BuildReport {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    fn count(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Appended => self.appended += 1,
            MergeOutcome::Merged => self.merged += 1,
        }
    }
}

/// Builds one title's catalog
pub struct CatalogBuilder<'a> {
    species: &'a dyn SpeciesDirectory,
    locations: &'a dyn LocationDirectory,
    graph: &'a EvolutionGraph,
    profile: TitleProfile,
    strategy: PropagationStrategy,
    catalog: Catalog,
    report: BuildReport,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(
        species: &'a dyn SpeciesDirectory,
        locations: &'a dyn LocationDirectory,
        graph: &'a EvolutionGraph,
        profile: TitleProfile,
    ) -> Self {
        Self {
            species,
            locations,
            graph,
            profile,
            strategy: PropagationStrategy::default(),
            catalog: Catalog::new(),
            report: BuildReport::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: PropagationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn profile(&self) -> &TitleProfile {
        &self.profile
    }

    /// Run every collection in order and hand back the finished catalog
    pub fn build(
        mut self,
        collections: &[SourceCollection],
    ) -> Result<(Catalog, BuildReport), BuildError> {
        tracing::info!(
            title = %self.profile.name,
            collections = collections.len(),
            strategy = %self.strategy,
            "Building encounter catalog"
        );

        for collection in collections {
            self.add_collection(collection)?;
        }

        let (catalog, report) = self.finish();
        tracing::info!(
            species = catalog.len(),
            records = catalog.record_count(),
            skipped = report.skipped_total(),
            "Catalog complete"
        );
        Ok((catalog, report))
    }

    pub fn add_collection(&mut self, collection: &SourceCollection) -> Result<(), PropagationError> {
        tracing::debug!(
            collection = %collection.name,
            entries = collection.len(),
            version = %collection.version,
            "Processing source collection"
        );
        self.report.collections += 1;
        for raw in &collection.entries {
            self.add_encounter(raw, &collection.version)?;
        }
        Ok(())
    }

    /// Process one raw entry: the anchor record first, then one record
    /// per reachable evolved form
    pub fn add_encounter(
        &mut self,
        raw: &RawEncounter,
        default_version: &str,
    ) -> Result<(), PropagationError> {
        self.report.entries_seen += 1;

        let anchor = match self.anchor_record(raw, default_version) {
            Ok(record) => record,
            Err(reason) => {
                tracing::warn!(
                    dex = %raw.key(),
                    location = raw.location,
                    reason = %reason,
                    "Skipping encounter"
                );
                *self.report.skipped.entry(reason).or_insert(0) += 1;
                return Ok(());
            }
        };

        let species = self.species;
        let steps = if self.profile.propagate_evolutions {
            Propagator::new(self.graph, self.strategy).propagate(
                anchor.species_form,
                anchor.min_level,
                |key| species.is_present_in_game(key) && species.display_name(key.species).is_some(),
            )?
        } else {
            Vec::new()
        };

        let mut derived = Vec::with_capacity(steps.len());
        for step in steps {
            let Some(name) = species.display_name(step.key.species) else {
                continue;
            };
            let mut record = anchor.derive(
                step.key,
                name,
                step.level,
                resolve_gender(species.gender_info(step.key)),
            );
            record.flags.can_gigantamax =
                anchor.flags.can_gigantamax || species.can_gigantamax(step.key);
            derived.push(record);
        }

        let outcome = self.catalog.merge(anchor, &self.profile.variants);
        self.report.count(outcome);

        for record in derived {
            let outcome = self.catalog.merge(record, &self.profile.variants);
            self.report.count(outcome);
            self.report.derived += 1;
        }
        Ok(())
    }

    pub fn finish(self) -> (Catalog, BuildReport) {
        (self.catalog, self.report)
    }

    fn anchor_record(
        &self,
        raw: &RawEncounter,
        default_version: &str,
    ) -> Result<EncounterRecord, SkipReason> {
        let key = raw.key();
        if !self.species.exists(key) {
            return Err(SkipReason::UnknownSpecies);
        }
        if !self.species.is_present_in_game(key) {
            return Err(SkipReason::NotInGame);
        }
        let species_name = self
            .species
            .display_name(key.species)
            .ok_or(SkipReason::MissingName)?;
        let (min_level, max_level) = raw.level_range().ok_or(SkipReason::InvalidLevels)?;
        let location_name = self.location_name(raw)?;

        Ok(EncounterRecord {
            species_name: species_name.to_string(),
            species_form: key,
            location_id: raw.location,
            location_name,
            min_level,
            max_level,
            encounter_type: raw.encounter_type(),
            shiny_locked: raw.shiny_locked,
            is_gift: raw.is_gift(),
            fixed_ball: raw.fixed_ball.clone(),
            flawless_ivs: raw.flawless_ivs(),
            fateful: raw.is_fateful(),
            version_availability: raw.version_label(&self.profile.variants, default_version),
            gender_ratio: resolve_gender(self.species.gender_info(key)),
            flags: raw.flags(),
            size: raw.size(),
        })
    }

    fn location_name(&self, raw: &RawEncounter) -> Result<String, SkipReason> {
        if let Some(name) = self.locations.location_name(raw.location) {
            return Ok(name.to_string());
        }
        match self.profile.missing_location {
            MissingLocation::Skip => Err(SkipReason::UnnamedLocation),
            MissingLocation::Placeholder => Ok(raw
                .default_location_name()
                .map(str::to_string)
                .unwrap_or_else(|| placeholder_name(raw.location))),
        }
    }
}
