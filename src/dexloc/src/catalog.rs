//! Encounter catalog and merge rule
//!
//! The catalog maps each species/form to its encounter records in
//! first-seen order. An incoming record that shares a merge key with an
//! existing one widens it in place instead of being appended.

use crate::record::{EncounterRecord, MergeKey};
use crate::species::SpeciesFormKey;
use crate::version::VariantPair;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// What happened to a record passed to [`Catalog::merge`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Appended,
    Merged,
}

/// Counts from merging one catalog into another
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeCounts {
    pub appended: usize,
    pub merged: usize,
}

/// Per-species encounter catalog
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: BTreeMap<SpeciesFormKey, Vec<EncounterRecord>>,
    /// Index: merge key → position within its species' list
    index: HashMap<MergeKey, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a record into the catalog.
    ///
    /// On a merge-key match the existing record keeps every field except
    /// the level range (widened) and version availability (combined).
    pub fn merge(&mut self, record: EncounterRecord, variants: &VariantPair) -> MergeOutcome {
        let key = record.merge_key();
        let records = self.entries.entry(record.species_form).or_default();

        if let Some(&pos) = self.index.get(&key) {
            let existing = &mut records[pos];
            existing.min_level = existing.min_level.min(record.min_level);
            existing.max_level = existing.max_level.max(record.max_level);
            existing.version_availability =
                variants.combine(&existing.version_availability, &record.version_availability);

            tracing::debug!(
                dex = %existing.species_form,
                species = %existing.species_name,
                location = %existing.location_name,
                location_id = existing.location_id,
                encounter_type = %existing.encounter_type,
                min_level = existing.min_level,
                max_level = existing.max_level,
                version = %existing.version_availability,
                gender = %existing.gender_ratio,
                "Updated existing encounter"
            );
            return MergeOutcome::Merged;
        }

        tracing::debug!(
            dex = %record.species_form,
            species = %record.species_name,
            location = %record.location_name,
            location_id = record.location_id,
            encounter_type = %record.encounter_type,
            min_level = record.min_level,
            max_level = record.max_level,
            version = %record.version_availability,
            gender = %record.gender_ratio,
            "Processed new encounter"
        );
        self.index.insert(key, records.len());
        records.push(record);
        MergeOutcome::Appended
    }

    /// Fold another catalog into this one, record by record, in its order
    pub fn absorb(&mut self, other: Catalog, variants: &VariantPair) -> MergeCounts {
        let mut counts = MergeCounts::default();
        for record in other.entries.into_values().flatten() {
            match self.merge(record, variants) {
                MergeOutcome::Appended => counts.appended += 1,
                MergeOutcome::Merged => counts.merged += 1,
            }
        }
        counts
    }

    /// Records for one species/form, in first-seen order
    pub fn get(&self, key: SpeciesFormKey) -> &[EncounterRecord] {
        self.entries.get(&key).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Records for a textual dex key (`"25"`, `"128-2"`)
    pub fn get_by_dex_key(&self, dex_key: &str) -> Option<&[EncounterRecord]> {
        let key = SpeciesFormKey::parse_dex_key(dex_key)?;
        self.entries.get(&key).map(|r| r.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesFormKey, &[EncounterRecord])> {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn records(&self) -> impl Iterator<Item = &EncounterRecord> {
        self.entries.values().flatten()
    }

    /// Number of species/form keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.entries.values().map(|r| r.len()).sum()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, records) in &self.entries {
            map.serialize_entry(&key.dex_key(), records)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, Vec<EncounterRecord>> = BTreeMap::deserialize(deserializer)?;

        let mut catalog = Catalog::new();
        for (dex_key, records) in raw {
            let key = SpeciesFormKey::parse_dex_key(&dex_key)
                .ok_or_else(|| D::Error::custom(format!("invalid dex key: {}", dex_key)))?;
            let list = catalog.entries.entry(key).or_default();
            for record in records {
                catalog.index.entry(record.merge_key()).or_insert(list.len());
                list.push(record);
            }
        }
        Ok(catalog)
    }
}
