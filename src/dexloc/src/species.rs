//! Species/form identity and the species directory consulted during a build.
//!
//! The directory answers three questions for the catalog builder: does a
//! species/form exist, is it obtainable in the title being built, and what
//! is its gender-ratio information. Display names for species live here as
//! well since the title tables ship them side by side.

use crate::gender::GenderInfo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identity of one distinct creature variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeciesFormKey {
    pub species: u16,
    #[serde(default)]
    pub form: u8,
}

impl SpeciesFormKey {
    pub const fn new(species: u16, form: u8) -> Self {
        Self { species, form }
    }

    /// Catalog key: `"{species}"` for the base form, `"{species}-{form}"` otherwise
    pub fn dex_key(&self) -> String {
        if self.form > 0 {
            format!("{}-{}", self.species, self.form)
        } else {
            self.species.to_string()
        }
    }

    /// Parse a catalog key produced by [`SpeciesFormKey::dex_key`]
    pub fn parse_dex_key(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.split_once('-') {
            Some((species, form)) => Some(Self::new(species.parse().ok()?, form.parse().ok()?)),
            None => Some(Self::new(s.parse().ok()?, 0)),
        }
    }
}

impl fmt::Display for SpeciesFormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dex_key())
    }
}

/// Lookup interface over a title's personal-info table
pub trait SpeciesDirectory {
    /// Whether the species/form has an entry at all
    fn exists(&self, key: SpeciesFormKey) -> bool;

    /// Whether the species/form can be obtained in this title
    fn is_present_in_game(&self, key: SpeciesFormKey) -> bool;

    /// Raw gender information, `None` when the lookup fails
    fn gender_info(&self, key: SpeciesFormKey) -> Option<GenderInfo>;

    /// Localized species name; empty names count as missing
    fn display_name(&self, species: u16) -> Option<&str>;

    /// Whether the form can toggle Gigantamax
    fn can_gigantamax(&self, _key: SpeciesFormKey) -> bool {
        false
    }
}

/// Personal-info entry for one species/form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default = "default_present")]
    pub present: bool,
    #[serde(flatten)]
    pub gender: GenderInfo,
    #[serde(default)]
    pub gigantamax: bool,
}

fn default_present() -> bool {
    true
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            present: true,
            gender: GenderInfo::default(),
            gigantamax: false,
        }
    }
}

/// In-memory species directory built from title data
#[derive(Debug, Default, Clone)]
pub struct SpeciesTable {
    entries: HashMap<SpeciesFormKey, PersonalInfo>,
    names: HashMap<u16, String>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a species/form, returning the previous entry if one existed
    pub fn insert(&mut self, key: SpeciesFormKey, info: PersonalInfo) -> Option<PersonalInfo> {
        self.entries.insert(key, info)
    }

    pub fn set_name(&mut self, species: u16, name: impl Into<String>) {
        self.names.insert(species, name.into());
    }

    pub fn get(&self, key: SpeciesFormKey) -> Option<&PersonalInfo> {
        self.entries.get(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = SpeciesFormKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SpeciesDirectory for SpeciesTable {
    fn exists(&self, key: SpeciesFormKey) -> bool {
        self.entries.contains_key(&key)
    }

    fn is_present_in_game(&self, key: SpeciesFormKey) -> bool {
        self.entries.get(&key).is_some_and(|e| e.present)
    }

    fn gender_info(&self, key: SpeciesFormKey) -> Option<GenderInfo> {
        self.entries.get(&key).map(|e| e.gender)
    }

    fn display_name(&self, species: u16) -> Option<&str> {
        self.names
            .get(&species)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }

    fn can_gigantamax(&self, key: SpeciesFormKey) -> bool {
        self.entries.get(&key).is_some_and(|e| e.gigantamax)
    }
}
