//! Raw encounter sources
//!
//! A raw encounter is a common attribute set plus a method-specific
//! payload. Collections of raw encounters are read-only inputs to the
//! catalog builder.

use crate::record::{EncounterType, SizeClass, TitleFlags};
use crate::species::SpeciesFormKey;
use crate::version::{VariantPair, BOTH};
use serde::{Deserialize, Serialize};

/// Which variants can host a raid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAvailability {
    #[serde(default = "default_true")]
    pub first: bool,
    #[serde(default = "default_true")]
    pub second: bool,
}

impl Default for HostAvailability {
    fn default() -> Self {
        Self {
            first: true,
            second: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Summed spawn-rate totals per variant for distribution raids
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRates {
    #[serde(default)]
    pub first: u32,
    #[serde(default)]
    pub second: u32,
}

/// Method-specific payload of a raw encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum EncounterMethod {
    Wild {
        /// Area type label, e.g. "Grass", "Surf", "Wild Symbol"
        #[serde(default)]
        area: Option<String>,
        #[serde(default)]
        alpha: bool,
        #[serde(default)]
        underground: bool,
        /// Number of guaranteed perfect IVs
        #[serde(default)]
        flawless_ivs: u8,
    },
    Static {
        #[serde(default)]
        gift: bool,
        #[serde(default)]
        alpha: bool,
        #[serde(default)]
        flawless_ivs: u8,
        #[serde(default)]
        fateful: bool,
    },
    Fixed,
    Gift,
    Outbreak {
        /// Forced scale, when the outbreak pins one
        #[serde(default)]
        scale: Option<u8>,
    },
    TeraRaid {
        stars: u8,
        region: String,
        #[serde(default)]
        host: HostAvailability,
    },
    MightRaid {
        #[serde(default)]
        scale: Option<u8>,
    },
    Distribution {
        stars: u8,
        #[serde(default)]
        rates: VariantRates,
        #[serde(default)]
        scale: Option<u8>,
    },
    MaxLair,
}

/// One raw encounter definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEncounter {
    pub species: u16,
    #[serde(default)]
    pub form: u8,
    pub location: u16,
    pub level_min: u8,
    /// Defaults to `level_min` for single-level encounters
    #[serde(default)]
    pub level_max: Option<u8>,
    #[serde(default)]
    pub shiny_locked: bool,
    #[serde(default)]
    pub fixed_ball: Option<String>,
    #[serde(default)]
    pub can_gigantamax: bool,
    /// Explicit availability label; overrides anything derived
    #[serde(default)]
    pub version: Option<String>,
    #[serde(flatten)]
    pub method: EncounterMethod,
}

impl RawEncounter {
    pub fn key(&self) -> SpeciesFormKey {
        SpeciesFormKey::new(self.species, self.form)
    }

    /// Observed level range, `None` when it is inverted
    pub fn level_range(&self) -> Option<(u8, u8)> {
        let max = self.level_max.unwrap_or(self.level_min);
        (self.level_min <= max).then_some((self.level_min, max))
    }

    pub fn encounter_type(&self) -> EncounterType {
        match &self.method {
            EncounterMethod::Wild { area: None, .. } => EncounterType::Wild,
            EncounterMethod::Wild { area: Some(area), .. } => match area.parse() {
                Ok(parsed) => parsed,
                Err(never) => match never {},
            },
            EncounterMethod::Static { .. } => EncounterType::Static,
            EncounterMethod::Fixed => EncounterType::Fixed,
            EncounterMethod::Gift => EncounterType::Gift,
            EncounterMethod::Outbreak { .. } => EncounterType::Outbreak,
            EncounterMethod::TeraRaid { stars, region, .. } => EncounterType::TeraRaid {
                stars: *stars,
                region: region.clone(),
            },
            EncounterMethod::MightRaid { .. } => EncounterType::MightRaid,
            EncounterMethod::Distribution { stars, .. } => {
                EncounterType::DistributionRaid { stars: *stars }
            }
            EncounterMethod::MaxLair => EncounterType::MaxLair,
        }
    }

    pub fn is_gift(&self) -> bool {
        matches!(
            self.method,
            EncounterMethod::Gift | EncounterMethod::Static { gift: true, .. }
        )
    }

    pub fn flags(&self) -> TitleFlags {
        let (alpha, underground) = match self.method {
            EncounterMethod::Wild {
                alpha, underground, ..
            } => (alpha, underground),
            EncounterMethod::Static { alpha, .. } => (alpha, false),
            _ => (false, false),
        };
        TitleFlags {
            alpha,
            underground,
            can_gigantamax: self.can_gigantamax,
        }
    }

    pub fn flawless_ivs(&self) -> u8 {
        match self.method {
            EncounterMethod::Wild { flawless_ivs, .. }
            | EncounterMethod::Static { flawless_ivs, .. } => flawless_ivs,
            _ => 0,
        }
    }

    pub fn is_fateful(&self) -> bool {
        matches!(self.method, EncounterMethod::Static { fateful: true, .. })
    }

    pub fn size(&self) -> SizeClass {
        match self.method {
            EncounterMethod::Outbreak { scale }
            | EncounterMethod::MightRaid { scale }
            | EncounterMethod::Distribution { scale, .. } => SizeClass::from_scale(scale),
            _ => SizeClass::default(),
        }
    }

    /// Availability label: explicit, derived from raid data, or the
    /// collection default, in that order
    pub fn version_label(&self, variants: &VariantPair, collection_default: &str) -> String {
        if let Some(version) = &self.version {
            return version.clone();
        }
        match &self.method {
            EncounterMethod::TeraRaid { host, .. } => {
                variants.from_availability(host.first, host.second)
            }
            EncounterMethod::Distribution { rates, .. } => {
                variants.from_availability(rates.first > 0, rates.second > 0)
            }
            _ => collection_default.to_string(),
        }
    }

    /// Name used for a raid den whose location has no name
    pub fn default_location_name(&self) -> Option<&'static str> {
        match self.method {
            EncounterMethod::TeraRaid { .. } => Some("Tera Raid Den"),
            EncounterMethod::MightRaid { .. } => Some("A Crystal Cavern"),
            EncounterMethod::Distribution { .. } => Some("Distribution Raid Den"),
            _ => None,
        }
    }
}

/// An ordered collection of raw encounters sharing a default version label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCollection {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub entries: Vec<RawEncounter>,
}

fn default_version() -> String {
    BOTH.to_string()
}

impl SourceCollection {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entries(mut self, entries: Vec<RawEncounter>) -> Self {
        self.entries = entries;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
