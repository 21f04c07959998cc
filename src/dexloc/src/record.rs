//! Encounter record types

use crate::gender::GenderRatio;
use crate::species::SpeciesFormKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// How an encounter is obtained.
///
/// Serialized as its display label (e.g. `"5★ Tera Raid Paldea"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EncounterType {
    Wild,
    /// Title-specific wild area type (e.g. "Grass", "Surf", "Wild Symbol")
    Area(String),
    Static,
    Fixed,
    Gift,
    Outbreak,
    TeraRaid { stars: u8, region: String },
    /// 7-star raid
    MightRaid,
    DistributionRaid { stars: u8 },
    MaxLair,
}

impl fmt::Display for EncounterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wild => write!(f, "Wild"),
            Self::Area(area) => write!(f, "{}", area),
            Self::Static => write!(f, "Static"),
            Self::Fixed => write!(f, "Fixed"),
            Self::Gift => write!(f, "Gift"),
            Self::Outbreak => write!(f, "Outbreak"),
            Self::TeraRaid { stars, region } => write!(f, "{}★ Tera Raid {}", stars, region),
            Self::MightRaid => write!(f, "7-Star Raid"),
            Self::DistributionRaid { stars } => write!(f, "Distribution Raid {}★", stars),
            Self::MaxLair => write!(f, "Max Lair"),
        }
    }
}

impl std::str::FromStr for EncounterType {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s {
            "Wild" => Self::Wild,
            "Static" => Self::Static,
            "Fixed" => Self::Fixed,
            "Gift" => Self::Gift,
            "Outbreak" => Self::Outbreak,
            "7-Star Raid" => Self::MightRaid,
            "Max Lair" => Self::MaxLair,
            other => parse_raid_label(other).unwrap_or_else(|| Self::Area(other.to_string())),
        };
        Ok(parsed)
    }
}

fn parse_raid_label(s: &str) -> Option<EncounterType> {
    if let Some((stars, region)) = s.split_once("★ Tera Raid ") {
        return Some(EncounterType::TeraRaid {
            stars: stars.parse().ok()?,
            region: region.to_string(),
        });
    }
    let stars = s.strip_prefix("Distribution Raid ")?.strip_suffix('★')?;
    Some(EncounterType::DistributionRaid {
        stars: stars.parse().ok()?,
    })
}

impl Serialize for EncounterType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EncounterType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        match label.parse::<EncounterType>() {
            Ok(parsed) => Ok(parsed),
            Err(never) => match never {},
        }
    }
}

/// Title-specific structural flags; part of the merge key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleFlags {
    #[serde(default)]
    pub alpha: bool,
    #[serde(default)]
    pub underground: bool,
    #[serde(default)]
    pub can_gigantamax: bool,
}

/// Whether a size scale is rolled or fixed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeKind {
    #[default]
    Random,
    Value,
}

/// Size class of an encounter; carried but never merged on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeClass {
    pub kind: SizeKind,
    pub value: u8,
}

impl SizeClass {
    /// Fixed scale when given, otherwise a random roll
    pub fn from_scale(scale: Option<u8>) -> Self {
        match scale {
            Some(value) => Self {
                kind: SizeKind::Value,
                value,
            },
            None => Self::default(),
        }
    }
}

/// One obtainability entry in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub species_name: String,
    #[serde(flatten)]
    pub species_form: SpeciesFormKey,
    pub location_id: u16,
    pub location_name: String,
    pub min_level: u8,
    pub max_level: u8,
    pub encounter_type: EncounterType,
    pub shiny_locked: bool,
    pub is_gift: bool,
    #[serde(default)]
    pub fixed_ball: Option<String>,
    #[serde(default)]
    pub flawless_ivs: u8,
    #[serde(default)]
    pub fateful: bool,
    pub version_availability: String,
    pub gender_ratio: GenderRatio,
    #[serde(flatten)]
    pub flags: TitleFlags,
    #[serde(default)]
    pub size: SizeClass,
}

impl EncounterRecord {
    /// Fields that decide whether two records describe the same encounter
    pub fn merge_key(&self) -> MergeKey {
        MergeKey {
            species_form: self.species_form,
            location_id: self.location_id,
            encounter_type: self.encounter_type.clone(),
            gender_ratio: self.gender_ratio,
            flags: self.flags,
        }
    }

    /// Copy of this record re-anchored on an evolved form at a single level
    pub fn derive(
        &self,
        species_form: SpeciesFormKey,
        species_name: &str,
        level: u8,
        gender_ratio: GenderRatio,
    ) -> Self {
        Self {
            species_name: species_name.to_string(),
            species_form,
            min_level: level,
            max_level: level,
            gender_ratio,
            ..self.clone()
        }
    }
}

/// Identity of a real-world encounter; excludes levels and version availability
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeKey {
    pub species_form: SpeciesFormKey,
    pub location_id: u16,
    pub encounter_type: EncounterType,
    pub gender_ratio: GenderRatio,
    pub flags: TitleFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(species: u16, location: u16) -> EncounterRecord {
        EncounterRecord {
            species_name: "Fawnling".to_string(),
            species_form: SpeciesFormKey::new(species, 0),
            location_id: location,
            location_name: "Test Meadow".to_string(),
            min_level: 5,
            max_level: 7,
            encounter_type: EncounterType::Wild,
            shiny_locked: false,
            is_gift: false,
            fixed_ball: None,
            flawless_ivs: 0,
            fateful: false,
            version_availability: "A".to_string(),
            gender_ratio: GenderRatio::Mixed,
            flags: TitleFlags::default(),
            size: SizeClass::default(),
        }
    }

    #[test]
    fn test_encounter_type_labels() {
        let tera = EncounterType::TeraRaid {
            stars: 5,
            region: "Paldea".to_string(),
        };
        assert_eq!(tera.to_string(), "5★ Tera Raid Paldea");
        assert_eq!(
            EncounterType::DistributionRaid { stars: 6 }.to_string(),
            "Distribution Raid 6★"
        );
        assert_eq!(EncounterType::MightRaid.to_string(), "7-Star Raid");
    }

    #[test]
    fn test_encounter_type_parse() {
        let parsed: EncounterType = "3★ Tera Raid Kitakami".parse().unwrap();
        assert_eq!(
            parsed,
            EncounterType::TeraRaid {
                stars: 3,
                region: "Kitakami".to_string()
            }
        );
        let parsed: EncounterType = "Distribution Raid 5★".parse().unwrap();
        assert_eq!(parsed, EncounterType::DistributionRaid { stars: 5 });
        let parsed: EncounterType = "Surf".parse().unwrap();
        assert_eq!(parsed, EncounterType::Area("Surf".to_string()));
        let parsed: EncounterType = "Static".parse().unwrap();
        assert_eq!(parsed, EncounterType::Static);
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record(900, 12)).unwrap();
        assert_eq!(json["species"], 900);
        assert_eq!(json["form"], 0);
        assert_eq!(json["encounter_type"], "Wild");
        assert_eq!(json["version_availability"], "A");
        assert_eq!(json["gender_ratio"], "Mixed");
        assert_eq!(json["alpha"], false);
        assert_eq!(json["size"]["kind"], "random");

        let back: EncounterRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record(900, 12));
    }

    #[test]
    fn test_merge_key_ignores_levels_and_version() {
        let a = record(900, 12);
        let mut b = record(900, 12);
        b.min_level = 1;
        b.max_level = 60;
        b.version_availability = "B".to_string();
        b.location_name = "Renamed".to_string();
        assert_eq!(a.merge_key(), b.merge_key());

        let mut c = record(900, 12);
        c.flags.alpha = true;
        assert_ne!(a.merge_key(), c.merge_key());

        let mut d = record(900, 12);
        d.gender_ratio = GenderRatio::Male;
        assert_ne!(a.merge_key(), d.merge_key());

        let mut e = record(900, 12);
        e.encounter_type = EncounterType::Static;
        assert_ne!(a.merge_key(), e.merge_key());
    }

    #[test]
    fn test_derive_pins_level() {
        let derived = record(900, 12).derive(SpeciesFormKey::new(901, 0), "Stagmaw", 16, GenderRatio::Male);
        assert_eq!(derived.species_name, "Stagmaw");
        assert_eq!((derived.min_level, derived.max_level), (16, 16));
        assert_eq!(derived.location_id, 12);
        assert_eq!(derived.version_availability, "A");
        assert_eq!(derived.gender_ratio, GenderRatio::Male);
    }
}
