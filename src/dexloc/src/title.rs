//! Title profiles
//!
//! Per-title settings the builder needs: variant labels, whether evolved
//! forms are propagated, and what to do with unnamed locations.

use crate::version::VariantPair;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported game titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Title {
    Sv,
    Swsh,
    Bdsp,
    Pla,
    Lgpe,
}

/// All titles in release order (newest first)
pub const TITLES: &[Title] = &[Title::Sv, Title::Pla, Title::Bdsp, Title::Swsh, Title::Lgpe];

impl Title {
    pub fn name(&self) -> &'static str {
        match self {
            Title::Sv => "Scarlet/Violet",
            Title::Swsh => "Sword/Shield",
            Title::Bdsp => "Brilliant Diamond/Shining Pearl",
            Title::Pla => "Legends: Arceus",
            Title::Lgpe => "Let's Go Pikachu/Eevee",
        }
    }

    pub fn profile(&self) -> TitleProfile {
        let (variants, propagate, missing_location) = match self {
            Title::Sv => (
                VariantPair::new("Scarlet", "Violet"),
                true,
                MissingLocation::Placeholder,
            ),
            Title::Swsh => (
                VariantPair::new("Sword", "Shield"),
                true,
                MissingLocation::Placeholder,
            ),
            Title::Bdsp => (
                VariantPair::new("Brilliant Diamond", "Shining Pearl"),
                true,
                MissingLocation::Placeholder,
            ),
            Title::Pla => (
                VariantPair::single("Legends: Arceus"),
                true,
                MissingLocation::Skip,
            ),
            Title::Lgpe => (
                VariantPair::new("Let's Go Pikachu", "Let's Go Eevee"),
                false,
                MissingLocation::Placeholder,
            ),
        };

        TitleProfile {
            name: self.name().to_string(),
            variants,
            propagate_evolutions: propagate,
            missing_location,
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Title::Sv => write!(f, "sv"),
            Title::Swsh => write!(f, "swsh"),
            Title::Bdsp => write!(f, "bdsp"),
            Title::Pla => write!(f, "pla"),
            Title::Lgpe => write!(f, "lgpe"),
        }
    }
}

impl std::str::FromStr for Title {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "sv" | "scarlet-violet" => Ok(Title::Sv),
            "swsh" | "sword-shield" => Ok(Title::Swsh),
            "bdsp" | "brilliant-diamond-shining-pearl" => Ok(Title::Bdsp),
            "pla" | "la" | "legends-arceus" => Ok(Title::Pla),
            "lgpe" | "gg" | "lets-go" => Ok(Title::Lgpe),
            _ => Err(format!("Unknown title: {}", s)),
        }
    }
}

/// Handling of encounters whose location has no localized name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingLocation {
    /// Use a method default or `Unknown Location {id}`
    Placeholder,
    /// Skip the raw entry
    Skip,
}

/// Build settings for one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleProfile {
    pub name: String,
    pub variants: VariantPair,
    pub propagate_evolutions: bool,
    pub missing_location: MissingLocation,
}

/// Partial profile carried by a title bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOverride {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub variants: Option<VariantPair>,
    #[serde(default)]
    pub propagate_evolutions: Option<bool>,
    #[serde(default)]
    pub missing_location: Option<MissingLocation>,
}

impl TitleProfile {
    pub fn apply(mut self, overrides: &ProfileOverride) -> Self {
        if let Some(name) = &overrides.name {
            self.name = name.clone();
        }
        if let Some(variants) = &overrides.variants {
            self.variants = variants.clone();
        }
        if let Some(propagate) = overrides.propagate_evolutions {
            self.propagate_evolutions = propagate;
        }
        if let Some(missing) = overrides.missing_location {
            self.missing_location = missing;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_parse() {
        assert_eq!("sv".parse::<Title>(), Ok(Title::Sv));
        assert_eq!("Scarlet Violet".parse::<Title>(), Ok(Title::Sv));
        assert_eq!("legends_arceus".parse::<Title>(), Ok(Title::Pla));
        assert!("gen1".parse::<Title>().is_err());
        for title in TITLES {
            assert_eq!(title.to_string().parse::<Title>(), Ok(*title));
        }
    }

    #[test]
    fn test_profiles() {
        let sv = Title::Sv.profile();
        assert_eq!(sv.variants, VariantPair::new("Scarlet", "Violet"));
        assert!(sv.propagate_evolutions);

        let pla = Title::Pla.profile();
        assert!(pla.variants.is_single());
        assert_eq!(pla.missing_location, MissingLocation::Skip);

        assert!(!Title::Lgpe.profile().propagate_evolutions);
    }

    #[test]
    fn test_override() {
        let profile = Title::Sv.profile().apply(&ProfileOverride {
            variants: Some(VariantPair::new("A", "B")),
            propagate_evolutions: Some(false),
            ..Default::default()
        });
        assert_eq!(profile.variants.first, "A");
        assert!(!profile.propagate_evolutions);
        assert_eq!(profile.name, "Scarlet/Violet");
    }
}
