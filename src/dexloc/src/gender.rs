//! Gender ratio resolution

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ratio byte for species that are always male
pub const RATIO_MALE_ONLY: u8 = 0;
/// Ratio byte for species that are always female
pub const RATIO_FEMALE_ONLY: u8 = 254;
/// Ratio byte for genderless species
pub const RATIO_GENDERLESS: u8 = 255;

/// Gender category recorded on each encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderRatio {
    Male,
    Female,
    Genderless,
    Mixed,
    Unknown,
}

impl fmt::Display for GenderRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderRatio::Male => write!(f, "Male"),
            GenderRatio::Female => write!(f, "Female"),
            GenderRatio::Genderless => write!(f, "Genderless"),
            GenderRatio::Mixed => write!(f, "Mixed"),
            GenderRatio::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Explicit single-gender flag carried by some personal tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedGender {
    Genderless,
    Male,
    Female,
}

/// Ratio byte used when title data omits one (even split)
pub const RATIO_EVEN: u8 = 127;

/// Raw gender data for one species/form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderInfo {
    /// Ratio byte (0 = male only, 254 = female only, 255 = genderless)
    #[serde(default = "default_ratio", rename = "gender")]
    pub ratio: u8,
    #[serde(default, rename = "fixed_gender", skip_serializing_if = "Option::is_none")]
    pub fixed: Option<FixedGender>,
}

fn default_ratio() -> u8 {
    RATIO_EVEN
}

impl Default for GenderInfo {
    fn default() -> Self {
        Self::from_ratio(RATIO_EVEN)
    }
}

impl GenderInfo {
    pub const fn from_ratio(ratio: u8) -> Self {
        Self { ratio, fixed: None }
    }
}

/// Map a directory lookup to its gender category.
///
/// Explicit flags win over the ratio byte; a failed lookup is `Unknown`.
pub fn resolve_gender(info: Option<GenderInfo>) -> GenderRatio {
    let Some(info) = info else {
        return GenderRatio::Unknown;
    };

    match info.fixed {
        Some(FixedGender::Genderless) => return GenderRatio::Genderless,
        Some(FixedGender::Female) => return GenderRatio::Female,
        Some(FixedGender::Male) => return GenderRatio::Male,
        None => {}
    }

    match info.ratio {
        RATIO_MALE_ONLY => GenderRatio::Male,
        RATIO_FEMALE_ONLY => GenderRatio::Female,
        RATIO_GENDERLESS => GenderRatio::Genderless,
        _ => GenderRatio::Mixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_bytes() {
        assert_eq!(resolve_gender(Some(GenderInfo::from_ratio(0))), GenderRatio::Male);
        assert_eq!(resolve_gender(Some(GenderInfo::from_ratio(254))), GenderRatio::Female);
        assert_eq!(resolve_gender(Some(GenderInfo::from_ratio(255))), GenderRatio::Genderless);
        assert_eq!(resolve_gender(Some(GenderInfo::from_ratio(128))), GenderRatio::Mixed);
        assert_eq!(resolve_gender(Some(GenderInfo::from_ratio(31))), GenderRatio::Mixed);
    }

    #[test]
    fn test_absent_lookup() {
        assert_eq!(resolve_gender(None), GenderRatio::Unknown);
    }

    #[test]
    fn test_flags_override_ratio() {
        let info = GenderInfo {
            ratio: 128,
            fixed: Some(FixedGender::Genderless),
        };
        assert_eq!(resolve_gender(Some(info)), GenderRatio::Genderless);

        let info = GenderInfo {
            ratio: 128,
            fixed: Some(FixedGender::Female),
        };
        assert_eq!(resolve_gender(Some(info)), GenderRatio::Female);
    }
}
