//! Game-variant availability labels

use serde::{Deserialize, Serialize};

/// Label for encounters available in both variants of a title
pub const BOTH: &str = "Both";
/// Label used when source data marks neither variant
pub const UNKNOWN: &str = "Unknown";

/// The two variant labels of a paired title (e.g. "Scarlet"/"Violet").
///
/// Single-variant titles use the same label for both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPair {
    pub first: String,
    pub second: String,
}

impl VariantPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn single(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            first: name.clone(),
            second: name,
        }
    }

    pub fn is_single(&self) -> bool {
        self.first == self.second
    }

    /// Combine two availability labels into the widest label covering both.
    ///
    /// "Both" absorbs everything and the two distinct variant labels widen
    /// to "Both"; any other pairing keeps `existing`.
    pub fn combine(&self, existing: &str, incoming: &str) -> String {
        if existing == BOTH || incoming == BOTH {
            return BOTH.to_string();
        }

        let is_pair = (existing == self.first && incoming == self.second)
            || (existing == self.second && incoming == self.first);
        if is_pair && !self.is_single() {
            return BOTH.to_string();
        }

        existing.to_string()
    }

    /// Label for an encounter whose per-variant availability is known
    pub fn from_availability(&self, in_first: bool, in_second: bool) -> String {
        if self.is_single() && (in_first || in_second) {
            return self.first.clone();
        }
        match (in_first, in_second) {
            (true, true) => BOTH.to_string(),
            (true, false) => self.first.clone(),
            (false, true) => self.second.clone(),
            (false, false) => UNKNOWN.to_string(),
        }
    }
}
