//! Location name lookup

use std::collections::{BTreeMap, HashMap};

/// Localized location names for one title
pub trait LocationDirectory {
    /// Name for a location id; empty names count as missing
    fn location_name(&self, id: u16) -> Option<&str>;
}

impl LocationDirectory for BTreeMap<u16, String> {
    fn location_name(&self, id: u16) -> Option<&str> {
        self.get(&id).map(|s| s.as_str()).filter(|s| !s.is_empty())
    }
}

impl LocationDirectory for HashMap<u16, String> {
    fn location_name(&self, id: u16) -> Option<&str> {
        self.get(&id).map(|s| s.as_str()).filter(|s| !s.is_empty())
    }
}

/// Placeholder used when a location has no name and no method default
pub fn placeholder_name(id: u16) -> String {
    format!("Unknown Location {}", id)
}
