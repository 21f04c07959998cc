//! # dexloc
//!
//! Per-species encounter catalogs with evolution propagation.
//!
//! This library provides functionality to:
//! - Load a title's species table, locations, evolutions and raw encounters
//! - Propagate each raw encounter to every form its species can evolve into
//! - Merge duplicate observations into one record with widened levels and
//!   combined version availability
//!
//! ## Example
//!
//! ```no_run
//! use dexloc::{PropagationStrategy, TitleData};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = TitleData::load("data/sv.json")?;
//! let (catalog, report) = data.build_catalog(PropagationStrategy::FirstReached)?;
//!
//! println!("{} species, {} merged", catalog.len(), report.merged);
//! for record in catalog.get_by_dex_key("906").unwrap_or_default() {
//!     println!("{} Lv. {}-{}", record.location_name, record.min_level, record.max_level);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod catalog;
pub mod data;
pub mod evolution;
pub mod gender;
pub mod location;
pub mod propagate;
pub mod record;
pub mod source;
pub mod species;
pub mod title;
pub mod version;

// Re-export commonly used items
#[doc(inline)]
pub use builder::{BuildError, BuildReport, CatalogBuilder, SkipReason};
#[doc(inline)]
pub use catalog::{Catalog, MergeCounts, MergeOutcome};
#[doc(inline)]
pub use data::{DataError, DataResult, TitleData};
#[doc(inline)]
pub use evolution::{EvolutionEdge, EvolutionGraph};
#[doc(inline)]
pub use gender::{resolve_gender, GenderInfo, GenderRatio};
#[doc(inline)]
pub use location::LocationDirectory;
#[doc(inline)]
pub use propagate::{DerivedStep, PropagationError, PropagationStrategy, Propagator};
#[doc(inline)]
pub use record::{EncounterRecord, EncounterType, MergeKey, SizeClass, TitleFlags};
#[doc(inline)]
pub use source::{EncounterMethod, RawEncounter, SourceCollection};
#[doc(inline)]
pub use species::{SpeciesDirectory, SpeciesFormKey, SpeciesTable};
#[doc(inline)]
pub use title::{Title, TitleProfile, TITLES};
#[doc(inline)]
pub use version::{VariantPair, BOTH};
