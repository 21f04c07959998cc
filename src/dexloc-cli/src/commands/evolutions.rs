//! Evolution listing command handler

use crate::config::Config;
use anyhow::{bail, Context, Result};
use dexloc::{
    DerivedStep, PropagationStrategy, Propagator, SpeciesDirectory, SpeciesFormKey, TitleData,
};
use std::path::Path;

/// Handle the evolutions command
pub fn handle(
    bundle: &Path,
    species: u16,
    form: u8,
    strategy: Option<PropagationStrategy>,
) -> Result<()> {
    let config = Config::load()?;
    let bundle = config.resolve_bundle(bundle);
    let data = TitleData::load(&bundle)
        .with_context(|| format!("Failed to load title bundle {}", bundle.display()))?;

    let table = data.species_table().context("Invalid species table")?;
    let key = SpeciesFormKey::new(species, form);
    if !table.exists(key) {
        bail!("{} is not in the {} species table", key, data.title.name());
    }

    let graph = data.graph(&table);
    let steps = Propagator::new(&graph, config.strategy_or(strategy))
        .propagate(key, 1, |k| table.is_present_in_game(k))?;

    let name = table.display_name(species).unwrap_or("?");
    if steps.is_empty() {
        println!("{} ({}) has no evolutions in {}", name, key, data.title.name());
        return Ok(());
    }

    println!("Evolutions of {} ({}):\n", name, key);
    println!("{:<8} {:<20} {:>5}  {}", "Dex", "Species", "Lv.", "From");
    println!("{}", "-".repeat(45));
    for line in format_steps(&steps, &table) {
        println!("{}", line);
    }

    Ok(())
}

fn format_steps(steps: &[DerivedStep], names: &dyn SpeciesDirectory) -> Vec<String> {
    steps
        .iter()
        .map(|step| {
            format!(
                "{:<8} {:<20} {:>5}  {}",
                step.key.dex_key(),
                names.display_name(step.key.species).unwrap_or("?"),
                step.level,
                step.parent
            )
        })
        .collect()
}
