//! Evolution propagation
//!
//! Given an encounter observed for a base species/form, walk the evolution
//! graph forward and compute, for every reachable evolved form, the lowest
//! level at which it can appear at that encounter. Each reachable node is
//! produced exactly once.

use crate::evolution::EvolutionGraph;
use crate::species::SpeciesFormKey;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

/// Traversal strategy used to assign levels to reachable nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropagationStrategy {
    /// Depth-first walk; the first path to reach a node fixes its level
    #[default]
    FirstReached,
    /// Minimax relaxation; each node gets the cheapest path's level
    Minimax,
}

impl fmt::Display for PropagationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstReached => write!(f, "first-reached"),
            Self::Minimax => write!(f, "minimax"),
        }
    }
}

impl std::str::FromStr for PropagationStrategy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-reached" | "first_reached" | "dfs" => Ok(Self::FirstReached),
            "minimax" => Ok(Self::Minimax),
            _ => Err(format!("Unknown propagation strategy: {}", s)),
        }
    }
}

/// A derived evolution step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStep {
    pub key: SpeciesFormKey,
    /// Node the level was derived through
    pub parent: SpeciesFormKey,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropagationError {
    #[error(
        "{node} reached from {anchor} at level {recorded}, but the path through {via} needs only level {cheaper}"
    )]
    /// Raised only when a later path is strictly cheaper; a costlier later
    /// path keeps the recorded level, which is what `Minimax` would pick too
    ConflictingPaths {
        anchor: SpeciesFormKey,
        node: SpeciesFormKey,
        recorded: u8,
        cheaper: u8,
        via: SpeciesFormKey,
    },
}

/// Walks an [`EvolutionGraph`] from anchor nodes
#[derive(Debug, Clone, Copy)]
pub struct Propagator<'a> {
    graph: &'a EvolutionGraph,
    strategy: PropagationStrategy,
}

impl<'a> Propagator<'a> {
    pub fn new(graph: &'a EvolutionGraph, strategy: PropagationStrategy) -> Self {
        Self { graph, strategy }
    }

    pub fn strategy(&self) -> PropagationStrategy {
        self.strategy
    }

    /// Derive one step per node reachable from `anchor`.
    ///
    /// `base_level` is the lowest level the anchor was observed at. Nodes
    /// rejected by `is_present` are neither emitted nor expanded.
    pub fn propagate<F>(
        &self,
        anchor: SpeciesFormKey,
        base_level: u8,
        is_present: F,
    ) -> Result<Vec<DerivedStep>, PropagationError>
    where
        F: Fn(SpeciesFormKey) -> bool,
    {
        match self.strategy {
            PropagationStrategy::FirstReached => self.first_reached(anchor, base_level, is_present),
            PropagationStrategy::Minimax => Ok(self.minimax(anchor, base_level, is_present)),
        }
    }

    fn first_reached<F>(
        &self,
        anchor: SpeciesFormKey,
        base_level: u8,
        is_present: F,
    ) -> Result<Vec<DerivedStep>, PropagationError>
    where
        F: Fn(SpeciesFormKey) -> bool,
    {
        let mut levels: HashMap<SpeciesFormKey, u8> = HashMap::new();
        levels.insert(anchor, base_level);

        let mut steps = Vec::new();
        let mut stack: Vec<DerivedStep> = Vec::new();
        self.push_children(&mut stack, anchor, base_level);

        while let Some(step) = stack.pop() {
            if let Some(&recorded) = levels.get(&step.key) {
                // A later path may cost more (harmless) but never less
                if step.level < recorded {
                    return Err(PropagationError::ConflictingPaths {
                        anchor,
                        node: step.key,
                        recorded,
                        cheaper: step.level,
                        via: step.parent,
                    });
                }
                continue;
            }

            if !is_present(step.key) {
                continue;
            }

            levels.insert(step.key, step.level);
            steps.push(step);
            self.push_children(&mut stack, step.key, step.level);
        }

        Ok(steps)
    }

    /// Push children in reverse so they pop in graph order
    fn push_children(&self, stack: &mut Vec<DerivedStep>, node: SpeciesFormKey, level: u8) {
        for child in self.graph.children(node).iter().rev() {
            stack.push(DerivedStep {
                key: child.to,
                parent: node,
                level: level.max(child.threshold),
            });
        }
    }

    fn minimax<F>(&self, anchor: SpeciesFormKey, base_level: u8, is_present: F) -> Vec<DerivedStep>
    where
        F: Fn(SpeciesFormKey) -> bool,
    {
        let mut best: HashMap<SpeciesFormKey, (u8, SpeciesFormKey)> = HashMap::new();
        best.insert(anchor, (base_level, anchor));

        let mut heap = BinaryHeap::new();
        heap.push(Reverse((base_level, anchor)));

        let mut settled = std::collections::HashSet::new();
        let mut steps = Vec::new();

        while let Some(Reverse((level, node))) = heap.pop() {
            if !settled.insert(node) {
                continue;
            }

            if node != anchor {
                let parent = best.get(&node).map(|&(_, p)| p).unwrap_or(anchor);
                steps.push(DerivedStep {
                    key: node,
                    parent,
                    level,
                });
            }

            for child in self.graph.children(node) {
                if settled.contains(&child.to) || !is_present(child.to) {
                    continue;
                }
                let candidate = level.max(child.threshold);
                let improves = best.get(&child.to).map_or(true, |&(known, _)| candidate < known);
                if improves {
                    best.insert(child.to, (candidate, node));
                    heap.push(Reverse((candidate, child.to)));
                }
            }
        }

        steps
    }
}
