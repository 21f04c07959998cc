//! Per-title evolution graph
//!
//! Nodes are species/forms, edges are level-gated forward evolutions. The
//! graph is built once from title data and only queried afterwards.

use crate::species::SpeciesFormKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One forward evolution as listed in title data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionEdge {
    pub from: SpeciesFormKey,
    pub to: SpeciesFormKey,
    /// Base level requirement
    #[serde(default)]
    pub level: u8,
    /// Alternate level-up requirement
    #[serde(default)]
    pub level_up: u8,
}

impl EvolutionEdge {
    pub fn new(from: SpeciesFormKey, to: SpeciesFormKey, level: u8) -> Self {
        Self {
            from,
            to,
            level,
            level_up: 0,
        }
    }

    /// Effective threshold: the larger of the two requirements
    pub fn threshold(&self) -> u8 {
        self.level.max(self.level_up)
    }
}

/// A direct child of a node with its effective level threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Child {
    pub to: SpeciesFormKey,
    pub threshold: u8,
}

/// Source of raw forward evolutions for one species/form
pub trait EvolutionSource {
    fn direct_children(&self, key: SpeciesFormKey) -> Vec<EvolutionEdge>;
}

impl EvolutionSource for [EvolutionEdge] {
    fn direct_children(&self, key: SpeciesFormKey) -> Vec<EvolutionEdge> {
        self.iter().filter(|e| e.from == key).cloned().collect()
    }
}

/// Queryable forward evolution graph
#[derive(Debug, Default, Clone)]
pub struct EvolutionGraph {
    forward: HashMap<SpeciesFormKey, Vec<Child>>,
}

impl EvolutionGraph {
    /// Build from every node's direct children as reported by `source`
    pub fn build<S, I>(source: &S, nodes: I) -> Self
    where
        S: EvolutionSource + ?Sized,
        I: IntoIterator<Item = SpeciesFormKey>,
    {
        let mut nodes: Vec<SpeciesFormKey> = nodes.into_iter().collect();
        nodes.sort();
        nodes.dedup();

        Self::from_edges(nodes.into_iter().flat_map(|n| source.direct_children(n)))
    }

    /// Build from a flat edge list.
    ///
    /// Duplicate `from -> to` edges collapse into one carrying the larger
    /// threshold. Child order follows first appearance.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = EvolutionEdge>,
    {
        let mut forward: HashMap<SpeciesFormKey, Vec<Child>> = HashMap::new();

        for edge in edges {
            let children = forward.entry(edge.from).or_default();
            let threshold = edge.threshold();
            match children.iter_mut().find(|c| c.to == edge.to) {
                Some(existing) => existing.threshold = existing.threshold.max(threshold),
                None => children.push(Child {
                    to: edge.to,
                    threshold,
                }),
            }
        }

        Self { forward }
    }

    /// Direct children of `node`; empty when it does not evolve
    pub fn children(&self, node: SpeciesFormKey) -> &[Child] {
        self.forward.get(&node).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Effective threshold of the edge `from -> to`, if it exists
    pub fn required_level(&self, from: SpeciesFormKey, to: SpeciesFormKey) -> Option<u8> {
        self.children(from)
            .iter()
            .find(|c| c.to == to)
            .map(|c| c.threshold)
    }

    /// Number of nodes with at least one outgoing edge
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.forward.values().map(|c| c.len()).sum()
    }
}
