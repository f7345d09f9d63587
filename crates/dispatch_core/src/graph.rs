use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::Weight;

/// Node identifier: the grid cell a node was derived from.
///
/// The wire form is the string `"row,col"`, which is also what `Display`,
/// `FromStr` and the serde impls use. Coordinates are signed so that an
/// out-of-bounds start location stays representable; such a node simply
/// never appears in any graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId {
    pub row: i32,
    pub col: i32,
}

impl CellId {
    #[inline]
    pub fn new(row: i32, col: i32) -> Self {
        CellId { row, col }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for CellId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("Expected \"row,col\", got {:?}", s))?;
        let row = row.trim().parse().context("Failed to parse row")?;
        let col = col.trim().parse().context("Failed to parse col")?;
        Ok(CellId { row, col })
    }
}

impl Serialize for CellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Short version of `CellId::new`
pub fn cell_id(row: i32, col: i32) -> CellId {
    CellId::new(row, col)
}

/// Directed edge to `target` with a traversal cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: CellId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(target: CellId, weight: Weight) -> Self {
        Edge { target, weight }
    }
}

/// Directed adjacency structure mapping each node to its outgoing edges.
///
/// Built fresh from a grid snapshot on every dispatch and discarded after
/// the search. Edges between traversable neighbors are inserted in both
/// directions during construction, but symmetry is a byproduct of how the
/// grid is scanned, not an invariant the structure enforces.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: FxHashMap<CellId, Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(num_nodes: usize) -> Self {
        Graph {
            adjacency: FxHashMap::with_capacity_and_hasher(num_nodes, Default::default()),
        }
    }

    /// Adds `node` to the graph with no edges. No-op if it already exists.
    pub fn add_node(&mut self, node: CellId) {
        self.adjacency.entry(node).or_default();
    }

    /// Adds a directed edge from `source` to `target`, creating `source`
    /// if it was not a node yet.
    pub fn add_edge(&mut self, source: CellId, target: CellId, weight: Weight) {
        self.adjacency
            .entry(source)
            .or_default()
            .push(Edge::new(target, weight));
    }

    pub fn contains_node(&self, node: CellId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Outgoing edges of `node`; empty for nodes the graph does not know,
    /// so a search can probe any `CellId` without membership checks.
    pub fn neighbors(&self, node: CellId) -> impl Iterator<Item = &Edge> {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
    }

    /// Returns an iterator over all nodes of the graph
    pub fn nodes(&self) -> impl Iterator<Item = CellId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}
