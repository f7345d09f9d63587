use serde::Serialize;

use crate::constants::Weight;
use crate::graph::CellId;

/// Result of a path search.
///
/// An unreachable goal is an ordinary outcome, not an error: it is encoded
/// in-band as an empty node sequence with an infinite cost, which is exactly
/// what a transport collaborator forwards to its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Node sequence from start to goal; empty if the goal is unreachable.
    pub nodes: Vec<CellId>,
    /// Total path cost; `f64::INFINITY` if the goal is unreachable.
    pub cost: Weight,
}

impl PathResult {
    pub fn new(nodes: Vec<CellId>, cost: Weight) -> Self {
        PathResult { nodes, cost }
    }

    pub fn unreachable() -> Self {
        PathResult {
            nodes: Vec::new(),
            cost: Weight::INFINITY,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.nodes.is_empty()
    }
}
