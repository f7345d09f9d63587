use rustc_hash::FxHashMap;

use crate::constants::Weight;
use crate::graph::CellId;

use self::shortest_path::PathResult;

pub mod dijkstra;
pub mod shortest_path;

/// Walks predecessor links backward from `target` and returns the ordered
/// path with its finalized cost.
///
/// Returns `None` when the chain does not trace back to `source`, which
/// callers report as the unreachable outcome rather than a partial path.
pub(crate) fn reconstruct_path(
    target: CellId,
    source: CellId,
    node_data: &FxHashMap<CellId, (Weight, Option<CellId>)>,
) -> Option<PathResult> {
    let &(cost, mut previous) = node_data.get(&target)?;

    let mut path = vec![target];
    while let Some(prev_node) = previous {
        path.push(prev_node);
        previous = node_data.get(&prev_node)?.1;
    }
    path.reverse();

    if path[0] != source {
        return None;
    }
    Some(PathResult::new(path, cost))
}
