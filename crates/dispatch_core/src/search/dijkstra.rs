use std::collections::BinaryHeap;

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::constants::Weight;
use crate::graph::{CellId, Graph};
use crate::search::shortest_path::PathResult;
use crate::statistics::SearchStats;

/// Frontier entry: a node with its tentative distance.
#[derive(Debug)]
struct Candidate {
    node: CellId,
    weight: Weight,
}

impl Candidate {
    fn new(node: CellId, weight: Weight) -> Self {
        Self { node, weight }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        // Reverse the ordering so the smallest distance is at the top.
        other.weight.partial_cmp(&self.weight)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        other.weight == self.weight
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .weight
            .partial_cmp(&self.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// Dijkstra shortest-path search over non-negative edge weights.
///
/// Relaxations push fresh frontier entries instead of decreasing keys in
/// place; stale duplicates are discarded when popped. That makes the search
/// `O(E log E)` instead of `O(E log V)`, an accepted trade-off for the small
/// graphs a terrain grid produces.
pub struct Dijkstra<'a> {
    pub stats: SearchStats,
    g: &'a Graph,
}

impl<'a> Dijkstra<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Dijkstra {
            g: graph,
            stats: SearchStats::default(),
        }
    }

    /// Computes the least-cost path from `source` to `target`.
    ///
    /// The source is seeded at distance 0 whether or not it is a node of the
    /// graph, so a search from an impassable or out-of-bounds cell does not
    /// fail; it yields the unreachable result unless `source == target`.
    pub fn search(&mut self, source: CellId, target: CellId) -> PathResult {
        self.stats.init();

        if source == target {
            self.stats.nodes_settled += 1;
            self.stats.finish();
            return PathResult::new(vec![source], 0.0);
        }

        // Known distance and predecessor per discovered node. Nodes that
        // were never relaxed are implicitly at infinity.
        let mut node_data: FxHashMap<CellId, (Weight, Option<CellId>)> = FxHashMap::default();
        node_data.insert(source, (0.0, None));

        let mut frontier = BinaryHeap::new();
        frontier.push(Candidate::new(source, 0.0));

        while let Some(Candidate { node, weight }) = frontier.pop() {
            let known = node_data
                .get(&node)
                .map(|data| data.0)
                .unwrap_or(Weight::INFINITY);
            if weight > known {
                // Stale entry from before a later relaxation improved it.
                continue;
            }

            self.stats.nodes_settled += 1;
            debug!("Settled {} at distance {}", node, weight);

            if node == target {
                break;
            }

            for edge in self.g.neighbors(node) {
                let new_distance = weight + edge.weight;
                let neighbor_known = node_data
                    .get(&edge.target)
                    .map(|data| data.0)
                    .unwrap_or(Weight::INFINITY);
                if new_distance < neighbor_known {
                    node_data.insert(edge.target, (new_distance, Some(node)));
                    frontier.push(Candidate::new(edge.target, new_distance));
                }
            }
        }
        self.stats.finish();

        match super::reconstruct_path(target, source, &node_data) {
            Some(path) => {
                info!(
                    "Path found: {:?}/{} nodes settled",
                    self.stats.duration, self.stats.nodes_settled
                );
                path
            }
            None => {
                info!(
                    "No path found: {:?}/{} nodes settled",
                    self.stats.duration, self.stats.nodes_settled
                );
                PathResult::unreachable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::graph::cell_id;
    use crate::grid::{build_graph, Grid};

    fn assert_path(expected: Vec<(i32, i32)>, expected_cost: Weight, result: PathResult) {
        let expected: Vec<CellId> = expected.into_iter().map(|(r, c)| cell_id(r, c)).collect();
        assert_eq!(expected, result.nodes);
        assert_relative_eq!(expected_cost, result.cost);
    }

    fn assert_no_path(result: PathResult) {
        assert!(result.is_unreachable());
        assert!(result.nodes.is_empty());
        assert!(result.cost.is_infinite());
    }

    #[test]
    fn weighted_detour() {
        // Direct hop costs 10, going around costs 3.
        let mut g = Graph::new();
        let (a, b, c, d) = (cell_id(0, 0), cell_id(0, 1), cell_id(1, 0), cell_id(1, 1));
        g.add_edge(a, b, 10.0);
        g.add_edge(a, c, 1.0);
        g.add_edge(c, d, 1.0);
        g.add_edge(d, b, 1.0);

        let mut dijkstra = Dijkstra::new(&g);
        assert_path(vec![(0, 0), (1, 0), (1, 1), (0, 1)], 3.0, dijkstra.search(a, b));
    }

    #[test]
    fn source_equals_target() {
        let g = Graph::new();
        let mut dijkstra = Dijkstra::new(&g);

        // Holds even for a node the graph does not contain.
        assert_path(vec![(4, 4)], 0.0, dijkstra.search(cell_id(4, 4), cell_id(4, 4)));
        assert_eq!(dijkstra.stats.nodes_settled, 1);
    }

    #[test]
    fn disconnected_components() {
        // 0,0 - 0,1     2,0 - 2,1
        let mut g = Graph::new();
        g.add_edge(cell_id(0, 0), cell_id(0, 1), 1.0);
        g.add_edge(cell_id(0, 1), cell_id(0, 0), 1.0);
        g.add_edge(cell_id(2, 0), cell_id(2, 1), 1.0);
        g.add_edge(cell_id(2, 1), cell_id(2, 0), 1.0);

        let mut dijkstra = Dijkstra::new(&g);
        assert_no_path(dijkstra.search(cell_id(0, 0), cell_id(2, 1)));
        assert_path(
            vec![(0, 0), (0, 1)],
            1.0,
            dijkstra.search(cell_id(0, 0), cell_id(0, 1)),
        );
    }

    #[test]
    fn source_outside_graph_is_unreachable() {
        let grid = Grid::parse("X..\n...").unwrap();
        let graph = build_graph(&grid);
        let mut dijkstra = Dijkstra::new(&graph);

        // Starting on the blocked cell: seeded at distance 0, no outgoing
        // edges, frontier drains.
        assert_no_path(dijkstra.search(cell_id(0, 0), cell_id(1, 2)));
        // Same for a start far outside the grid bounds.
        assert_no_path(dijkstra.search(cell_id(-3, 9), cell_id(1, 2)));
    }

    #[test]
    fn open_grid_follows_manhattan_distance() {
        let grid = Grid::parse("...\n...\n...").unwrap();
        let graph = build_graph(&grid);
        let mut dijkstra = Dijkstra::new(&graph);

        let result = dijkstra.search(cell_id(0, 0), cell_id(2, 2));
        assert_relative_eq!(result.cost, 4.0);
        assert_eq!(result.nodes.len(), 5);
        assert_eq!(result.nodes[0], cell_id(0, 0));
        assert_eq!(result.nodes[4], cell_id(2, 2));
        // Every step moves to a 4-neighbor.
        for step in result.nodes.windows(2) {
            let manhattan =
                (step[0].row - step[1].row).abs() + (step[0].col - step[1].col).abs();
            assert_eq!(manhattan, 1);
        }
    }

    #[test]
    fn rough_terrain_costs_two_extra() {
        // Middle column is rough; both rows are equal-length routes.
        let open = Grid::parse("...").unwrap();
        let rough = Grid::parse(".T.").unwrap();

        let open_cost = Dijkstra::new(&build_graph(&open))
            .search(cell_id(0, 0), cell_id(0, 2))
            .cost;
        let rough_cost = Dijkstra::new(&build_graph(&rough))
            .search(cell_id(0, 0), cell_id(0, 2))
            .cost;

        assert_relative_eq!(open_cost, 2.0);
        assert_relative_eq!(rough_cost, open_cost + 2.0);
    }

    #[test]
    fn routes_around_walls() {
        // S . .
        // X X .
        // D . .
        let grid = Grid::parse("S..\nXX.\nD..").unwrap();
        let graph = build_graph(&grid);
        let mut dijkstra = Dijkstra::new(&graph);

        assert_path(
            vec![(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)],
            6.0,
            dijkstra.search(cell_id(0, 0), cell_id(2, 0)),
        );
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        // Goal in the corner behind a wall.
        let grid = Grid::parse("..X.\n..XD\n..XX").unwrap();
        let graph = build_graph(&grid);
        let mut dijkstra = Dijkstra::new(&graph);

        assert_no_path(dijkstra.search(cell_id(0, 0), cell_id(1, 3)));
    }

    #[test]
    fn early_exit_does_not_settle_past_target() {
        // Linear corridor; the target sits in the middle.
        let grid = Grid::parse(".....").unwrap();
        let graph = build_graph(&grid);
        let mut dijkstra = Dijkstra::new(&graph);

        let result = dijkstra.search(cell_id(0, 0), cell_id(0, 2));
        assert_relative_eq!(result.cost, 2.0);
        // Cells right of the target may be discovered but the far end of
        // the corridor is never settled.
        assert!(dijkstra.stats.nodes_settled < 5);
        assert!(dijkstra.stats.duration.is_some());
    }
}
