use log::info;
use rand::Rng;
use serde::Serialize;

use crate::graph::CellId;
use crate::grid::{build_graph, Grid};
use crate::incident::Incident;
use crate::queue::IncidentQueue;
use crate::search::dijkstra::Dijkstra;
use crate::search::shortest_path::PathResult;

/// Outcome of a dispatch request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DispatchOutcome {
    /// No pending incidents; nothing was dispatched.
    QueueEmpty,
    Dispatched {
        /// The extracted incident. It leaves the queue even when the route
        /// turns out to be unreachable.
        incident: Incident,
        /// Route from the start location to the incident, or the
        /// unreachable sentinel.
        route: PathResult,
        /// Remaining queue, priority descending.
        remaining: Vec<Incident>,
    },
}

/// Coordinates intake and dispatch of incidents.
///
/// Owns the one incident queue; per dispatch request it extracts the top
/// incident, derives a fresh graph from the caller's grid and runs the path
/// search. All mutating operations take `&mut self`, so an embedding that
/// handles requests concurrently wraps the whole dispatcher in a mutex and
/// thereby keeps extract + build + search atomic.
#[derive(Debug, Default)]
pub struct Dispatcher {
    queue: IncidentQueue,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher {
            queue: IncidentQueue::new(),
        }
    }

    /// Registers a new incident and returns it.
    ///
    /// The assigned identifier is a best-effort `E<n>` tag; uniqueness is
    /// not guaranteed and collisions are cosmetic, not a correctness issue.
    pub fn report_incident(
        &mut self,
        severity: i64,
        waiting_time: i64,
        location: CellId,
    ) -> Incident {
        let id = format!("E{}", rand::thread_rng().gen_range(0..1000));
        let incident = Incident::new(id, severity, waiting_time, location);

        info!("Logging new call: {}", incident);
        self.queue.insert(incident.clone());
        incident
    }

    /// Dispatches to the most urgent pending incident.
    ///
    /// Extraction happens before the search, so the incident is consumed
    /// regardless of whether a route exists.
    pub fn dispatch_next(&mut self, grid: &Grid, start: CellId) -> DispatchOutcome {
        let Some(incident) = self.queue.extract_max() else {
            info!("Queue empty, no calls to process");
            return DispatchOutcome::QueueEmpty;
        };

        info!("Dispatching to: {}", incident);

        let graph = build_graph(grid);
        let mut dijkstra = Dijkstra::new(&graph);
        let route = dijkstra.search(start, incident.location);

        DispatchOutcome::Dispatched {
            incident,
            route,
            remaining: self.queue.snapshot(),
        }
    }

    /// Pending incidents, priority descending. Display/inspection only.
    pub fn queue_snapshot(&self) -> Vec<Incident> {
        self.queue.snapshot()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::graph::cell_id;

    #[test]
    fn empty_queue_signals_queue_empty() {
        let mut dispatcher = Dispatcher::new();
        let grid = Grid::parse("..\n..").unwrap();

        assert_eq!(
            dispatcher.dispatch_next(&grid, cell_id(0, 0)),
            DispatchOutcome::QueueEmpty
        );
    }

    #[test]
    fn report_assigns_id_and_queues() {
        let mut dispatcher = Dispatcher::new();
        let incident = dispatcher.report_incident(4, 7, cell_id(1, 1));

        assert!(incident.id.starts_with('E'));
        assert_eq!(incident.priority, 47);
        assert_eq!(dispatcher.pending(), 1);
        assert_eq!(dispatcher.queue_snapshot()[0], incident);
    }

    #[test]
    fn dispatches_highest_priority_first() {
        let mut dispatcher = Dispatcher::new();
        let low = dispatcher.report_incident(1, 5, cell_id(0, 1)); // 15
        let high = dispatcher.report_incident(8, 3, cell_id(0, 2)); // 83

        let grid = Grid::parse("...").unwrap();
        match dispatcher.dispatch_next(&grid, cell_id(0, 0)) {
            DispatchOutcome::Dispatched {
                incident,
                route,
                remaining,
            } => {
                assert_eq!(incident, high);
                assert_relative_eq!(route.cost, 2.0);
                assert_eq!(remaining, vec![low]);
            }
            outcome => panic!("unexpected outcome: {:?}", outcome),
        }
        assert_eq!(dispatcher.pending(), 1);
    }

    #[test]
    fn open_grid_route_is_manhattan_optimal() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.report_incident(5, 0, cell_id(2, 2));

        let grid = Grid::parse("...\n...\n...").unwrap();
        match dispatcher.dispatch_next(&grid, cell_id(0, 0)) {
            DispatchOutcome::Dispatched { route, .. } => {
                assert_relative_eq!(route.cost, 4.0);
                assert_eq!(route.nodes.len(), 5);
            }
            outcome => panic!("unexpected outcome: {:?}", outcome),
        }
    }

    #[test]
    fn unreachable_incident_is_still_consumed() {
        let mut dispatcher = Dispatcher::new();
        let reported = dispatcher.report_incident(9, 0, cell_id(2, 2));

        // Incident cell is walled in.
        let grid = Grid::parse("...\n.XX\n.X.").unwrap();
        match dispatcher.dispatch_next(&grid, cell_id(0, 0)) {
            DispatchOutcome::Dispatched {
                incident,
                route,
                remaining,
            } => {
                assert_eq!(incident, reported);
                assert!(route.is_unreachable());
                assert!(route.cost.is_infinite());
                assert!(remaining.is_empty());
            }
            outcome => panic!("unexpected outcome: {:?}", outcome),
        }
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn drains_queue_across_dispatches() {
        let mut dispatcher = Dispatcher::new();
        let grid = Grid::parse("...").unwrap();

        dispatcher.report_incident(2, 0, cell_id(0, 1));
        dispatcher.report_incident(6, 0, cell_id(0, 2));

        let mut priorities = Vec::new();
        loop {
            match dispatcher.dispatch_next(&grid, cell_id(0, 0)) {
                DispatchOutcome::Dispatched { incident, .. } => {
                    priorities.push(incident.priority)
                }
                DispatchOutcome::QueueEmpty => break,
            }
        }
        assert_eq!(priorities, vec![60, 20]);
    }
}
