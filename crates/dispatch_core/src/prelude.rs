pub use crate::constants::{Priority, Weight};
pub use crate::dispatch::{DispatchOutcome, Dispatcher};
pub use crate::graph::{cell_id, CellId, Edge, Graph};
pub use crate::grid::{build_graph, CellType, Grid};
pub use crate::incident::Incident;
pub use crate::queue::IncidentQueue;
pub use crate::search::dijkstra::Dijkstra;
pub use crate::search::shortest_path::PathResult;
pub use crate::statistics::SearchStats;
