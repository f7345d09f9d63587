//! Dispatch engine for a simulated emergency-response system.
//!
//! Pending incidents wait in a priority queue ranked by a severity/waiting
//! time score. A dispatch request extracts the most urgent incident, derives
//! a weighted graph from the caller's terrain grid and runs a shortest-path
//! search from the responder's start cell to the incident.
//!
//! # Basic usage
//! ```
//! use dispatch_core::prelude::*;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.report_incident(5, 10, cell_id(2, 2));
//!
//! // S = depot, X = impassable, T = rough terrain, D = destination marker
//! let grid = Grid::parse("S..\n.X.\n.TD").unwrap();
//!
//! match dispatcher.dispatch_next(&grid, cell_id(0, 0)) {
//!     DispatchOutcome::Dispatched { incident, route, .. } => {
//!         println!("{} -> {} cells, cost {}", incident.id, route.nodes.len(), route.cost);
//!     }
//!     DispatchOutcome::QueueEmpty => println!("No calls in queue"),
//! }
//! ```
pub mod constants;
pub mod dispatch;
pub mod graph;
pub mod grid;
pub mod incident;
pub mod prelude;
pub mod queue;
pub mod search;
pub mod statistics;
