use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::Priority;
use crate::graph::CellId;

/// A reported emergency waiting to be dispatched.
///
/// The priority is derived once at construction time and never re-derived,
/// even though the waiting time conceptually keeps growing while the
/// incident sits in the queue. Callers that need aging must re-report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub severity: i64,
    pub waiting_time: i64,
    pub location: CellId,
    pub priority: Priority,
}

impl Incident {
    /// Creates an incident with `priority = severity * 10 + waiting_time`.
    ///
    /// No bounds are enforced on severity or waiting time; negative values
    /// are accepted and simply rank low. Validation is the caller's job.
    pub fn new(id: impl Into<String>, severity: i64, waiting_time: i64, location: CellId) -> Self {
        Incident {
            id: id.into(),
            severity,
            waiting_time,
            location,
            priority: severity * 10 + waiting_time,
        }
    }
}

impl fmt::Display for Incident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({}) | Sev: {} | Wait: {} | Priority: {}",
            self.id, self.location, self.severity, self.waiting_time, self.priority
        )
    }
}
