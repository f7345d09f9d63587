/// Edge weight and path cost type. `f64::INFINITY` marks an unreachable goal.
pub type Weight = f64;
/// Derived incident ranking score (severity * 10 + waiting time).
pub type Priority = i64;
