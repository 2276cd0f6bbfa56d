//! Path tracing and fault explanation.
//!
//! Queries run against a [`Simulator`](crate::Simulator) and the
//! [`EnergizationMap`](crate::EnergizationMap) of its last step. They never
//! fail: a designation that does not exist, or a path that cannot be found,
//! comes back as a sentinel [`CircuitPath`] whose `source` is
//! [`NOT_FOUND`], [`NO_PATH`] or [`NO_LOAD`].

mod explain;
mod path;
mod tracer;

pub use path::{bfs_path, shortest_path, CircuitPath, NOT_FOUND, NO_LOAD, NO_PATH};
pub use tracer::Tracer;
