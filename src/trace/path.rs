//! Circuit paths and unweighted path search.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::circuit::{CircuitGraph, ComponentId};

/// The traced designation does not exist in the diagram.
pub const NOT_FOUND: &str = "NOT_FOUND";
/// No matching power source has any path to the designation.
pub const NO_PATH: &str = "NO_PATH";
/// No load is reachable from the contacts.
pub const NO_LOAD: &str = "NO_LOAD";

/// A traced path between a source and a destination, by designation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitPath {
    pub source: String,
    pub destination: String,
    /// Designations from source to destination, both included
    pub path_nodes: Vec<String>,
    pub voltage_type: String,
    pub is_active: bool,
    /// First non-conducting node on the path
    pub blocking_component: Option<String>,
}

impl CircuitPath {
    /// A "no result" path whose `source` is one of [`NOT_FOUND`],
    /// [`NO_PATH`] or [`NO_LOAD`].
    pub fn sentinel(kind: &'static str, destination: &str) -> Self {
        Self {
            source: kind.to_string(),
            destination: destination.to_string(),
            path_nodes: Vec::new(),
            voltage_type: String::new(),
            is_active: false,
            blocking_component: None,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self.source.as_str(), NOT_FOUND | NO_PATH | NO_LOAD) && self.path_nodes.is_empty()
    }

    /// `A -> B -> C`, or the sentinel name.
    pub fn render(&self) -> String {
        if self.is_sentinel() {
            self.source.clone()
        } else {
            self.path_nodes.join(" -> ")
        }
    }

    /// `ACTIVE`, `BLOCKED at <designation>`, or the sentinel name.
    pub fn status(&self) -> String {
        if self.is_sentinel() {
            return self.source.clone();
        }
        match (&self.blocking_component, self.is_active) {
            (_, true) => "ACTIVE".to_string(),
            (Some(blocker), false) => format!("BLOCKED at {}", blocker),
            (None, false) => "BLOCKED".to_string(),
        }
    }
}

/// Breadth-first search from `start` to the nearest node accepted by
/// `is_target`, never entering `excluded` nodes. `start` itself is not a
/// candidate target.
///
/// Returns the node sequence from `start` to the target, both included.
pub fn bfs_path<F>(
    graph: &CircuitGraph,
    start: &ComponentId,
    excluded: &HashSet<&ComponentId>,
    is_target: F,
) -> Option<Vec<ComponentId>>
where
    F: Fn(&ComponentId) -> bool,
{
    if !graph.contains(start) {
        return None;
    }

    let mut parents: HashMap<&ComponentId, &ComponentId> = HashMap::new();
    let mut visited: HashSet<&ComponentId> = HashSet::new();
    let mut queue: VecDeque<&ComponentId> = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in graph.neighbors(current) {
            if excluded.contains(next) || !visited.insert(next) {
                continue;
            }
            parents.insert(next, current);
            if is_target(next) {
                let mut path = vec![next.clone()];
                let mut cursor = next;
                while let Some(&parent) = parents.get(cursor) {
                    path.push(parent.clone());
                    cursor = parent;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(next);
        }
    }

    None
}

/// Unweighted shortest path between two nodes.
pub fn shortest_path(
    graph: &CircuitGraph,
    from: &ComponentId,
    to: &ComponentId,
) -> Option<Vec<ComponentId>> {
    if from == to {
        return graph.contains(from).then(|| vec![from.clone()]);
    }
    bfs_path(graph, from, &HashSet::new(), |id| id == to)
}
