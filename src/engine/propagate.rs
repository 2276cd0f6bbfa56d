//! Two-phase voltage propagation.
//!
//! One simulation step is a fixed pipeline:
//!
//! ```text
//! EnergizationMap::de_energized --> ControlPhase::run --> CoilSnapshot --> PowerPhase::run --> EnergizationMap
//! ```
//!
//! A [`PowerPhase`] can only be built from the [`CoilSnapshot`] the control
//! phase returns, so contact conduction always reads coil states that were
//! computed first.
//!
//! Within a phase, every power-source voltage class present in the graph
//! gets its own pass, and every source of that class floods the graph
//! breadth-first. A reached component is energized only if it conducts, and
//! only conducting components pass the flood on to their neighbours.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use super::energization::EnergizationMap;
use crate::circuit::{CircuitGraph, ComponentId, Diagram, VoltageClass};
use crate::components::Component;

/// First stage: energize coils and control logic on the control graph.
pub struct ControlPhase<'a> {
    diagram: &'a Diagram,
    graph: &'a CircuitGraph,
}

impl<'a> ControlPhase<'a> {
    pub fn new(diagram: &'a Diagram, graph: &'a CircuitGraph) -> Self {
        Self { diagram, graph }
    }

    /// Run the control passes over a freshly reset map.
    pub fn run(self, mut map: EnergizationMap) -> CoilSnapshot {
        // A coil reached over the control graph pulls in.
        propagate(self.diagram, self.graph, &mut map, |_| true);
        CoilSnapshot { map }
    }
}

/// Energization after the control phase; the coil states the power phase
/// reads.
#[derive(Debug, Clone)]
pub struct CoilSnapshot {
    map: EnergizationMap,
}

impl CoilSnapshot {
    pub fn coil_energized(&self, id: &ComponentId) -> bool {
        self.map.is_energized(id)
    }

    pub fn as_map(&self) -> &EnergizationMap {
        &self.map
    }
}

/// Second stage: load-carrying current on the power graph, gated by coils.
pub struct PowerPhase<'a> {
    diagram: &'a Diagram,
    graph: &'a CircuitGraph,
    coils: CoilSnapshot,
}

impl<'a> PowerPhase<'a> {
    pub fn new(diagram: &'a Diagram, graph: &'a CircuitGraph, coils: CoilSnapshot) -> Self {
        Self {
            diagram,
            graph,
            coils,
        }
    }

    pub fn run(self) -> EnergizationMap {
        let coils = self.coils;
        let mut map = coils.map.clone();
        propagate(self.diagram, self.graph, &mut map, |id| coils.coil_energized(id));
        map
    }
}

/// Distinct voltage classes of the power sources in a graph, in diagram order.
fn source_classes<'d>(diagram: &'d Diagram, graph: &CircuitGraph) -> Vec<&'d VoltageClass> {
    let mut classes: Vec<&VoltageClass> = Vec::new();
    for component in diagram.components() {
        if component.kind.is_power_source()
            && graph.contains(&component.id)
            && !classes.contains(&&component.voltage_rating)
        {
            classes.push(&component.voltage_rating);
        }
    }
    classes
}

fn propagate<F>(
    diagram: &Diagram,
    graph: &CircuitGraph,
    map: &mut EnergizationMap,
    coil_energized: F,
) where
    F: Fn(&ComponentId) -> bool,
{
    for class in source_classes(diagram, graph) {
        let sources: Vec<&Component> = diagram
            .components()
            .iter()
            .filter(|c| {
                c.kind.is_power_source() && &c.voltage_rating == class && graph.contains(&c.id)
            })
            .collect();

        for source in &sources {
            flood(diagram, graph, map, &source.id, class, &coil_energized);
        }

        debug!(
            domain = %graph.domain(),
            class = %class,
            sources = sources.len(),
            energized = map.energized_count(),
            "propagation pass complete"
        );
    }
}

/// Breadth-first flood from one source.
fn flood<F>(
    diagram: &Diagram,
    graph: &CircuitGraph,
    map: &mut EnergizationMap,
    source: &ComponentId,
    class: &VoltageClass,
    coil_energized: &F,
) where
    F: Fn(&ComponentId) -> bool,
{
    let mut visited: HashSet<&ComponentId> = HashSet::new();
    let mut queue: VecDeque<&ComponentId> = VecDeque::new();
    visited.insert(source);
    queue.push_back(source);

    while let Some(id) = queue.pop_front() {
        let Some(component) = diagram.component(id) else {
            continue;
        };

        if !component.conducts(coil_energized(id)) {
            trace!(component = %component.designation, "blocked");
            continue;
        }

        map.energize(id, class);
        trace!(component = %component.designation, class = %class, "energized");

        for next in graph.neighbors(id) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
}
