//! Coil and contact circuit tracing.
//!
//! Tie-break: a supply path is traced from the first matching power source,
//! in diagram order, that has any path to the target. That is not
//! necessarily the source actually feeding the target; explanations rely on
//! this simple, stable choice.

use std::collections::HashSet;

use tracing::debug;

use super::path::{bfs_path, shortest_path, CircuitPath, NOT_FOUND, NO_LOAD, NO_PATH};
use crate::circuit::{ComponentId, Diagram, Domain, DualCircuitGraph};
use crate::components::Component;
use crate::engine::{EnergizationMap, Simulator};

/// Path queries against one simulation result.
pub struct Tracer<'a> {
    diagram: &'a Diagram,
    graphs: &'a DualCircuitGraph,
    map: &'a EnergizationMap,
}

impl<'a> Tracer<'a> {
    pub fn new(simulator: &'a Simulator, map: &'a EnergizationMap) -> Self {
        Self {
            diagram: simulator.diagram(),
            graphs: simulator.graphs(),
            map,
        }
    }

    pub(super) fn diagram(&self) -> &'a Diagram {
        self.diagram
    }

    pub(super) fn map(&self) -> &'a EnergizationMap {
        self.map
    }

    /// Trace the control-side path that feeds a component (a coil, for
    /// contactors and relays).
    pub fn trace_coil_circuit(&self, designation: &str) -> CircuitPath {
        match self.diagram.find(designation) {
            Some(target) => self.trace_supply(target, Domain::Control).0,
            None => CircuitPath::sentinel(NOT_FOUND, designation),
        }
    }

    /// Trace the power-side supply path to a component's contacts and the
    /// load path from the contacts to the nearest motor.
    ///
    /// The load search runs on the undirected power graph from the
    /// component outwards, never re-entering nodes already on the supply
    /// path.
    pub fn trace_contact_circuit(&self, designation: &str) -> (CircuitPath, CircuitPath) {
        let Some(target) = self.diagram.find(designation) else {
            return (
                CircuitPath::sentinel(NOT_FOUND, designation),
                CircuitPath::sentinel(NOT_FOUND, designation),
            );
        };

        let (supply, supply_ids) = self.trace_supply(target, Domain::Power);
        let load = self.trace_load(target, &supply_ids);
        (supply, load)
    }

    /// Supply path plus the ids along it (empty for sentinels).
    ///
    /// Candidate sources are the power sources that are nodes of the graph,
    /// the same set propagation floods from.
    fn trace_supply(
        &self,
        target: &Component,
        domain: Domain,
    ) -> (CircuitPath, Vec<ComponentId>) {
        let graph = self.graphs.get(domain);

        let found = self
            .diagram
            .components()
            .iter()
            .filter(|c| c.kind.is_power_source() && graph.contains(&c.id))
            .find_map(|source| {
                shortest_path(graph, &source.id, &target.id).map(|p| (source, p))
            });

        match found {
            Some((source, ids)) => {
                debug!(
                    target = %target.designation,
                    source = %source.designation,
                    domain = %domain,
                    hops = ids.len() - 1,
                    "supply path found"
                );
                let class = source.voltage_rating.to_string();
                let path = self.evaluate(source, target, &ids[1..], class, &ids);
                (path, ids)
            }
            None => (CircuitPath::sentinel(NO_PATH, &target.designation), Vec::new()),
        }
    }

    fn trace_load(&self, target: &Component, supply_ids: &[ComponentId]) -> CircuitPath {
        let graph = self.graphs.get(Domain::Power);
        let excluded: HashSet<&ComponentId> = supply_ids
            .iter()
            .filter(|id| **id != target.id)
            .collect();

        let is_load = |id: &ComponentId| {
            self.diagram
                .component(id)
                .is_some_and(|c| c.kind.is_load())
        };

        match bfs_path(graph, &target.id, &excluded, is_load) {
            Some(ids) => {
                let Some(load) = ids.last().and_then(|id| self.diagram.component(id)) else {
                    return CircuitPath::sentinel(NO_LOAD, &target.designation);
                };
                self.evaluate(target, load, &ids, load.voltage_rating.to_string(), &ids)
            }
            None => CircuitPath::sentinel(NO_LOAD, &target.designation),
        }
    }

    /// Build a path result, checking conduction of every node in `checked`.
    fn evaluate(
        &self,
        source: &Component,
        destination: &Component,
        checked: &[ComponentId],
        voltage_type: String,
        all: &[ComponentId],
    ) -> CircuitPath {
        let blocking_component = checked
            .iter()
            .filter_map(|id| self.diagram.component(id))
            .find(|c| !c.conducts(self.map.is_energized(&c.id)))
            .map(|c| c.designation.clone());

        CircuitPath {
            source: source.designation.clone(),
            destination: destination.designation.clone(),
            path_nodes: all.iter().map(|id| self.diagram.designation_of(id).to_string()).collect(),
            voltage_type,
            is_active: blocking_component.is_none(),
            blocking_component,
        }
    }
}

impl Simulator {
    /// Path queries against the given simulation result.
    pub fn tracer<'a>(&'a self, map: &'a EnergizationMap) -> Tracer<'a> {
        Tracer::new(self, map)
    }

    /// See [`Tracer::trace_coil_circuit`].
    pub fn trace_coil_circuit(&self, designation: &str, map: &EnergizationMap) -> CircuitPath {
        self.tracer(map).trace_coil_circuit(designation)
    }

    /// See [`Tracer::trace_contact_circuit`].
    pub fn trace_contact_circuit(
        &self,
        designation: &str,
        map: &EnergizationMap,
    ) -> (CircuitPath, CircuitPath) {
        self.tracer(map).trace_contact_circuit(designation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Wire;
    use crate::components::{ComponentKind, ComponentState, PowerTier, SensorKind};

    /// +24V -> -S1 (NO) -> -S2 (NC) -> -K1 coil
    /// L1 -> -Q1 -> -K1 contacts -> -M1
    fn machine(s1: ComponentState) -> Simulator {
        let diagram = Diagram::new(
            vec![
                Component::new("P1", "+24V", ComponentKind::PowerSource(PowerTier::Low), "24VDC"),
                Component::new("S1", "-S1", ComponentKind::Switch, "24VDC").with_state(s1),
                Component::new("S2", "-S2", ComponentKind::Sensor(SensorKind::Limit), "24VDC")
                    .normally_closed()
                    .with_state(ComponentState::Off),
                Component::new("K1", "-K1", ComponentKind::Contactor, "24VDC"),
                Component::new("L1", "L1", ComponentKind::PowerSource(PowerTier::High), "400VAC"),
                Component::new("Q1", "-Q1", ComponentKind::CircuitBreaker, "400VAC")
                    .with_state(ComponentState::On),
                Component::new("M1", "-M1", ComponentKind::Motor, "400VAC"),
            ],
            vec![
                Wire::new("W1", "24VDC", "P1", "S1"),
                Wire::new("W2", "24VDC", "S1", "S2"),
                Wire::new("W3", "24VDC", "S2", "K1"),
                Wire::new("W4", "400VAC", "L1", "Q1"),
                Wire::new("W5", "400VAC", "Q1", "K1"),
                Wire::new("W6", "400VAC", "K1", "M1"),
            ],
        )
        .unwrap();
        Simulator::new(diagram)
    }

    #[test]
    fn test_coil_trace_blocked() {
        let sim = machine(ComponentState::Off);
        let map = sim.simulate_step();
        let path = sim.trace_coil_circuit("-K1", &map);

        assert_eq!(path.source, "+24V");
        assert_eq!(path.destination, "-K1");
        assert_eq!(path.path_nodes, vec!["+24V", "-S1", "-S2", "-K1"]);
        assert_eq!(path.voltage_type, "24VDC");
        assert!(!path.is_active);
        assert_eq!(path.blocking_component.as_deref(), Some("-S1"));
    }

    #[test]
    fn test_coil_trace_active() {
        let sim = machine(ComponentState::On);
        let map = sim.simulate_step();
        let path = sim.trace_coil_circuit("-K1", &map);
        assert!(path.is_active);
        assert_eq!(path.blocking_component, None);
    }

    #[test]
    fn test_coil_trace_not_found() {
        let sim = machine(ComponentState::On);
        let map = sim.simulate_step();
        let path = sim.trace_coil_circuit("-K99", &map);
        assert_eq!(path.source, NOT_FOUND);
        assert!(path.path_nodes.is_empty());
    }

    #[test]
    fn test_coil_trace_no_path() {
        let sim = machine(ComponentState::On);
        let map = sim.simulate_step();
        // The motor is not on the control graph at all
        let path = sim.trace_coil_circuit("-M1", &map);
        assert_eq!(path.source, NO_PATH);
        assert!(path.path_nodes.is_empty());
    }

    #[test]
    fn test_contact_trace() {
        let sim = machine(ComponentState::On);
        let map = sim.simulate_step();
        let (supply, load) = sim.trace_contact_circuit("-K1", &map);

        assert_eq!(supply.path_nodes, vec!["L1", "-Q1", "-K1"]);
        assert!(supply.is_active);
        assert_eq!(load.source, "-K1");
        assert_eq!(load.destination, "-M1");
        assert_eq!(load.path_nodes, vec!["-K1", "-M1"]);
        assert!(load.is_active);
    }

    #[test]
    fn test_contact_trace_blocked_by_open_contacts() {
        let sim = machine(ComponentState::Off);
        let map = sim.simulate_step();
        let (supply, load) = sim.trace_contact_circuit("-K1", &map);

        assert_eq!(supply.blocking_component.as_deref(), Some("-K1"));
        assert_eq!(load.blocking_component.as_deref(), Some("-K1"));
    }

    #[test]
    fn test_contact_trace_sentinels() {
        let sim = machine(ComponentState::On);
        let map = sim.simulate_step();

        let (supply, load) = sim.trace_contact_circuit("nope", &map);
        assert_eq!(supply.source, NOT_FOUND);
        assert_eq!(load.source, NOT_FOUND);

        // A control-only sensor has neither supply nor load on the power side
        let (supply, load) = sim.trace_contact_circuit("-S1", &map);
        assert_eq!(supply.source, NO_PATH);
        assert_eq!(load.source, NO_LOAD);
    }

    #[test]
    fn test_load_search_skips_supply_side() {
        // A motor hanging off the supply side must not be reported as the load
        let diagram = Diagram::new(
            vec![
                Component::new("L1", "L1", ComponentKind::PowerSource(PowerTier::High), "400VAC"),
                Component::new("M0", "-M0", ComponentKind::Motor, "400VAC"),
                Component::new("X1", "-X1", ComponentKind::Terminal, "400VAC"),
                Component::new("K1", "-K1", ComponentKind::Contactor, "24VDC"),
            ],
            vec![
                Wire::new("W1", "400VAC", "L1", "X1"),
                Wire::new("W2", "400VAC", "X1", "M0"),
                Wire::new("W3", "400VAC", "X1", "K1"),
            ],
        )
        .unwrap();
        let sim = Simulator::new(diagram);
        let map = sim.simulate_step();
        let (supply, load) = sim.trace_contact_circuit("-K1", &map);

        assert_eq!(supply.path_nodes, vec!["L1", "-X1", "-K1"]);
        assert_eq!(load.source, NO_LOAD);
    }

    #[test]
    fn test_unclassified_source_is_traced() {
        // "24V" is in neither domain; the source still floods and must be traceable
        let diagram = Diagram::new(
            vec![
                Component::new("P1", "+24V", ComponentKind::PowerSource(PowerTier::Low), "24V"),
                Component::new("S1", "-S1", ComponentKind::Sensor(SensorKind::Limit), "24VDC")
                    .with_state(ComponentState::On),
                Component::new("K1", "-K1", ComponentKind::Contactor, "24VDC"),
            ],
            vec![
                Wire::new("W1", "24VDC", "P1", "S1"),
                Wire::new("W2", "24VDC", "S1", "K1"),
            ],
        )
        .unwrap();
        let sim = Simulator::new(diagram);
        let map = sim.simulate_step();
        assert!(map.is_energized(&ComponentId::from("K1")));

        let path = sim.trace_coil_circuit("-K1", &map);
        assert_eq!(path.source, "+24V");
        assert_eq!(path.path_nodes, vec!["+24V", "-S1", "-K1"]);
        assert_eq!(path.voltage_type, "24V");
        assert!(path.is_active);

        let report = sim.explain_state("-K1", &map);
        assert!(report.contains("Status: ENERGIZED (24V)"));
        assert!(!report.contains(NO_PATH));
    }

    #[test]
    fn test_first_source_in_diagram_order_wins() {
        let diagram = Diagram::new(
            vec![
                Component::new("PA", "+24V-A", ComponentKind::PowerSource(PowerTier::Low), "24VDC"),
                Component::new("PB", "+24V-B", ComponentKind::PowerSource(PowerTier::Low), "24VDC"),
                Component::new("S1", "-S1", ComponentKind::Switch, "24VDC")
                    .with_state(ComponentState::Off),
                Component::new("K1", "-K1", ComponentKind::Relay, "24VDC"),
            ],
            vec![
                // PA reaches the coil only through an open switch; PB directly
                Wire::new("W1", "24VDC", "PA", "S1"),
                Wire::new("W2", "24VDC", "S1", "K1"),
                Wire::new("W3", "24VDC", "PB", "K1"),
            ],
        )
        .unwrap();
        let sim = Simulator::new(diagram);
        let map = sim.simulate_step();
        assert!(map.is_energized(&ComponentId::from("K1")));

        let path = sim.trace_coil_circuit("-K1", &map);
        assert_eq!(path.source, "+24V-A");
        assert!(!path.is_active);
        assert_eq!(path.blocking_component.as_deref(), Some("-S1"));
    }
}
