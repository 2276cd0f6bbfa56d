//! Dual circuit graph: the diagram split into a control and a power graph.
//!
//! Components whose voltage class belongs to the control domain become
//! nodes of the control graph, power-domain components nodes of the power
//! graph. Contactors and relays, and anything whose class belongs to
//! neither domain, are placed in both graphs. That dual membership is what lets a
//! coil energized on the control side gate its contacts on the power side.
//!
//! Wires only become edges in the graph of their own voltage class and only
//! when both endpoints are already nodes of that graph.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, warn};

use super::diagram::Diagram;
use super::types::{ComponentId, VoltageClass, WireId};

/// Default control (logic) voltage classes.
pub const DEFAULT_CONTROL_CLASSES: &[&str] = &["5VDC", "12VDC", "24VDC", "24VAC", "48VDC"];

/// Default power (load) voltage classes.
pub const DEFAULT_POWER_CLASSES: &[&str] =
    &["110VAC", "120VAC", "230VAC", "400VAC", "480VAC", "690VAC"];

/// Which of the two graphs a node or wire belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Control,
    Power,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Domain::Control => "control",
            Domain::Power => "power",
        })
    }
}

/// The voltage classes that make up each domain.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageDomains {
    pub control: BTreeSet<VoltageClass>,
    pub power: BTreeSet<VoltageClass>,
}

impl Default for VoltageDomains {
    fn default() -> Self {
        Self {
            control: DEFAULT_CONTROL_CLASSES.iter().map(|c| VoltageClass::new(c)).collect(),
            power: DEFAULT_POWER_CLASSES.iter().map(|c| VoltageClass::new(c)).collect(),
        }
    }
}

impl VoltageDomains {
    /// Domain of a voltage class, or `None` if it belongs to neither.
    pub fn classify(&self, class: &VoltageClass) -> Option<Domain> {
        if self.control.contains(class) {
            Some(Domain::Control)
        } else if self.power.contains(class) {
            Some(Domain::Power)
        } else {
            None
        }
    }

    pub fn contains(&self, domain: Domain, class: &VoltageClass) -> bool {
        match domain {
            Domain::Control => self.control.contains(class),
            Domain::Power => self.power.contains(class),
        }
    }

    /// Classes listed in both domains.
    pub fn overlap(&self) -> Vec<&VoltageClass> {
        self.control.intersection(&self.power).collect()
    }
}

/// One undirected conduction graph over component ids.
#[derive(Debug, Clone)]
pub struct CircuitGraph {
    domain: Domain,
    graph: UnGraph<ComponentId, WireId>,
    indices: HashMap<ComponentId, NodeIndex>,
}

impl CircuitGraph {
    fn new(domain: Domain) -> Self {
        Self {
            domain,
            graph: UnGraph::new_undirected(),
            indices: HashMap::new(),
        }
    }

    fn add_node(&mut self, id: &ComponentId) {
        if !self.indices.contains_key(id) {
            let idx = self.graph.add_node(id.clone());
            self.indices.insert(id.clone(), idx);
        }
    }

    /// Add an edge if both endpoints are nodes. Returns whether it was added.
    fn add_edge(&mut self, from: &ComponentId, to: &ComponentId, wire: &WireId) -> bool {
        match (self.indices.get(from), self.indices.get(to)) {
            (Some(&a), Some(&b)) => {
                self.graph.update_edge(a, b, wire.clone());
                true
            }
            _ => false,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.indices.contains_key(id)
    }

    /// Direct neighbours of a component. Empty if it is not a node.
    pub fn neighbors<'a>(&'a self, id: &ComponentId) -> impl Iterator<Item = &'a ComponentId> + 'a {
        self.indices
            .get(id)
            .into_iter()
            .flat_map(move |&idx| self.graph.neighbors(idx))
            .map(move |n| &self.graph[n])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn degree(&self, id: &ComponentId) -> usize {
        self.neighbors(id).count()
    }
}

/// The control and power graphs of one diagram.
#[derive(Debug, Clone)]
pub struct DualCircuitGraph {
    pub control: CircuitGraph,
    pub power: CircuitGraph,
}

impl DualCircuitGraph {
    /// Partition a diagram by voltage domain.
    ///
    /// Pure: never touches component state. Must be rebuilt whenever the
    /// diagram's component or wire set changes.
    pub fn build(diagram: &Diagram, domains: &VoltageDomains) -> Self {
        let mut control = CircuitGraph::new(Domain::Control);
        let mut power = CircuitGraph::new(Domain::Power);

        for component in diagram.components() {
            let domain = if component.kind.is_bridging() {
                None
            } else {
                domains.classify(&component.voltage_rating)
            };
            match domain {
                Some(Domain::Control) => control.add_node(&component.id),
                Some(Domain::Power) => power.add_node(&component.id),
                None => {
                    control.add_node(&component.id);
                    power.add_node(&component.id);
                }
            }
        }

        for wire in diagram.wires() {
            let (from, to) = wire.endpoints();
            let graph = match domains.classify(&wire.voltage_level) {
                Some(Domain::Control) => &mut control,
                Some(Domain::Power) => &mut power,
                None => {
                    warn!(
                        wire = %wire.id,
                        class = %wire.voltage_level,
                        "wire voltage class belongs to neither domain, excluded"
                    );
                    continue;
                }
            };
            if !graph.add_edge(from, to, &wire.id) {
                warn!(
                    wire = %wire.id,
                    from = %from,
                    to = %to,
                    domain = %graph.domain(),
                    "wire endpoint missing from graph, excluded"
                );
            }
        }

        debug!(
            control_nodes = control.node_count(),
            control_edges = control.edge_count(),
            power_nodes = power.node_count(),
            power_edges = power.edge_count(),
            "built dual circuit graph"
        );

        Self { control, power }
    }

    pub fn get(&self, domain: Domain) -> &CircuitGraph {
        match domain {
            Domain::Control => &self.control,
            Domain::Power => &self.power,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Wire;
    use crate::components::{Component, ComponentKind, PowerTier};

    fn id(s: &str) -> ComponentId {
        ComponentId::from(s)
    }

    fn sample() -> Diagram {
        Diagram::new(
            vec![
                Component::new("P1", "+24V", ComponentKind::PowerSource(PowerTier::Low), "24VDC"),
                Component::new("K1", "-K1", ComponentKind::Contactor, "24VDC"),
                Component::new("H1", "-H1", ComponentKind::Lamp, "24V COIL"),
                Component::new("L1", "L1", ComponentKind::PowerSource(PowerTier::High), "400VAC"),
                Component::new("M1", "-M1", ComponentKind::Motor, "400VAC"),
            ],
            vec![
                Wire::new("W1", "24VDC", "P1", "K1"),
                Wire::new("W2", "400VAC", "L1", "K1"),
                Wire::new("W3", "400VAC", "K1", "M1"),
                // Control wire to a power-only node: dropped
                Wire::new("W4", "24VDC", "P1", "M1"),
                // Unknown endpoint: dropped
                Wire::new("W5", "400VAC", "M1", "GHOST"),
                // Neither domain: dropped
                Wire::new("W6", "DATA", "P1", "K1"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_partition_nodes() {
        let graphs = DualCircuitGraph::build(&sample(), &VoltageDomains::default());

        assert!(graphs.control.contains(&id("P1")));
        assert!(!graphs.control.contains(&id("M1")));
        assert!(graphs.power.contains(&id("M1")));
        assert!(!graphs.power.contains(&id("P1")));

        // Bridging component sits in both graphs, whatever its rating
        assert!(graphs.control.contains(&id("K1")));
        assert!(graphs.power.contains(&id("K1")));

        // So does anything with an unclassified rating
        assert!(graphs.control.contains(&id("H1")));
        assert!(graphs.power.contains(&id("H1")));
    }

    #[test]
    fn test_partition_edges() {
        let graphs = DualCircuitGraph::build(&sample(), &VoltageDomains::default());

        assert_eq!(graphs.control.edge_count(), 1);
        assert_eq!(graphs.power.edge_count(), 2);
        assert_eq!(graphs.control.neighbors(&id("P1")).collect::<Vec<_>>(), vec![&id("K1")]);
        assert_eq!(graphs.power.degree(&id("K1")), 2);
        assert_eq!(graphs.power.degree(&id("GHOST")), 0);
    }

    #[test]
    fn test_build_is_idempotent() {
        let diagram = sample();
        let domains = VoltageDomains::default();
        let a = DualCircuitGraph::build(&diagram, &domains);
        let b = DualCircuitGraph::build(&diagram, &domains);
        assert_eq!(a.control.node_count(), b.control.node_count());
        assert_eq!(a.power.edge_count(), b.power.edge_count());
    }

    #[test]
    fn test_classify() {
        let domains = VoltageDomains::default();
        assert_eq!(domains.classify(&VoltageClass::new("24 vdc")), Some(Domain::Control));
        assert_eq!(domains.classify(&VoltageClass::new("400VAC")), Some(Domain::Power));
        assert_eq!(domains.classify(&VoltageClass::new("24V COIL")), None);
        assert!(domains.overlap().is_empty());
    }
}
