//! Main simulator interface.

use tracing::debug;

use super::energization::EnergizationMap;
use super::propagate::{ControlPhase, PowerPhase};
use crate::circuit::{Diagram, DualCircuitGraph, VoltageClass, VoltageDomains};
use crate::components::{Component, ComponentState};
use crate::dsl::DiagramAst;
use crate::error::{Result, VoltflowError};

/// Configuration for the simulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulatorConfig {
    /// Voltage classes of the control and power domains.
    pub domains: VoltageDomains,
}

impl SimulatorConfig {
    /// Create a new configuration with default voltage classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the control voltage classes.
    pub fn with_control_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domains.control = classes.into_iter().map(|c| VoltageClass::new(c.as_ref())).collect();
        self
    }

    /// Replace the power voltage classes.
    pub fn with_power_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domains.power = classes.into_iter().map(|c| VoltageClass::new(c.as_ref())).collect();
        self
    }

    /// Add one control voltage class.
    pub fn add_control_class(mut self, class: &str) -> Self {
        self.domains.control.insert(VoltageClass::new(class));
        self
    }

    /// Add one power voltage class.
    pub fn add_power_class(mut self, class: &str) -> Self {
        self.domains.power.insert(VoltageClass::new(class));
        self
    }

    /// Apply the `.control` / `.power` directives of a parsed diagram.
    ///
    /// A directive replaces the corresponding default set.
    pub fn with_directives(self, ast: &DiagramAst) -> Self {
        let mut config = self;
        if !ast.control_classes.is_empty() {
            config = config.with_control_classes(&ast.control_classes);
        }
        if !ast.power_classes.is_empty() {
            config = config.with_power_classes(&ast.power_classes);
        }
        config
    }

    /// Check that no voltage class belongs to both domains.
    pub fn validate(&self) -> Result<()> {
        let overlap = self.domains.overlap();
        if !overlap.is_empty() {
            let list: Vec<&str> = overlap.iter().map(|c| c.as_str()).collect();
            return Err(VoltflowError::invalid_config(format!(
                "voltage class listed as both control and power: {}",
                list.join(", ")
            )));
        }
        Ok(())
    }
}

/// The voltage-flow simulator for one diagram.
///
/// The engine owns the diagram and its partitioned graphs. Energization is
/// not stored here: [`Simulator::simulate_step`] returns a fresh
/// [`EnergizationMap`] and callers hand the current map back in where an
/// operation needs it.
///
/// Single-threaded and synchronous; a multi-threaded host must serialise
/// all calls.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// The diagram being simulated
    diagram: Diagram,
    config: SimulatorConfig,
    /// Control and power graphs, built from `diagram`
    graphs: DualCircuitGraph,
}

impl Simulator {
    /// Create a new simulator for the given diagram with default configuration.
    pub fn new(diagram: Diagram) -> Self {
        let config = SimulatorConfig::default();
        let graphs = DualCircuitGraph::build(&diagram, &config.domains);
        Self {
            diagram,
            config,
            graphs,
        }
    }

    /// Create a new simulator for the given diagram with custom configuration.
    pub fn with_config(diagram: Diagram, config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let graphs = DualCircuitGraph::build(&diagram, &config.domains);
        Ok(Self {
            diagram,
            config,
            graphs,
        })
    }

    /// Re-partition the diagram. Needed after the component or wire set
    /// changed; toggles do not require it.
    pub fn rebuild(&mut self) {
        self.graphs = DualCircuitGraph::build(&self.diagram, &self.config.domains);
    }

    /// Swap in a new diagram and rebuild the graphs.
    pub fn replace_diagram(&mut self, diagram: Diagram) {
        self.diagram = diagram;
        self.rebuild();
    }

    /// Recompute which components carry voltage.
    ///
    /// Starts from a fully de-energized map, propagates over the control
    /// graph, then over the power graph. Deterministic: two calls without an
    /// intervening state change return equal maps.
    pub fn simulate_step(&self) -> EnergizationMap {
        let reset = EnergizationMap::de_energized(&self.diagram);
        let coils = ControlPhase::new(&self.diagram, &self.graphs.control).run(reset);
        let map = PowerPhase::new(&self.diagram, &self.graphs.power, coils).run();
        debug!(
            components = map.len(),
            energized = map.energized_count(),
            "simulation step complete"
        );
        map
    }

    /// Toggle a component by designation and re-simulate.
    ///
    /// An unknown designation is not an error: `current` is returned
    /// unchanged.
    pub fn toggle_component(
        &mut self,
        designation: &str,
        current: EnergizationMap,
    ) -> EnergizationMap {
        let Some(component) = self.diagram.find_mut(designation) else {
            debug!(designation, "toggle ignored, designation not found");
            return current;
        };

        let before = component.state;
        if component.toggle() {
            debug!(designation, from = %before, to = %component.state, "toggled");
        } else {
            debug!(designation, kind = %component.kind, "kind has no togglable state");
        }

        self.simulate_step()
    }

    /// Set a component's state directly, bypassing toggle rules.
    ///
    /// Meant for initialisation from persisted state. Returns `false` if the
    /// designation is unknown. Does not re-simulate.
    pub fn set_state(&mut self, designation: &str, state: ComponentState) -> bool {
        match self.diagram.find_mut(designation) {
            Some(component) => {
                component.state = state;
                true
            }
            None => false,
        }
    }

    /// Energized components in diagram order, optionally restricted to
    /// those driven by one voltage class.
    pub fn get_energized_components<'a>(
        &'a self,
        map: &EnergizationMap,
        voltage_class: Option<&str>,
    ) -> Vec<&'a Component> {
        let class = voltage_class.map(VoltageClass::new);
        self.diagram
            .components()
            .iter()
            .filter(|c| match map.get(&c.id) {
                Some(node) if node.is_energized => match &class {
                    Some(class) => node.voltage_type.as_ref() == Some(class),
                    None => true,
                },
                _ => false,
            })
            .collect()
    }

    /// Get a reference to the diagram.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn graphs(&self) -> &DualCircuitGraph {
        &self.graphs
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}
