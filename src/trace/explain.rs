//! Human-readable state report for one component.

use super::path::CircuitPath;
use super::tracer::Tracer;
use crate::engine::{EnergizationMap, Simulator};

impl<'a> Tracer<'a> {
    /// Multi-line report on a component's state.
    ///
    /// The status line reads `ENERGIZED` or `DE-ENERGIZED`. Contactors and
    /// relays also get their coil circuit and both halves of their contact
    /// circuit, each marked `ACTIVE` or `BLOCKED`.
    pub fn explain_state(&self, designation: &str) -> String {
        let Some(component) = self.diagram().find(designation) else {
            return format!("Component '{}' not found", designation);
        };

        let mut lines = vec![
            format!("Component: {} ({})", component.designation, component.id),
            format!("Type: {}", component.kind),
            format!("Voltage rating: {}", component.voltage_rating),
            format!("State: {}", component.state),
        ];
        if let Some(description) = &component.description {
            lines.push(format!("Description: {}", description));
        }

        let status = match self.map().get(&component.id) {
            Some(node) if node.is_energized => match &node.voltage_type {
                Some(class) => format!("Status: ENERGIZED ({})", class),
                None => "Status: ENERGIZED".to_string(),
            },
            _ => "Status: DE-ENERGIZED".to_string(),
        };
        lines.push(status);

        if component.kind.is_bridging() {
            lines.push(String::new());
            lines.push("Coil circuit:".to_string());
            push_path(&mut lines, &self.trace_coil_circuit(designation));

            let (supply, load) = self.trace_contact_circuit(designation);
            lines.push(String::new());
            lines.push("Contact circuit (supply):".to_string());
            push_path(&mut lines, &supply);
            lines.push("Contact circuit (load):".to_string());
            push_path(&mut lines, &load);
        }

        lines.join("\n")
    }
}

fn push_path(lines: &mut Vec<String>, path: &CircuitPath) {
    if path.is_sentinel() {
        lines.push(format!("  {}", path.source));
        return;
    }
    lines.push(format!("  Path: {}", path.render()));
    lines.push(format!("  Voltage: {}", path.voltage_type));
    lines.push(format!("  {}", path.status()));
}

impl Simulator {
    /// See [`Tracer::explain_state`].
    pub fn explain_state(&self, designation: &str, map: &EnergizationMap) -> String {
        self.tracer(map).explain_state(designation)
    }
}

#[cfg(test)]
mod tests {
    use crate::circuit::{Diagram, Wire};
    use crate::components::{Component, ComponentKind, ComponentState, PowerTier, SensorKind};
    use crate::engine::Simulator;

    fn simulator() -> Simulator {
        let diagram = Diagram::new(
            vec![
                Component::new("P1", "+24V", ComponentKind::PowerSource(PowerTier::Low), "24VDC"),
                Component::new("S1", "-B1", ComponentKind::Sensor(SensorKind::Proximity), "24VDC")
                    .with_state(ComponentState::Off),
                Component::new("K1", "-K1", ComponentKind::Contactor, "24VDC")
                    .with_description("Conveyor contactor"),
                Component::new("L1", "L1", ComponentKind::PowerSource(PowerTier::High), "400VAC"),
                Component::new("M1", "-M1", ComponentKind::Motor, "400VAC"),
            ],
            vec![
                Wire::new("W1", "24VDC", "P1", "S1"),
                Wire::new("W2", "24VDC", "S1", "K1"),
                Wire::new("W3", "400VAC", "L1", "K1"),
                Wire::new("W4", "400VAC", "K1", "M1"),
            ],
        )
        .unwrap();
        Simulator::new(diagram)
    }

    #[test]
    fn test_explain_blocked_contactor() {
        let sim = simulator();
        let map = sim.simulate_step();
        let report = sim.explain_state("-K1", &map);

        assert!(report.contains("Component: -K1 (K1)"));
        assert!(report.contains("Type: CONTACTOR"));
        assert!(report.contains("Description: Conveyor contactor"));
        assert!(report.contains("Status: DE-ENERGIZED"));
        assert!(report.contains("Coil circuit:"));
        assert!(report.contains("+24V -> -B1 -> -K1"));
        assert!(report.contains("BLOCKED at -B1"));
        assert!(report.contains("Contact circuit (load):"));
    }

    #[test]
    fn test_explain_active_contactor() {
        let mut sim = simulator();
        let map = sim.simulate_step();
        let map = sim.toggle_component("-B1", map);
        let report = sim.explain_state("-K1", &map);

        // Contacts carry the power class once the power phase has run
        assert!(report.contains("Status: ENERGIZED (400VAC)"));
        assert!(!report.contains("DE-ENERGIZED"));
        assert!(!report.contains("BLOCKED"));
        assert!(report.contains("-K1 -> -M1"));
    }

    #[test]
    fn test_explain_plain_component_has_no_traces() {
        let sim = simulator();
        let map = sim.simulate_step();
        let report = sim.explain_state("-M1", &map);

        assert!(report.contains("Type: MOTOR"));
        assert!(report.contains("DE-ENERGIZED"));
        assert!(!report.contains("Coil circuit"));
    }

    #[test]
    fn test_explain_unknown_designation() {
        let sim = simulator();
        let map = sim.simulate_step();
        assert_eq!(sim.explain_state("-X9", &map), "Component '-X9' not found");
    }
}
