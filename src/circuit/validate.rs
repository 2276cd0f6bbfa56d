//! Diagram validation.
//!
//! None of these findings block simulation; an inconsistent diagram simply
//! energizes less. They are surfaced so the loader or the user can fix the
//! drawing.

use std::fmt;

use super::graph::{Domain, DualCircuitGraph, VoltageDomains};
use super::Diagram;

/// A non-fatal problem found in a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramWarning {
    /// Wire references a component id that is not in the diagram
    DanglingWire { wire: String, endpoint: String },
    /// Wire connects a component to itself
    SelfLoopWire { wire: String },
    /// Wire's voltage class is neither control nor power
    UnclassifiedWire { wire: String, class: String },
    /// Contactor or relay without any control-side wiring; it can never pull in
    UnwiredCoil { designation: String },
    /// No power source at all
    NoPowerSource,
}

impl fmt::Display for DiagramWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingWire { wire, endpoint } => {
                write!(f, "wire '{}' references unknown component '{}'", wire, endpoint)
            }
            Self::SelfLoopWire { wire } => {
                write!(f, "wire '{}' connects a component to itself", wire)
            }
            Self::UnclassifiedWire { wire, class } => write!(
                f,
                "wire '{}' has voltage class '{}' which is neither control nor power",
                wire, class
            ),
            Self::UnwiredCoil { designation } => {
                write!(f, "coil of '{}' has no control-side wiring", designation)
            }
            Self::NoPowerSource => write!(f, "diagram has no power source"),
        }
    }
}

/// Validate a diagram against the given voltage domains.
///
/// Checks:
/// - Every wire endpoint exists
/// - No wire loops back onto its own component
/// - Every wire belongs to a domain
/// - Every contactor/relay coil has control wiring
/// - At least one power source exists
pub fn validate_diagram(diagram: &Diagram, domains: &VoltageDomains) -> Vec<DiagramWarning> {
    let mut warnings = Vec::new();

    for wire in diagram.wires() {
        let (from, to) = wire.endpoints();
        for endpoint in [from, to] {
            if diagram.component(endpoint).is_none() {
                warnings.push(DiagramWarning::DanglingWire {
                    wire: wire.id.to_string(),
                    endpoint: endpoint.to_string(),
                });
            }
        }
        if wire.is_self_loop() {
            warnings.push(DiagramWarning::SelfLoopWire {
                wire: wire.id.to_string(),
            });
        }
        if domains.classify(&wire.voltage_level).is_none() {
            warnings.push(DiagramWarning::UnclassifiedWire {
                wire: wire.id.to_string(),
                class: wire.voltage_level.to_string(),
            });
        }
    }

    let graphs = DualCircuitGraph::build(diagram, domains);
    let control = graphs.get(Domain::Control);
    for component in diagram.components() {
        if component.kind.is_bridging() && control.degree(&component.id) == 0 {
            warnings.push(DiagramWarning::UnwiredCoil {
                designation: component.designation.clone(),
            });
        }
    }

    if !diagram.components().iter().any(|c| c.kind.is_power_source()) {
        warnings.push(DiagramWarning::NoPowerSource);
    }

    warnings
}
