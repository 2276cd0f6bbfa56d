//! Diagram representation and graph partitioning.
//!
//! This module provides the internal representation of a wiring diagram
//! after loading. The [`Diagram`] holds all components and wires; the
//! [`DualCircuitGraph`] splits it into the control and power graphs the
//! engine propagates over.

mod diagram;
mod graph;
mod types;
mod validate;
mod wire;

pub use diagram::Diagram;
pub use graph::{
    CircuitGraph, Domain, DualCircuitGraph, VoltageDomains, DEFAULT_CONTROL_CLASSES,
    DEFAULT_POWER_CLASSES,
};
pub use types::*;
pub use validate::{validate_diagram, DiagramWarning};
pub use wire::Wire;
