//! # Voltflow Core
//!
//! Discrete energization simulator for industrial electrical schematics.
//!
//! This library provides:
//! - A component model for control and power circuits (sources, sensors,
//!   contactors, relays, protection devices, loads)
//! - Dual control/power graphs built from the diagram's wiring
//! - Two-phase voltage propagation with coil-to-contact coupling
//! - Path tracing and plain-text fault explanations
//! - A line-oriented DSL and JSON loading for diagrams
//!
//! ## Architecture
//!
//! - [`components`] - Component kinds, states and conduction rules
//! - [`circuit`] - Diagram aggregate, wires and the dual circuit graph
//! - [`dsl`] - Parser for the diagram description language
//! - [`engine`] - Energization engine and simulator
//! - [`trace`] - Circuit path tracing and `explain_state` reports
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! voltflow simulate conveyor.vf --toggle -B1
//! voltflow explain conveyor.vf -K1
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use voltflow_core::{dsl, Diagram, Simulator};
//!
//! let ast = dsl::parse_file("conveyor.vf".as_ref())?;
//! let mut sim = Simulator::new(Diagram::from_ast(&ast)?);
//!
//! let map = sim.simulate_step();
//! let map = sim.toggle_component("-B1", map);
//! println!("{}", sim.explain_state("-K1", &map));
//! # Ok::<(), voltflow_core::VoltflowError>(())
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmDiagramSim } from 'voltflow_core';
//!
//! const sim = new WasmDiagramSim(diagramDsl);
//! sim.toggle("-B1");
//! console.log(sim.explain("-K1"));
//! ```

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod engine;
pub mod error;
pub mod trace;

// Re-export main types for convenience
pub use circuit::Diagram;
pub use engine::{EnergizationMap, Simulator, SimulatorConfig};
pub use error::{Result, VoltflowError};
pub use trace::CircuitPath;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmDiagramSim;
