//! Energization engine.
//!
//! This module decides, per simulation step, which components carry
//! voltage. It is a discrete model: a component is either energized or it
//! is not, with no currents, impedances or delays.
//!
//! ## Step pipeline
//!
//! 1. Reset every [`VoltageNode`] to de-energized
//! 2. [`ControlPhase`]: flood the control graph from every control source
//! 3. [`PowerPhase`]: flood the power graph from every power source
//!
//! Contactor and relay contacts on the power graph conduct only when their
//! coil was energized in step 2. That coil-to-contact coupling is why the
//! phases cannot be reordered, and why [`PowerPhase`] takes the
//! [`CoilSnapshot`] produced by [`ControlPhase`] as its input.

mod energization;
mod propagate;
mod simulator;

pub use energization::{EnergizationMap, VoltageNode};
pub use propagate::{CoilSnapshot, ControlPhase, PowerPhase};
pub use simulator::{Simulator, SimulatorConfig};
