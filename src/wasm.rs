//! WASM bindings for Voltflow Core.
//!
//! JavaScript-friendly bindings for a browser-based diagram viewer that
//! highlights energized wires and explains component states on click.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmDiagramSim } from 'voltflow_core';
//!
//! await init();
//!
//! const diagramDsl = `
//!   SOURCE    P1 +24V 24VDC
//!   SENSOR    S1 -B1  24VDC proximity no
//!   CONTACTOR K1 -K1  24VDC
//!   .wire W1 24VDC P1 S1
//!   .wire W2 24VDC S1 K1
//! `;
//!
//! const sim = new WasmDiagramSim(diagramDsl);
//! sim.toggle("-B1");
//! const energized = JSON.parse(sim.energized());
//! console.log(sim.explain("-K1"));
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{ComponentId, Diagram};
use crate::dsl;
use crate::engine::{EnergizationMap, Simulator, SimulatorConfig};
use crate::error::VoltflowError;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: VoltflowError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible diagram simulator.
///
/// Wraps the native [`Simulator`] together with the energization map of its
/// latest step.
#[wasm_bindgen]
pub struct WasmDiagramSim {
    simulator: Simulator,
    map: EnergizationMap,
}

#[wasm_bindgen]
impl WasmDiagramSim {
    /// Create a new simulator from a diagram DSL string and run a first step.
    #[wasm_bindgen(constructor)]
    pub fn new(diagram_dsl: &str) -> Result<WasmDiagramSim, JsValue> {
        let ast = dsl::parse(diagram_dsl).map_err(to_js)?;
        let diagram = Diagram::from_ast(&ast).map_err(to_js)?;
        let config = SimulatorConfig::new().with_directives(&ast);
        Self::build(diagram, config)
    }

    /// Create a new simulator from the JSON interchange form.
    #[wasm_bindgen]
    pub fn from_json(diagram_json: &str) -> Result<WasmDiagramSim, JsValue> {
        let diagram = Diagram::from_json(diagram_json).map_err(to_js)?;
        Self::build(diagram, SimulatorConfig::new())
    }

    /// Toggle a component by designation and re-simulate.
    ///
    /// Returns `false` if the designation is unknown; nothing changes then.
    #[wasm_bindgen]
    pub fn toggle(&mut self, designation: &str) -> bool {
        let found = self.simulator.diagram().find(designation).is_some();
        let current = std::mem::take(&mut self.map);
        self.map = self.simulator.toggle_component(designation, current);
        found
    }

    /// Ids of all energized components, as a JSON array.
    #[wasm_bindgen]
    pub fn energized(&self) -> Result<String, JsValue> {
        let ids: Vec<&ComponentId> = self.map.energized_ids().collect();
        serde_json::to_string(&ids).map_err(|e| to_js(e.into()))
    }

    /// The full energization map, keyed by component id, as JSON.
    #[wasm_bindgen]
    pub fn nodes(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.map).map_err(|e| to_js(e.into()))
    }

    /// Whether the component with the given id is energized.
    #[wasm_bindgen]
    pub fn is_energized(&self, id: &str) -> bool {
        self.map.is_energized(&ComponentId::from(id))
    }

    /// Plain-text state report for a component.
    #[wasm_bindgen]
    pub fn explain(&self, designation: &str) -> String {
        self.simulator.explain_state(designation, &self.map)
    }

    /// Coil circuit of a component, as JSON.
    #[wasm_bindgen]
    pub fn trace_coil(&self, designation: &str) -> Result<String, JsValue> {
        let path = self.simulator.trace_coil_circuit(designation, &self.map);
        serde_json::to_string(&path).map_err(|e| to_js(e.into()))
    }

    /// Contact circuit of a component as a JSON `[supply, load]` pair.
    #[wasm_bindgen]
    pub fn trace_contact(&self, designation: &str) -> Result<String, JsValue> {
        let paths = self.simulator.trace_contact_circuit(designation, &self.map);
        serde_json::to_string(&paths).map_err(|e| to_js(e.into()))
    }
}

impl WasmDiagramSim {
    fn build(diagram: Diagram, config: SimulatorConfig) -> Result<WasmDiagramSim, JsValue> {
        let simulator = Simulator::with_config(diagram, config).map_err(to_js)?;
        let map = simulator.simulate_step();
        Ok(WasmDiagramSim { simulator, map })
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
