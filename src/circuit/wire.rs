//! Wires between component terminals.

use serde::{Deserialize, Serialize};

use super::types::{ComponentId, VoltageClass, WireId};

/// An edge between two components carrying a nominal voltage class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub id: WireId,
    pub voltage_level: VoltageClass,
    pub from_component_id: ComponentId,
    pub to_component_id: ComponentId,
    /// Drawing polyline; ignored by the simulation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<(f64, f64)>,
}

impl Wire {
    pub fn new(id: &str, voltage_level: &str, from: &str, to: &str) -> Self {
        Self {
            id: WireId::from(id),
            voltage_level: VoltageClass::new(voltage_level),
            from_component_id: ComponentId::from(from),
            to_component_id: ComponentId::from(to),
            points: Vec::new(),
        }
    }

    pub fn endpoints(&self) -> (&ComponentId, &ComponentId) {
        (&self.from_component_id, &self.to_component_id)
    }

    pub fn is_self_loop(&self) -> bool {
        self.from_component_id == self.to_component_id
    }
}
