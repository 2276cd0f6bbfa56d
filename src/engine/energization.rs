//! Per-step energization results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::circuit::{ComponentId, Diagram, VoltageClass};

/// Energization state of one component after a simulation step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoltageNode {
    pub component_id: ComponentId,
    pub is_energized: bool,
    /// Nominal value of the class driving the node; informational only
    pub voltage_level: f64,
    /// Voltage class currently driving the node
    pub voltage_type: Option<VoltageClass>,
}

impl VoltageNode {
    fn de_energized(component_id: ComponentId) -> Self {
        Self {
            component_id,
            is_energized: false,
            voltage_level: 0.0,
            voltage_type: None,
        }
    }
}

/// Energization of every component in a diagram, keyed by component id.
///
/// Produced fresh by every simulation step; never patched in place by the
/// caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct EnergizationMap {
    nodes: BTreeMap<ComponentId, VoltageNode>,
}

impl EnergizationMap {
    /// A map with every component of the diagram de-energized.
    pub fn de_energized(diagram: &Diagram) -> Self {
        let nodes = diagram
            .components()
            .iter()
            .map(|c| (c.id.clone(), VoltageNode::de_energized(c.id.clone())))
            .collect();
        Self { nodes }
    }

    pub(crate) fn energize(&mut self, id: &ComponentId, class: &VoltageClass) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.is_energized = true;
            node.voltage_level = class.nominal_value();
            node.voltage_type = Some(class.clone());
        }
    }

    pub fn get(&self, id: &ComponentId) -> Option<&VoltageNode> {
        self.nodes.get(id)
    }

    /// Whether a component is energized. Unknown ids are not.
    pub fn is_energized(&self, id: &ComponentId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.is_energized)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoltageNode> {
        self.nodes.values()
    }

    /// Ids of all energized components, in id order.
    pub fn energized_ids(&self) -> impl Iterator<Item = &ComponentId> {
        self.nodes.values().filter(|n| n.is_energized).map(|n| &n.component_id)
    }

    pub fn energized_count(&self) -> usize {
        self.energized_ids().count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
