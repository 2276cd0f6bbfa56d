//! Diagram aggregate: the component and wire lists of one wiring diagram.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::ComponentId;
use super::wire::Wire;
use crate::components::Component;
use crate::dsl::DiagramAst;
use crate::error::{Result, VoltflowError};

/// Serialised form of a diagram, as handed over by the persistence layer.
#[derive(Debug, Clone, Deserialize)]
struct DiagramDoc {
    #[serde(default)]
    components: Vec<Component>,
    #[serde(default)]
    wires: Vec<Wire>,
}

/// A complete wiring diagram.
///
/// Membership is fixed once built; only component `state` can change, and
/// only through the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DiagramDoc")]
pub struct Diagram {
    /// Components in insertion order
    components: Vec<Component>,

    wires: Vec<Wire>,

    #[serde(skip)]
    by_id: HashMap<ComponentId, usize>,

    #[serde(skip)]
    by_designation: HashMap<String, usize>,
}

impl TryFrom<DiagramDoc> for Diagram {
    type Error = VoltflowError;

    fn try_from(doc: DiagramDoc) -> Result<Self> {
        Diagram::new(doc.components, doc.wires)
    }
}

impl Diagram {
    /// Build a diagram, checking that component ids, designations and wire
    /// ids are unique.
    ///
    /// Wire endpoints are not checked here: a wire that references an
    /// unknown component is simply never turned into a graph edge.
    pub fn new(components: Vec<Component>, wires: Vec<Wire>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(components.len());
        let mut by_designation = HashMap::with_capacity(components.len());

        for (idx, component) in components.iter().enumerate() {
            if by_id.insert(component.id.clone(), idx).is_some() {
                return Err(VoltflowError::DuplicateComponent {
                    id: component.id.to_string(),
                });
            }
            if let Some(prev) = by_designation.insert(component.designation.clone(), idx) {
                return Err(VoltflowError::DuplicateDesignation {
                    designation: component.designation.clone(),
                    first: components[prev].id.to_string(),
                    second: component.id.to_string(),
                });
            }
        }

        let mut wire_ids = std::collections::HashSet::with_capacity(wires.len());
        for wire in &wires {
            if !wire_ids.insert(&wire.id) {
                return Err(VoltflowError::DuplicateWire {
                    id: wire.id.to_string(),
                });
            }
        }

        Ok(Self {
            components,
            wires,
            by_id,
            by_designation,
        })
    }

    /// Build a diagram from a parsed DSL description.
    pub fn from_ast(ast: &DiagramAst) -> Result<Self> {
        let components = ast
            .components
            .iter()
            .map(Component::from_def)
            .collect::<Result<Vec<_>>>()?;

        let wires = ast
            .wires
            .iter()
            .map(|w| Wire::new(&w.id, &w.voltage_level, &w.from, &w.to))
            .collect();

        Self::new(components, wires)
    }

    /// Decode a diagram from its JSON interchange form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.by_id.get(id).map(|&idx| &self.components[idx])
    }

    /// Find a component by its designation (device tag).
    pub fn find(&self, designation: &str) -> Option<&Component> {
        self.by_designation
            .get(designation)
            .map(|&idx| &self.components[idx])
    }

    pub(crate) fn find_mut(&mut self, designation: &str) -> Option<&mut Component> {
        let idx = *self.by_designation.get(designation)?;
        Some(&mut self.components[idx])
    }

    /// Designation of a component id, falling back to the raw id.
    pub fn designation_of<'a>(&'a self, id: &'a ComponentId) -> &'a str {
        self.component(id)
            .map(|c| c.designation.as_str())
            .unwrap_or(id.as_str())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
