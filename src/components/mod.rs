//! Component models for diagram simulation.
//!
//! This module provides the typed representation of every physical device
//! that can appear in a wiring diagram:
//! - Sources: control supplies and mains feeds
//! - Switching: contactors and relays (coil + contacts)
//! - Sensor-like: field sensors, PLC input states, manual switches
//! - Protection: fuses and circuit breakers
//! - Loads and passive parts: motors, lamps, terminals, transformers
//!
//! Each component answers one question for the engine: does it conduct?
//! The answer is an exhaustive match over [`ComponentKind`], so a new kind
//! cannot silently fall through to "always conducts".

mod sensors;
mod sources;
mod switching;

pub use sensors::{contact_closed, SensorKind};
pub use sources::PowerTier;
pub use switching::{toggled_state, ComponentState};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, VoltageClass};
use crate::dsl::{ComponentDef, ComponentType};
use crate::error::{Result, VoltflowError};

/// Closed set of component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ComponentKind {
    PowerSource(PowerTier),
    Contactor,
    Relay,
    Sensor(SensorKind),
    /// Push button or selector switch
    Switch,
    Fuse,
    CircuitBreaker,
    Motor,
    Lamp,
    Terminal,
    Transformer,
    Plc,
    Other,
}

impl ComponentKind {
    /// Parse an upper-snake type tag such as `SENSOR_LIMIT` or `POWER_SOURCE_HIGH`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let upper = tag.trim().to_ascii_uppercase();
        if let Some(suffix) = upper.strip_prefix("SENSOR_") {
            return SensorKind::from_word(suffix).map(Self::Sensor);
        }
        match upper.as_str() {
            "POWER_SOURCE_LOW" => Some(Self::PowerSource(PowerTier::Low)),
            "POWER_SOURCE_HIGH" => Some(Self::PowerSource(PowerTier::High)),
            "CONTACTOR" => Some(Self::Contactor),
            "RELAY" => Some(Self::Relay),
            "SWITCH" => Some(Self::Switch),
            "FUSE" => Some(Self::Fuse),
            "CIRCUIT_BREAKER" => Some(Self::CircuitBreaker),
            "MOTOR" => Some(Self::Motor),
            "LAMP" => Some(Self::Lamp),
            "TERMINAL" => Some(Self::Terminal),
            "TRANSFORMER" => Some(Self::Transformer),
            "PLC" => Some(Self::Plc),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn is_power_source(&self) -> bool {
        matches!(self, Self::PowerSource(_))
    }

    /// Sensors and switches: contacts follow NO/NC logic.
    pub fn is_sensor_like(&self) -> bool {
        matches!(self, Self::Sensor(_) | Self::Switch)
    }

    /// Contactors and relays: the coil sits on the control side, the contacts
    /// on the power side.
    pub fn is_bridging(&self) -> bool {
        matches!(self, Self::Contactor | Self::Relay)
    }

    pub fn is_togglable(&self) -> bool {
        self.is_sensor_like()
            || self.is_bridging()
            || matches!(self, Self::Fuse | Self::CircuitBreaker)
    }

    /// Loads searched for when tracing the load side of a contact circuit.
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Motor)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerSource(tier) => f.write_str(tier.tag()),
            Self::Sensor(kind) => write!(f, "SENSOR_{}", kind.tag()),
            Self::Contactor => f.write_str("CONTACTOR"),
            Self::Relay => f.write_str("RELAY"),
            Self::Switch => f.write_str("SWITCH"),
            Self::Fuse => f.write_str("FUSE"),
            Self::CircuitBreaker => f.write_str("CIRCUIT_BREAKER"),
            Self::Motor => f.write_str("MOTOR"),
            Self::Lamp => f.write_str("LAMP"),
            Self::Terminal => f.write_str("TERMINAL"),
            Self::Transformer => f.write_str("TRANSFORMER"),
            Self::Plc => f.write_str("PLC"),
            Self::Other => f.write_str("OTHER"),
        }
    }
}

impl TryFrom<String> for ComponentKind {
    type Error = String;

    fn try_from(tag: String) -> std::result::Result<Self, Self::Error> {
        Self::from_tag(&tag).ok_or_else(|| format!("unknown component type '{}'", tag))
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        kind.to_string()
    }
}

fn default_normally_open() -> bool {
    true
}

/// A physical device in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    /// Human-readable device tag, e.g. `-K1`
    pub designation: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub voltage_rating: VoltageClass,
    #[serde(default)]
    pub state: ComponentState,
    /// Meaningful only for sensor-like kinds
    #[serde(default = "default_normally_open")]
    pub normally_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Component {
    /// Create a component in the `UNKNOWN` state with a normally-open contact.
    pub fn new(
        id: impl Into<String>,
        designation: impl Into<String>,
        kind: ComponentKind,
        voltage_rating: &str,
    ) -> Self {
        Self {
            id: ComponentId::new(id),
            designation: designation.into(),
            kind,
            voltage_rating: VoltageClass::new(voltage_rating),
            state: ComponentState::Unknown,
            normally_open: true,
            description: None,
        }
    }

    pub fn with_state(mut self, state: ComponentState) -> Self {
        self.state = state;
        self
    }

    pub fn normally_closed(mut self) -> Self {
        self.normally_open = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Create a component from a DSL definition.
    pub fn from_def(def: &ComponentDef) -> Result<Self> {
        let mut tier = None;
        let mut sensor_kind = None;
        let mut normally_open = None;

        let is_source = def.component_type == ComponentType::Source;
        let is_sensor = def.component_type == ComponentType::Sensor;

        for flag in &def.flags {
            let lower = flag.to_ascii_lowercase();
            match lower.as_str() {
                "no" => normally_open = Some(true),
                "nc" => normally_open = Some(false),
                _ if is_source && PowerTier::from_word(flag).is_some() => {
                    tier = PowerTier::from_word(flag);
                }
                _ if is_sensor && SensorKind::from_word(flag).is_some() => {
                    sensor_kind = SensorKind::from_word(flag);
                }
                _ => {
                    return Err(VoltflowError::invalid_component(
                        &def.id,
                        def.line,
                        format!("unexpected flag '{}'", flag),
                    ));
                }
            }
        }

        let has_contact = matches!(
            def.component_type,
            ComponentType::Sensor | ComponentType::Switch
        );
        if normally_open.is_some() && !has_contact {
            return Err(VoltflowError::invalid_component(
                &def.id,
                def.line,
                "NO/NC applies only to sensors and switches",
            ));
        }

        let kind = match def.component_type {
            ComponentType::Source => ComponentKind::PowerSource(tier.unwrap_or(PowerTier::Low)),
            ComponentType::Sensor => {
                let sensor_kind = sensor_kind.ok_or_else(|| {
                    VoltflowError::invalid_component(
                        &def.id,
                        def.line,
                        "sensor requires a kind (proximity, photoelectric, limit, pressure, temperature, plc_input)",
                    )
                })?;
                ComponentKind::Sensor(sensor_kind)
            }
            ComponentType::Contactor => ComponentKind::Contactor,
            ComponentType::Relay => ComponentKind::Relay,
            ComponentType::Switch => ComponentKind::Switch,
            ComponentType::Fuse => ComponentKind::Fuse,
            ComponentType::Breaker => ComponentKind::CircuitBreaker,
            ComponentType::Motor => ComponentKind::Motor,
            ComponentType::Lamp => ComponentKind::Lamp,
            ComponentType::Terminal => ComponentKind::Terminal,
            ComponentType::Transformer => ComponentKind::Transformer,
            ComponentType::Plc => ComponentKind::Plc,
            ComponentType::Other => ComponentKind::Other,
        };

        // Diagrams written by hand start initialised: togglable parts are OFF.
        let state = match def.params.get("state") {
            Some(text) => text.parse::<ComponentState>().map_err(|e| {
                VoltflowError::invalid_component(&def.id, def.line, e)
            })?,
            None if kind.is_togglable() => ComponentState::Off,
            None => ComponentState::Unknown,
        };

        if let Some(key) = def.params.keys().find(|k| k.as_str() != "state") {
            return Err(VoltflowError::invalid_component(
                &def.id,
                def.line,
                format!("unknown parameter '{}'", key),
            ));
        }

        Ok(Component {
            id: ComponentId::new(def.id.clone()),
            designation: def.designation.clone(),
            kind,
            voltage_rating: VoltageClass::new(&def.voltage_class),
            state,
            normally_open: normally_open.unwrap_or(true),
            description: def.description.clone(),
        })
    }

    /// Whether current passes through this component.
    ///
    /// `coil_energized` is only consulted for contactors and relays: their
    /// contacts close when their own coil carries voltage.
    pub fn conducts(&self, coil_energized: bool) -> bool {
        match self.kind {
            ComponentKind::PowerSource(_) => true,
            ComponentKind::Sensor(_) | ComponentKind::Switch => {
                contact_closed(self.normally_open, self.state)
            }
            // No blown state is modelled yet; a tripped fuse still conducts.
            ComponentKind::Fuse | ComponentKind::CircuitBreaker => true,
            ComponentKind::Contactor | ComponentKind::Relay => coil_energized,
            ComponentKind::Motor
            | ComponentKind::Lamp
            | ComponentKind::Terminal
            | ComponentKind::Transformer
            | ComponentKind::Plc
            | ComponentKind::Other => true,
        }
    }

    /// Apply the kind's toggle transition. Returns `false` if the kind has
    /// no togglable state.
    pub fn toggle(&mut self) -> bool {
        match toggled_state(self.kind, self.state) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }
}
