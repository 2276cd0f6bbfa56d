//! Sensor-like devices: field sensors, PLC input states and manual switches.
//!
//! All of them share standard contact logic:
//!
//! | contact | state | closed? |
//! |---------|-------|---------|
//! | NO      | ON    | yes     |
//! | NO      | OFF   | no      |
//! | NC      | OFF   | yes     |
//! | NC      | ON    | no      |
//!
//! An `UNKNOWN` state never closes a contact.

use super::ComponentState;

/// The sensing principle of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Inductive / capacitive proximity switch
    Proximity,
    /// Light barrier or reflex sensor
    Photoelectric,
    /// Mechanical limit switch
    Limit,
    /// Pressure switch
    Pressure,
    /// Thermostat / temperature switch
    Temperature,
    /// Logical state of a PLC input treated as a contact
    PlcInputState,
}

impl SensorKind {
    /// Upper-snake suffix used in component type tags (`SENSOR_<suffix>`).
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Proximity => "PROXIMITY",
            Self::Photoelectric => "PHOTOELECTRIC",
            Self::Limit => "LIMIT",
            Self::Pressure => "PRESSURE",
            Self::Temperature => "TEMPERATURE",
            Self::PlcInputState => "PLC_INPUT_STATE",
        }
    }

    /// Parse a sensor kind from a tag suffix or a short DSL word.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "PROXIMITY" | "PROX" | "INDUCTIVE" => Some(Self::Proximity),
            "PHOTOELECTRIC" | "PHOTO" | "OPTICAL" => Some(Self::Photoelectric),
            "LIMIT" | "LIMIT_SWITCH" => Some(Self::Limit),
            "PRESSURE" => Some(Self::Pressure),
            "TEMPERATURE" | "TEMP" | "THERMOSTAT" => Some(Self::Temperature),
            "PLC_INPUT_STATE" | "PLC_INPUT" | "INPUT" => Some(Self::PlcInputState),
            _ => None,
        }
    }
}

/// Whether a sensor-like contact is closed for the given state.
pub fn contact_closed(normally_open: bool, state: ComponentState) -> bool {
    match state {
        ComponentState::On => normally_open,
        ComponentState::Off => !normally_open,
        ComponentState::Unknown => false,
    }
}
