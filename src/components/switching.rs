//! Component state and the toggle state machine.
//!
//! States are `ON`, `OFF` and `UNKNOWN`. Transitions only happen through an
//! explicit toggle, never through propagation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ComponentKind;

/// Logical state of a togglable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentState {
    On,
    Off,
    /// Valid only before the diagram has been initialised
    #[default]
    Unknown,
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Unknown => "UNKNOWN",
        })
    }
}

impl FromStr for ComponentState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ON" | "1" | "TRUE" | "CLOSED" => Ok(Self::On),
            "OFF" | "0" | "FALSE" | "OPEN" => Ok(Self::Off),
            "UNKNOWN" | "?" => Ok(Self::Unknown),
            other => Err(format!("unknown state '{}'", other)),
        }
    }
}

/// State a component moves to when toggled, or `None` if its kind has no
/// togglable state.
pub fn toggled_state(kind: ComponentKind, state: ComponentState) -> Option<ComponentState> {
    match kind {
        // Actuated / not actuated. An unknown sensor is treated as being actuated.
        ComponentKind::Sensor(_) | ComponentKind::Switch => Some(match state {
            ComponentState::On => ComponentState::Off,
            ComponentState::Off | ComponentState::Unknown => ComponentState::On,
        }),
        // Manual override of a coil
        ComponentKind::Contactor | ComponentKind::Relay => Some(flip(state)),
        // ON = good, OFF = blown / tripped
        ComponentKind::Fuse | ComponentKind::CircuitBreaker => Some(flip(state)),
        ComponentKind::PowerSource(_)
        | ComponentKind::Motor
        | ComponentKind::Lamp
        | ComponentKind::Terminal
        | ComponentKind::Transformer
        | ComponentKind::Plc
        | ComponentKind::Other => None,
    }
}

fn flip(state: ComponentState) -> ComponentState {
    match state {
        ComponentState::Off | ComponentState::Unknown => ComponentState::On,
        ComponentState::On => ComponentState::Off,
    }
}
