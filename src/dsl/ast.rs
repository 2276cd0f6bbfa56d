//! Abstract Syntax Tree types for the diagram DSL.

use std::collections::HashMap;

/// Complete AST representation of a parsed diagram.
#[derive(Debug, Clone, Default)]
pub struct DiagramAst {
    /// All component definitions, in file order
    pub components: Vec<ComponentDef>,
    /// All wire definitions, in file order
    pub wires: Vec<WireDef>,
    /// Voltage classes declared with `.control`
    pub control_classes: Vec<String>,
    /// Voltage classes declared with `.power`
    pub power_classes: Vec<String>,
}

impl DiagramAst {
    /// Create a new empty diagram AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A component definition from the DSL.
#[derive(Debug, Clone)]
pub struct ComponentDef {
    /// Component type keyword
    pub component_type: ComponentType,
    /// Unique component id
    pub id: String,
    /// Device tag, e.g. `-K1`
    pub designation: String,
    /// Voltage rating class tag
    pub voltage_class: String,
    /// Bare flags after the rating (`no`, `nc`, `high`, `proximity`, ...)
    pub flags: Vec<String>,
    /// `key=value` parameters
    pub params: HashMap<String, String>,
    /// Optional quoted description
    pub description: Option<String>,
    /// Source line number for error reporting
    pub line: usize,
}

/// A wire definition from the DSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireDef {
    pub id: String,
    pub voltage_level: String,
    pub from: String,
    pub to: String,
    pub line: usize,
}

/// Component type keywords supported by the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    /// Power source (tier chosen by `low` / `high` flag)
    Source,
    Contactor,
    Relay,
    /// Sensor (sub-kind chosen by flag)
    Sensor,
    /// Push button / selector switch
    Switch,
    Fuse,
    Breaker,
    Motor,
    Lamp,
    Terminal,
    Transformer,
    Plc,
    Other,
}

impl ComponentType {
    /// Parse a component type from a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "SOURCE" | "SRC" | "PSU" | "SUPPLY" => Some(Self::Source),
            "CONTACTOR" | "K" => Some(Self::Contactor),
            "RELAY" => Some(Self::Relay),
            "SENSOR" => Some(Self::Sensor),
            "SWITCH" | "BUTTON" | "SW" => Some(Self::Switch),
            "FUSE" => Some(Self::Fuse),
            "BREAKER" | "CB" | "MCB" => Some(Self::Breaker),
            "MOTOR" => Some(Self::Motor),
            "LAMP" | "LIGHT" => Some(Self::Lamp),
            "TERMINAL" | "X" => Some(Self::Terminal),
            "TRANSFORMER" | "TR" => Some(Self::Transformer),
            "PLC" => Some(Self::Plc),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }

    /// Parse a full type tag (`SENSOR_LIMIT`, `POWER_SOURCE_HIGH`,
    /// `CIRCUIT_BREAKER`). Returns the keyword plus the flag the tag implies.
    pub fn from_tag(tag: &str) -> Option<(Self, Option<String>)> {
        let upper = tag.to_ascii_uppercase();
        if let Some(suffix) = upper.strip_prefix("SENSOR_") {
            return Some((Self::Sensor, Some(suffix.to_string())));
        }
        match upper.as_str() {
            "POWER_SOURCE_LOW" => Some((Self::Source, Some("low".to_string()))),
            "POWER_SOURCE_HIGH" => Some((Self::Source, Some("high".to_string()))),
            "CIRCUIT_BREAKER" => Some((Self::Breaker, None)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(ComponentType::from_keyword("contactor"), Some(ComponentType::Contactor));
        assert_eq!(ComponentType::from_keyword("MCB"), Some(ComponentType::Breaker));
        assert_eq!(ComponentType::from_keyword("resistor"), None);
    }

    #[test]
    fn test_tags() {
        assert_eq!(
            ComponentType::from_tag("SENSOR_PHOTOELECTRIC"),
            Some((ComponentType::Sensor, Some("PHOTOELECTRIC".to_string())))
        );
        assert_eq!(
            ComponentType::from_tag("power_source_high"),
            Some((ComponentType::Source, Some("high".to_string())))
        );
        assert_eq!(ComponentType::from_tag("CONTACTOR"), None);
    }
}
