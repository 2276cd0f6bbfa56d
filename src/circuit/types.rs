//! Core identifier and voltage-class types for diagram representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a component, owned by the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque identifier of a wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub String);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WireId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A nominal voltage class tag such as `24VDC` or `400VAC`.
///
/// Classes are free-form labels used to partition the diagram, not numbers
/// to compare. They are normalised on construction (ASCII uppercase, no
/// whitespace) so that `"24 vdc"` and `"24VDC"` are the same class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct VoltageClass(String);

impl VoltageClass {
    pub fn new(tag: &str) -> Self {
        let normalized: String = tag
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading decimal number of the tag (`"24VDC"` -> 24.0).
    ///
    /// Informational only; returns 0.0 when the tag has no leading number.
    pub fn nominal_value(&self) -> f64 {
        let end = self
            .0
            .char_indices()
            .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        self.0[..end].parse().unwrap_or(0.0)
    }
}

impl fmt::Display for VoltageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VoltageClass {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VoltageClass {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<VoltageClass> for String {
    fn from(class: VoltageClass) -> Self {
        class.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_voltage_class_normalization() {
        assert_eq!(VoltageClass::new("24 vdc"), VoltageClass::new("24VDC"));
        assert_eq!(VoltageClass::new(" 400VAC ").as_str(), "400VAC");
        assert_ne!(VoltageClass::new("24VDC"), VoltageClass::new("24VAC"));
    }

    #[test]
    fn test_nominal_value() {
        assert_relative_eq!(VoltageClass::new("24VDC").nominal_value(), 24.0);
        assert_relative_eq!(VoltageClass::new("0.5VDC").nominal_value(), 0.5);
        assert_relative_eq!(VoltageClass::new("400VAC").nominal_value(), 400.0);
        assert_relative_eq!(VoltageClass::new("MAINS").nominal_value(), 0.0);
    }

    #[test]
    fn test_voltage_class_serde() {
        let class: VoltageClass = serde_json::from_str("\"230 vac\"").unwrap();
        assert_eq!(class.as_str(), "230VAC");
        assert_eq!(serde_json::to_string(&class).unwrap(), "\"230VAC\"");
    }
}
