//! Power sources: control supplies and mains feeds.

/// Which side of the installation a power source feeds.
///
/// The tier is descriptive. Graph membership is decided by the source's
/// voltage class, not by its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerTier {
    /// Control supply (power supply unit, control transformer secondary)
    Low,
    /// Mains / load feed
    High,
}

impl PowerTier {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Low => "POWER_SOURCE_LOW",
            Self::High => "POWER_SOURCE_HIGH",
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "LOW" | "CONTROL" => Some(Self::Low),
            "HIGH" | "MAINS" => Some(Self::High),
            _ => None,
        }
    }
}
