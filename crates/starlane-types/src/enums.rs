//! Enumeration types describing how a location is classified.

use serde::{Deserialize, Serialize};

/// Broad development category of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationCategory {
    /// Densely settled heartland.
    Core,
    /// Partially settled border region.
    Frontier,
    /// Abandoned or uninhabitable space.
    Dead,
}

/// Policing level enforced at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    /// Heavily patrolled.
    High,
    /// Occasional patrols.
    Medium,
    /// Rarely patrolled.
    Low,
    /// Lawless.
    None,
}

impl core::fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Core => "core",
            Self::Frontier => "frontier",
            Self::Dead => "dead",
        };
        f.write_str(label)
    }
}

impl core::fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        };
        f.write_str(label)
    }
}
