//! Core records: locations and the result of a route query.

use serde::{Deserialize, Serialize};

use crate::enums::{LocationCategory, SecurityLevel};
use crate::ids::{FactionId, LocationId};

/// A place in the world graph.
///
/// Locations are immutable once registered. The gate network only ever
/// stores their [`LocationId`]; everything else lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier.
    pub id: LocationId,
    /// Unique display name, used for command lookups.
    pub name: String,
    /// Development category.
    pub category: LocationCategory,
    /// Policing level.
    pub security: SecurityLevel,
    /// Owning faction, [`FactionId::UNCLAIMED`] if nobody holds it.
    pub owner_faction: FactionId,
}

impl Location {
    /// Create an unclaimed location with explicit classification.
    pub fn new(
        id: LocationId,
        name: impl Into<String>,
        category: LocationCategory,
        security: SecurityLevel,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            security,
            owner_faction: FactionId::UNCLAIMED,
        }
    }

    /// Create an unclaimed frontier location with low security.
    ///
    /// Hand-written fixtures only care about ids and names.
    pub fn named(id: LocationId, name: impl Into<String>) -> Self {
        Self::new(id, name, LocationCategory::Frontier, SecurityLevel::Low)
    }
}

/// Outcome of a successful shortest-route query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Number of gate traversals, always `path.len() - 1`.
    pub jumps: u32,
    /// Every location on the route, both endpoints included.
    pub path: Vec<LocationId>,
}
