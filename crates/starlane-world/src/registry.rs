//! Location registry: the records behind every node of the gate network.
//!
//! [`WorldRegistry`] owns both the [`Location`] records and the
//! [`LocationGraph`] joining them. Registering a location always creates its
//! graph node, so a location with no gates is still routable to itself.
//!
//! The registry is built once (by the generator or a fixture) and then
//! shared read-only, typically behind an `Arc`.

use std::collections::{BTreeMap, HashMap};

use starlane_types::{Location, LocationId};

use crate::error::WorldError;
use crate::graph::LocationGraph;

/// All locations of the world plus the gates between them.
#[derive(Debug, Clone, Default)]
pub struct WorldRegistry {
    /// Location records indexed by id.
    locations: BTreeMap<LocationId, Location>,
    /// Exact-name index. The first location registered under a name keeps it.
    by_name: HashMap<String, LocationId>,
    /// The gate network over the registered ids.
    gates: LocationGraph,
}

impl WorldRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location and create its graph node.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateLocation`] if the id is taken.
    pub fn add_location(&mut self, location: Location) -> Result<(), WorldError> {
        let id = location.id;
        if self.locations.contains_key(&id) {
            return Err(WorldError::DuplicateLocation(id));
        }
        self.by_name.entry(location.name.clone()).or_insert(id);
        self.locations.insert(id, location);
        self.gates.add_node(id);
        Ok(())
    }

    /// Look up a location record.
    pub fn get_location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Find a location id by exact (case-sensitive) name.
    pub fn find_by_name(&self, name: &str) -> Option<LocationId> {
        self.by_name.get(name).copied()
    }

    /// Name to show for `id`: the location name, or `#<id>` if unregistered.
    pub fn display_name(&self, id: LocationId) -> String {
        self.locations
            .get(&id)
            .map_or_else(|| format!("#{id}"), |loc| loc.name.clone())
    }

    /// Number of registered locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Whether no location has been registered.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// All location ids in ascending order.
    pub fn location_ids(&self) -> Vec<LocationId> {
        self.locations.keys().copied().collect()
    }

    /// Iterate over all locations in id order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// The gate network.
    pub const fn gates(&self) -> &LocationGraph {
        &self.gates
    }

    /// Mutable access to the gate network, for world builders only.
    pub const fn gates_mut(&mut self) -> &mut LocationGraph {
        &mut self.gates
    }
}

#[cfg(test)]
mod tests {
    use starlane_types::{LocationCategory, SecurityLevel};

    use super::*;

    #[test]
    fn add_location_creates_graph_node() {
        let mut world = WorldRegistry::new();
        assert!(world.add_location(Location::named(LocationId(4), "kelnor")).is_ok());
        assert!(world.gates().has_node(LocationId(4)));
        assert!(world.gates().neighbors(LocationId(4)).is_empty());
        assert_eq!(world.location_count(), 1);
    }

    #[test]
    fn duplicate_location_rejected() {
        let mut world = WorldRegistry::new();
        assert!(world.add_location(Location::named(LocationId(1), "sol")).is_ok());
        let again = world.add_location(Location::named(LocationId(1), "other"));
        assert!(matches!(again, Err(WorldError::DuplicateLocation(LocationId(1)))));
        assert_eq!(world.find_by_name("other"), None);
    }

    #[test]
    fn get_location_returns_record() {
        let mut world = WorldRegistry::new();
        let loc = Location::new(
            LocationId(2),
            "vega",
            LocationCategory::Core,
            SecurityLevel::High,
        );
        assert!(world.add_location(loc.clone()).is_ok());
        assert_eq!(world.get_location(LocationId(2)), Some(&loc));
        assert_eq!(world.get_location(LocationId(3)), None);
    }

    #[test]
    fn find_by_name_is_exact() {
        let mut world = WorldRegistry::new();
        assert!(world.add_location(Location::named(LocationId(1), "sol")).is_ok());
        assert_eq!(world.find_by_name("sol"), Some(LocationId(1)));
        assert_eq!(world.find_by_name("Sol"), None);
        assert_eq!(world.find_by_name("so"), None);
    }

    #[test]
    fn first_registration_keeps_name() {
        let mut world = WorldRegistry::new();
        assert!(world.add_location(Location::named(LocationId(1), "twin")).is_ok());
        assert!(world.add_location(Location::named(LocationId(2), "twin")).is_ok());
        assert_eq!(world.find_by_name("twin"), Some(LocationId(1)));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut world = WorldRegistry::new();
        assert!(world.add_location(Location::named(LocationId(1), "sol")).is_ok());
        assert_eq!(world.display_name(LocationId(1)), "sol");
        assert_eq!(world.display_name(LocationId(77)), "#77");
    }
}
