//! Hand-built development world.
//!
//! Four locations on a line with one shortcut:
//!
//! ```text
//! sol(1) -- vega(2) -- eos(3) -- kelnor(4)
//!    \_________________/
//! ```
//!
//! Gates are added in the order (1,2), (2,3), (3,4), (1,3). With that order
//! the fewest-jumps route from sol to kelnor is sol, eos, kelnor.

use starlane_types::{Location, LocationId};

use crate::error::WorldError;
use crate::registry::WorldRegistry;

/// Identifiers of the development world's locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevLocationIds {
    /// The hub at one end of the line.
    pub sol: LocationId,
    /// Second stop on the line.
    pub vega: LocationId,
    /// Third stop, also reachable from sol by the shortcut.
    pub eos: LocationId,
    /// The far end of the line.
    pub kelnor: LocationId,
}

impl DevLocationIds {
    /// The fixed ids used by [`dev_world`].
    pub const FIXED: Self = Self {
        sol: LocationId(1),
        vega: LocationId(2),
        eos: LocationId(3),
        kelnor: LocationId(4),
    };
}

/// Build the four-location development world.
///
/// # Errors
///
/// Returns [`WorldError`] if the registry rejects a location (should not
/// happen with the hard-coded data).
pub fn dev_world() -> Result<(WorldRegistry, DevLocationIds), WorldError> {
    let ids = DevLocationIds::FIXED;
    let mut world = WorldRegistry::new();

    world.add_location(Location::named(ids.sol, "sol"))?;
    world.add_location(Location::named(ids.vega, "vega"))?;
    world.add_location(Location::named(ids.eos, "eos"))?;
    world.add_location(Location::named(ids.kelnor, "kelnor"))?;

    let gates = world.gates_mut();
    gates.add_gate(ids.sol, ids.vega);
    gates.add_gate(ids.vega, ids.eos);
    gates.add_gate(ids.eos, ids.kelnor);
    // Shortcut so routes from sol skip vega.
    gates.add_gate(ids.sol, ids.eos);

    Ok((world, ids))
}
