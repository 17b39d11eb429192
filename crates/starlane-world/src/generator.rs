//! Deterministic procedural world generation.
//!
//! [`generate`] builds a [`WorldRegistry`] of `count` locations from a seed.
//! Every random draw comes from one [`StdRng`] seeded with that value and is
//! consumed in a fixed order:
//!
//! 1. One percentile per location (ids `1..=count`) picks its class:
//!    below 15 is Core/High, below 65 is Frontier/Medium, the rest Dead/Low.
//! 2. The connectivity pass adds `count - 1` gates (see [`ConnectivityMode`]).
//! 3. The shortcut pass adds `count / 8` gates between random distinct ids.
//!
//! The same `(count, seed, mode)` always produces the same locations and
//! the same gates in the same insertion order, so routes are reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use starlane_types::{Location, LocationCategory, LocationId, SecurityLevel};
use tracing::info;

use crate::error::WorldError;
use crate::registry::WorldRegistry;

/// Percentile below which a location is Core.
const CORE_PERCENTILE: u32 = 15;

/// Percentile below which a non-core location is Frontier.
const FRONTIER_PERCENTILE: u32 = 65;

/// One shortcut gate per this many locations.
const SHORTCUT_DIVISOR: u32 = 8;

/// How the connectivity pass joins locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityMode {
    /// Shuffle the ids and attach each one to a random earlier id, giving a
    /// random spanning tree. The resulting world is always connected.
    #[default]
    SpanningTree,
    /// Draw `count - 1` independent random id pairs. Cheaper to reason about
    /// for legacy seeds, but may leave isolated clusters.
    RandomPairs,
}

/// Parameters for a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Number of locations to create.
    pub count: u32,
    /// Seed for the generator's RNG.
    pub seed: u64,
    /// Connectivity pass strategy.
    pub connectivity: ConnectivityMode,
}

impl GeneratorOptions {
    /// Options with the default connectivity mode.
    pub const fn new(count: u32, seed: u64) -> Self {
        Self {
            count,
            seed,
            connectivity: ConnectivityMode::SpanningTree,
        }
    }
}

/// Generate a world of `count` locations from `seed`.
///
/// # Errors
///
/// Returns [`WorldError`] if registering a location fails, which cannot
/// happen for freshly numbered ids.
pub fn generate(count: u32, seed: u64) -> Result<WorldRegistry, WorldError> {
    generate_with(GeneratorOptions::new(count, seed))
}

/// Generate a world with explicit options.
///
/// # Errors
///
/// Returns [`WorldError`] if registering a location fails.
pub fn generate_with(options: GeneratorOptions) -> Result<WorldRegistry, WorldError> {
    let GeneratorOptions {
        count,
        seed,
        connectivity,
    } = options;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = WorldRegistry::new();

    // 1) Locations.
    for raw in 1..=count {
        let percentile: u32 = rng.random_range(0..100);
        let (category, security) = classify(percentile);
        world.add_location(Location::new(
            LocationId(raw),
            location_name(raw),
            category,
            security,
        ))?;
    }

    // 2) Connectivity.
    let mut order: Vec<LocationId> = (1..=count).map(LocationId).collect();
    order.shuffle(&mut rng);

    match connectivity {
        ConnectivityMode::SpanningTree => {
            for (i, &child) in order.iter().enumerate().skip(1) {
                let parent_idx = rng.random_range(0..i);
                if let Some(&parent) = order.get(parent_idx) {
                    world.gates_mut().add_gate(child, parent);
                }
            }
        }
        ConnectivityMode::RandomPairs => {
            for _ in 1..order.len() {
                let a = LocationId(rng.random_range(1..=count));
                let b = LocationId(rng.random_range(1..=count));
                world.gates_mut().add_gate(a, b);
            }
        }
    }

    // 3) Shortcuts.
    let shortcuts = count.checked_div(SHORTCUT_DIVISOR).unwrap_or(0);
    for _ in 0..shortcuts {
        let a = rng.random_range(1..=count);
        let mut b = rng.random_range(1..=count);
        while b == a {
            b = rng.random_range(1..=count);
        }
        world.gates_mut().add_gate(LocationId(a), LocationId(b));
    }

    info!(
        count,
        seed,
        ?connectivity,
        gates = world.gates().gate_count(),
        connected = world.gates().is_connected(),
        "World generated"
    );

    Ok(world)
}

/// Map a percentile in `0..100` to a category and security level.
const fn classify(percentile: u32) -> (LocationCategory, SecurityLevel) {
    if percentile < CORE_PERCENTILE {
        (LocationCategory::Core, SecurityLevel::High)
    } else if percentile < FRONTIER_PERCENTILE {
        (LocationCategory::Frontier, SecurityLevel::Medium)
    } else {
        (LocationCategory::Dead, SecurityLevel::Low)
    }
}

/// Fixed-width sequence name, e.g. `sys-0042`.
fn location_name(index: u32) -> String {
    format!("sys-{index:04}")
}
